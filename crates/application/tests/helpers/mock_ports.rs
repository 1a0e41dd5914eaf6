use async_trait::async_trait;
use ferrous_dns64_application::ports::{CacheStore, UpstreamResolver};
use ferrous_dns64_domain::{CacheKey, DnsQuestion, DomainError, RecordType};
use hickory_proto::op::Message;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Default)]
pub struct MockCacheStore {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    ttls: Arc<Mutex<HashMap<String, Duration>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    gets: Arc<AtomicUsize>,
    sets: Arc<AtomicUsize>,
}

impl MockCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_raw(&self, key: &str, value: Vec<u8>) {
        self.entries.lock().unwrap().insert(key.to_string(), value);
    }

    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn ttl_of(&self, key: &str) -> Option<Duration> {
        self.ttls.lock().unwrap().get(key).copied()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn set_count(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    /// Cache writes are detached; give them a chance to land.
    pub async fn wait_for_sets(&self, expected: usize) {
        for _ in 0..200 {
            if self.set_count() >= expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!(
            "expected {} cache writes, saw {}",
            expected,
            self.set_count()
        );
    }
}

#[async_trait]
impl CacheStore for MockCacheStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>, DomainError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DomainError::CacheUnavailable("connection refused".to_string()));
        }
        Ok(self.entries.lock().unwrap().get(key.as_str()).cloned())
    }

    async fn set(&self, key: &CacheKey, value: Vec<u8>, ttl: Duration) -> Result<(), DomainError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::CacheWriteFailed {
                key: key.to_string(),
                reason: "read-only replica".to_string(),
            });
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value);
        self.ttls.lock().unwrap().insert(key.to_string(), ttl);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamCall {
    pub name: String,
    pub record_type: RecordType,
    pub recursion_desired: bool,
}

#[derive(Clone, Default)]
pub struct MockUpstreamResolver {
    responses: Arc<Mutex<HashMap<(String, RecordType), Message>>>,
    errors: Arc<Mutex<HashMap<(String, RecordType), DomainError>>>,
    calls: Arc<Mutex<Vec<UpstreamCall>>>,
    next_id: Arc<AtomicUsize>,
}

impl MockUpstreamResolver {
    pub fn new() -> Self {
        Self {
            next_id: Arc::new(AtomicUsize::new(0x4000)),
            ..Default::default()
        }
    }

    pub fn set_response(&self, name: &str, record_type: RecordType, response: Message) {
        self.responses
            .lock()
            .unwrap()
            .insert((name.to_string(), record_type), response);
    }

    pub fn set_error(&self, name: &str, record_type: RecordType, error: DomainError) {
        self.errors
            .lock()
            .unwrap()
            .insert((name.to_string(), record_type), error);
    }

    pub fn calls(&self) -> Vec<UpstreamCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_for(&self, record_type: RecordType) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.record_type == record_type)
            .count()
    }
}

#[async_trait]
impl UpstreamResolver for MockUpstreamResolver {
    async fn exchange(
        &self,
        question: &DnsQuestion,
        recursion_desired: bool,
    ) -> Result<Message, DomainError> {
        self.calls.lock().unwrap().push(UpstreamCall {
            name: question.name.to_string(),
            record_type: question.record_type,
            recursion_desired,
        });

        let key = (question.name.to_string(), question.record_type);

        if let Some(error) = self.errors.lock().unwrap().get(&key) {
            return Err(error.clone());
        }

        let mut response = self
            .responses
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| {
                super::nxdomain_response(&question.name, question.record_type)
            });

        // Every upstream exchange carries its own, unrelated id.
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as u16;
        response.set_id(id);
        Ok(response)
    }

    fn server_name(&self) -> String {
        "mock-upstream:53".to_string()
    }
}
