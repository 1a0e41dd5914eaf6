use super::RecordType;
use std::sync::Arc;

/// One question from an inbound query.
///
/// The name is always stored fully qualified (trailing dot), which keeps the
/// cache key stable regardless of how the client spelled the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuestion {
    pub name: Arc<str>,
    pub record_type: RecordType,
}

impl DnsQuestion {
    pub fn new(name: &str, record_type: RecordType) -> Self {
        Self {
            name: Arc::from(fqdn(name)),
            record_type,
        }
    }

    /// Same name, different type. Used for the secondary A lookup.
    pub fn with_type(&self, record_type: RecordType) -> Self {
        Self {
            name: Arc::clone(&self.name),
            record_type,
        }
    }
}

fn fqdn(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}
