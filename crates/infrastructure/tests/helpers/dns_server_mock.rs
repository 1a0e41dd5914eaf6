use ferrous_dns64_application::wire;
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::{A, SOA};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// Builds the raw reply for one decoded query. `None` means stay silent.
pub type Responder = Arc<dyn Fn(&Message) -> Option<Vec<u8>> + Send + Sync>;

/// Upstream stand-in listening on an ephemeral loopback port.
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<Mutex<Vec<Message>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(responder: Responder) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let queries = Arc::new(Mutex::new(Vec::new()));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let seen = Arc::clone(&queries);
        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        let Ok(query) = Message::from_vec(&buf[..len]) else { continue };

                        let reply = responder(&query);
                        seen.lock().unwrap().push(query);

                        if let Some(bytes) = reply {
                            let _ = socket.send_to(&bytes, peer).await;
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Answers A queries for any name with `ip`; every other type gets an
    /// empty NOERROR with an SOA in the authority section.
    pub async fn ipv4_only(ip: Ipv4Addr) -> Self {
        Self::start(Arc::new(move |query: &Message| {
            let qtype = query.queries().first().map(|q| q.query_type());
            let reply = if qtype == Some(RecordType::A) {
                reply_with(query, ResponseCode::NoError, |q| {
                    vec![Record::from_rdata(q.name().clone(), 300, RData::A(A(ip)))]
                })
            } else {
                nodata(query)
            };
            wire::encode(&reply).ok()
        }))
        .await
        .unwrap()
    }

    pub async fn silent() -> Self {
        Self::start(Arc::new(|_: &Message| None)).await.unwrap()
    }

    pub async fn wrong_id() -> Self {
        Self::start(Arc::new(|query: &Message| {
            let mut reply = reply_with(query, ResponseCode::NoError, |_| vec![]);
            reply.set_id(query.id().wrapping_add(1));
            wire::encode(&reply).ok()
        }))
        .await
        .unwrap()
    }

    pub async fn garbage() -> Self {
        Self::start(Arc::new(|query: &Message| {
            let mut bytes = query.id().to_be_bytes().to_vec();
            bytes.extend_from_slice(&[0x81, 0x80, 0xff]);
            Some(bytes)
        }))
        .await
        .unwrap()
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn queries(&self) -> Vec<Message> {
        self.queries.lock().unwrap().clone()
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Response to `query` echoing its id, question and RD flag.
pub fn reply_with(
    query: &Message,
    code: ResponseCode,
    answers: impl FnOnce(&hickory_proto::op::Query) -> Vec<Record>,
) -> Message {
    let mut reply = Message::new();
    reply
        .set_id(query.id())
        .set_message_type(MessageType::Response)
        .set_op_code(query.op_code())
        .set_recursion_desired(query.recursion_desired())
        .set_recursion_available(true)
        .set_response_code(code)
        .add_queries(query.queries().to_vec());

    if let Some(q) = query.queries().first() {
        reply.insert_answers(answers(q));
    }
    reply
}

pub fn nodata(query: &Message) -> Message {
    let mut reply = reply_with(query, ResponseCode::NoError, |_| vec![]);
    reply.add_name_server(soa_record("example."));
    reply
}

pub fn soa_record(zone: &str) -> Record {
    let zone = Name::from_str(zone).unwrap();
    let soa = SOA::new(
        zone.clone(),
        Name::from_str("hostmaster.example.").unwrap(),
        2024010101,
        3600,
        600,
        86400,
        300,
    );
    Record::from_rdata(zone, 300, RData::SOA(soa))
}
