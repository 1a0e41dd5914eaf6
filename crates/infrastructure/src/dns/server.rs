use ferrous_dns64_application::use_cases::ComposeReplyUseCase;
use ferrous_dns64_application::wire;
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const DNS_HEADER_LEN: usize = 12;

/// Turns one inbound datagram into the bytes to send back, if any.
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<ComposeReplyUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<ComposeReplyUseCase>) -> Self {
        Self { use_case }
    }

    pub async fn handle_raw_udp(&self, buf: &[u8], client: SocketAddr) -> Option<Vec<u8>> {
        let request = match wire::decode(buf) {
            Ok(request) => request,
            Err(e) => {
                warn!(client = %client, bytes = buf.len(), error = %e, "Failed to decode query");
                return format_error_reply(buf);
            }
        };

        if request.message_type() != MessageType::Query {
            debug!(client = %client, id = request.id(), "Ignoring datagram that is not a query");
            return None;
        }

        if request.op_code() != OpCode::Query {
            warn!(
                client = %client,
                id = request.id(),
                op_code = ?request.op_code(),
                "Unsupported opcode"
            );
            return wire::encode(&not_implemented_reply(&request)).ok();
        }

        for query in request.queries() {
            info!(
                domain = %query.name(),
                record_type = %query.query_type(),
                client = %client.ip(),
                "DNS query received"
            );
        }

        let reply = self.use_case.execute(&request).await;

        match wire::encode(&reply) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                error!(client = %client, id = reply.id(), error = %e, "Failed to encode reply");
                None
            }
        }
    }
}

fn not_implemented_reply(request: &Message) -> Message {
    let mut reply = Message::new();
    reply
        .set_id(request.id())
        .set_message_type(MessageType::Response)
        .set_op_code(request.op_code())
        .set_recursion_desired(request.recursion_desired())
        .set_recursion_available(true)
        .set_response_code(ResponseCode::NotImp)
        .add_queries(request.queries().to_vec());
    reply
}

/// FORMERR for a datagram whose body does not parse. Anything shorter than
/// a header cannot be answered at all.
fn format_error_reply(buf: &[u8]) -> Option<Vec<u8>> {
    if buf.len() < DNS_HEADER_LEN {
        return None;
    }

    let id = u16::from_be_bytes([buf[0], buf[1]]);
    let recursion_desired = buf[2] & 0x01 != 0;

    let mut reply = Message::new();
    reply
        .set_id(id)
        .set_message_type(MessageType::Response)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(recursion_desired)
        .set_recursion_available(true)
        .set_response_code(ResponseCode::FormErr);

    wire::encode(&reply).ok()
}
