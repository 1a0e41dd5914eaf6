//! Thin wrappers over the `hickory-proto` wire codec.

use super::records::RecordTypeMapper;
use ferrous_dns64_domain::{DnsQuestion, DomainError};
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{DNSClass, Name};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};

pub fn encode(message: &Message) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);

    message.emit(&mut encoder).map_err(|e| {
        DomainError::InvalidDnsMessage(format!("Failed to serialize DNS message: {}", e))
    })?;

    Ok(buf)
}

pub fn decode(bytes: &[u8]) -> Result<Message, DomainError> {
    Message::from_vec(bytes)
        .map_err(|e| DomainError::InvalidDnsMessage(format!("Failed to parse DNS message: {}", e)))
}

pub fn question_name(question: &DnsQuestion) -> Result<Name, DomainError> {
    Name::from_ascii(&*question.name).map_err(|e| {
        DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", question.name, e))
    })
}

fn to_query(question: &DnsQuestion) -> Result<Query, DomainError> {
    let mut query = Query::query(
        question_name(question)?,
        RecordTypeMapper::to_hickory(question.record_type),
    );
    query.set_query_class(DNSClass::IN);
    Ok(query)
}

/// Standard query for `question` with the given id and RD flag.
pub fn query_message(
    question: &DnsQuestion,
    id: u16,
    recursion_desired: bool,
) -> Result<Message, DomainError> {
    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(recursion_desired)
        .add_query(to_query(question)?);
    Ok(message)
}

/// Answerless response carrying only a result code. A name that does not
/// parse just leaves the question section empty.
pub fn error_response(
    question: &DnsQuestion,
    recursion_desired: bool,
    code: ResponseCode,
) -> Message {
    let mut message = Message::new();
    message
        .set_message_type(MessageType::Response)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(recursion_desired)
        .set_response_code(code);
    if let Ok(query) = to_query(question) {
        message.add_query(query);
    }
    message
}
