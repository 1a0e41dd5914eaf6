use ferrous_dns64_domain::RecordType;
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA, CNAME, NS, SOA};
use hickory_proto::rr::{DNSClass, Name, RData, Record, RecordType as HickoryRecordType};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

pub fn name(s: &str) -> Name {
    Name::from_str(s).unwrap()
}

fn hickory_type(record_type: RecordType) -> HickoryRecordType {
    HickoryRecordType::from(record_type.to_u16())
}

pub fn response(domain: &str, record_type: RecordType, code: ResponseCode) -> Message {
    let mut message = Message::new();
    message
        .set_id(0x9999)
        .set_message_type(MessageType::Response)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true)
        .set_recursion_available(true)
        .set_response_code(code)
        .add_query(Query::query(name(domain), hickory_type(record_type)));
    message
}

pub fn nxdomain_response(domain: &str, record_type: RecordType) -> Message {
    let mut message = response(domain, record_type, ResponseCode::NXDomain);
    message.add_name_server(soa_record(domain));
    message
}

pub fn a_record(domain: &str, ip: Ipv4Addr, ttl: u32) -> Record {
    Record::from_rdata(name(domain), ttl, RData::A(A::from(ip)))
}

pub fn aaaa_record(domain: &str, ip: Ipv6Addr, ttl: u32) -> Record {
    Record::from_rdata(name(domain), ttl, RData::AAAA(AAAA::from(ip)))
}

pub fn cname_record(domain: &str, target: &str, ttl: u32) -> Record {
    Record::from_rdata(name(domain), ttl, RData::CNAME(CNAME(name(target))))
}

pub fn ns_record(domain: &str, server: &str) -> Record {
    Record::from_rdata(name(domain), 3600, RData::NS(NS(name(server))))
}

pub fn soa_record(domain: &str) -> Record {
    Record::from_rdata(
        name(domain),
        900,
        RData::SOA(SOA::new(
            name("ns1.example.net."),
            name("hostmaster.example.net."),
            2024010101,
            7200,
            3600,
            1209600,
            300,
        )),
    )
}

pub fn with_class(mut record: Record, class: DNSClass) -> Record {
    record.set_dns_class(class);
    record
}

/// NOERROR response with the given answers and authority records.
pub fn answer_response(
    domain: &str,
    record_type: RecordType,
    answers: Vec<Record>,
    authority: Vec<Record>,
) -> Message {
    let mut message = response(domain, record_type, ResponseCode::NoError);
    message.insert_answers(answers);
    message.insert_name_servers(authority);
    message
}

pub fn client_query(id: u16, questions: &[(&str, RecordType)]) -> Message {
    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true);
    for (domain, record_type) in questions {
        message.add_query(Query::query(name(domain), hickory_type(*record_type)));
    }
    message
}

pub fn ipv6_answers(message: &Message) -> Vec<Ipv6Addr> {
    message
        .answers()
        .iter()
        .filter_map(|r| match r.data() {
            RData::AAAA(aaaa) => Some(aaaa.0),
            _ => None,
        })
        .collect()
}

pub fn ipv4_answers(message: &Message) -> Vec<Ipv4Addr> {
    message
        .answers()
        .iter()
        .filter_map(|r| match r.data() {
            RData::A(a) => Some(a.0),
            _ => None,
        })
        .collect()
}
