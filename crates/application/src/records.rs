//! Typed view over the record kinds the pipeline cares about, plus the mapping
//! between domain and `hickory-proto` record types.

use ferrous_dns64_domain::{DnsQuestion, RecordType};
use hickory_proto::op::Query;
use hickory_proto::rr::{Name, RData, Record, RecordType as HickoryRecordType};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Closed set of record kinds with kind-specific payload access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind<'a> {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Cname(&'a Name),
    Ns(&'a Name),
    Soa,
    Other(HickoryRecordType),
}

impl<'a> RecordKind<'a> {
    pub fn of(record: &'a Record) -> Self {
        match record.data() {
            RData::A(a) => RecordKind::A(a.0),
            RData::AAAA(aaaa) => RecordKind::Aaaa(aaaa.0),
            RData::CNAME(cname) => RecordKind::Cname(&cname.0),
            RData::NS(ns) => RecordKind::Ns(&ns.0),
            RData::SOA(_) => RecordKind::Soa,
            _ => RecordKind::Other(record.record_type()),
        }
    }

    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        match self {
            RecordKind::A(addr) => Some(*addr),
            _ => None,
        }
    }
}

impl fmt::Display for RecordKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::A(_) => f.write_str("A"),
            RecordKind::Aaaa(_) => f.write_str("AAAA"),
            RecordKind::Cname(_) => f.write_str("CNAME"),
            RecordKind::Ns(_) => f.write_str("NS"),
            RecordKind::Soa => f.write_str("SOA"),
            RecordKind::Other(rt) => write!(f, "{}", rt),
        }
    }
}

/// Bidirectional mapper between domain and hickory record types
pub struct RecordTypeMapper;

impl RecordTypeMapper {
    #[inline]
    pub fn to_hickory(record_type: RecordType) -> HickoryRecordType {
        HickoryRecordType::from(record_type.to_u16())
    }

    #[inline]
    pub fn from_hickory(record_type: HickoryRecordType) -> RecordType {
        RecordType::from_u16(u16::from(record_type))
    }

    pub fn question_from_query(query: &Query) -> DnsQuestion {
        DnsQuestion::new(
            &query.name().to_ascii(),
            Self::from_hickory(query.query_type()),
        )
    }
}
