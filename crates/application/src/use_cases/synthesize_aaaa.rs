use super::resolve_query::ResolveQueryUseCase;
use crate::records::RecordKind;
use crate::wire;
use ferrous_dns64_domain::{DnsQuestion, Nat64Prefix, RecordType};
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::rdata::AAAA;
use hickory_proto::rr::{Name, RData, Record};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of the secondary A lookup.
#[derive(Debug, Clone)]
pub struct Synthesis {
    /// Synthetic AAAA records, in the order of the A answers they came from.
    pub records: Vec<Record>,
    /// The A response; its header and authority section feed the reply.
    pub response: Message,
}

pub struct SynthesizeAaaaUseCase {
    resolver: Arc<ResolveQueryUseCase>,
    prefix: Nat64Prefix,
}

impl SynthesizeAaaaUseCase {
    pub fn new(resolver: Arc<ResolveQueryUseCase>, prefix: Nat64Prefix) -> Self {
        Self { resolver, prefix }
    }

    /// Synthesis only applies to an AAAA question whose first pass came back
    /// NOERROR with no answers. SOA is listed explicitly: an empty SOA answer is
    /// a referral, not a missing record.
    pub fn should_synthesize(question: &DnsQuestion, response: &Message) -> bool {
        match question.record_type {
            RecordType::SOA => false,
            RecordType::AAAA => {
                response.response_code() == ResponseCode::NoError && response.answers().is_empty()
            }
            _ => false,
        }
    }

    pub async fn execute(&self, question: &DnsQuestion, recursion_desired: bool) -> Synthesis {
        info!(domain = %question.name, prefix = %self.prefix, "Generating synthetic IPv6 address");

        let a_question = question.with_type(RecordType::A);
        let resolution = self.resolver.execute(&a_question, recursion_desired).await;
        let response = resolution.message;

        let owner = match wire::question_name(question) {
            Ok(name) => Some(name),
            Err(e) => {
                warn!(error = %e, "Falling back to A record owner names");
                None
            }
        };

        let mut records = Vec::with_capacity(response.answers().len());
        for answer in response.answers() {
            let kind = RecordKind::of(answer);
            match kind.ipv4() {
                Some(_) => {
                    let name = owner.clone().unwrap_or_else(|| answer.name().clone());
                    if let Some(record) = self.synthesize_record(name, answer) {
                        records.push(record);
                    }
                }
                None => {
                    // CNAME chains are not followed yet.
                    info!(
                        domain = %question.name,
                        kind = %kind,
                        "Skipping unsupported record in A answer"
                    );
                }
            }
        }

        debug!(
            domain = %question.name,
            a_answers = response.answers().len(),
            synthesized = records.len(),
            "Synthesis finished"
        );

        Synthesis { records, response }
    }

    /// AAAA with the question's name, the A record's class and TTL, and the A
    /// address embedded under the prefix. `None` if `a_record` is not an A.
    pub fn synthesize_record(&self, name: Name, a_record: &Record) -> Option<Record> {
        let ipv4 = RecordKind::of(a_record).ipv4()?;
        let ipv6 = self.prefix.synthesize(ipv4);

        let mut record = Record::from_rdata(name, a_record.ttl(), RData::AAAA(AAAA::from(ipv6)));
        record.set_dns_class(a_record.dns_class());
        Some(record)
    }
}
