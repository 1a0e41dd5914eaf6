use super::{DnsQuestion, RecordType};
use std::fmt;

/// Key under which a wire-encoded response is stored: `<qtype>_<fqdn>`.
///
/// The numeric type comes first, so two questions for the same name that
/// differ only in type never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    const SEPARATOR: char = '_';

    pub fn new(record_type: RecordType, name: &str) -> Self {
        Self(format!(
            "{}{}{}",
            record_type.to_u16(),
            Self::SEPARATOR,
            name
        ))
    }

    pub fn for_question(question: &DnsQuestion) -> Self {
        Self::new(question.record_type, &question.name)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
