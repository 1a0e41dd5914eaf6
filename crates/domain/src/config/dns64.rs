use super::errors::ConfigError;
use crate::Nat64Prefix;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Dns64Config {
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Dns64Config {
    pub fn nat64_prefix(&self) -> Result<Nat64Prefix, ConfigError> {
        self.prefix
            .parse()
            .map_err(|e: crate::DomainError| ConfigError::Validation(e.to_string()))
    }
}

impl Default for Dns64Config {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

fn default_prefix() -> String {
    Nat64Prefix::WELL_KNOWN.to_string()
}
