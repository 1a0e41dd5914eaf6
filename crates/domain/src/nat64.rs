//! NAT64 address synthesis (RFC 6052 §2.2, /96 prefixes only).
//!
//! The prefix is an immutable template. Every call to [`Nat64Prefix::synthesize`]
//! builds a fresh address, so concurrent synthesis never shares a buffer.

use super::DomainError;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nat64Prefix {
    octets: [u8; 12],
}

impl Nat64Prefix {
    /// `64:ff9b::/96`
    pub const WELL_KNOWN: Nat64Prefix = Nat64Prefix {
        octets: [0x00, 0x64, 0xff, 0x9b, 0, 0, 0, 0, 0, 0, 0, 0],
    };

    pub const PREFIX_LEN: u8 = 96;

    pub fn from_addr(addr: Ipv6Addr) -> Result<Self, DomainError> {
        let full = addr.octets();
        if full[12..] != [0, 0, 0, 0] {
            return Err(DomainError::InvalidNat64Prefix(format!(
                "{} has bits set beyond /96",
                addr
            )));
        }
        let mut octets = [0u8; 12];
        octets.copy_from_slice(&full[..12]);
        Ok(Self { octets })
    }

    pub fn synthesize(&self, ipv4: Ipv4Addr) -> Ipv6Addr {
        let mut octets = [0u8; 16];
        octets[..12].copy_from_slice(&self.octets);
        octets[12..].copy_from_slice(&ipv4.octets());
        Ipv6Addr::from(octets)
    }

    pub fn network(&self) -> Ipv6Addr {
        let mut octets = [0u8; 16];
        octets[..12].copy_from_slice(&self.octets);
        Ipv6Addr::from(octets)
    }
}

impl Default for Nat64Prefix {
    fn default() -> Self {
        Self::WELL_KNOWN
    }
}

impl fmt::Display for Nat64Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network(), Self::PREFIX_LEN)
    }
}

impl FromStr for Nat64Prefix {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr, len) = s.split_once('/').unwrap_or((s, "96"));

        let len: u8 = len
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidNat64Prefix(format!("bad prefix length in '{}'", s)))?;
        if len != Self::PREFIX_LEN {
            return Err(DomainError::InvalidNat64Prefix(format!(
                "only /96 prefixes are supported, got /{}",
                len
            )));
        }

        let addr: Ipv6Addr = addr
            .trim()
            .parse()
            .map_err(|e| DomainError::InvalidNat64Prefix(format!("'{}': {}", s, e)))?;

        Self::from_addr(addr)
    }
}
