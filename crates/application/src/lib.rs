//! Ferrous DNS64 Application Layer
//!
//! Query resolution pipeline: cache lookup, upstream forwarding, AAAA
//! synthesis and reply composition. I/O lives behind the traits in [`ports`].
pub mod ports;
pub mod records;
pub mod use_cases;
pub mod wire;
