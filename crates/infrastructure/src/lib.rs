//! Adapters behind the application ports: cache stores, the UDP upstream
//! client and the raw datagram handler used by the listener.
pub mod cache;
pub mod dns;
