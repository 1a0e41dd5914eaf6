pub mod udp;

pub use udp::UdpUpstreamResolver;
