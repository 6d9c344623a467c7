//! Internet-Protocol value objects.
//!
//! Only what the link layer needs to route payloads: addresses, a ttl and
//! the opaque content. Fragmentation, checksums and the header byte layout
//! are the packetization layer's business.

use std::net::Ipv4Addr;

use bytes::Bytes;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ipv4Packet {
    pub src: Ipv4Addr,
    pub dest: Ipv4Addr,
    pub ttl: u8,
    /// Payload protocol, e.g. [`crate::tcp::PROTO_TCP`].
    pub proto: u8,
    pub content: Bytes,
}

impl Ipv4Packet {
    pub fn new(src: Ipv4Addr, dest: Ipv4Addr, content: Bytes) -> Self {
        Self {
            src,
            dest,
            ttl: 64,
            proto: 0,
            content,
        }
    }
}
