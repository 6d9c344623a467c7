use crate::arp::ArpPacket;
use crate::ip::Ipv4Packet;

use super::MacAddress;

pub const KIND_IPV4: u16 = 0x0800;
pub const KIND_ARP: u16 = 0x0806;

/// A logical link-layer frame.
///
/// The payload stays a parsed value object; turning it into wire bytes (and
/// rejecting malformed ones on the way in) is the job of the serializer
/// boundary outside this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthernetFrame {
    pub src: MacAddress,
    pub dest: MacAddress,
    pub content: EtherContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EtherContent {
    Arp(ArpPacket),
    Ipv4(Ipv4Packet),
}

impl EthernetFrame {
    /// The ethertype the frame would carry on the wire.
    pub fn kind(&self) -> u16 {
        match self.content {
            EtherContent::Arp(_) => KIND_ARP,
            EtherContent::Ipv4(_) => KIND_IPV4,
        }
    }
}
