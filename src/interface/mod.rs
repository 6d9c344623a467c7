//! The link layer seam between IP datagrams and Ethernet frames.
//!
//! A [`NetworkInterface`] owns one MAC/IPv4 identity and an [`ArpTable`].
//! Outgoing datagrams either leave immediately (next hop resolved) or queue
//! behind a broadcast resolution request; incoming frames are filtered by
//! destination address, ARP traffic is answered and learned from, IPv4
//! payloads are handed up the stack. Frames ready for the physical medium
//! collect in an outbound queue drained via
//! [`poll_frame`](NetworkInterface::poll_frame).

use std::collections::VecDeque;
use std::net::Ipv4Addr;
use std::time::Duration;

use crate::arp::{ArpConfig, ArpOperation, ArpPacket, ArpTable};
use crate::ip::Ipv4Packet;

mod mac;
pub use self::mac::MacAddress;

mod pkt;
pub use self::pkt::{EtherContent, EthernetFrame, KIND_ARP, KIND_IPV4};

#[derive(Debug)]
pub struct NetworkInterface {
    mac: MacAddress,
    ip: Ipv4Addr,
    table: ArpTable,
    out: VecDeque<EthernetFrame>,
}

impl NetworkInterface {
    pub fn new(mac: MacAddress, ip: Ipv4Addr) -> Self {
        Self::with_config(mac, ip, ArpConfig::default())
    }

    pub fn with_config(mac: MacAddress, ip: Ipv4Addr, config: ArpConfig) -> Self {
        Self {
            mac,
            ip,
            table: ArpTable::new(config),
            out: VecDeque::new(),
        }
    }

    pub fn mac(&self) -> MacAddress {
        self.mac
    }

    pub fn ip(&self) -> Ipv4Addr {
        self.ip
    }

    /// Sends `pkt` towards `next_hop`.
    ///
    /// With a live mapping the datagram leaves as a unicast frame right away.
    /// Otherwise it queues behind the resolution of `next_hop`; a broadcast
    /// request goes out only if none is already pending for that address.
    pub fn send_datagram(&mut self, pkt: Ipv4Packet, next_hop: Ipv4Addr) {
        if let Some(mac) = self.table.lookup(&next_hop) {
            self.out.push_back(EthernetFrame {
                src: self.mac,
                dest: mac,
                content: EtherContent::Ipv4(pkt),
            });
            return;
        }

        let active = self.table.active_lookup(&next_hop);
        self.table.wait_for(next_hop, pkt);
        if active {
            return;
        }

        log::trace!(
            target: "minnet/arp",
            "missing address resolution for {next_hop}, issuing request"
        );
        self.out.push_back(EthernetFrame {
            src: self.mac,
            dest: MacAddress::BROADCAST,
            content: EtherContent::Arp(ArpPacket::request(self.mac, self.ip, next_hop)),
        });
    }

    /// Accepts one frame from the medium.
    ///
    /// Frames addressed neither to us nor to broadcast are dropped. An IPv4
    /// payload is returned to the caller; ARP traffic is consumed here:
    /// the sender's mapping is learned (releasing any datagrams waiting on
    /// it) and a request for our own address gets a direct reply.
    pub fn recv_frame(&mut self, frame: EthernetFrame) -> Option<Ipv4Packet> {
        if frame.dest != self.mac && !frame.dest.is_broadcast() {
            return None;
        }

        match frame.content {
            EtherContent::Ipv4(pkt) => Some(pkt),
            EtherContent::Arp(arp) => {
                if !arp.is_ipv4_ethernet() {
                    return None;
                }

                if !arp.src_paddr.is_unspecified() {
                    let sendable = self.table.add(arp.src_paddr, arp.src_haddr);
                    for pkt in sendable {
                        self.out.push_back(EthernetFrame {
                            src: self.mac,
                            dest: arp.src_haddr,
                            content: EtherContent::Ipv4(pkt),
                        });
                    }
                }

                if arp.operation == ArpOperation::Request && arp.dest_paddr == self.ip {
                    log::trace!(
                        target: "minnet/arp",
                        "responding to request for {} with {}",
                        arp.dest_paddr,
                        self.mac
                    );
                    let response = ArpPacket::response_to(&arp, self.mac, self.ip);
                    self.out.push_back(EthernetFrame {
                        src: self.mac,
                        dest: arp.src_haddr,
                        content: EtherContent::Arp(response),
                    });
                }
                None
            }
        }
    }

    /// The next frame ready for the physical medium, if any.
    pub fn poll_frame(&mut self) -> Option<EthernetFrame> {
        self.out.pop_front()
    }

    pub fn frames_queued(&self) -> usize {
        self.out.len()
    }

    /// Ages the resolution cache by `elapsed`.
    pub fn tick(&mut self, elapsed: Duration) {
        self.table.tick(elapsed);
    }

    pub fn table(&self) -> &ArpTable {
        &self.table
    }
}
