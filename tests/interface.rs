use std::net::Ipv4Addr;
use std::time::Duration;

use bytes::Bytes;
use minnet::arp::{ArpOperation, ArpPacket};
use minnet::interface::{EtherContent, EthernetFrame, MacAddress, NetworkInterface};
use minnet::ip::Ipv4Packet;

const LOCAL_IP: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 1);
const PEER_IP: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 2);

fn local_mac() -> MacAddress {
    MacAddress::from([0x02, 0x00, 0x00, 0x00, 0x00, 0x01])
}

fn peer_mac() -> MacAddress {
    MacAddress::from([0x02, 0x00, 0x00, 0x00, 0x00, 0x02])
}

fn interface() -> NetworkInterface {
    NetworkInterface::new(local_mac(), LOCAL_IP)
}

fn datagram(dest: Ipv4Addr, payload: &'static [u8]) -> Ipv4Packet {
    Ipv4Packet::new(LOCAL_IP, dest, Bytes::from_static(payload))
}

fn reply_from_peer() -> EthernetFrame {
    let request = ArpPacket::request(local_mac(), LOCAL_IP, PEER_IP);
    EthernetFrame {
        src: peer_mac(),
        dest: local_mac(),
        content: EtherContent::Arp(ArpPacket::response_to(&request, peer_mac(), PEER_IP)),
    }
}

#[test]
fn unresolved_next_hop_broadcasts_a_request() {
    let mut iface = interface();
    iface.send_datagram(datagram(PEER_IP, b"hello"), PEER_IP);

    let frame = iface.poll_frame().unwrap();
    assert_eq!(frame.src, local_mac());
    assert!(frame.dest.is_broadcast());
    match frame.content {
        EtherContent::Arp(arp) => {
            assert_eq!(arp.operation, ArpOperation::Request);
            assert_eq!(arp.src_paddr, LOCAL_IP);
            assert_eq!(arp.dest_paddr, PEER_IP);
        }
        other => panic!("expected a resolution request, got {other:?}"),
    }
    assert_eq!(iface.frames_queued(), 0);
}

#[test]
fn one_request_per_pending_resolution() {
    let mut iface = interface();
    iface.send_datagram(datagram(PEER_IP, b"one"), PEER_IP);
    iface.send_datagram(datagram(PEER_IP, b"two"), PEER_IP);
    iface.send_datagram(datagram(PEER_IP, b"three"), PEER_IP);

    // Only the first send broadcasts; the rest pile up behind it.
    assert_eq!(iface.frames_queued(), 1);
}

#[test]
fn reply_flushes_the_queue_in_order() {
    let mut iface = interface();
    iface.send_datagram(datagram(PEER_IP, b"one"), PEER_IP);
    iface.send_datagram(datagram(PEER_IP, b"two"), PEER_IP);
    iface.poll_frame();

    assert_eq!(iface.recv_frame(reply_from_peer()), None);

    for payload in [b"one".as_slice(), b"two".as_slice()] {
        let frame = iface.poll_frame().unwrap();
        assert_eq!(frame.dest, peer_mac());
        match frame.content {
            EtherContent::Ipv4(pkt) => assert_eq!(&pkt.content[..], payload),
            other => panic!("expected a flushed datagram, got {other:?}"),
        }
    }
    assert!(iface.poll_frame().is_none());
}

#[test]
fn resolved_next_hop_sends_directly() {
    let mut iface = interface();
    iface.recv_frame(reply_from_peer());

    iface.send_datagram(datagram(PEER_IP, b"direct"), PEER_IP);
    let frame = iface.poll_frame().unwrap();
    assert_eq!(frame.dest, peer_mac());
    assert!(matches!(frame.content, EtherContent::Ipv4(_)));
}

#[test]
fn pending_expiry_allows_a_fresh_request() {
    let mut iface = interface();
    iface.send_datagram(datagram(PEER_IP, b"stale"), PEER_IP);
    iface.poll_frame();

    // Short of the pending lifetime: the request stays suppressed.
    iface.tick(Duration::from_millis(4_999));
    iface.send_datagram(datagram(PEER_IP, b"still waiting"), PEER_IP);
    assert_eq!(iface.frames_queued(), 0);

    // At the lifetime the record expires with its queue, so the next send
    // starts over.
    iface.tick(Duration::from_millis(1));
    iface.send_datagram(datagram(PEER_IP, b"again"), PEER_IP);
    let frame = iface.poll_frame().unwrap();
    assert!(frame.dest.is_broadcast());
    assert!(matches!(frame.content, EtherContent::Arp(_)));

    // Datagrams queued behind the expired record are gone.
    iface.recv_frame(reply_from_peer());
    assert_eq!(iface.frames_queued(), 1);
}

#[test]
fn resolved_mapping_expires_after_its_lifetime() {
    let mut iface = interface();
    iface.recv_frame(reply_from_peer());
    assert_eq!(iface.table().lookup(&PEER_IP), Some(peer_mac()));

    iface.tick(Duration::from_millis(29_999));
    assert_eq!(iface.table().lookup(&PEER_IP), Some(peer_mac()));

    iface.tick(Duration::from_millis(1));
    assert_eq!(iface.table().lookup(&PEER_IP), None);

    // The next send resolves from scratch.
    iface.send_datagram(datagram(PEER_IP, b"later"), PEER_IP);
    let frame = iface.poll_frame().unwrap();
    assert!(frame.dest.is_broadcast());
}

#[test]
fn request_for_own_address_is_answered_and_learned() {
    let mut iface = interface();
    let frame = EthernetFrame {
        src: peer_mac(),
        dest: MacAddress::BROADCAST,
        content: EtherContent::Arp(ArpPacket::request(peer_mac(), PEER_IP, LOCAL_IP)),
    };
    assert_eq!(iface.recv_frame(frame), None);

    let reply = iface.poll_frame().unwrap();
    assert_eq!(reply.dest, peer_mac());
    match reply.content {
        EtherContent::Arp(arp) => {
            assert_eq!(arp.operation, ArpOperation::Response);
            assert_eq!(arp.src_haddr, local_mac());
            assert_eq!(arp.src_paddr, LOCAL_IP);
            assert_eq!(arp.dest_paddr, PEER_IP);
        }
        other => panic!("expected a resolution response, got {other:?}"),
    }

    // The requester's own mapping came along for free.
    assert_eq!(iface.table().lookup(&PEER_IP), Some(peer_mac()));
}

#[test]
fn request_for_someone_else_is_not_answered() {
    let mut iface = interface();
    let frame = EthernetFrame {
        src: peer_mac(),
        dest: MacAddress::BROADCAST,
        content: EtherContent::Arp(ArpPacket::request(
            peer_mac(),
            PEER_IP,
            Ipv4Addr::new(10, 0, 0, 99),
        )),
    };
    iface.recv_frame(frame);
    assert!(iface.poll_frame().is_none());

    // But the sender's mapping is still learned.
    assert_eq!(iface.table().lookup(&PEER_IP), Some(peer_mac()));
}

#[test]
fn frames_for_other_hosts_are_ignored() {
    let mut iface = interface();
    let frame = EthernetFrame {
        src: peer_mac(),
        dest: MacAddress::from([0x02, 0xff, 0xff, 0xff, 0xff, 0xff]),
        content: EtherContent::Ipv4(datagram(LOCAL_IP, b"not ours")),
    };
    assert_eq!(iface.recv_frame(frame), None);
    assert!(iface.poll_frame().is_none());
    assert!(iface.table().is_empty());
}

#[test]
fn ipv4_frames_are_handed_up() {
    let mut iface = interface();
    let pkt = Ipv4Packet::new(PEER_IP, LOCAL_IP, Bytes::from_static(b"payload"));
    let frame = EthernetFrame {
        src: peer_mac(),
        dest: local_mac(),
        content: EtherContent::Ipv4(pkt.clone()),
    };
    assert_eq!(iface.recv_frame(frame), Some(pkt));
}

#[test]
fn foreign_address_families_are_dropped() {
    let mut iface = interface();
    let mut arp = ArpPacket::request(peer_mac(), PEER_IP, LOCAL_IP);
    arp.htype = 6;
    let frame = EthernetFrame {
        src: peer_mac(),
        dest: MacAddress::BROADCAST,
        content: EtherContent::Arp(arp),
    };
    assert_eq!(iface.recv_frame(frame), None);
    assert!(iface.poll_frame().is_none());
    assert!(iface.table().is_empty());
}
