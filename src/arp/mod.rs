//! Address resolution: mapping next-hop IPv4 addresses to link addresses.
//!
//! [`ArpTable`] holds the timed cache and the queues of datagrams waiting on
//! a resolution; [`crate::interface::NetworkInterface`] drives it and puts the
//! request/response traffic on the wire.

mod pkt;
pub use self::pkt::{ArpOperation, ArpPacket};

mod table;
pub use self::table::{ArpConfig, ArpTable};
