//! The reliability layer: sequence numbers, segments, sender and receiver.
//!
//! [`TcpSender`] and [`TcpReceiver`] are the two halves of one connection
//! direction. They share nothing; a full-duplex connection pairs a sender for
//! the outbound stream with a receiver for the inbound one and shuttles
//! [`TcpSegment`]s and [`TcpAck`]s between them and the wire.

mod seq;
pub use seq::SeqNo;

mod pkt;
pub use pkt::{SegmentFlags, TcpAck, TcpSegment};

mod config;
pub use config::TcpConfig;

mod sender;
pub use sender::TcpSender;

mod receiver;
pub use receiver::TcpReceiver;

/// IP protocol number of TCP, for callers composing datagrams.
pub const PROTO_TCP: u8 = 0x06;
