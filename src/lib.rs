//! The reliability and delivery core of a minimal TCP/IP stack.
//!
//! This crate turns an unreliable, reordering, duplicating packet channel
//! into an ordered, flow-controlled byte stream between two endpoints, plus
//! reliable next-hop link-address resolution for outgoing datagrams.
//!
//! Everything is single-threaded and tick-driven: no operation blocks, no
//! timers run on their own. The surrounding event loop decides *when* to call
//! `push`, `receive` and `tick`; the core only decides *what* happens then.
//! Wire parsing and serialization live outside this crate, so all messages
//! are exchanged as exact value objects ([`tcp::TcpSegment`],
//! [`tcp::TcpAck`], [`arp::ArpPacket`], ...).

#[macro_use]
mod macros;

mod stream;
pub use stream::{ByteStream, Reader, Writer};

mod reassembler;
pub use reassembler::Reassembler;

pub mod ip;

pub mod interface;

pub mod arp;

pub mod tcp;
