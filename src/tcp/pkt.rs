use std::fmt::Display;

use bytes::Bytes;

use super::SeqNo;

/// One segment travelling from the sender to the peer's receiver.
///
/// This is the logical message only: ports, checksums and the byte layout of
/// the header belong to the packetization layer outside this crate.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TcpSegment {
    /// Sequence number of the first byte (or of SYN, if set).
    pub seq_no: SeqNo,
    pub syn: bool,
    pub fin: bool,
    pub rst: bool,
    pub content: Bytes,
}

/// The acknowledgment travelling back from the receiver to the peer's sender.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TcpAck {
    /// Absent until the receiver has seen the peer's SYN.
    pub ack_no: Option<SeqNo>,
    /// Additional bytes the receiver is willing to accept. 0 is a valid
    /// "stop" advertisement.
    pub window: u16,
    pub rst: bool,
}

impl TcpSegment {
    /// Sequence space the segment occupies. SYN and FIN each consume one
    /// number; a bare keepalive occupies none.
    pub fn seq_len(&self) -> u64 {
        self.content.len() as u64 + u64::from(self.syn) + u64::from(self.fin)
    }

    pub fn flags(&self) -> SegmentFlags {
        SegmentFlags {
            syn: self.syn,
            fin: self.fin,
            rst: self.rst,
        }
    }
}

/// Display helper for logging segment flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentFlags {
    pub syn: bool,
    pub fin: bool,
    pub rst: bool,
}

impl Display for SegmentFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.syn {
            write!(f, "SYN")?
        }
        if self.fin {
            write!(f, "FIN")?
        }
        if self.rst {
            write!(f, "RST")?
        }
        Ok(())
    }
}
