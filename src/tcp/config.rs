use std::time::Duration;

use super::SeqNo;

/// Tuning knobs of one connection direction.
///
/// Defaults: 1000 byte segments, 1 s initial retransmission timeout, 8
/// attempts before the caller should give up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpConfig {
    /// Maximum bytes of application data per segment.
    pub mss: usize,

    /// Initial retransmission timeout. Doubles on consecutive timeouts and
    /// resets whenever new data is acknowledged.
    pub rto: Duration,

    /// Consecutive-retransmission count past which the caller should abandon
    /// the connection. The core only reports the counter, it never aborts.
    pub max_retransmissions: u32,

    pub send_buffer_size: usize,
    pub recv_buffer_size: usize,

    /// Fixed initial sequence number, or `None` to draw a random one.
    pub isn: Option<SeqNo>,
}

impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            mss: 1000,
            rto: Duration::from_millis(1000),
            max_retransmissions: 8,
            send_buffer_size: 64_000,
            recv_buffer_size: 64_000,
            isn: None,
        }
    }
}
