use std::collections::VecDeque;
use std::time::Duration;

use bytes::Bytes;

use crate::stream::{ByteStream, Writer};

use super::{SeqNo, TcpAck, TcpConfig, TcpSegment};

/// A segment that has been transmitted but not yet fully acknowledged.
#[derive(Debug, Clone)]
struct Outstanding {
    /// Absolute sequence number of the segment's first slot.
    seq: u64,
    seg: TcpSegment,
}

/// The retransmitting, sliding-window send side of a connection.
///
/// The sender owns the outbound [`ByteStream`]; the application writes through
/// [`writer`](TcpSender::writer). Segments leave through the transmit callback
/// handed to [`push`](TcpSender::push) and [`tick`](TcpSender::tick) and are
/// kept in an ordered outstanding queue until the peer's cumulative
/// acknowledgment covers them. A single conceptual timer drives
/// retransmission of the earliest outstanding segment with exponential
/// backoff; time advances only through `tick`.
#[derive(Debug)]
pub struct TcpSender {
    stream: ByteStream,
    isn: SeqNo,
    mss: usize,

    /// Absolute sequence number of the next slot to send.
    next_seq: u64,
    /// Highest cumulative acknowledgment received so far.
    acked: u64,
    outstanding: VecDeque<Outstanding>,

    /// Last window the peer advertised. For deciding how much to send a
    /// window of 0 is treated as 1, forcing a probe segment.
    window: u16,

    rto_initial: Duration,
    rto: Duration,
    /// Elapsed time since the timer started, `None` while stopped.
    timer: Option<Duration>,
    retransmissions: u32,

    syn_sent: bool,
    fin_sent: bool,
    rst_sent: bool,
}

impl TcpSender {
    pub fn new(config: &TcpConfig) -> Self {
        Self {
            stream: ByteStream::new(config.send_buffer_size),
            isn: config.isn.unwrap_or_else(SeqNo::random),
            mss: config.mss,

            next_seq: 0,
            acked: 0,
            outstanding: VecDeque::new(),

            window: 1,

            rto_initial: config.rto,
            rto: config.rto,
            timer: None,
            retransmissions: 0,

            syn_sent: false,
            fin_sent: false,
            rst_sent: false,
        }
    }

    /// Packetizes whatever the stream and the peer's window currently allow.
    ///
    /// Call whenever new bytes may be sendable: after application writes,
    /// stream close, or a window update. Emits SYN on the very first segment
    /// and FIN exactly once, when the stream has drained and a sequence slot
    /// remains in the window. On a latched stream error a single RST segment
    /// is emitted instead and the sender falls silent.
    pub fn push(&mut self, mut transmit: impl FnMut(&TcpSegment)) {
        if self.stream.has_error() {
            if !self.rst_sent {
                self.rst_sent = true;
                let seg = self.make_empty_segment();
                log::trace!(target: "minnet/tcp", "stream error, sending RST at seq_no {}", seg.seq_no);
                transmit(&seg);
            }
            return;
        }

        let window = u64::from(self.window.max(1));
        loop {
            let in_flight = self.next_seq - self.acked;
            if in_flight >= window {
                break;
            }
            let space = window - in_flight;

            let syn = !self.syn_sent;
            let take = (space - u64::from(syn)).min(self.mss as u64) as usize;
            let content = {
                let mut reader = self.stream.reader();
                let k = take.min(reader.bytes_buffered());
                let content = Bytes::copy_from_slice(&reader.peek()[..k]);
                reader.pop(k);
                content
            };

            let fin = !self.fin_sent
                && self.stream.reader().is_finished()
                && u64::from(syn) + content.len() as u64 + 1 <= space;

            if content.is_empty() && !syn && !fin {
                break;
            }

            let seg = TcpSegment {
                seq_no: SeqNo::wrap(self.next_seq, self.isn),
                syn,
                fin,
                rst: false,
                content,
            };
            transmit(&seg);

            if self.timer.is_none() {
                self.timer = Some(Duration::ZERO);
            }
            let seq = self.next_seq;
            self.next_seq += seg.seq_len();
            self.syn_sent |= syn;
            self.fin_sent |= fin;
            self.outstanding.push_back(Outstanding { seq, seg });

            if fin {
                break;
            }
        }
    }

    /// Processes an acknowledgment and window update from the peer.
    ///
    /// An ackno covering sequence numbers never sent is ignored. An ackno
    /// acknowledging new data resets the backoff state and restarts the timer
    /// only while segments remain outstanding.
    pub fn receive(&mut self, ack: &TcpAck) {
        if ack.rst {
            self.stream.set_error();
            return;
        }

        self.window = ack.window;

        let Some(ack_no) = ack.ack_no else { return };
        let abs = ack_no.unwrap(self.isn, self.next_seq);
        if abs > self.next_seq {
            // Acknowledges something we never sent. Not an error, not useful.
            return;
        }
        if abs <= self.acked {
            return;
        }

        self.acked = abs;
        self.rto = self.rto_initial;
        self.retransmissions = 0;
        while let Some(front) = self.outstanding.front() {
            if front.seq + front.seg.seq_len() > abs {
                break;
            }
            self.outstanding.pop_front();
        }
        self.timer = if self.outstanding.is_empty() {
            None
        } else {
            Some(Duration::ZERO)
        };
    }

    /// Advances the retransmission timer by `elapsed`.
    ///
    /// When the timer reaches the current RTO and a segment is outstanding,
    /// the earliest one is retransmitted and the RTO doubles, except while
    /// the peer advertised a window of exactly zero (the retry is then a
    /// window probe and backs off linearly).
    pub fn tick(&mut self, elapsed: Duration, mut transmit: impl FnMut(&TcpSegment)) {
        if self.stream.has_error() {
            return;
        }
        let Some(timer) = self.timer.as_mut() else {
            return;
        };
        *timer += elapsed;
        if *timer < self.rto {
            return;
        }

        if let Some(front) = self.outstanding.front() {
            log::trace!(
                target: "minnet/tcp",
                "retransmit #{} of seq_no {} ({} [{}b])",
                self.retransmissions + 1,
                front.seg.seq_no,
                front.seg.flags(),
                front.seg.content.len(),
            );
            transmit(&front.seg);
            if self.window != 0 {
                self.rto *= 2;
            }
            self.retransmissions += 1;
            self.timer = Some(Duration::ZERO);
        }
    }

    /// A zero-length segment carrying the current next sequence number, for
    /// ack-only or keepalive use. Never enters retransmission bookkeeping.
    pub fn make_empty_segment(&self) -> TcpSegment {
        TcpSegment {
            seq_no: SeqNo::wrap(self.next_seq, self.isn),
            syn: false,
            fin: false,
            rst: self.stream.has_error(),
            content: Bytes::new(),
        }
    }

    /// The application-facing write end of the outbound stream.
    pub fn writer(&mut self) -> Writer<'_> {
        self.stream.writer()
    }

    pub fn isn(&self) -> SeqNo {
        self.isn
    }

    pub fn next_seq_no(&self) -> SeqNo {
        SeqNo::wrap(self.next_seq, self.isn)
    }

    pub fn sequence_numbers_in_flight(&self) -> u64 {
        self.next_seq - self.acked
    }

    /// Consecutive retransmissions since the last acknowledgment of new data.
    /// Crossing the configured limit is the caller's signal to give up.
    pub fn consecutive_retransmissions(&self) -> u32 {
        self.retransmissions
    }

    pub fn has_error(&self) -> bool {
        self.stream.has_error()
    }

    pub fn stream_mut(&mut self) -> &mut ByteStream {
        &mut self.stream
    }
}
