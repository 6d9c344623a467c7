use crate::reassembler::Reassembler;
use crate::stream::Reader;

use super::{SeqNo, TcpAck, TcpSegment};

/// The cumulative-acknowledgment receive side of a connection.
///
/// Incoming segments feed the [`Reassembler`]; the acknowledgment mirrors the
/// reassembler's progress back to the peer. Sequence bookkeeping is offset by
/// one against the stream index because the peer's SYN occupies the first
/// sequence slot.
#[derive(Debug)]
pub struct TcpReceiver {
    reassembler: Reassembler,
    isn: Option<SeqNo>,
}

impl TcpReceiver {
    pub fn new(reassembler: Reassembler) -> Self {
        Self {
            reassembler,
            isn: None,
        }
    }

    /// Processes one incoming segment.
    ///
    /// Segments arriving before the peer's SYN are discarded. The first SYN
    /// pins the ISN; from then on sequence numbers unwrap against the
    /// checkpoint `next_index() + 1` (the SYN slot precedes all data).
    pub fn receive(&mut self, seg: &TcpSegment) {
        if seg.rst {
            self.reassembler.stream_mut().set_error();
            return;
        }

        let isn = match self.isn {
            Some(isn) => isn,
            None if seg.syn => {
                log::trace!(target: "minnet/tcp", "SYN observed, ISN {}", seg.seq_no);
                self.isn = Some(seg.seq_no);
                seg.seq_no
            }
            None => return,
        };

        let checkpoint = self.reassembler.next_index() + 1;
        let abs = seg.seq_no.unwrap(isn, checkpoint) + u64::from(seg.syn);
        if abs == 0 {
            // A non-SYN segment addressing the SYN slot itself.
            return;
        }
        self.reassembler.insert(abs - 1, &seg.content, seg.fin);
    }

    /// The acknowledgment to send back: cumulative ackno (once the SYN has
    /// been seen, plus one more slot after FIN completes the stream) and the
    /// current receive window, capped at the 16-bit advertisement limit.
    pub fn ack(&mut self) -> TcpAck {
        let next = self.reassembler.next_index();
        let finished = self.reassembler.reader().is_finished();
        let window = self.reassembler.writer().available_capacity().min(65_535) as u16;
        TcpAck {
            ack_no: self
                .isn
                .map(|isn| SeqNo::wrap(next + 1 + u64::from(finished), isn)),
            window,
            rst: self.reassembler.stream().has_error(),
        }
    }

    /// The application-facing read end of the inbound stream.
    pub fn reader(&mut self) -> Reader<'_> {
        self.reassembler.reader()
    }

    pub fn reassembler(&self) -> &Reassembler {
        &self.reassembler
    }

    pub fn has_error(&self) -> bool {
        self.reassembler.stream().has_error()
    }

    /// Latches the error flag, to be mirrored to the peer via RST.
    pub fn set_error(&mut self) {
        self.reassembler.stream_mut().set_error();
    }
}
