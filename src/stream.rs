use std::collections::VecDeque;
use std::fmt;

/// A flow-controlled in-memory byte stream.
///
/// The stream holds at most `capacity` bytes at any time. Writers append via
/// [`Writer::push`], readers drain via [`Reader::pop`]; both sides observe the
/// same close and error latches. The struct itself is the single owner of the
/// state, [`reader`](ByteStream::reader) and [`writer`](ByteStream::writer)
/// hand out disjoint-capability views over it.
#[derive(Debug)]
pub struct ByteStream {
    buf: VecDeque<u8>,
    cap: usize,
    closed: bool,
    error: bool,
    pushed: u64,
    popped: u64,
}

/// The consuming view of a [`ByteStream`].
pub struct Reader<'a>(&'a mut ByteStream);

/// The producing view of a [`ByteStream`].
pub struct Writer<'a>(&'a mut ByteStream);

impl ByteStream {
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: VecDeque::with_capacity(capacity),
            cap: capacity,
            closed: false,
            error: false,
            pushed: 0,
            popped: 0,
        }
    }

    pub fn reader(&mut self) -> Reader<'_> {
        Reader(self)
    }

    pub fn writer(&mut self) -> Writer<'_> {
        Writer(self)
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Marks the stream as failed. Permanent, observable from both views.
    pub fn set_error(&mut self) {
        self.error = true;
    }

    pub fn has_error(&self) -> bool {
        self.error
    }

    fn available_capacity(&self) -> usize {
        self.cap - self.buf.len()
    }
}

impl Writer<'_> {
    /// Appends as much of `data` as fits into the remaining capacity.
    ///
    /// Data beyond `available_capacity()` is silently dropped; the return
    /// value is the number of bytes actually accepted. A closed or errored
    /// stream accepts nothing.
    pub fn push(&mut self, data: &[u8]) -> usize {
        if self.0.closed || self.0.error {
            return 0;
        }
        let k = self.0.available_capacity().min(data.len());
        self.0.buf.extend(&data[..k]);
        self.0.pushed += k as u64;
        k
    }

    /// Signals that no further bytes will be pushed. Idempotent.
    pub fn close(&mut self) {
        self.0.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.0.closed
    }

    pub fn available_capacity(&self) -> usize {
        self.0.available_capacity()
    }

    pub fn bytes_pushed(&self) -> u64 {
        self.0.pushed
    }

    pub fn set_error(&mut self) {
        self.0.set_error()
    }

    pub fn has_error(&self) -> bool {
        self.0.error
    }
}

impl Reader<'_> {
    /// All currently buffered bytes, in order, as one contiguous slice.
    pub fn peek(&mut self) -> &[u8] {
        self.0.buf.make_contiguous();
        self.0.buf.as_slices().0
    }

    /// Discards the first `min(n, bytes_buffered)` bytes.
    pub fn pop(&mut self, n: usize) {
        let k = n.min(self.0.buf.len());
        self.0.buf.drain(..k);
        self.0.popped += k as u64;
    }

    /// True once the writer has closed the stream and it has drained empty.
    pub fn is_finished(&self) -> bool {
        self.0.closed && self.0.buf.is_empty()
    }

    pub fn bytes_buffered(&self) -> usize {
        self.0.buf.len()
    }

    pub fn bytes_popped(&self) -> u64 {
        self.0.popped
    }

    pub fn has_error(&self) -> bool {
        self.0.error
    }
}

impl fmt::Debug for Reader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reader")
            .field("buffered", &self.0.buf.len())
            .field("popped", &self.0.popped)
            .finish()
    }
}

impl fmt::Debug for Writer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Writer")
            .field("available", &self.0.available_capacity())
            .field("pushed", &self.0.pushed)
            .field("closed", &self.0.closed)
            .finish()
    }
}
