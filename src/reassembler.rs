use std::collections::BTreeMap;

use crate::stream::{ByteStream, Reader, Writer};

/// Re-orders arbitrary-offset byte ranges into the contiguous stream prefix.
///
/// Ranges may arrive out of order, overlap or duplicate each other. The
/// reassembler keeps at most one disjoint pending range per start index,
/// clipped to the window the output stream can still accept, and pushes bytes
/// into the stream the moment the prefix becomes gap-free. Anything before
/// the prefix or beyond the window is dropped on arrival, which bounds memory
/// regardless of how adversarial the reordering is.
#[derive(Debug)]
pub struct Reassembler {
    output: ByteStream,
    pending: BTreeMap<u64, Vec<u8>>,
    next_byte: u64,
    last_index: Option<u64>,
}

impl Reassembler {
    pub fn new(output: ByteStream) -> Self {
        Self {
            output,
            pending: BTreeMap::new(),
            next_byte: 0,
            last_index: None,
        }
    }

    /// Inserts the range `data` starting at absolute index `first_index`.
    ///
    /// `is_last` marks the range as containing the final byte of the stream;
    /// the last range observed with the flag is authoritative for where the
    /// stream ends, even if it is empty or already delivered.
    pub fn insert(&mut self, first_index: u64, data: &[u8], is_last: bool) {
        let end = first_index.saturating_add(data.len() as u64);
        if is_last {
            self.last_index = Some(end);
        }

        if end >= self.next_byte {
            // Clip to [next_byte, next_byte + available_capacity). Bytes the
            // stream cannot hold yet are dropped, not buffered.
            let window_end = self
                .next_byte
                .saturating_add(self.output.writer().available_capacity() as u64);
            let new_start = first_index.max(self.next_byte);
            let new_end = end.min(window_end);

            if new_start < new_end {
                let range = &data[(new_start - first_index) as usize..(new_end - first_index) as usize];
                self.merge_in(new_start, new_end, range);
            }
        }

        // Drain the now gap-free prefix into the stream.
        while let Some(entry) = self.pending.first_entry() {
            if *entry.key() != self.next_byte {
                break;
            }
            let chunk = entry.remove();
            self.next_byte += chunk.len() as u64;
            self.output.writer().push(&chunk);
        }

        if let Some(last) = self.last_index {
            if self.next_byte >= last {
                self.output.writer().close();
            }
        }
    }

    /// Merges `[start, end)` with every pending range it overlaps or touches
    /// and stores the union. `data` is exactly the clipped range.
    fn merge_in(&mut self, mut start: u64, mut end: u64, data: &[u8]) {
        let mut data = data.to_vec();

        // Ranges starting at-or-after us, up to and including one that merely
        // touches `end`.
        let overlapping: Vec<u64> = self
            .pending
            .range(start..)
            .take_while(|(k, _)| **k <= end)
            .map(|(k, _)| *k)
            .collect();
        for key in overlapping {
            let chunk = self.pending.remove(&key).unwrap();
            let chunk_end = key + chunk.len() as u64;
            if chunk_end > end {
                data.extend_from_slice(&chunk[(end - key) as usize..]);
                end = chunk_end;
            }
        }

        // At most one range starting before us can reach into `start`, since
        // stored ranges are disjoint and non-adjacent.
        if let Some((&key, chunk)) = self.pending.range(..start).next_back() {
            let chunk_end = key + chunk.len() as u64;
            if chunk_end >= start {
                let chunk = self.pending.remove(&key).unwrap();
                let mut merged = chunk[..(start - key) as usize].to_vec();
                merged.extend_from_slice(&data);
                if chunk_end > end {
                    merged.extend_from_slice(&chunk[(end - key) as usize..]);
                }
                data = merged;
                start = key;
            }
        }

        self.pending.insert(start, data);
    }

    /// The absolute index of the next byte the output stream expects.
    pub fn next_index(&self) -> u64 {
        self.next_byte
    }

    /// Bytes held back waiting for a gap to fill. Computed by summation.
    pub fn bytes_pending(&self) -> u64 {
        self.pending.values().map(|chunk| chunk.len() as u64).sum()
    }

    pub fn reader(&mut self) -> Reader<'_> {
        self.output.reader()
    }

    pub fn writer(&mut self) -> Writer<'_> {
        self.output.writer()
    }

    pub fn stream(&self) -> &ByteStream {
        &self.output
    }

    pub fn stream_mut(&mut self) -> &mut ByteStream {
        &mut self.output
    }
}
