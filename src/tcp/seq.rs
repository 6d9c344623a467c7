use std::fmt::Display;
use std::ops::Add;

use rand::random;

/// A 32-bit wraparound sequence number.
///
/// The wire carries the true 64-bit stream position modulo 2^32, offset by
/// the initial sequence number of the direction. [`SeqNo::wrap`] and
/// [`SeqNo::unwrap`] convert between the two representations.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeqNo(u32);

impl SeqNo {
    pub fn new(raw: u32) -> Self {
        SeqNo(raw)
    }

    /// A random initial sequence number for a new connection.
    pub fn random() -> Self {
        SeqNo(random())
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    /// The wire representation of absolute stream position `absolute` under
    /// the initial sequence number `isn`.
    pub fn wrap(absolute: u64, isn: SeqNo) -> SeqNo {
        SeqNo(isn.0.wrapping_add(absolute as u32))
    }

    /// Recovers the absolute stream position closest to `checkpoint`.
    ///
    /// All 64-bit positions congruent to `self - isn` mod 2^32 are candidates;
    /// the window of interest is far narrower than 2^31, so only the two
    /// candidates bracketing the checkpoint need comparing. When both are
    /// exactly 2^31 away the larger one wins.
    pub fn unwrap(self, isn: SeqNo, checkpoint: u64) -> u64 {
        let offset = u64::from(self.0.wrapping_sub(isn.0));
        if checkpoint <= offset {
            return offset;
        }

        let steps = (checkpoint - offset) >> 32;
        let low = offset + (steps << 32);
        match low.checked_add(1 << 32) {
            Some(high) if checkpoint - low >= high - checkpoint => high,
            _ => low,
        }
    }
}

impl Add<u64> for SeqNo {
    type Output = SeqNo;

    fn add(self, rhs: u64) -> SeqNo {
        SeqNo(self.0.wrapping_add(rhs as u32))
    }
}

impl From<u32> for SeqNo {
    fn from(raw: u32) -> Self {
        SeqNo(raw)
    }
}

impl Display for SeqNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
