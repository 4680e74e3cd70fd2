//! Running CRC32C accumulator.

use bytes::{Buf, BufMut};

/// Length of the canonical (big-endian) encoding of a [State].
pub const STATE_LENGTH: usize = 4;

/// Running CRC32C accumulator.
///
/// A [State] is fully determined by the bytes extended into it since it was created, so
/// extending with `a` and then `b` is equivalent to extending once with `a || b`. This is
/// what allows a checksum to be resumed from a previously published value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct State(u32);

impl State {
    /// Accumulator before any bytes have been processed.
    pub const IDENTITY: Self = Self(0);

    /// Fold `data` into the accumulator.
    #[inline]
    pub fn extend(self, data: &[u8]) -> Self {
        Self(::crc32c::crc32c_append(self.0, data))
    }

    /// Encode the accumulator as big-endian bytes.
    #[inline]
    pub fn encode(self) -> [u8; STATE_LENGTH] {
        let mut out = [0u8; STATE_LENGTH];
        (&mut out[..]).put_u32(self.0);
        out
    }

    /// Decode an accumulator from big-endian bytes.
    #[inline]
    pub fn decode(bytes: [u8; STATE_LENGTH]) -> Self {
        Self((&bytes[..]).get_u32())
    }

    /// Raw accumulator value.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for State {
    fn from(value: u32) -> Self {
        Self(value)
    }
}
