//! CRC32C (Castagnoli) implementation of the `Hasher` trait.
//!
//! Checksums are published as 4 big-endian bytes. Any published checksum can be supplied as the
//! seed of a later computation to continue where it left off, so a large input can be checksummed
//! in pieces without ever being buffered in full.
//!
//! # Example
//! ```rust
//! use castagnoli_checksum::{checksum, Crc32c};
//! use castagnoli_hash::Hasher;
//!
//! // Checksum a buffer in one call
//! let whole = checksum(b"hello, world!", None).unwrap();
//!
//! // Continue from a previous checksum
//! let first = checksum(b"hello,", None).unwrap();
//! let chained = checksum(b" world!", Some(first.as_ref())).unwrap();
//! assert_eq!(whole, chained);
//!
//! // Stream the same message through a hasher
//! let mut hasher = Crc32c::new();
//! hasher.update(b"hello,");
//! hasher.update(b" world!");
//! assert_eq!(hasher.finalize(), whole);
//! ```

use crate::Error;
use castagnoli_hash::{Algorithm, Hasher, Registry};
use std::{
    fmt::{Debug, Display},
    ops::Deref,
    str::FromStr,
};
use tracing::warn;

mod engine;
pub use engine::{State, STATE_LENGTH};

/// Length of a CRC32C digest in bytes.
pub const DIGEST_LENGTH: usize = STATE_LENGTH;

/// Compute the CRC32C checksum of `data`, optionally continuing from `seed`.
///
/// `seed` must be a previously returned [Digest] (exactly 4 bytes). An absent or empty seed
/// starts from the identity accumulator. Any other seed length is rejected with
/// [Error::InvalidSeedLength] before `data` is read.
pub fn checksum(data: &[u8], seed: Option<&[u8]>) -> Result<Digest, Error> {
    let initial = match seed {
        None | Some([]) => State::IDENTITY,
        Some(seed) => match <[u8; STATE_LENGTH]>::try_from(seed) {
            Ok(seed) => State::decode(seed),
            Err(_) => {
                warn!(len = seed.len(), "supplied seed must be exactly 4 bytes");
                return Err(Error::InvalidSeedLength(seed.len()));
            }
        },
    };
    Ok(initial.extend(data).into())
}

/// Add [Crc32c] to `registry`.
///
/// Hosts call this once at startup.
pub fn register(registry: &mut Registry) -> Result<(), castagnoli_hash::Error> {
    registry.register::<Crc32c>()
}

/// CRC32C hasher.
///
/// Copying a [Crc32c] duplicates the in-progress checksum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Crc32c {
    state: State,
}

impl Crc32c {
    /// Create a hasher that continues from a previously produced [Digest].
    pub fn resume(digest: Digest) -> Self {
        Self {
            state: State::from(digest),
        }
    }

    /// Current accumulator, without finalizing.
    pub fn state(&self) -> State {
        self.state
    }
}

impl Hasher for Crc32c {
    type Digest = Digest;

    fn new() -> Self {
        Self {
            state: State::IDENTITY,
        }
    }

    fn update(&mut self, message: &[u8]) {
        self.state = self.state.extend(message);
    }

    fn finalize(&mut self) -> Self::Digest {
        let digest = Digest::from(self.state);
        self.reset();
        digest
    }

    fn reset(&mut self) {
        self.state = State::IDENTITY;
    }

    fn empty() -> Self::Digest {
        Digest::from(State::IDENTITY)
    }
}

impl Algorithm for Crc32c {
    const NAME: &'static str = "crc32c";
    const DIGEST_SIZE: usize = DIGEST_LENGTH;
    const BLOCK_SIZE: usize = 4;
    const CONTEXT_SIZE: usize = std::mem::size_of::<u32>();
}

/// Digest of a CRC32C checksum (big-endian).
#[derive(Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Digest([u8; DIGEST_LENGTH]);

impl From<[u8; DIGEST_LENGTH]> for Digest {
    fn from(value: [u8; DIGEST_LENGTH]) -> Self {
        Self(value)
    }
}

impl From<State> for Digest {
    fn from(state: State) -> Self {
        Self(state.encode())
    }
}

impl From<Digest> for State {
    fn from(digest: Digest) -> Self {
        State::decode(digest.0)
    }
}

impl TryFrom<&[u8]> for Digest {
    type Error = Error;
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let array: [u8; DIGEST_LENGTH] = value
            .try_into()
            .map_err(|_| Error::InvalidDigestLength(value.len()))?;
        Ok(Self(array))
    }
}

impl TryFrom<Vec<u8>> for Digest {
    type Error = Error;
    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(value.as_slice())
    }
}

impl FromStr for Digest {
    type Err = Error;

    /// Parse 8 hexadecimal digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut array = [0u8; DIGEST_LENGTH];
        hex::decode_to_slice(s, &mut array).map_err(|_| Error::InvalidHex(s.to_string()))?;
        Ok(Self(array))
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for Digest {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl Debug for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl castagnoli_hash::Digest for Digest {}
