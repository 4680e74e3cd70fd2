//! Compute, chain, and stream CRC32C (Castagnoli) checksums.
//!
//! Two surfaces are provided over the same accumulator:
//!
//! * [checksum] computes the checksum of a buffer in one call, optionally continuing from a
//!   previously returned [Digest].
//! * [Crc32c] implements [castagnoli_hash::Hasher] so it can be driven incrementally and
//!   registered with a [castagnoli_hash::Registry] (see [register]).
//!
//! [checksum_reader] combines the two to checksum a [std::io::Read] in fixed-size chunks.

use thiserror::Error;

pub mod crc32c;
pub use self::crc32c::{checksum, register, Crc32c, Digest, State, DIGEST_LENGTH};
mod io;
pub use io::{checksum_reader, DEFAULT_CHUNK_SIZE};

/// Errors that can occur when computing a checksum.
#[derive(Error, Debug)]
pub enum Error {
    #[error("supplied seed must be exactly 4 bytes (got {0})")]
    InvalidSeedLength(usize),
    #[error("invalid digest length: {0}")]
    InvalidDigestLength(usize),
    #[error("invalid hex digest: {0}")]
    InvalidHex(String),
    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
