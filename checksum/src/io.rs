//! Checksum a reader without buffering it in full.

use crate::{checksum, Digest, Error};
use std::io::{ErrorKind, Read};
use tracing::debug;

/// Default number of bytes read per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Compute the CRC32C checksum of everything remaining in `reader`, optionally continuing
/// from `seed`.
///
/// The reader is consumed `chunk_size` bytes at a time and each chunk is chained onto the
/// checksum of everything before it. The seed and chunk size are validated before anything
/// is read.
pub fn checksum_reader<R: Read>(
    mut reader: R,
    seed: Option<&[u8]>,
    chunk_size: usize,
) -> Result<Digest, Error> {
    if chunk_size == 0 {
        return Err(Error::InvalidChunkSize);
    }
    let mut digest = checksum(&[], seed)?;

    let mut buf = vec![0u8; chunk_size];
    let mut chunks = 0u64;
    let mut total = 0u64;
    loop {
        let read = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(read) => read,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };
        digest = checksum(&buf[..read], Some(digest.as_ref()))?;
        chunks += 1;
        total += read as u64;
    }
    debug!(chunks, total, %digest, "checksummed reader");
    Ok(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Crc32c, DIGEST_LENGTH};
    use castagnoli_hash::Hasher;
    use rand::{rngs::StdRng, RngCore, SeedableRng};
    use std::io::{self, Cursor};
    use test_case::test_case;

    /// Yields at most `limit` bytes per read and fails with `Interrupted` every other call.
    struct Flaky<R> {
        inner: R,
        limit: usize,
        interrupt: bool,
    }

    impl<R: Read> Read for Flaky<R> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::Error::new(ErrorKind::Interrupted, "interrupted"));
            }
            let len = buf.len().min(self.limit);
            self.inner.read(&mut buf[..len])
        }
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::Other, "broken"))
        }
    }

    fn message(len: usize) -> Vec<u8> {
        let mut rng = StdRng::seed_from_u64(0);
        let mut message = vec![0u8; len];
        rng.fill_bytes(&mut message);
        message
    }

    #[test_case(1)]
    #[test_case(7)]
    #[test_case(64)]
    #[test_case(DEFAULT_CHUNK_SIZE)]
    fn test_matches_oneshot(chunk_size: usize) {
        let message = message(20_000);
        let expected = checksum(&message, None).unwrap();
        let digest = checksum_reader(Cursor::new(&message), None, chunk_size).unwrap();
        assert_eq!(digest, expected);
    }

    #[test]
    fn test_empty_reader() {
        let digest = checksum_reader(io::empty(), None, DEFAULT_CHUNK_SIZE).unwrap();
        assert_eq!(digest, Crc32c::empty());
    }

    #[test]
    fn test_seeded() {
        let message = message(1_000);
        let (a, b) = message.split_at(300);
        let seed = checksum(a, None).unwrap();
        let digest = checksum_reader(Cursor::new(b), Some(seed.as_ref()), 128).unwrap();
        assert_eq!(digest, checksum(&message, None).unwrap());
    }

    #[test]
    fn test_short_and_interrupted_reads() {
        let message = message(5_000);
        let reader = Flaky {
            inner: Cursor::new(&message),
            limit: 13,
            interrupt: false,
        };
        let digest = checksum_reader(reader, None, DEFAULT_CHUNK_SIZE).unwrap();
        assert_eq!(digest, checksum(&message, None).unwrap());
    }

    #[test]
    fn test_invalid_seed_not_read() {
        let result = checksum_reader(Broken, Some(&[0u8; DIGEST_LENGTH + 1][..]), 16);
        assert!(matches!(result, Err(Error::InvalidSeedLength(5))));
    }

    #[test]
    fn test_invalid_chunk_size() {
        let result = checksum_reader(Broken, None, 0);
        assert!(matches!(result, Err(Error::InvalidChunkSize)));
    }

    #[test]
    fn test_read_error() {
        let result = checksum_reader(Broken, None, 16);
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
