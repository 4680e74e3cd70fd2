//! Register incremental hash algorithms behind a common streaming interface.
//!
//! Every algorithm exposes the same four operations (initialize, update, finalize, and duplicate)
//! through [Hasher]. Algorithms that also describe themselves with [Algorithm] can be added to a
//! [Registry] and later constructed by name as a [DynHasher], regardless of their digest type.
//!
//! # Example
//! ```rust
//! use castagnoli_hash::{Algorithm, Hasher, Registry};
//!
//! #[derive(Clone, Default)]
//! struct Len(u64);
//!
//! impl Hasher for Len {
//!     type Digest = [u8; 8];
//!
//!     fn new() -> Self {
//!         Self(0)
//!     }
//!
//!     fn update(&mut self, message: &[u8]) {
//!         self.0 += message.len() as u64;
//!     }
//!
//!     fn finalize(&mut self) -> Self::Digest {
//!         let digest = self.0.to_be_bytes();
//!         self.reset();
//!         digest
//!     }
//!
//!     fn reset(&mut self) {
//!         self.0 = 0;
//!     }
//!
//!     fn empty() -> Self::Digest {
//!         [0; 8]
//!     }
//! }
//!
//! impl Algorithm for Len {
//!     const NAME: &'static str = "len";
//!     const DIGEST_SIZE: usize = 8;
//!     const BLOCK_SIZE: usize = 1;
//!     const CONTEXT_SIZE: usize = 8;
//! }
//!
//! let mut registry = Registry::default();
//! registry.register::<Len>().unwrap();
//!
//! let mut hasher = registry.create("len").unwrap();
//! hasher.update(b"hello");
//! assert_eq!(hasher.finalize(), 5u64.to_be_bytes().to_vec());
//! ```

use std::fmt::Debug;
use thiserror::Error;

mod registry;
pub use registry::{Descriptor, Registry};

/// Errors that can occur when interacting with a [Registry].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("algorithm already registered: {0}")]
    AlreadyRegistered(String),
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}

/// Output of a [Hasher].
///
/// Digests are small, fixed-size byte strings that are cheap to copy.
pub trait Digest: AsRef<[u8]> + Copy + Debug + Eq + Send + Sync + 'static {}

impl<const N: usize> Digest for [u8; N] {}

/// Interface shared by all incremental hash algorithms.
///
/// Unlike hashers that treat `finalize` as terminal, a [Hasher] returns to its initial
/// state after producing a digest and can immediately accept more input.
///
/// Cloning a [Hasher] duplicates its in-progress state. The clone and the original
/// evolve independently afterwards.
pub trait Hasher: Clone + Send + Sync + 'static {
    /// Digest generated by the hasher.
    type Digest: Digest;

    /// Create a new hasher.
    fn new() -> Self;

    /// Append message to previously recorded data.
    fn update(&mut self, message: &[u8]);

    /// Hash all recorded data and reset the hasher
    /// to the initial state.
    fn finalize(&mut self) -> Self::Digest;

    /// Reset the hasher without generating a hash.
    ///
    /// This function does not need to be called after `finalize`.
    fn reset(&mut self);

    /// Return result of hashing nothing.
    fn empty() -> Self::Digest;
}

/// A [Hasher] that can be registered with a [Registry].
pub trait Algorithm: Hasher {
    /// Name the algorithm is registered under.
    const NAME: &'static str;

    /// Length of a finalized digest in bytes.
    const DIGEST_SIZE: usize;

    /// Length of the block the algorithm processes in bytes.
    const BLOCK_SIZE: usize;

    /// Size of the in-progress state in bytes.
    const CONTEXT_SIZE: usize;
}

/// Object-safe view of a [Hasher] with its digest erased to bytes.
pub trait DynHasher: Send + Sync {
    /// Append message to previously recorded data.
    fn update(&mut self, message: &[u8]);

    /// Hash all recorded data and reset the hasher to the initial state.
    fn finalize(&mut self) -> Vec<u8>;

    /// Reset the hasher without generating a hash.
    fn reset(&mut self);

    /// Copy the in-progress state into a new, independent hasher.
    fn duplicate(&self) -> Box<dyn DynHasher>;
}

impl<H: Hasher> DynHasher for H {
    fn update(&mut self, message: &[u8]) {
        <H as Hasher>::update(self, message);
    }

    fn finalize(&mut self) -> Vec<u8> {
        <H as Hasher>::finalize(self).as_ref().to_vec()
    }

    fn reset(&mut self) {
        <H as Hasher>::reset(self);
    }

    fn duplicate(&self) -> Box<dyn DynHasher> {
        Box::new(self.clone())
    }
}
