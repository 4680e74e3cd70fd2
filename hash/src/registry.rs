//! Named collection of [Algorithm]s.

use crate::{Algorithm, DynHasher, Error};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Static description of a registered [Algorithm].
#[derive(Clone, Copy, Debug)]
pub struct Descriptor {
    name: &'static str,
    digest_size: usize,
    block_size: usize,
    context_size: usize,
    constructor: fn() -> Box<dyn DynHasher>,
}

fn construct<A: Algorithm>() -> Box<dyn DynHasher> {
    Box::new(A::new())
}

impl Descriptor {
    /// Describe the algorithm `A`.
    pub fn of<A: Algorithm>() -> Self {
        Self {
            name: A::NAME,
            digest_size: A::DIGEST_SIZE,
            block_size: A::BLOCK_SIZE,
            context_size: A::CONTEXT_SIZE,
            constructor: construct::<A>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn digest_size(&self) -> usize {
        self.digest_size
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn context_size(&self) -> usize {
        self.context_size
    }

    /// Construct a freshly initialized hasher.
    pub fn create(&self) -> Box<dyn DynHasher> {
        (self.constructor)()
    }
}

/// Hash algorithms available to a host, keyed by name.
///
/// The registry is an ordinary value: the host builds it once at startup and passes it to
/// whatever needs to construct hashers. Algorithms cannot be removed once registered.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    algorithms: BTreeMap<&'static str, Descriptor>,
}

impl Registry {
    /// Add `A` to the registry.
    ///
    /// Returns [Error::AlreadyRegistered] if an algorithm with the same name is present.
    pub fn register<A: Algorithm>(&mut self) -> Result<(), Error> {
        if self.algorithms.contains_key(A::NAME) {
            warn!(name = A::NAME, "algorithm already registered");
            return Err(Error::AlreadyRegistered(A::NAME.to_string()));
        }
        let descriptor = Descriptor::of::<A>();
        debug!(
            name = descriptor.name,
            digest_size = descriptor.digest_size,
            block_size = descriptor.block_size,
            context_size = descriptor.context_size,
            "registered algorithm"
        );
        self.algorithms.insert(descriptor.name, descriptor);
        Ok(())
    }

    /// Get the [Descriptor] registered under `name`.
    pub fn get(&self, name: &str) -> Option<&Descriptor> {
        self.algorithms.get(name)
    }

    /// Construct a freshly initialized hasher for `name`.
    pub fn create(&self, name: &str) -> Result<Box<dyn DynHasher>, Error> {
        match self.get(name) {
            Some(descriptor) => Ok(descriptor.create()),
            None => {
                warn!(name, "unknown algorithm");
                Err(Error::UnknownAlgorithm(name.to_string()))
            }
        }
    }

    /// Names of all registered algorithms, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.algorithms.keys().copied()
    }

    /// Descriptors of all registered algorithms, sorted by name.
    pub fn descriptors(&self) -> impl Iterator<Item = &Descriptor> {
        self.algorithms.values()
    }

    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }
}
