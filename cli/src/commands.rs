use castagnoli_checksum::{checksum, checksum_reader};
use castagnoli_hash::Registry;
use std::{
    fs::File,
    io::{self, ErrorKind, Read, Write},
    path::PathBuf,
};
use thiserror::Error;
use tracing::{debug, error};

#[derive(Error, Debug)]
pub enum Error {
    #[error("checksum error: {0}")]
    Checksum(#[from] castagnoli_checksum::Error),
    #[error("registry error: {0}")]
    Registry(#[from] castagnoli_hash::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("seed is not valid hex: {0}")]
    InvalidSeed(String),
    #[error("{0} input(s) could not be read")]
    Failed(usize),
}

/// Source of bytes to checksum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    fn open(&self) -> io::Result<Box<dyn Read>> {
        Ok(match self {
            Input::Stdin => Box::new(io::stdin().lock()),
            Input::File(path) => Box::new(File::open(path)?),
        })
    }

    fn label(&self) -> String {
        match self {
            Input::Stdin => "-".to_string(),
            Input::File(path) => path.display().to_string(),
        }
    }
}

/// Decode a hex seed. An empty string means no seed.
pub fn parse_seed(seed: &str) -> Result<Vec<u8>, Error> {
    hex::decode(seed).map_err(|_| Error::InvalidSeed(seed.to_string()))
}

/// Print `<digest>  <label>` for every input, continuing each from `seed` if provided.
///
/// The seed is validated before any input is opened. Inputs that cannot be read are logged
/// and skipped.
pub fn sum(
    inputs: &[Input],
    seed: Option<&str>,
    chunk_size: usize,
    out: &mut impl Write,
) -> Result<(), Error> {
    let seed = seed.map(parse_seed).transpose()?;
    let seed = seed.as_deref();
    checksum(&[], seed)?;

    let mut failed = 0;
    for input in inputs {
        let label = input.label();
        let digest = match input
            .open()
            .map_err(castagnoli_checksum::Error::from)
            .and_then(|reader| checksum_reader(reader, seed, chunk_size))
        {
            Ok(digest) => digest,
            Err(e) => {
                error!(input = %label, error = ?e, "failed to checksum input");
                failed += 1;
                continue;
            }
        };
        writeln!(out, "{digest}  {label}")?;
    }
    if failed > 0 {
        return Err(Error::Failed(failed));
    }
    Ok(())
}

/// Stream every input through the algorithm registered as `name`, printing
/// `<hex digest>  <label>`.
///
/// A single hasher is reused across inputs since finalizing returns it to its initial state.
pub fn hash(
    registry: &Registry,
    name: &str,
    inputs: &[Input],
    chunk_size: usize,
    out: &mut impl Write,
) -> Result<(), Error> {
    let mut hasher = registry.create(name)?;
    let mut buf = vec![0u8; chunk_size];
    let mut failed = 0;
    for input in inputs {
        let label = input.label();
        let mut reader = match input.open() {
            Ok(reader) => reader,
            Err(e) => {
                error!(input = %label, error = ?e, "failed to open input");
                failed += 1;
                continue;
            }
        };
        let mut total = 0u64;
        let result = loop {
            match reader.read(&mut buf) {
                Ok(0) => break Ok(()),
                Ok(read) => {
                    hasher.update(&buf[..read]);
                    total += read as u64;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => break Err(e),
            }
        };
        if let Err(e) = result {
            error!(input = %label, error = ?e, "failed to read input");
            hasher.reset();
            failed += 1;
            continue;
        }
        let digest = hasher.finalize();
        debug!(input = %label, algorithm = name, total, "hashed input");
        writeln!(out, "{}  {label}", hex::encode(digest))?;
    }
    if failed > 0 {
        return Err(Error::Failed(failed));
    }
    Ok(())
}

/// Print every registered algorithm with its sizes.
pub fn algorithms(registry: &Registry, out: &mut impl Write) -> Result<(), Error> {
    for descriptor in registry.descriptors() {
        writeln!(
            out,
            "{}\tdigest={}\tblock={}\tcontext={}",
            descriptor.name(),
            descriptor.digest_size(),
            descriptor.block_size(),
            descriptor.context_size()
        )?;
    }
    Ok(())
}
