//! Compute CRC32C checksums from the command line.
//!
//! # Usage
//!
//! Checksum files (or stdin when no files are given):
//!
//! ```sh
//! crc32c sum data.bin more.bin
//! ```
//!
//! Continue from a previously printed checksum:
//!
//! ```sh
//! crc32c sum --seed e3069283 tail.bin
//! ```
//!
//! Drive any registered algorithm through the streaming interface:
//!
//! ```sh
//! crc32c algorithms
//! crc32c hash --algorithm crc32c data.bin
//! ```

use castagnoli_hash::Registry;
use clap::{builder::RangedU64ValueParser, value_parser, Arg, ArgAction, ArgMatches, Command};
use std::{path::PathBuf, process::ExitCode};
use tracing::error;

mod commands;
use commands::Input;

/// Flag for verbose output
const VERBOSE_FLAG: &str = "verbose";

const SUM_CMD: &str = "sum";
const HASH_CMD: &str = "hash";
const ALGORITHMS_CMD: &str = "algorithms";

/// Default number of bytes read per chunk (matches `castagnoli_checksum::DEFAULT_CHUNK_SIZE`).
const DEFAULT_CHUNK_SIZE: &str = "8192";

fn files_arg() -> Arg {
    Arg::new("files")
        .num_args(0..)
        .help("Files to read (stdin when omitted)")
        .value_parser(value_parser!(PathBuf))
}

fn chunk_size_arg() -> Arg {
    Arg::new("chunk-size")
        .long("chunk-size")
        .default_value(DEFAULT_CHUNK_SIZE)
        .help("Bytes read per chunk (must be >= 1)")
        .value_parser(RangedU64ValueParser::<usize>::new().range(1..))
}

fn inputs(matches: &ArgMatches) -> Vec<Input> {
    match matches.get_many::<PathBuf>("files") {
        Some(files) => files.cloned().map(Input::File).collect(),
        None => vec![Input::Stdin],
    }
}

fn main() -> ExitCode {
    // Define application
    let matches = Command::new("crc32c")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compute CRC32C (Castagnoli) checksums.")
        .arg(
            Arg::new(VERBOSE_FLAG)
                .short('v')
                .long(VERBOSE_FLAG)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new(SUM_CMD)
                .about("Print the CRC32C checksum of each input as 8 hex digits.")
                .arg(files_arg())
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .help("Previously computed checksum (hex) to continue from"),
                )
                .arg(chunk_size_arg()),
        )
        .subcommand(
            Command::new(HASH_CMD)
                .about("Stream each input through a registered algorithm.")
                .arg(
                    Arg::new("algorithm")
                        .long("algorithm")
                        .required(true)
                        .help("Name of a registered algorithm"),
                )
                .arg(files_arg())
                .arg(chunk_size_arg()),
        )
        .subcommand(Command::new(ALGORITHMS_CMD).about("List registered algorithms."))
        .get_matches();

    // Create logger
    let level = if matches.get_flag(VERBOSE_FLAG) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    // Register algorithms
    let mut registry = Registry::default();
    if let Err(e) = castagnoli_checksum::register(&mut registry) {
        error!(error=?e, "failed to register algorithms");
        return ExitCode::FAILURE;
    }

    // Parse subcommands
    let mut out = std::io::stdout().lock();
    let result = match matches.subcommand() {
        Some((SUM_CMD, matches)) => {
            let seed = matches.get_one::<String>("seed").map(String::as_str);
            let chunk_size = *matches.get_one::<usize>("chunk-size").unwrap();
            commands::sum(&inputs(matches), seed, chunk_size, &mut out)
        }
        Some((HASH_CMD, matches)) => {
            let algorithm = matches.get_one::<String>("algorithm").unwrap();
            let chunk_size = *matches.get_one::<usize>("chunk-size").unwrap();
            commands::hash(
                &registry,
                algorithm,
                &inputs(matches),
                chunk_size,
                &mut out,
            )
        }
        Some((ALGORITHMS_CMD, _)) => commands::algorithms(&registry, &mut out),
        Some((cmd, _)) => {
            error!(cmd, "invalid subcommand");
            return ExitCode::FAILURE;
        }
        None => {
            error!("no subcommand provided");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = result {
        error!(error=?e, "command failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
