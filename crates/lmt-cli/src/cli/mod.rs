//! Command-line interface for the `lmt` CLI application.

pub mod constants;

use std::fmt;
use std::path::PathBuf;

use clap::Parser;
use eyre::{Result, ensure, eyre};
use serde::{Deserialize, Serialize};

use self::constants::{DEFAULT_HASHER, LMT_ELEMENTS, LMT_HASHER, LMT_OUT, LMT_PROOF, LMT_SERIAL_LEN};

/// Command-line interface definition.
#[derive(Debug, Parser)]
#[command(name = "lmt")]
#[command(about = "Layered Merkle tree tools")]
pub struct Cli {
    /// CLI top-level command.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Build a tree and print its root.
    Root {
        /// Tree to build.
        #[command(flatten)]
        tree: TreeArgs,
        /// Output file, stdout when omitted.
        #[arg(long, env = LMT_OUT)]
        out: Option<PathBuf>,
    },
    /// Produce a membership proof for one element.
    Prove {
        /// Tree to build.
        #[command(flatten)]
        tree: TreeArgs,
        /// Element to prove, exactly as it appears in the element list.
        #[arg(long)]
        element: String,
        /// Output file, stdout when omitted.
        #[arg(long, env = LMT_OUT)]
        out: Option<PathBuf>,
    },
    /// Check a membership proof produced by `prove`.
    Verify {
        /// Tree to check against.
        #[command(flatten)]
        tree: TreeArgs,
        /// Proof file.
        #[arg(long, env = LMT_PROOF)]
        proof: PathBuf,
    },
    /// Produce a proof for the leaves `start..=end` of a serial tree.
    ///
    /// Positions are 1-based. The elements must be the integers `1..=n` in order, each with
    /// either sign.
    #[command(verbatim_doc_comment)]
    RangeProve {
        /// Tree to build.
        #[command(flatten)]
        tree: TreeArgs,
        /// First position of the range.
        #[arg(long)]
        start: usize,
        /// Last position of the range.
        #[arg(long)]
        end: usize,
        /// Output file, stdout when omitted.
        #[arg(long, env = LMT_OUT)]
        out: Option<PathBuf>,
    },
    /// Check a range proof produced by `range-prove`.
    RangeVerify {
        /// Tree to check against.
        #[command(flatten)]
        tree: TreeArgs,
        /// Proof file.
        #[arg(long, env = LMT_PROOF)]
        proof: PathBuf,
    },
}

/// Where the tree's elements come from and how they are hashed.
#[derive(Debug, Clone, clap::Args)]
pub struct TreeArgs {
    /// Node hashing scheme (sha256 or blake2b).
    #[arg(
        long,
        env = LMT_HASHER,
        default_value = DEFAULT_HASHER,
        value_parser = parse_hasher
    )]
    pub hasher: Hasher,
    /// File with one element per line. Blank lines are skipped.
    #[arg(
        long,
        env = LMT_ELEMENTS,
        conflicts_with = "serial_len",
        required_unless_present = "serial_len"
    )]
    pub elements: Option<PathBuf>,
    /// Build the serial tree `1..=n` instead of reading elements.
    #[arg(long, env = LMT_SERIAL_LEN, value_parser = parse_serial_len)]
    pub serial_len: Option<u32>,
}

/// Node hashing scheme.
///
/// `sha256` hashes the element text. `blake2b` encodes each element as Plutus data (an integer
/// when the text parses as one, a byte string otherwise) and hashes its CBOR with BLAKE2b-256.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hasher {
    /// SHA-256 over the element text.
    Sha256,
    /// BLAKE2b-256 over Plutus data.
    Blake2b,
}

impl fmt::Display for Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha256 => f.write_str("sha256"),
            Self::Blake2b => f.write_str("blake2b"),
        }
    }
}

pub fn parse_hasher(s: &str) -> Result<Hasher> {
    match s {
        "sha256" => Ok(Hasher::Sha256),
        "blake2b" => Ok(Hasher::Blake2b),
        other => Err(eyre!(
            "Invalid hasher: {other}. Expected 'sha256' or 'blake2b'."
        )),
    }
}

pub fn parse_serial_len(s: &str) -> Result<u32> {
    let len: u32 = s
        .parse()
        .map_err(|e| eyre!("Invalid serial length {s}: {e}"))?;
    ensure!(len > 0, "Serial length must be at least 1");
    Ok(len)
}
