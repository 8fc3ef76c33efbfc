//! JSON documents written and read by the CLI.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write as _};
use std::path::Path;

use eyre::{Context as _, Result};
use lmt_core::{MembershipProof, RangeProof};
use lmt_hashers::Digest;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::cli::Hasher;

/// Output of `root`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootReport {
    pub hasher: Hasher,
    pub leaves: usize,
    pub height: usize,
    /// `None` for an empty tree.
    pub root: Option<Digest>,
}

/// Output of `prove`, input of `verify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipProofFile {
    pub hasher: Hasher,
    pub element: String,
    /// Leaf position the proof was made for, 0-based.
    pub index: usize,
    pub proof: MembershipProof<Digest>,
}

/// Output of `range-prove`, input of `range-verify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeProofFile {
    pub hasher: Hasher,
    pub start: usize,
    pub end: usize,
    pub proof: RangeProof<Digest>,
}

/// Output of the verify commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub valid: bool,
}

/// Write `value` as pretty JSON to `out`, or to stdout when `out` is `None`.
pub fn write_json<T: Serialize>(value: &T, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value)?;
            writeln!(writer)?;
            writer
                .flush()
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(file = ?path, "Saved");
        }
        None => {
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, value)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

/// Read a JSON document from `path`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use lmt_core::LayerNode;

    use super::*;

    #[test]
    fn range_proof_file_roundtrip() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("range.json");
        let file = RangeProofFile {
            hasher: Hasher::Blake2b,
            start: 2,
            end: 3,
            proof: RangeProof::new(
                vec![LayerNode::new(0, Digest::new([1; 32]))],
                vec![LayerNode::new(0, Digest::new([4; 32]))],
            ),
        };

        write_json(&file, Some(&path)).expect("file is written");
        let read: RangeProofFile = read_json(&path).expect("file is read");
        assert_eq!(read, file);

        let raw = std::fs::read_to_string(&path).expect("file exists");
        assert!(raw.contains("\"hasher\": \"blake2b\""));
        assert!(raw.contains(&"01".repeat(32)));
    }

    #[test]
    fn read_json_reports_missing_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let err = read_json::<Verdict>(&dir.path().join("missing.json"))
            .expect_err("file does not exist");
        assert!(err.to_string().contains("Failed to open"));
    }
}
