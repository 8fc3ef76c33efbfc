//! Implementation of every `lmt` subcommand.

use std::fs;
use std::path::Path;

use eyre::{Context as _, Result, ensure, eyre};
use lmt_core::{NodeConfig, RangeProof, SerialTree, Tree};
use lmt_hashers::{Blake2bConfig, Digest, PlutusData, Sha256Config};
use tracing::info;

use crate::cli::{Hasher, TreeArgs};
use crate::output::{
    MembershipProofFile, RangeProofFile, RootReport, Verdict, read_json, write_json,
};

/// Plutus encoding of one element line: an integer when it parses as one, its UTF-8 bytes
/// otherwise.
pub fn text_data(element: &str) -> PlutusData {
    element.parse::<i128>().map_or_else(
        |_| PlutusData::Bytes(element.as_bytes().to_vec()),
        PlutusData::Integer,
    )
}

fn text_config() -> Blake2bConfig<impl Fn(&String) -> PlutusData> {
    Blake2bConfig::new(|element: &String| text_data(element))
}

/// Elements of the tree described by `args`, as text.
pub fn load_elements(args: &TreeArgs) -> Result<Vec<String>> {
    match (&args.elements, args.serial_len) {
        (_, Some(len)) => Ok((1..=len).map(|n| n.to_string()).collect()),
        (Some(path), None) => read_lines(path),
        (None, None) => Err(eyre!("Either --elements or --serial-len is required")),
    }
}

/// Elements of the serial tree described by `args`.
pub fn load_serial(args: &TreeArgs) -> Result<Vec<i64>> {
    match (&args.elements, args.serial_len) {
        (_, Some(len)) => Ok((1..=i64::from(len)).collect()),
        (Some(path), None) => read_lines(path)?
            .iter()
            .enumerate()
            .map(|(line, text)| {
                text.parse::<i64>().with_context(|| {
                    format!(
                        "Element {} of {} is not an integer: {text}",
                        line.saturating_add(1),
                        path.display()
                    )
                })
            })
            .collect(),
        (None, None) => Err(eyre!("Either --elements or --serial-len is required")),
    }
}

fn read_lines(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read elements from {}", path.display()))?;
    let elements: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect();
    info!(file = ?path, count = elements.len(), "Loaded elements");
    Ok(elements)
}

pub fn root(args: &TreeArgs, out: Option<&Path>) -> Result<()> {
    let elements = load_elements(args)?;
    let report = match args.hasher {
        Hasher::Sha256 => root_report(args.hasher, &Tree::build(elements, Sha256Config)),
        Hasher::Blake2b => root_report(args.hasher, &Tree::build(elements, text_config())),
    };
    info!(
        leaves = report.leaves,
        height = report.height,
        root = ?report.root,
        "Built tree"
    );
    write_json(&report, out)
}

fn root_report<C>(hasher: Hasher, tree: &Tree<String, C>) -> RootReport
where
    C: NodeConfig<String, Node = Digest>,
{
    RootReport {
        hasher,
        leaves: tree.len(),
        height: tree.height(),
        root: tree.root().copied(),
    }
}

pub fn prove(args: &TreeArgs, element: String, out: Option<&Path>) -> Result<()> {
    let elements = load_elements(args)?;
    let file = match args.hasher {
        Hasher::Sha256 => {
            prove_membership(args.hasher, &Tree::build(elements, Sha256Config), element)?
        }
        Hasher::Blake2b => {
            prove_membership(args.hasher, &Tree::build(elements, text_config()), element)?
        }
    };
    write_json(&file, out)
}

fn prove_membership<C>(
    hasher: Hasher,
    tree: &Tree<String, C>,
    element: String,
) -> Result<MembershipProofFile>
where
    C: NodeConfig<String, Node = Digest>,
{
    let index = tree
        .leaf(&element)
        .map(|leaf| leaf.index)
        .ok_or_else(|| eyre!("Element {element} is not in the tree"))?;
    let proof = tree.proof(&element)?;
    info!(%element, index, siblings = proof.len(), "Generated membership proof");
    Ok(MembershipProofFile {
        hasher,
        element,
        index,
        proof,
    })
}

pub fn verify(args: &TreeArgs, proof: &Path) -> Result<()> {
    let file: MembershipProofFile = read_json(proof)?;
    check_hasher(file.hasher, args.hasher)?;
    let elements = load_elements(args)?;
    let valid = match args.hasher {
        Hasher::Sha256 => {
            Tree::build(elements, Sha256Config).verify_proof(&file.element, &file.proof)
        }
        Hasher::Blake2b => {
            Tree::build(elements, text_config()).verify_proof(&file.element, &file.proof)
        }
    };
    report_verdict(valid, &format!("membership of {}", file.element))
}

pub fn range_prove(args: &TreeArgs, start: usize, end: usize, out: Option<&Path>) -> Result<()> {
    let elements = load_serial(args)?;
    let range = start..=end;
    let proof: RangeProof<Digest> = match args.hasher {
        Hasher::Sha256 => SerialTree::build(elements, Sha256Config)?.range_proof(&range)?,
        Hasher::Blake2b => {
            SerialTree::build(elements, Blake2bConfig::integers())?.range_proof(&range)?
        }
    };
    info!(
        start,
        end,
        left = proof.left().len(),
        right = proof.right().len(),
        "Generated range proof"
    );
    write_json(
        &RangeProofFile {
            hasher: args.hasher,
            start,
            end,
            proof,
        },
        out,
    )
}

pub fn range_verify(args: &TreeArgs, proof: &Path) -> Result<()> {
    let file: RangeProofFile = read_json(proof)?;
    check_hasher(file.hasher, args.hasher)?;
    let elements = load_serial(args)?;
    let range = file.start..=file.end;
    let valid = match args.hasher {
        Hasher::Sha256 => {
            SerialTree::build(elements, Sha256Config)?.verify_range_proof(&range, &file.proof)
        }
        Hasher::Blake2b => SerialTree::build(elements, Blake2bConfig::integers())?
            .verify_range_proof(&range, &file.proof),
    };
    report_verdict(valid, &format!("range {}..={}", file.start, file.end))
}

fn check_hasher(proof: Hasher, tree: Hasher) -> Result<()> {
    ensure!(
        proof == tree,
        "Proof was made with {proof} but the tree uses {tree}"
    );
    Ok(())
}

fn report_verdict(valid: bool, subject: &str) -> Result<()> {
    write_json(&Verdict { valid }, None)?;
    ensure!(valid, "Invalid proof: {subject}");
    info!("Valid proof: {subject}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn serial_args(hasher: Hasher, len: u32) -> TreeArgs {
        TreeArgs {
            hasher,
            elements: None,
            serial_len: Some(len),
        }
    }

    fn file_args(hasher: Hasher, path: PathBuf) -> TreeArgs {
        TreeArgs {
            hasher,
            elements: Some(path),
            serial_len: None,
        }
    }

    #[test]
    fn text_data_prefers_integers() {
        assert_eq!(text_data("42"), PlutusData::Integer(42));
        assert_eq!(text_data("-7"), PlutusData::Integer(-7));
        assert_eq!(text_data("x1"), PlutusData::Bytes(b"x1".to_vec()));
        assert_eq!(
            text_data("18446744073709551616"),
            PlutusData::Integer(18_446_744_073_709_551_616)
        );
    }

    #[test]
    fn element_files_skip_blank_lines() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("elements.txt");
        fs::write(&path, "1\n\n -2 \n3\r\n\n").expect("Failed to write elements");

        let args = file_args(Hasher::Sha256, path);
        assert_eq!(
            load_elements(&args).expect("elements load"),
            ["1", "-2", "3"]
        );
        assert_eq!(load_serial(&args).expect("elements load"), [1, -2, 3]);
    }

    #[test]
    fn serial_len_matches_element_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("elements.txt");
        fs::write(&path, "1\n2\n3\n4\n5\n").expect("Failed to write elements");

        for hasher in [Hasher::Sha256, Hasher::Blake2b] {
            let from_len = load_elements(&serial_args(hasher, 5)).expect("elements load");
            let from_file =
                load_elements(&file_args(hasher, path.clone())).expect("elements load");
            assert_eq!(from_len, from_file);
        }
    }

    #[test]
    fn text_and_integer_trees_agree() {
        let text: Vec<String> = (1..=9_i64).map(|n| n.to_string()).collect();
        let integers: Vec<i64> = (1..=9).collect();

        let sha_text = Tree::build(text.clone(), Sha256Config);
        let sha_int = Tree::build(integers.clone(), Sha256Config);
        assert_eq!(sha_text.root(), sha_int.root());

        let plutus_text = Tree::build(text, text_config());
        let plutus_int = Tree::build(integers, Blake2bConfig::integers());
        assert_eq!(plutus_text.root(), plutus_int.root());
    }

    #[test]
    fn non_integer_serial_element_is_reported() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("elements.txt");
        fs::write(&path, "1\ntwo\n").expect("Failed to write elements");

        let err = load_serial(&file_args(Hasher::Sha256, path)).expect_err("two is not a number");
        assert!(err.to_string().contains("Element 2"));
    }

    #[test]
    fn prove_membership_reports_index() {
        let tree = Tree::build(
            vec!["a".to_owned(), "b".to_owned(), "c".to_owned()],
            Sha256Config,
        );
        let file = prove_membership(Hasher::Sha256, &tree, "c".to_owned()).expect("c is a leaf");
        assert_eq!(file.index, 2);
        assert!(tree.verify_proof(&file.element, &file.proof));

        assert!(prove_membership(Hasher::Sha256, &tree, "d".to_owned()).is_err());
    }

    #[test]
    fn hasher_mismatch_is_rejected() {
        assert!(check_hasher(Hasher::Sha256, Hasher::Sha256).is_ok());
        let err = check_hasher(Hasher::Blake2b, Hasher::Sha256).expect_err("hashers differ");
        assert!(err.to_string().contains("made with blake2b"));
    }
}
