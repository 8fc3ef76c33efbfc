//! Ready-made [`NodeConfig`](lmt_core::NodeConfig) implementations for `lmt-core` trees.
//!
//! - [`Sha256Config`] hashes the display form of any element and combines sorted pairs with
//!   SHA-256.
//! - [`Blake2bConfig`] maps elements to [`PlutusData`], hashes its canonical CBOR with
//!   BLAKE2b-256 and combines sorted pairs as a two-item Plutus list, so roots and proofs can be
//!   checked by Cardano validators.
//!
//! Both produce 32-byte [`Digest`] nodes and combine commutatively, so membership proofs work.

pub mod blake2b;
pub mod cbor;
pub mod digest;
pub mod plutus;
pub mod sha256;

use std::fmt::Display;

pub use blake2b::{Blake2bConfig, IntegerData, blake2b_256};
pub use digest::{DIGEST_SIZE, Digest};
use lmt_core::{MerkleError, SerialTree, Tree};
pub use plutus::PlutusData;
pub use sha256::Sha256Config;

/// Build a SHA-256 tree over `elements`.
#[must_use]
pub fn sha256_tree<E: Display>(elements: impl IntoIterator<Item = E>) -> Tree<E, Sha256Config> {
    Tree::build(elements, Sha256Config)
}

/// Build a SHA-256 serial tree.
///
/// # Errors
/// Returns [`MerkleError::NonConsecutiveSerial`] if the elements are not `±1, ±2, ..., ±n`.
pub fn sha256_serial_tree(elements: Vec<i64>) -> Result<SerialTree<Sha256Config>, MerkleError> {
    SerialTree::build(elements, Sha256Config)
}

/// Build a BLAKE2b tree, encoding each element with `to_data`.
#[must_use]
pub fn blake2b_tree<E, F>(
    elements: impl IntoIterator<Item = E>,
    to_data: F,
) -> Tree<E, Blake2bConfig<F>>
where
    F: Fn(&E) -> PlutusData,
{
    Tree::build(elements, Blake2bConfig::new(to_data))
}

/// Build a BLAKE2b serial tree whose elements are encoded as Plutus integers.
///
/// # Errors
/// Returns [`MerkleError::NonConsecutiveSerial`] if the elements are not `±1, ±2, ..., ±n`.
pub fn blake2b_serial_tree(
    elements: Vec<i64>,
) -> Result<SerialTree<Blake2bConfig<IntegerData>>, MerkleError> {
    SerialTree::build(elements, Blake2bConfig::integers())
}
