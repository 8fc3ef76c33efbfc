//! Layered Merkle trees over caller-defined nodes.
//!
//! A [`Tree`] is built from an ordered sequence of elements and a [`NodeConfig`] that turns
//! elements into leaf nodes, combines pairs of nodes and compares nodes. The tree is stored as
//! a list of layers (`layers[0]` are the leaves, the last layer holds the root) and is never
//! mutated after construction.
//!
//! Two kinds of proofs are supported:
//!
//! - membership proofs for any element of a [`Tree`] ([`Tree::proof`], [`Tree::verify_proof`]),
//! - contiguous-range proofs for a [`SerialTree`], a tree whose elements are `1..=n` up to sign
//!   ([`SerialTree::range_proof`], [`SerialTree::verify_range_proof`]).
//!
//! Membership proofs carry no left/right information, so a [`NodeConfig`] must combine nodes
//! commutatively (for example by sorting both operands before hashing).
//!
//! ```
//! use lmt_core::{FnConfig, SerialTree, Tree};
//!
//! let sum = FnConfig::new(|e: &i64| *e, |l: &i64, r: &i64| l + r, |l: &i64, r: &i64| l == r);
//!
//! let tree = Tree::build(vec![1, 2, 3, 4], sum.clone());
//! assert_eq!(tree.root(), Some(&10));
//! let proof = tree.proof(&1).expect("1 is in the tree");
//! assert!(tree.verify_proof(&1, &proof));
//!
//! let serial = SerialTree::from_len(16, sum);
//! let range = serial.range_proof(&(4..=9)).expect("range is inside the tree");
//! assert!(serial.verify_range_proof(&(4..=9), &range));
//! ```

mod config;
mod error;
mod lookup;
mod proof;
mod range;
mod serial;
mod tree;

pub use config::{FnConfig, NodeConfig};
pub use error::MerkleError;
pub use lookup::Leaf;
pub use proof::MembershipProof;
pub use range::{LayerNode, RangeProof};
pub use serial::{SerialTree, validate_serial};
pub use tree::Tree;
