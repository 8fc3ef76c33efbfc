//! Errors returned by fallible tree constructors and proof generators.

use thiserror::Error;

/// Errors that can occur when building trees or generating proofs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    /// The element is not one of the tree's elements.
    #[error("Element not found in the tree")]
    ElementNotFound,

    /// A serial tree element does not match its position.
    #[error(
        "Serial tree elements must be consecutive integers starting from 1 (sign may be negative): \
         position {position} expects magnitude {expected}, found {found}"
    )]
    NonConsecutiveSerial {
        /// 0-indexed position of the first offending element.
        position: usize,
        /// The magnitude required at that position.
        expected: usize,
        /// The element actually found.
        found: i64,
    },

    /// The requested 1-indexed range is empty or reaches outside the leaves.
    #[error("Range {start}..={end} is not inside the tree leaves 1..={leaf_count}")]
    InvalidRange {
        /// First position of the requested range.
        start: usize,
        /// Last position of the requested range.
        end: usize,
        /// Number of leaves in the tree.
        leaf_count: usize,
    },
}
