//! Contiguous-range proofs over serial trees.
//!
//! Positions are 1-indexed and ranges inclusive, matching the serial elements themselves. A
//! range proof holds the boundary nodes, tagged with their layer, that sit immediately left and
//! right of the range at each level. The verifier folds the range's own leaves layer by layer
//! and splices a boundary node in whenever one is tagged for the current layer.
//!
//! For the leaves `1..=16` summed pairwise, the range `4..=9` needs leaf 3 and the pair `1+2`
//! on the left, and leaf 10, the pair `11+12` and the quad `13+..+16` on the right:
//! `left = [(0, 3), (1, 3)]`, `right = [(0, 10), (1, 23), (2, 58)]`.

#![allow(
    clippy::arithmetic_side_effects,
    reason = "Index math stays within the layer widths, which are bounded by the leaf count"
)]

use std::collections::VecDeque;
use std::iter::Peekable;
use std::ops::RangeInclusive;
use std::slice;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, trace};

use crate::config::NodeConfig;
use crate::error::MerkleError;
use crate::lookup::sibling_index;
use crate::serial::SerialTree;
use crate::tree::fold_layer;

/// A proof node tagged with the layer it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayerNode<N> {
    /// Layer of the node, `0` for leaves.
    pub layer: usize,
    /// The node itself.
    pub node: N,
}

impl<N> LayerNode<N> {
    /// Tag `node` with `layer`.
    #[must_use]
    pub const fn new(layer: usize, node: N) -> Self {
        Self { layer, node }
    }
}

impl<N> From<(usize, N)> for LayerNode<N> {
    fn from((layer, node): (usize, N)) -> Self {
        Self::new(layer, node)
    }
}

/// Boundary nodes proving a contiguous range of leaves.
///
/// Every node's leaf span lies strictly outside the range, on its side. Both lists are ordered by
/// ascending layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RangeProof<N> {
    left: Vec<LayerNode<N>>,
    right: Vec<LayerNode<N>>,
}

impl<N> RangeProof<N> {
    /// Assemble a proof from its left and right boundary lists.
    #[must_use]
    pub const fn new(left: Vec<LayerNode<N>>, right: Vec<LayerNode<N>>) -> Self {
        Self { left, right }
    }

    /// Boundary nodes left of the range.
    #[must_use]
    pub fn left(&self) -> &[LayerNode<N>] {
        &self.left
    }

    /// Boundary nodes right of the range.
    #[must_use]
    pub fn right(&self) -> &[LayerNode<N>] {
        &self.right
    }

    /// Split into the left and right boundary lists.
    #[must_use]
    pub fn into_parts(self) -> (Vec<LayerNode<N>>, Vec<LayerNode<N>>) {
        (self.left, self.right)
    }
}

/// Why a range proof could not be folded into a root.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
enum MalformedRangeProof {
    #[error(transparent)]
    Range(#[from] MerkleError),

    #[error("No serial leaf at position {0}")]
    MissingLeaf(usize),

    #[error("{side} proof entry for layer {entry} arrived at layer {layer}")]
    OutOfOrder {
        side: &'static str,
        entry: usize,
        layer: usize,
    },

    #[error("{side} proof has {remaining} unused entries")]
    UnusedEntries { side: &'static str, remaining: usize },

    #[error("Range folded into {0} nodes instead of one")]
    NotReduced(usize),
}

type Entries<'a, N> = Peekable<slice::Iter<'a, LayerNode<N>>>;

impl<C: NodeConfig<i64>> SerialTree<C> {
    /// Build the proof for the 1-indexed inclusive `range`.
    ///
    /// # Errors
    /// Returns [`MerkleError::InvalidRange`] unless `1 <= start <= end <= len`.
    #[instrument(skip_all, fields(start = range.start(), end = range.end()))]
    pub fn range_proof(
        &self,
        range: &RangeInclusive<usize>,
    ) -> Result<RangeProof<C::Node>, MerkleError> {
        let (start, end) = self.check_range(range)?;
        let leaves = self.leaves();

        let mut left = Vec::new();
        let mut start_idx = start - 1;
        if start % 2 == 0 {
            // The range opens on the right half of a pair.
            start_idx -= 1;
            if let Some(leaf) = leaves.get(start_idx) {
                left.push(LayerNode::new(0, leaf.clone()));
            }
        }
        self.collect_boundary(start_idx, &mut left, |first_leaf| first_leaf < start_idx);

        let mut right = Vec::new();
        let mut end_idx = end - 1;
        if end % 2 == 1 {
            // The range closes on the left half of a pair.
            end_idx += 1;
            if let Some(leaf) = leaves.get(end_idx) {
                right.push(LayerNode::new(0, leaf.clone()));
            }
        }
        self.collect_boundary(end_idx, &mut right, |first_leaf| first_leaf > end_idx);

        debug!(left = left.len(), right = right.len(), "built range proof");
        Ok(RangeProof::new(left, right))
    }

    /// Check a range proof against the tree root.
    ///
    /// Never fails loudly: an invalid range, a missing leaf, a malformed proof or a root mismatch
    /// all give `false`.
    #[instrument(skip_all, fields(start = range.start(), end = range.end()))]
    #[must_use]
    pub fn verify_range_proof(
        &self,
        range: &RangeInclusive<usize>,
        proof: &RangeProof<C::Node>,
    ) -> bool {
        let computed = match self.fold_range(range, proof) {
            Ok(computed) => computed,
            Err(reason) => {
                debug!(%reason, "range proof rejected");
                return false;
            }
        };
        let Some(root) = self.root() else {
            return false;
        };

        let verified = self.config().compare_nodes(&computed, root);
        if !verified {
            debug!("range proof rejected: root mismatch");
        }
        verified
    }

    /// Walk from layer 1 to the layer below the root, recording the sibling of `index`'s
    /// ancestor whenever its first leaf satisfies `outside`.
    fn collect_boundary(
        &self,
        mut index: usize,
        proof: &mut Vec<LayerNode<C::Node>>,
        outside: impl Fn(usize) -> bool,
    ) {
        for layer in 1..self.height().saturating_sub(1) {
            index /= 2;
            let Some(node) = self.sibling(index, layer) else {
                continue;
            };
            let first_leaf = first_leaf_of(sibling_index(index), layer);
            if first_leaf.is_some_and(&outside) {
                proof.push(LayerNode::new(layer, node.clone()));
            }
        }
    }

    fn fold_range(
        &self,
        range: &RangeInclusive<usize>,
        proof: &RangeProof<C::Node>,
    ) -> Result<C::Node, MalformedRangeProof> {
        let (start, end) = self.check_range(range)?;
        let mut working = (start..=end)
            .map(|position| {
                self.serial_leaf(position)
                    .cloned()
                    .ok_or(MalformedRangeProof::MissingLeaf(position))
            })
            .collect::<Result<VecDeque<_>, _>>()?;

        let mut left = proof.left().iter().peekable();
        let mut right = proof.right().iter().peekable();
        let top = self.height().saturating_sub(1);

        let mut layer = 0;
        splice(&mut working, &mut left, &mut right, layer)?;
        while layer < top {
            working = fold_layer::<i64, C>(self.config(), working.make_contiguous()).into();
            layer += 1;
            splice(&mut working, &mut left, &mut right, layer)?;
            trace!(layer, width = working.len(), "folded range layer");
        }

        for (side, entries) in [("Left", left), ("Right", right)] {
            let remaining = entries.count();
            if remaining > 0 {
                return Err(MalformedRangeProof::UnusedEntries { side, remaining });
            }
        }
        match (working.pop_front(), working.len()) {
            (Some(computed), 0) => Ok(computed),
            (_, rest) => Err(MalformedRangeProof::NotReduced(rest + 1)),
        }
    }

    /// The leaf at 1-indexed `position`, provided the element there has magnitude `position`.
    fn serial_leaf(&self, position: usize) -> Option<&C::Node> {
        let index = position.checked_sub(1)?;
        let element = self.elements().get(index)?;
        if usize::try_from(element.unsigned_abs()).ok() != Some(position) {
            return None;
        }
        self.leaves().get(index)
    }

    fn check_range(&self, range: &RangeInclusive<usize>) -> Result<(usize, usize), MerkleError> {
        let (start, end) = (*range.start(), *range.end());
        if start == 0 || start > end || end > self.len() {
            return Err(MerkleError::InvalidRange {
                start,
                end,
                leaf_count: self.len(),
            });
        }
        Ok((start, end))
    }
}

/// Prepend the left head and append the right head when they are tagged for `layer`.
fn splice<N: Clone>(
    working: &mut VecDeque<N>,
    left: &mut Entries<'_, N>,
    right: &mut Entries<'_, N>,
    layer: usize,
) -> Result<(), MalformedRangeProof> {
    if let Some(node) = take_for_layer(left, layer, "Left")? {
        working.push_front(node);
    }
    if let Some(node) = take_for_layer(right, layer, "Right")? {
        working.push_back(node);
    }
    Ok(())
}

fn take_for_layer<N: Clone>(
    entries: &mut Entries<'_, N>,
    layer: usize,
    side: &'static str,
) -> Result<Option<N>, MalformedRangeProof> {
    match entries.peek() {
        Some(entry) if entry.layer == layer => Ok(entries.next().map(|entry| entry.node.clone())),
        Some(entry) if entry.layer < layer => Err(MalformedRangeProof::OutOfOrder {
            side,
            entry: entry.layer,
            layer,
        }),
        _ => Ok(None),
    }
}

/// First leaf position covered by node `index` of `layer`.
fn first_leaf_of(index: usize, layer: usize) -> Option<usize> {
    let span = 1_usize.checked_shl(u32::try_from(layer).ok()?)?;
    index.checked_mul(span)
}
