//! Membership proofs.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::NodeConfig;
use crate::error::MerkleError;
use crate::tree::Tree;

/// Sibling nodes from a leaf up to (not including) the root.
///
/// Levels where the path node had no sibling contribute nothing, so a proof can be shorter than
/// the tree height minus one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct MembershipProof<N>(Vec<N>);

impl<N> MembershipProof<N> {
    /// The sibling nodes, leaf level first.
    #[must_use]
    pub fn nodes(&self) -> &[N] {
        &self.0
    }

    /// Number of sibling nodes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the proof holds no nodes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Unwrap the sibling nodes.
    #[must_use]
    pub fn into_inner(self) -> Vec<N> {
        self.0
    }
}

impl<N> From<Vec<N>> for MembershipProof<N> {
    fn from(nodes: Vec<N>) -> Self {
        Self(nodes)
    }
}

impl<N> AsRef<[N]> for MembershipProof<N> {
    fn as_ref(&self) -> &[N] {
        &self.0
    }
}

impl<E: PartialEq, C: NodeConfig<E>> Tree<E, C> {
    /// Collect the siblings on the path from `element`'s leaf to the root.
    ///
    /// # Errors
    /// Returns [`MerkleError::ElementNotFound`] if `element` is not in the tree.
    pub fn proof(&self, element: &E) -> Result<MembershipProof<C::Node>, MerkleError> {
        let leaf = self.leaf(element).ok_or(MerkleError::ElementNotFound)?;

        let levels = self.height().saturating_sub(1);
        let mut index = leaf.index;
        let mut nodes = Vec::with_capacity(levels);
        for layer in 0..levels {
            if let Some(sibling) = self.sibling(index, layer) {
                nodes.push(sibling.clone());
            }
            index /= 2;
        }

        Ok(MembershipProof(nodes))
    }

    /// Check that folding `proof` onto `element`'s leaf reproduces the root.
    ///
    /// Each step computes `combine_nodes(node, sibling)`; see [`NodeConfig`] for why the combine
    /// has to be commutative. Returns `false` for an unknown element or an empty tree.
    #[must_use]
    pub fn verify_proof(&self, element: &E, proof: &MembershipProof<C::Node>) -> bool {
        let Some(leaf) = self.leaf(element) else {
            debug!("membership proof rejected: element not found");
            return false;
        };
        let Some(root) = self.root() else {
            return false;
        };

        let config = self.config();
        let computed = proof
            .nodes()
            .iter()
            .fold(leaf.node.clone(), |node, sibling| {
                config.combine_nodes(&node, sibling)
            });

        let verified = config.compare_nodes(&computed, root);
        if !verified {
            debug!(
                leaf = leaf.index,
                proof_len = proof.len(),
                "membership proof rejected: root mismatch"
            );
        }
        verified
    }
}
