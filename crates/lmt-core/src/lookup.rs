//! Leaf and sibling lookup.

use crate::config::NodeConfig;
use crate::tree::Tree;

/// A leaf node together with its position in the leaf layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leaf<'a, N> {
    /// The leaf node.
    pub node: &'a N,
    /// 0-indexed position of the leaf.
    pub index: usize,
}

impl<E: PartialEq, C: NodeConfig<E>> Tree<E, C> {
    /// Find the leaf of the first element equal to `element`.
    ///
    /// Elements are compared with `==`, not with [`NodeConfig::compare_nodes`]. When an element
    /// occurs more than once only its first position is ever returned, so trees that hand out
    /// membership proofs should hold unique elements.
    #[must_use]
    pub fn leaf(&self, element: &E) -> Option<Leaf<'_, C::Node>> {
        let index = self.elements().iter().position(|e| e == element)?;
        let node = self.leaves().get(index)?;
        Some(Leaf { node, index })
    }
}

impl<E, C: NodeConfig<E>> Tree<E, C> {
    /// The node paired with `index` in `layer`.
    ///
    /// Returns `None` for the unpaired last node of an odd-length layer and for positions or
    /// layers outside the tree.
    #[must_use]
    pub fn sibling(&self, index: usize, layer: usize) -> Option<&C::Node> {
        self.layer(layer)?.get(sibling_index(index))
    }
}

/// Index of the node paired with `index`: `index + 1` when even, `index - 1` when odd.
pub(crate) const fn sibling_index(index: usize) -> usize {
    index ^ 1
}
