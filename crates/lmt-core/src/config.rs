//! The hashing capability a tree is built with.

use std::fmt;
use std::marker::PhantomData;

/// Turns elements into nodes and combines nodes into parents.
///
/// A tree only ever talks to its nodes through these three operations, so any digest or
/// encoding can be plugged in. Implementations must be pure: the same inputs always give the
/// same outputs and no state is mutated.
///
/// # Commutativity
/// Membership proofs record siblings without saying which side they were on, and verification
/// always calls `combine_nodes(node, sibling)`. `combine_nodes(a, b)` therefore has to be
/// equivalent to `combine_nodes(b, a)` under [`NodeConfig::compare_nodes`], usually by ordering
/// the two operands before hashing them. An order-sensitive combine still builds a valid tree,
/// but its membership proofs will not verify.
pub trait NodeConfig<E: ?Sized> {
    /// The node stored in every layer of the tree.
    type Node: Clone;

    /// Hash one element into a leaf. Equal elements must give equal nodes.
    fn element_to_node(&self, element: &E) -> Self::Node;

    /// Combine two adjacent nodes into their parent.
    fn combine_nodes(&self, left: &Self::Node, right: &Self::Node) -> Self::Node;

    /// Node equivalence. Must be reflexive, symmetric and transitive.
    fn compare_nodes(&self, left: &Self::Node, right: &Self::Node) -> bool;
}

impl<E: ?Sized, C: NodeConfig<E> + ?Sized> NodeConfig<E> for &C {
    type Node = C::Node;

    fn element_to_node(&self, element: &E) -> Self::Node {
        (**self).element_to_node(element)
    }

    fn combine_nodes(&self, left: &Self::Node, right: &Self::Node) -> Self::Node {
        (**self).combine_nodes(left, right)
    }

    fn compare_nodes(&self, left: &Self::Node, right: &Self::Node) -> bool {
        (**self).compare_nodes(left, right)
    }
}

/// A [`NodeConfig`] assembled from three functions.
///
/// ```
/// use lmt_core::{FnConfig, NodeConfig};
///
/// let config = FnConfig::new(
///     |e: &str| e.len(),
///     |l: &usize, r: &usize| l + r,
///     |l: &usize, r: &usize| l == r,
/// );
/// assert_eq!(config.element_to_node("abc"), 3);
/// ```
pub struct FnConfig<N, L, C, Q> {
    to_node: L,
    combine: C,
    compare: Q,
    _node: PhantomData<fn() -> N>,
}

impl<N, L, C, Q> FnConfig<N, L, C, Q> {
    /// Bundle the leaf, combine and compare functions.
    #[must_use]
    pub const fn new(to_node: L, combine: C, compare: Q) -> Self {
        Self {
            to_node,
            combine,
            compare,
            _node: PhantomData,
        }
    }
}

impl<N, L: Clone, C: Clone, Q: Clone> Clone for FnConfig<N, L, C, Q> {
    fn clone(&self) -> Self {
        Self::new(
            self.to_node.clone(),
            self.combine.clone(),
            self.compare.clone(),
        )
    }
}

impl<N, L, C, Q> fmt::Debug for FnConfig<N, L, C, Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnConfig").finish_non_exhaustive()
    }
}

impl<E, N, L, C, Q> NodeConfig<E> for FnConfig<N, L, C, Q>
where
    E: ?Sized,
    N: Clone,
    L: Fn(&E) -> N,
    C: Fn(&N, &N) -> N,
    Q: Fn(&N, &N) -> bool,
{
    type Node = N;

    fn element_to_node(&self, element: &E) -> N {
        (self.to_node)(element)
    }

    fn combine_nodes(&self, left: &N, right: &N) -> N {
        (self.combine)(left, right)
    }

    fn compare_nodes(&self, left: &N, right: &N) -> bool {
        (self.compare)(left, right)
    }
}
