//! Tree construction and layer accessors.

use std::fmt;

use tracing::debug;

use crate::config::NodeConfig;

/// An immutable Merkle tree stored as layers of nodes.
///
/// `layers[0]` holds one leaf per element in element order. Every following layer pairs up the
/// nodes of the layer below: `(2k, 2k + 1)` become `combine_nodes(left, right)` and an unpaired
/// last node is promoted unchanged. The last layer of a non-empty tree holds exactly one node,
/// the root.
///
/// A tree built from no elements has a single empty layer and no root.
pub struct Tree<E, C: NodeConfig<E>> {
    config: C,
    elements: Vec<E>,
    layers: Vec<Vec<C::Node>>,
}

impl<E, C: NodeConfig<E>> Tree<E, C> {
    /// Build a tree over `elements`.
    ///
    /// Construction never fails; an empty input gives a tree without a root.
    #[must_use]
    pub fn build<I>(elements: I, config: C) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        let elements: Vec<E> = elements.into_iter().collect();
        let leaves: Vec<C::Node> = elements
            .iter()
            .map(|element| config.element_to_node(element))
            .collect();

        let mut layers = Vec::with_capacity(layer_count(leaves.len()));
        layers.push(leaves);
        while let Some(next) = layers
            .last()
            .filter(|layer| layer.len() > 1)
            .map(|layer| fold_layer::<E, C>(&config, layer))
        {
            layers.push(next);
        }

        debug!(leaves = elements.len(), height = layers.len(), "built merkle tree");

        Self {
            config,
            elements,
            layers,
        }
    }

    /// The node configuration the tree was built with.
    #[must_use]
    pub const fn config(&self) -> &C {
        &self.config
    }

    /// The elements, in leaf order.
    #[must_use]
    pub fn elements(&self) -> &[E] {
        &self.elements
    }

    /// All layers, leaves first.
    #[must_use]
    pub fn layers(&self) -> &[Vec<C::Node>] {
        &self.layers
    }

    /// A single layer, if the tree is that tall.
    #[must_use]
    pub fn layer(&self, layer: usize) -> Option<&[C::Node]> {
        self.layers.get(layer).map(Vec::as_slice)
    }

    /// The leaf layer.
    #[must_use]
    pub fn leaves(&self) -> &[C::Node] {
        self.layer(0).unwrap_or_default()
    }

    /// The root node, absent for an empty tree.
    #[must_use]
    pub fn root(&self) -> Option<&C::Node> {
        match self.layers.last() {
            Some(top) if top.len() == 1 => top.first(),
            _ => None,
        }
    }

    /// Number of layers, including the leaf layer.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.layers.len()
    }

    /// Number of elements (and leaves).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the tree was built from no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Take the tree apart.
    #[must_use]
    pub fn into_parts(self) -> (C, Vec<E>, Vec<Vec<C::Node>>) {
        (self.config, self.elements, self.layers)
    }
}

impl<E: Clone, C: NodeConfig<E> + Clone> Clone for Tree<E, C> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            elements: self.elements.clone(),
            layers: self.layers.clone(),
        }
    }
}

impl<E: fmt::Debug, C: NodeConfig<E>> fmt::Debug for Tree<E, C>
where
    C::Node: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("elements", &self.elements)
            .field("layers", &self.layers)
            .finish_non_exhaustive()
    }
}

/// Pair up a layer into the next one, promoting an unpaired tail node.
pub(crate) fn fold_layer<E, C>(config: &C, layer: &[C::Node]) -> Vec<C::Node>
where
    E: ?Sized,
    C: NodeConfig<E>,
{
    layer
        .chunks(2)
        .filter_map(|pair| match pair {
            [left, right] => Some(config.combine_nodes(left, right)),
            [tail] => Some(tail.clone()),
            _ => None,
        })
        .collect()
}

/// Number of layers a tree over `leaf_count` leaves has.
fn layer_count(leaf_count: usize) -> usize {
    let mut width = leaf_count;
    let mut count = 1_usize;
    while width > 1 {
        width = width.div_ceil(2);
        count = count.saturating_add(1);
    }
    count
}
