//! SHA-256 node configuration.

use std::fmt::Display;

use lmt_core::NodeConfig;
use sha2::{Digest as _, Sha256};

use crate::digest::{Digest, sorted_pair};

/// Hashes elements by their [`Display`] form and combines nodes as
/// `SHA256(min(left, right) || max(left, right))`.
///
/// Sorting the operands makes the combine commutative, as membership proofs require.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256Config;

impl<E: Display + ?Sized> NodeConfig<E> for Sha256Config {
    type Node = Digest;

    fn element_to_node(&self, element: &E) -> Digest {
        Digest::new(Sha256::digest(element.to_string().as_bytes()).into())
    }

    fn combine_nodes(&self, left: &Digest, right: &Digest) -> Digest {
        let (first, second) = sorted_pair(left, right);
        let mut hasher = Sha256::new();
        hasher.update(first.as_bytes());
        hasher.update(second.as_bytes());
        Digest::new(hasher.finalize().into())
    }

    fn compare_nodes(&self, left: &Digest, right: &Digest) -> bool {
        left == right
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use lmt_core::Tree;

    use super::*;

    #[test]
    fn leaf_hashes_display_form() {
        let leaf = <Sha256Config as NodeConfig<str>>::element_to_node(&Sha256Config, "a");
        assert_eq!(
            leaf.to_bytes(),
            hex!("ca978112ca1bbdcafac231b39a23dc4da786eff8147c4e72b9807785afee48bb")
        );
        let number = <Sha256Config as NodeConfig<i64>>::element_to_node(&Sha256Config, &1);
        let text = <Sha256Config as NodeConfig<str>>::element_to_node(&Sha256Config, "1");
        assert_eq!(number, text);
    }

    #[test]
    fn combine_is_commutative() {
        let a = Digest::new([3_u8; 32]);
        let b = Digest::new([7_u8; 32]);
        let config = Sha256Config;
        assert_eq!(
            <Sha256Config as NodeConfig<str>>::combine_nodes(&config, &a, &b),
            <Sha256Config as NodeConfig<str>>::combine_nodes(&config, &b, &a)
        );
    }

    #[test]
    fn known_roots() {
        let tree = Tree::build(["a", "b", "c"], Sha256Config);
        assert_eq!(
            tree.root().map(Digest::to_bytes),
            Some(hex!(
                "aea2dd4249dcecf97ca6a1556db7f21ebd6a40bbec0243ca61b717146a08c347"
            ))
        );

        let tree = Tree::build(1..=10_i64, Sha256Config);
        assert_eq!(
            tree.root().map(Digest::to_bytes),
            Some(hex!(
                "a6e060f4035740f06fe5b49db06b1af6c470d02006b6fedda85a6563da957d4c"
            ))
        );
    }
}
