//! Serial trees: trees whose elements are `1..=n`, each with either sign.

use std::fmt;
use std::ops::Deref;

use crate::config::NodeConfig;
use crate::error::MerkleError;
use crate::tree::Tree;

/// Check that `abs(elements[i]) == i + 1` for every position.
///
/// # Errors
/// Returns [`MerkleError::NonConsecutiveSerial`] for the first position that breaks the rule.
pub fn validate_serial(elements: &[i64]) -> Result<(), MerkleError> {
    for (position, &found) in elements.iter().enumerate() {
        let expected = position.saturating_add(1);
        if usize::try_from(found.unsigned_abs()).ok() != Some(expected) {
            return Err(MerkleError::NonConsecutiveSerial {
                position,
                expected,
                found,
            });
        }
    }
    Ok(())
}

/// A [`Tree`] over signed integers whose magnitudes are `1, 2, ..., n` in order.
///
/// The invariant lets range proofs address leaves purely by position. A serial tree dereferences
/// to its [`Tree`], so membership proofs are available as well.
pub struct SerialTree<C: NodeConfig<i64>>(Tree<i64, C>);

impl<C: NodeConfig<i64>> SerialTree<C> {
    /// Validate `elements` and build the tree.
    ///
    /// # Errors
    /// Returns [`MerkleError::NonConsecutiveSerial`] if the elements are not `±1, ±2, ..., ±n`.
    pub fn build(elements: Vec<i64>, config: C) -> Result<Self, MerkleError> {
        validate_serial(&elements)?;
        Ok(Self(Tree::build(elements, config)))
    }

    /// Build the canonical serial tree over `1..=len`.
    #[must_use]
    pub fn from_len(len: u32, config: C) -> Self {
        Self(Tree::build(1..=i64::from(len), config))
    }

    /// The underlying tree.
    #[must_use]
    pub const fn as_tree(&self) -> &Tree<i64, C> {
        &self.0
    }

    /// Unwrap the underlying tree.
    #[must_use]
    pub fn into_inner(self) -> Tree<i64, C> {
        self.0
    }
}

impl<C: NodeConfig<i64>> TryFrom<Tree<i64, C>> for SerialTree<C> {
    type Error = MerkleError;

    fn try_from(tree: Tree<i64, C>) -> Result<Self, Self::Error> {
        validate_serial(tree.elements())?;
        Ok(Self(tree))
    }
}

impl<C: NodeConfig<i64>> Deref for SerialTree<C> {
    type Target = Tree<i64, C>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<C: NodeConfig<i64> + Clone> Clone for SerialTree<C> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<C: NodeConfig<i64>> fmt::Debug for SerialTree<C>
where
    C::Node: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SerialTree").field(&self.0).finish()
    }
}

#[cfg(test)]
mod tests {
    #![allow(
        clippy::arithmetic_side_effects,
        reason = "Test code should panic on invalid data"
    )]

    use super::*;
    use crate::config::FnConfig;

    fn sum() -> impl NodeConfig<i64, Node = i64> {
        FnConfig::new(|e: &i64| *e, |l: &i64, r: &i64| l + r, |l: &i64, r: &i64| l == r)
    }

    #[test]
    fn accepts_consecutive_integers_of_any_sign() {
        assert_eq!(validate_serial(&[]), Ok(()));
        assert_eq!(validate_serial(&[1]), Ok(()));
        assert_eq!(validate_serial(&[1, 2, 3, 4]), Ok(()));
        assert_eq!(validate_serial(&[-1, -2, -3, -4]), Ok(()));
        assert_eq!(validate_serial(&[1, -2, 3, -4, 5]), Ok(()));
    }

    #[test]
    fn reports_first_gap() {
        assert_eq!(
            validate_serial(&[1, 2, 4, 5]),
            Err(MerkleError::NonConsecutiveSerial {
                position: 2,
                expected: 3,
                found: 4,
            })
        );
    }

    #[test]
    fn rejects_wrong_start_order_and_duplicates() {
        assert!(matches!(
            validate_serial(&[2, 3, 4]),
            Err(MerkleError::NonConsecutiveSerial { position: 0, .. })
        ));
        assert!(matches!(
            validate_serial(&[1, 3, 2, 4]),
            Err(MerkleError::NonConsecutiveSerial { position: 1, .. })
        ));
        assert!(matches!(
            validate_serial(&[1, 2, 2, 3]),
            Err(MerkleError::NonConsecutiveSerial { position: 2, .. })
        ));
        assert!(matches!(
            validate_serial(&[0]),
            Err(MerkleError::NonConsecutiveSerial { position: 0, .. })
        ));
        assert!(validate_serial(&[i64::MIN]).is_err());
    }

    #[test]
    fn error_message_names_the_invariant() {
        let err = SerialTree::build(vec![1, 2, 4, 5], sum()).expect_err("3 is missing");
        let message = err.to_string();
        assert!(message.contains("consecutive integers starting from 1"));
        assert!(message.contains("position 2 expects magnitude 3, found 4"));
    }

    #[test]
    fn builds_validated_tree() {
        let tree = SerialTree::build(vec![1, 2, 3, 4], sum()).expect("elements are serial");
        assert_eq!(tree.elements(), [1, 2, 3, 4]);
        assert_eq!(tree.leaves(), [1, 2, 3, 4]);
        assert_eq!(tree.root(), Some(&10));

        let tree = SerialTree::build(vec![-1, -2, -3, -4], sum()).expect("signs are ignored");
        assert_eq!(tree.leaves(), [-1, -2, -3, -4]);

        let tree = SerialTree::build(vec![1], sum()).expect("single element is serial");
        assert_eq!(tree.height(), 1);
    }

    #[test]
    fn from_len_matches_validated_build() {
        let built = SerialTree::build((1..=9).collect(), sum()).expect("elements are serial");
        let from_len = SerialTree::from_len(9, sum());
        assert_eq!(built.layers(), from_len.layers());
        assert!(SerialTree::from_len(0, sum()).is_empty());
    }

    #[test]
    fn converts_from_plain_tree() {
        let tree = Tree::build(vec![1, -2, 3], sum());
        let serial = SerialTree::try_from(tree).expect("elements are serial");
        assert_eq!(serial.as_tree().len(), 3);

        let tree = Tree::build(vec![1, 3], sum());
        assert!(SerialTree::try_from(tree).is_err());
    }

    #[test]
    fn membership_proofs_work_through_deref() {
        let tree = SerialTree::from_len(6, sum());
        let proof = tree.proof(&4).expect("4 is a leaf");
        assert!(tree.verify_proof(&4, &proof));
    }
}
