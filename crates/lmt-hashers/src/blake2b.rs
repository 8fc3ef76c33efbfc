//! BLAKE2b-256 node configuration over Plutus data.

use std::fmt;

use lmt_core::NodeConfig;

use crate::cbor::{BREAK, INDEFINITE_ARRAY, write_bytes};
use crate::digest::{DIGEST_SIZE, Digest, sorted_pair};
use crate::plutus::PlutusData;

/// BLAKE2b with a 32-byte output.
#[must_use]
pub fn blake2b_256(bytes: &[u8]) -> Digest {
    let hash = blake2b_simd::Params::new()
        .hash_length(DIGEST_SIZE)
        .hash(bytes);
    let mut out = [0_u8; DIGEST_SIZE];
    out.copy_from_slice(hash.as_bytes());
    Digest::new(out)
}

/// Elements as plain Plutus integers, the encoding serial trees use.
pub type IntegerData = fn(&i64) -> PlutusData;

/// Encode an integer element.
#[must_use]
pub fn integer_data(element: &i64) -> PlutusData {
    PlutusData::from(*element)
}

/// Hashes `to_data(element)` as CBOR with BLAKE2b-256 and combines two nodes by hashing the
/// Plutus list `[min(left, right), max(left, right)]` of their bytes.
///
/// This is the layout a Plutus validator reproduces with `blake2b_256(serialise_data(..))`.
#[derive(Clone, Copy)]
pub struct Blake2bConfig<F> {
    to_data: F,
}

impl<F> Blake2bConfig<F> {
    /// Use `to_data` to turn elements into Plutus data.
    #[must_use]
    pub const fn new(to_data: F) -> Self {
        Self { to_data }
    }
}

impl Blake2bConfig<IntegerData> {
    /// Configuration for trees of integers.
    #[must_use]
    pub const fn integers() -> Self {
        Self::new(integer_data)
    }
}

impl Default for Blake2bConfig<IntegerData> {
    fn default() -> Self {
        Self::integers()
    }
}

impl<F> fmt::Debug for Blake2bConfig<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blake2bConfig").finish_non_exhaustive()
    }
}

impl<E: ?Sized, F: Fn(&E) -> PlutusData> NodeConfig<E> for Blake2bConfig<F> {
    type Node = Digest;

    fn element_to_node(&self, element: &E) -> Digest {
        (self.to_data)(element).hash()
    }

    fn combine_nodes(&self, left: &Digest, right: &Digest) -> Digest {
        let (first, second) = sorted_pair(left, right);
        let mut pair = Vec::with_capacity(DIGEST_SIZE.saturating_mul(2).saturating_add(6));
        pair.push(INDEFINITE_ARRAY);
        write_bytes(&mut pair, first.as_bytes());
        write_bytes(&mut pair, second.as_bytes());
        pair.push(BREAK);
        blake2b_256(&pair)
    }

    fn compare_nodes(&self, left: &Digest, right: &Digest) -> bool {
        left == right
    }
}
