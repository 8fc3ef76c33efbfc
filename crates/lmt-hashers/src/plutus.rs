//! Cardano Plutus data and its canonical CBOR encoding.

use crate::cbor::{
    BREAK, INDEFINITE_ARRAY, MAJOR_ARRAY, MAJOR_MAP, MAJOR_TAG, MAJOR_UNSIGNED, write_bytes,
    write_head, write_integer, write_len,
};
use crate::blake2b::blake2b_256;
use crate::digest::Digest;

/// Tag of the general constructor form, `[alternative, fields]`.
const GENERAL_CONSTR_TAG: u64 = 102;

/// A Plutus data value.
///
/// Encodes the way Cardano serialization libraries do, so digests match what on-chain
/// validators compute:
///
/// - non-empty lists and constructor fields are indefinite-length arrays, empty ones are `0x80`;
/// - byte strings longer than 64 bytes are split into 64-byte chunks;
/// - integers outside `-2^64..2^64` are tag 2 or 3 bignums;
/// - constructors `0..=6` use tags `121..=127`, `7..=127` use tags `1280..=1400`, anything
///   larger uses the general tag `102`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlutusData {
    /// Constructor application.
    Constr {
        /// Constructor index.
        alternative: u64,
        /// Constructor arguments.
        fields: Vec<PlutusData>,
    },
    /// Key-value pairs, kept in the given order.
    Map(Vec<(PlutusData, PlutusData)>),
    /// A list of values.
    List(Vec<PlutusData>),
    /// An integer. Plutus integers are unbounded, this holds the 128-bit subset.
    Integer(i128),
    /// A byte string.
    Bytes(Vec<u8>),
}

impl PlutusData {
    /// Canonical CBOR bytes of this value.
    #[must_use]
    pub fn to_cbor(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_cbor(&mut out);
        out
    }

    /// BLAKE2b-256 of [`PlutusData::to_cbor`].
    #[must_use]
    pub fn hash(&self) -> Digest {
        blake2b_256(&self.to_cbor())
    }

    fn write_cbor(&self, out: &mut Vec<u8>) {
        match self {
            Self::Constr {
                alternative,
                fields,
            } => match constr_tag(*alternative) {
                Some(tag) => {
                    write_head(out, MAJOR_TAG, tag);
                    write_list(out, fields);
                }
                None => {
                    write_head(out, MAJOR_TAG, GENERAL_CONSTR_TAG);
                    write_len(out, MAJOR_ARRAY, 2);
                    write_head(out, MAJOR_UNSIGNED, *alternative);
                    write_list(out, fields);
                }
            },
            Self::Map(entries) => {
                write_len(out, MAJOR_MAP, entries.len());
                for (key, value) in entries {
                    key.write_cbor(out);
                    value.write_cbor(out);
                }
            }
            Self::List(items) => write_list(out, items),
            Self::Integer(value) => write_integer(out, *value),
            Self::Bytes(bytes) => write_bytes(out, bytes),
        }
    }
}

/// Compact tag for a constructor index, if it has one.
const fn constr_tag(alternative: u64) -> Option<u64> {
    match alternative {
        0..=6 => Some(alternative.saturating_add(121)),
        7..=127 => Some(alternative.saturating_add(1280).saturating_sub(7)),
        _ => None,
    }
}

fn write_list(out: &mut Vec<u8>, items: &[PlutusData]) {
    if items.is_empty() {
        write_len(out, MAJOR_ARRAY, 0);
        return;
    }
    out.push(INDEFINITE_ARRAY);
    for item in items {
        item.write_cbor(out);
    }
    out.push(BREAK);
}

impl From<i64> for PlutusData {
    fn from(value: i64) -> Self {
        Self::Integer(value.into())
    }
}

impl From<i128> for PlutusData {
    fn from(value: i128) -> Self {
        Self::Integer(value)
    }
}

impl From<Vec<u8>> for PlutusData {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for PlutusData {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<Digest> for PlutusData {
    fn from(digest: Digest) -> Self {
        Self::Bytes(digest.to_bytes().to_vec())
    }
}
