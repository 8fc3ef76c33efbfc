//! The 32-byte node produced by every adapter in this crate.

use std::fmt;
use std::str::FromStr;

use hex::FromHex as _;
use serde::{Deserialize, Serialize};
use serde_with::hex::Hex;
use serde_with::serde_as;

/// Size of a digest in bytes.
pub const DIGEST_SIZE: usize = 32;

/// A 32-byte hash, displayed and serialized as lowercase hex.
///
/// Ordering is lexicographic over the bytes, which is the order both adapters use to make
/// combining commutative.
#[serde_as]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(#[serde_as(as = "Hex")] [u8; DIGEST_SIZE]);

impl Digest {
    /// Wrap raw digest bytes.
    #[must_use]
    pub const fn new(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; DIGEST_SIZE] {
        self.0
    }

    /// Borrow the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }
}

/// Order two digests so that the smaller one comes first.
pub(crate) fn sorted_pair<'a>(left: &'a Digest, right: &'a Digest) -> (&'a Digest, &'a Digest) {
    if left <= right {
        (left, right)
    } else {
        (right, left)
    }
}

impl From<[u8; DIGEST_SIZE]> for Digest {
    fn from(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({self})")
    }
}

impl FromStr for Digest {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <[u8; DIGEST_SIZE]>::from_hex(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    const SAMPLE: [u8; 32] = hex!("ca978112ca1bbdcafac231b39a23dc4da786eff8147c4e72b9807785afee48bb");

    #[test]
    fn hex_roundtrip() {
        let digest = Digest::new(SAMPLE);
        let text = digest.to_string();
        assert_eq!(
            text,
            "ca978112ca1bbdcafac231b39a23dc4da786eff8147c4e72b9807785afee48bb"
        );
        assert_eq!(text.parse::<Digest>(), Ok(digest));
        assert!("ca97".parse::<Digest>().is_err());
    }

    #[test]
    fn serializes_as_hex_string() {
        let digest = Digest::new(SAMPLE);
        let json = serde_json::to_string(&digest).expect("digest serializes");
        assert_eq!(json, format!("\"{digest}\""));
        let back: Digest = serde_json::from_str(&json).expect("digest deserializes");
        assert_eq!(back, digest);
    }

    #[test]
    fn sorted_pair_orders_bytes() {
        let low = Digest::new([0_u8; 32]);
        let high = Digest::new([1_u8; 32]);
        assert_eq!(sorted_pair(&low, &high), (&low, &high));
        assert_eq!(sorted_pair(&high, &low), (&low, &high));
    }
}
