//! Minimal canonical CBOR writer (RFC 8949) for the items Plutus data needs.

// Major types, already shifted into the top three bits of the initial byte.
pub(crate) const MAJOR_UNSIGNED: u8 = 0x00;
const MAJOR_NEGATIVE: u8 = 0x20;
const MAJOR_BYTES: u8 = 0x40;
pub(crate) const MAJOR_ARRAY: u8 = 0x80;
pub(crate) const MAJOR_MAP: u8 = 0xa0;
pub(crate) const MAJOR_TAG: u8 = 0xc0;

/// Opens an indefinite-length array.
pub(crate) const INDEFINITE_ARRAY: u8 = 0x9f;
const INDEFINITE_BYTES: u8 = 0x5f;
/// Closes any indefinite-length item.
pub(crate) const BREAK: u8 = 0xff;

/// Longest byte string written as a single chunk.
pub const BYTES_CHUNK_SIZE: usize = 64;

/// Bignum tags (RFC 8949 section 3.4.3).
const TAG_POSITIVE_BIGNUM: u64 = 2;
const TAG_NEGATIVE_BIGNUM: u64 = 3;

/// Encode a signed integer.
///
/// Values in `-2^64..2^64` are major type 0 or 1 items. Anything wider is a tag 2 or 3 bignum
/// whose payload is the big-endian magnitude without leading zero bytes.
#[must_use]
pub fn encode_integer(value: i128) -> Vec<u8> {
    let mut out = Vec::with_capacity(18);
    write_integer(&mut out, value);
    out
}

/// Encode a byte string, chunked into an indefinite-length string when longer than
/// [`BYTES_CHUNK_SIZE`].
#[must_use]
pub fn encode_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len().saturating_add(3));
    write_bytes(&mut out, bytes);
    out
}

/// Write an item head using the shortest argument form.
pub(crate) fn write_head(out: &mut Vec<u8>, major: u8, value: u64) {
    if let Ok(small) = u8::try_from(value) {
        if small < 24 {
            out.push(major | small);
        } else {
            out.extend_from_slice(&[major | 24, small]);
        }
    } else if let Ok(value) = u16::try_from(value) {
        out.push(major | 25);
        out.extend_from_slice(&value.to_be_bytes());
    } else if let Ok(value) = u32::try_from(value) {
        out.push(major | 26);
        out.extend_from_slice(&value.to_be_bytes());
    } else {
        out.push(major | 27);
        out.extend_from_slice(&value.to_be_bytes());
    }
}

/// Write a collection length.
pub(crate) fn write_len(out: &mut Vec<u8>, major: u8, len: usize) {
    // usize is at most 64 bits wide on every supported target
    write_head(out, major, u64::try_from(len).unwrap_or(u64::MAX));
}

pub(crate) fn write_integer(out: &mut Vec<u8>, value: i128) {
    // negatives carry -1 - value, which is the bitwise complement
    let (major, tag, argument) = if value.is_negative() {
        (MAJOR_NEGATIVE, TAG_NEGATIVE_BIGNUM, (!value).unsigned_abs())
    } else {
        (MAJOR_UNSIGNED, TAG_POSITIVE_BIGNUM, value.unsigned_abs())
    };

    if let Ok(argument) = u64::try_from(argument) {
        write_head(out, major, argument);
        return;
    }

    let magnitude = argument.to_be_bytes();
    let first = magnitude
        .iter()
        .position(|byte| *byte != 0)
        .unwrap_or(magnitude.len());
    write_head(out, MAJOR_TAG, tag);
    write_bytes(out, magnitude.get(first..).unwrap_or_default());
}

pub(crate) fn write_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    if bytes.len() <= BYTES_CHUNK_SIZE {
        write_len(out, MAJOR_BYTES, bytes.len());
        out.extend_from_slice(bytes);
        return;
    }

    out.push(INDEFINITE_BYTES);
    for chunk in bytes.chunks(BYTES_CHUNK_SIZE) {
        write_len(out, MAJOR_BYTES, chunk.len());
        out.extend_from_slice(chunk);
    }
    out.push(BREAK);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::arithmetic_side_effects, reason = "Test code should panic on invalid data")]

    use hex_literal::hex;

    use super::*;

    #[test]
    fn integers_use_shortest_form() {
        assert_eq!(encode_integer(0), hex!("00"));
        assert_eq!(encode_integer(1), hex!("01"));
        assert_eq!(encode_integer(23), hex!("17"));
        assert_eq!(encode_integer(24), hex!("1818"));
        assert_eq!(encode_integer(500), hex!("1901f4"));
        assert_eq!(encode_integer(1_099_511_627_776), hex!("1b0000010000000000"));
    }

    #[test]
    fn negative_integers_store_complement() {
        assert_eq!(encode_integer(-1), hex!("20"));
        assert_eq!(encode_integer(-2), hex!("21"));
        assert_eq!(encode_integer(-1000), hex!("3903e7"));
        assert_eq!(encode_integer(i64::MIN.into()), hex!("3b7fffffffffffffff"));
    }

    #[test]
    fn integers_past_u64_become_bignums() {
        assert_eq!(encode_integer(u64::MAX.into()), hex!("1bffffffffffffffff"));
        assert_eq!(encode_integer(1 << 64), hex!("c249010000000000000000"));
        assert_eq!(
            encode_integer(i128::MAX),
            hex!("c2507fffffffffffffffffffffffffffffff")
        );

        assert_eq!(encode_integer(-(1 << 64)), hex!("3bffffffffffffffff"));
        assert_eq!(encode_integer(-(1 << 64) - 1), hex!("c349010000000000000000"));
        assert_eq!(
            encode_integer(i128::MIN),
            hex!("c3507fffffffffffffffffffffffffffffff")
        );
    }

    #[test]
    fn short_byte_strings_are_definite() {
        assert_eq!(encode_bytes(&[]), hex!("40"));
        assert_eq!(encode_bytes(&[0xab; 4]), hex!("44abababab"));

        let digest = encode_bytes(&[0_u8; 32]);
        assert_eq!(digest.first(), Some(&0x58));
        assert_eq!(digest.get(1), Some(&32));
        assert_eq!(digest.len(), 34);
    }

    #[test]
    fn long_byte_strings_are_chunked() {
        let encoded = encode_bytes(&[7_u8; 100]);
        let mut expected = vec![INDEFINITE_BYTES, 0x58, 64];
        expected.extend_from_slice(&[7_u8; 64]);
        expected.extend_from_slice(&[0x58, 36]);
        expected.extend_from_slice(&[7_u8; 36]);
        expected.push(BREAK);
        assert_eq!(encoded, expected);

        assert_eq!(encode_bytes(&[1_u8; 64]).len(), 66);
    }
}
