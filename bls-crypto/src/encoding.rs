//! Canonical encodings shared by keys, shares, signatures and ciphertexts.
//!
//! Curve points use the compressed (ZCash compatible) arkworks encoding:
//! 48 bytes in G1 and 96 bytes in G2. Text forms are lowercase hex for keys,
//! shares and signatures, and padded standard base64 for ciphertexts and
//! plaintexts. Byte strings inside a ciphertext are prefixed with their
//! length as an unsigned LEB128 varint.

use ark_ec::AffineRepr;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use data_encoding::{BASE64, HEXLOWER, HEXLOWER_PERMISSIVE};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser};
use serde_with::{DeserializeAs, SerializeAs};

use crate::BlsError;

/// Size of a compressed G1 point.
pub const G1_BYTES: usize = 48;

/// Size of a compressed G2 point.
pub const G2_BYTES: usize = 96;

pub fn hex_encode(bytes: &[u8]) -> String {
    HEXLOWER.encode(bytes)
}

/// Decode hex, tolerating surrounding whitespace, a `0x` prefix and upper case digits.
pub fn hex_decode(s: &str) -> Result<Vec<u8>, BlsError> {
    let s = s.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);
    Ok(HEXLOWER_PERMISSIVE.decode(s.as_bytes())?)
}

pub fn base64_encode(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

pub fn base64_decode(s: &str) -> Result<Vec<u8>, BlsError> {
    Ok(BASE64.decode(s.trim().as_bytes())?)
}

pub(crate) fn point_to_bytes<P: CanonicalSerialize>(p: &P) -> Vec<u8> {
    let mut v = Vec::with_capacity(p.compressed_size());
    p.serialize_compressed(&mut v)
        .expect("serializing into a Vec never fails");
    v
}

/// Decode a compressed point of exactly `len` bytes. Deserialization checks
/// that the point is on the curve and in the prime order subgroup.
pub(crate) fn point_from_bytes<P: CanonicalDeserialize>(
    bytes: &[u8],
    len: usize,
    what: &str,
) -> Result<P, BlsError> {
    if bytes.len() != len {
        return Err(BlsError::Encoding(format!(
            "{what} must be {len} bytes, got {}",
            bytes.len()
        )));
    }
    P::deserialize_compressed(bytes).map_err(|e| BlsError::Encoding(format!("{what}: {e}")))
}

/// Serde adapter for arkworks types: hex in human readable formats, raw bytes otherwise.
pub(crate) struct SerdeAs;

impl<T: CanonicalSerialize> SerializeAs<T> for SerdeAs {
    fn serialize_as<S: Serializer>(val: &T, s: S) -> Result<S::Ok, S::Error> {
        let mut bytes = Vec::with_capacity(val.compressed_size());
        val.serialize_compressed(&mut bytes)
            .map_err(ser::Error::custom)?;
        if s.is_human_readable() {
            hex_encode(&bytes).serialize(s)
        } else {
            serde_bytes::Bytes::new(&bytes).serialize(s)
        }
    }
}

impl<'de, T: CanonicalDeserialize> DeserializeAs<'de, T> for SerdeAs {
    fn deserialize_as<D: Deserializer<'de>>(d: D) -> Result<T, D::Error> {
        let bytes = if d.is_human_readable() {
            let s = String::deserialize(d)?;
            hex_decode(&s).map_err(de::Error::custom)?
        } else {
            serde_bytes::ByteBuf::deserialize(d)?.into_vec()
        };
        T::deserialize_compressed(&bytes[..]).map_err(de::Error::custom)
    }
}

/// Like [`SerdeAs`] but refuses the point at infinity when deserializing.
pub(crate) struct NonIdentity;

impl<P: AffineRepr> SerializeAs<P> for NonIdentity {
    fn serialize_as<S: Serializer>(val: &P, s: S) -> Result<S::Ok, S::Error> {
        SerdeAs::serialize_as(val, s)
    }
}

impl<'de, P: AffineRepr> DeserializeAs<'de, P> for NonIdentity {
    fn deserialize_as<D: Deserializer<'de>>(d: D) -> Result<P, D::Error> {
        let p: P = SerdeAs::deserialize_as(d)?;
        if p.is_zero() {
            return Err(de::Error::custom("point at infinity"));
        }
        Ok(p)
    }
}

/// Append `n` as an unsigned LEB128 varint.
pub(crate) fn write_varint(out: &mut Vec<u8>, mut n: u64) {
    loop {
        let byte = (n & 0x7f) as u8;
        n >>= 7;
        if n == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

pub(crate) fn varint_len(n: u64) -> usize {
    (64 - n.leading_zeros() as usize).div_ceil(7).max(1)
}

/// Read a canonical unsigned LEB128 varint, returning the value and the
/// rest of the input. Overlong encodings are rejected.
pub(crate) fn read_varint(bytes: &[u8]) -> Result<(u64, &[u8]), BlsError> {
    let mut n = 0u64;
    for (i, b) in bytes.iter().enumerate().take(10) {
        let low = u64::from(b & 0x7f);
        if i == 9 && low > 1 {
            return Err(BlsError::Encoding("varint overflows 64 bits".into()));
        }
        n |= low << (7 * i);
        if b & 0x80 == 0 {
            if i > 0 && *b == 0 {
                return Err(BlsError::Encoding("overlong varint".into()));
            }
            return Ok((n, &bytes[i + 1..]));
        }
    }
    Err(BlsError::Encoding("truncated varint".into()))
}

/// Read a varint length prefix followed by exactly that many bytes.
pub(crate) fn read_prefixed(bytes: &[u8]) -> Result<(&[u8], &[u8]), BlsError> {
    let (len, rest) = read_varint(bytes)?;
    let len = usize::try_from(len)
        .ok()
        .filter(|l| *l <= rest.len())
        .ok_or_else(|| BlsError::Encoding(format!("length prefix {len} exceeds input")))?;
    Ok(rest.split_at(len))
}
