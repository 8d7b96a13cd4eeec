use ark_ec::AffineRepr;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::BlsError;
use crate::encoding::{
    G1_BYTES, base64_decode, base64_encode, point_from_bytes, point_to_bytes, read_prefixed,
    varint_len, write_varint,
};
use crate::scheme::SignatureScheme;
use crate::variant::{Bls12381G2, BlsVariant, PublicKeyPoint};

/// Size of the masked seed `v`.
pub const SIGMA_BYTES: usize = 32;

/// Size of the ciphertext of an empty message under [`Bls12381G2`]: `U`,
/// `v`, a one byte length, the one byte framed plaintext and the scheme tag.
pub const MIN_CIPHERTEXT_BYTES: usize = G1_BYTES + SIGMA_BYTES + 3;

/// An identity based ciphertext.
///
/// Encoded as `U || v || len(w) || w || scheme` where `U = g^r` is the
/// compressed ephemeral key in the public key group, `v` the seed masked
/// with the hashed pairing value, `w` the length framed plaintext masked
/// with a SHAKE128 stream of the seed, `len(w)` an unsigned LEB128 varint
/// and `scheme` the one byte tag of the scheme the identity key is
/// signed under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext<V: BlsVariant = Bls12381G2> {
    pub(crate) u: PublicKeyPoint<V>,
    pub(crate) v: [u8; SIGMA_BYTES],
    pub(crate) w: Vec<u8>,
    pub(crate) scheme: SignatureScheme,
}

impl<V: BlsVariant> Ciphertext<V> {
    pub fn ephemeral_key(&self) -> &PublicKeyPoint<V> {
        &self.u
    }

    pub fn masked_seed(&self) -> &[u8; SIGMA_BYTES] {
        &self.v
    }

    /// The masked, length framed plaintext.
    pub fn payload(&self) -> &[u8] {
        &self.w
    }

    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    pub fn len(&self) -> usize {
        V::PUBLIC_KEY_BYTES + SIGMA_BYTES + varint_len(self.w.len() as u64) + self.w.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        out.extend_from_slice(&point_to_bytes(&self.u));
        out.extend_from_slice(&self.v);
        write_varint(&mut out, self.w.len() as u64);
        out.extend_from_slice(&self.w);
        out.push(self.scheme.tag());
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BlsError> {
        if bytes.len() < V::PUBLIC_KEY_BYTES + SIGMA_BYTES + 2 {
            return Err(BlsError::Encoding(format!(
                "ciphertext too short: {} bytes",
                bytes.len()
            )));
        }
        let (u, rest) = bytes.split_at(V::PUBLIC_KEY_BYTES);
        let (v, rest) = rest.split_at(SIGMA_BYTES);
        let u: PublicKeyPoint<V> = point_from_bytes(u, V::PUBLIC_KEY_BYTES, "ciphertext key")?;
        if u.is_zero() {
            return Err(BlsError::Encoding("ciphertext key is the point at infinity".into()));
        }
        let (w, rest) = read_prefixed(rest)?;
        let scheme = match rest {
            [tag] => SignatureScheme::from_tag(*tag)
                .ok_or_else(|| BlsError::Encoding(format!("unknown scheme tag {tag}")))?,
            _ => {
                return Err(BlsError::Encoding(format!(
                    "expected one scheme byte after the payload, got {}",
                    rest.len()
                )));
            }
        };
        Ok(Self {
            u,
            v: v.try_into().expect("split_at yields exactly SIGMA_BYTES"),
            w: w.to_vec(),
            scheme,
        })
    }

    pub fn to_base64(&self) -> String {
        base64_encode(&self.to_bytes())
    }

    pub fn from_base64(s: &str) -> Result<Self, BlsError> {
        Self::from_bytes(&base64_decode(s)?)
    }
}

impl<V: BlsVariant> Serialize for Ciphertext<V> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        if s.is_human_readable() {
            self.to_base64().serialize(s)
        } else {
            serde_bytes::Bytes::new(&self.to_bytes()).serialize(s)
        }
    }
}

impl<'de, V: BlsVariant> Deserialize<'de> for Ciphertext<V> {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        if d.is_human_readable() {
            let s = String::deserialize(d)?;
            Self::from_base64(&s).map_err(de::Error::custom)
        } else {
            let b = serde_bytes::ByteBuf::deserialize(d)?;
            Self::from_bytes(&b).map_err(de::Error::custom)
        }
    }
}
