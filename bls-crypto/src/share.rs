use ark_ec::AffineRepr;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::BlsError;
use crate::encoding::{G2_BYTES, hex_decode, hex_encode, point_from_bytes, point_to_bytes};
use crate::scheme::SignatureScheme;
use crate::variant::{Bls12381G2, BlsVariant, SignaturePoint};

/// Size of an encoded [`Bls12381G2`] share: one index byte followed by a
/// compressed G2 point. [`Bls12381G1`](crate::Bls12381G1) shares are 49 bytes.
pub const SHARE_BYTES: usize = 1 + G2_BYTES;

/// A signature group element labelled with the (non-zero) index of the node
/// that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IndexedElement<V: BlsVariant = Bls12381G2> {
    index: u8,
    value: SignaturePoint<V>,
}

impl<V: BlsVariant> IndexedElement<V> {
    /// Size of the byte encoding.
    pub const BYTES: usize = 1 + V::SIGNATURE_BYTES;

    pub fn new(index: u8, value: SignaturePoint<V>) -> Result<Self, BlsError> {
        if index == 0 {
            return Err(BlsError::Encoding("share index must not be 0".into()));
        }
        if value.is_zero() {
            return Err(BlsError::Encoding("share is the point at infinity".into()));
        }
        Ok(Self { index, value })
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn value(&self) -> &SignaturePoint<V> {
        &self.value
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut v = Vec::with_capacity(Self::BYTES);
        v.push(self.index);
        v.extend_from_slice(&point_to_bytes(&self.value));
        v
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BlsError> {
        let Some((index, point)) = bytes.split_first() else {
            return Err(BlsError::Encoding("empty share".into()));
        };
        let value = point_from_bytes(point, V::SIGNATURE_BYTES, "share value")?;
        Self::new(*index, value)
    }

    pub fn to_hex(&self) -> String {
        hex_encode(&self.to_bytes())
    }

    pub fn from_hex(s: &str) -> Result<Self, BlsError> {
        Self::from_bytes(&hex_decode(s)?)
    }
}

impl<V: BlsVariant> Serialize for IndexedElement<V> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        if s.is_human_readable() {
            self.to_hex().serialize(s)
        } else {
            serde_bytes::Bytes::new(&self.to_bytes()).serialize(s)
        }
    }
}

impl<'de, V: BlsVariant> Deserialize<'de> for IndexedElement<V> {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        if d.is_human_readable() {
            let s = String::deserialize(d)?;
            Self::from_hex(&s).map_err(de::Error::custom)
        } else {
            let b = serde_bytes::ByteBuf::deserialize(d)?;
            Self::from_bytes(&b).map_err(de::Error::custom)
        }
    }
}

/// A partial BLS signature produced by one node, tagged with its scheme.
///
/// In JSON a share reads `{"ProofOfPossession": "<hex>"}` where the hex
/// string is the index byte followed by the compressed point. Unknown tags
/// are rejected when parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum SignatureShare<V: BlsVariant = Bls12381G2> {
    Basic(IndexedElement<V>),
    MessageAugmentation(IndexedElement<V>),
    ProofOfPossession(IndexedElement<V>),
}

impl<V: BlsVariant> SignatureShare<V> {
    pub fn new(scheme: SignatureScheme, element: IndexedElement<V>) -> Self {
        match scheme {
            SignatureScheme::Basic => Self::Basic(element),
            SignatureScheme::MessageAugmentation => Self::MessageAugmentation(element),
            SignatureScheme::ProofOfPossession => Self::ProofOfPossession(element),
        }
    }

    pub fn scheme(&self) -> SignatureScheme {
        match self {
            Self::Basic(_) => SignatureScheme::Basic,
            Self::MessageAugmentation(_) => SignatureScheme::MessageAugmentation,
            Self::ProofOfPossession(_) => SignatureScheme::ProofOfPossession,
        }
    }

    pub fn element(&self) -> &IndexedElement<V> {
        match self {
            Self::Basic(e) | Self::MessageAugmentation(e) | Self::ProofOfPossession(e) => e,
        }
    }

    pub fn index(&self) -> u8 {
        self.element().index()
    }

    pub fn value(&self) -> &SignaturePoint<V> {
        self.element().value()
    }

    pub fn from_json(s: &str) -> Result<Self, BlsError> {
        serde_json::from_str(s).map_err(|e| BlsError::Encoding(format!("share: {e}")))
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("share serialization is infallible")
    }
}
