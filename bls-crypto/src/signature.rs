//! Group signatures, their verification and the signing side of share combination.

use ark_ec::AffineRepr;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use tracing::debug;

use crate::combine::combine_shares;
use crate::encoding::{
    NonIdentity, base64_decode, hex_decode, hex_encode, point_from_bytes, point_to_bytes,
};
use crate::keys::PublicKey;
use crate::scheme::{Role, SignatureScheme};
use crate::share::SignatureShare;
use crate::variant::{Bls12381G2, BlsVariant, SignaturePoint};
use crate::{BlsError, Engine};

/// A full BLS signature, tagged with the scheme it verifies under.
///
/// The point at infinity is rejected by every decoder, serde included.
#[serde_as]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum Signature<V: BlsVariant = Bls12381G2> {
    Basic(#[serde_as(as = "NonIdentity")] SignaturePoint<V>),
    MessageAugmentation(#[serde_as(as = "NonIdentity")] SignaturePoint<V>),
    ProofOfPossession(#[serde_as(as = "NonIdentity")] SignaturePoint<V>),
}

impl<V: BlsVariant> Signature<V> {
    pub fn new(scheme: SignatureScheme, point: SignaturePoint<V>) -> Self {
        match scheme {
            SignatureScheme::Basic => Self::Basic(point),
            SignatureScheme::MessageAugmentation => Self::MessageAugmentation(point),
            SignatureScheme::ProofOfPossession => Self::ProofOfPossession(point),
        }
    }

    pub fn scheme(&self) -> SignatureScheme {
        match self {
            Self::Basic(_) => SignatureScheme::Basic,
            Self::MessageAugmentation(_) => SignatureScheme::MessageAugmentation,
            Self::ProofOfPossession(_) => SignatureScheme::ProofOfPossession,
        }
    }

    pub fn as_affine(&self) -> &SignaturePoint<V> {
        match self {
            Self::Basic(p) | Self::MessageAugmentation(p) | Self::ProofOfPossession(p) => p,
        }
    }

    /// The canonical compressed encoding, without the scheme tag.
    pub fn to_bytes(&self) -> Vec<u8> {
        point_to_bytes(self.as_affine())
    }

    pub fn from_bytes(scheme: SignatureScheme, bytes: &[u8]) -> Result<Self, BlsError> {
        let p: SignaturePoint<V> = point_from_bytes(bytes, V::SIGNATURE_BYTES, "signature")
            .map_err(|e| BlsError::MalformedSignature(e.to_string()))?;
        if p.is_zero() {
            return Err(BlsError::MalformedSignature(
                "signature is the point at infinity".into(),
            ));
        }
        Ok(Self::new(scheme, p))
    }

    /// Lowercase hex of [`Self::to_bytes`], 192 characters in G2 and 96 in G1.
    pub fn to_hex(&self) -> String {
        hex_encode(&self.to_bytes())
    }

    pub fn from_hex(scheme: SignatureScheme, s: &str) -> Result<Self, BlsError> {
        let bytes = hex_decode(s).map_err(|e| BlsError::MalformedSignature(e.to_string()))?;
        Self::from_bytes(scheme, &bytes)
    }

    pub fn from_base64(scheme: SignatureScheme, s: &str) -> Result<Self, BlsError> {
        let bytes = base64_decode(s).map_err(|e| BlsError::MalformedSignature(e.to_string()))?;
        Self::from_bytes(scheme, &bytes)
    }
}

/// Proof that the holder of a secret key knows it, binding the public key to
/// its owner.
#[serde_as]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct PossessionProof<V: BlsVariant = Bls12381G2> {
    #[serde_as(as = "NonIdentity")]
    pub(crate) point: SignaturePoint<V>,
}

impl<V: BlsVariant> PossessionProof<V> {
    pub fn to_bytes(&self) -> Vec<u8> {
        point_to_bytes(&self.point)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BlsError> {
        let point: SignaturePoint<V> =
            point_from_bytes(bytes, V::SIGNATURE_BYTES, "proof of possession")
                .map_err(|e| BlsError::MalformedSignature(e.to_string()))?;
        if point.is_zero() {
            return Err(BlsError::MalformedSignature(
                "proof is the point at infinity".into(),
            ));
        }
        Ok(Self { point })
    }
}

impl Engine {
    /// Combine signing shares into a group signature.
    ///
    /// The caller is responsible for supplying at least threshold many valid
    /// shares; the set is only required to be non-empty (or to hold
    /// `min_signature_shares`), consistently tagged and free of duplicates.
    pub fn combine_signature_shares<V: BlsVariant>(
        &self,
        shares: &[SignatureShare<V>],
    ) -> Result<Signature<V>, BlsError> {
        let required = self.config().min_signature_shares.max(1);
        if shares.len() < required {
            return Err(BlsError::InsufficientShares {
                required,
                got: shares.len(),
            });
        }
        combine_shares(shares, shares.len(), Role::Signing)
    }

    /// Check `e(g, sig) == e(pk, H(msg))` under the signature's scheme.
    pub fn verify_signature<V: BlsVariant>(
        &self,
        pk: &PublicKey<V>,
        msg: &[u8],
        sig: &Signature<V>,
    ) -> Result<(), BlsError> {
        let h = self.hash_message(sig.scheme(), pk, msg)?;
        if self.pairing_check::<V>(pk.as_affine(), sig.as_affine(), &h) {
            Ok(())
        } else {
            debug!(scheme = %sig.scheme(), "signature rejected");
            Err(BlsError::Verification)
        }
    }

    pub fn verify_possession<V: BlsVariant>(
        &self,
        pk: &PublicKey<V>,
        proof: &PossessionProof<V>,
    ) -> Result<(), BlsError> {
        let h = self.hash_possession(pk)?;
        if self.pairing_check::<V>(pk.as_affine(), &proof.point, &h) {
            Ok(())
        } else {
            Err(BlsError::Verification)
        }
    }
}
