//! Public keys, key shares and a trusted dealer for test and development setups.
//!
//! Production key material comes from a distributed key generation run by the
//! nodes themselves. The dealer here splits a locally known secret with Shamir
//! sharing so that the combination paths can be exercised end to end.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use ark_bls12_381::{Fr, G1Affine, G2Affine};
use ark_ec::{AffineRepr, CurveGroup, PrimeGroup};
use ark_ff::{UniformRand, Zero};
use ark_poly::{DenseUVPolynomial, Polynomial, univariate::DensePolynomial};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::rand::Rng;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::encoding::{NonIdentity, hex_decode, hex_encode, point_from_bytes, point_to_bytes};
use crate::scheme::SignatureScheme;
use crate::share::{IndexedElement, SignatureShare};
use crate::signature::{PossessionProof, Signature};
use crate::variant::{Bls12381G1, Bls12381G2, BlsVariant, PublicKeyPoint};
use crate::{BlsError, Engine};

/// Largest number of key holders; share indices are encoded in a single byte.
pub const MAX_NODES: usize = u8::MAX as usize;

/// The group public key.
#[serde_as]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct PublicKey<V: BlsVariant = Bls12381G2> {
    #[serde_as(as = "NonIdentity")]
    key: PublicKeyPoint<V>,
}

impl<V: BlsVariant> PublicKey<V> {
    pub fn new(key: PublicKeyPoint<V>) -> Self {
        Self { key }
    }

    pub fn as_affine(&self) -> &PublicKeyPoint<V> {
        &self.key
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        point_to_bytes(&self.key)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BlsError> {
        let key: PublicKeyPoint<V> = point_from_bytes(bytes, V::PUBLIC_KEY_BYTES, "public key")?;
        if key.is_zero() {
            return Err(BlsError::Encoding("public key is the point at infinity".into()));
        }
        Ok(Self { key })
    }

    pub fn to_hex(&self) -> String {
        hex_encode(&self.to_bytes())
    }

    pub fn from_hex(s: &str) -> Result<Self, BlsError> {
        Self::from_bytes(&hex_decode(s)?)
    }
}

impl From<G1Affine> for PublicKey<Bls12381G2> {
    fn from(key: G1Affine) -> Self {
        Self { key }
    }
}

impl From<G2Affine> for PublicKey<Bls12381G1> {
    fn from(key: G2Affine) -> Self {
        Self { key }
    }
}

impl<V: BlsVariant> fmt::Debug for PublicKey<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey<{}>({})", V::NAME, self.to_hex())
    }
}

impl<V: BlsVariant> fmt::Display for PublicKey<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// The public key of a single key holder, `g^f(index)`.
#[serde_as]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct PublicKeyShare<V: BlsVariant = Bls12381G2> {
    index: u8,
    #[serde_as(as = "NonIdentity")]
    key: PublicKeyPoint<V>,
}

impl<V: BlsVariant> PublicKeyShare<V> {
    pub fn new(index: u8, key: PublicKeyPoint<V>) -> Result<Self, BlsError> {
        if index == 0 {
            return Err(BlsError::Argument("key share index must not be 0".into()));
        }
        Ok(Self { index, key })
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn as_affine(&self) -> &PublicKeyPoint<V> {
        &self.key
    }
}

/// Group public key, reconstruction threshold and the public key share of
/// every node. Needed to verify shares one by one.
///
/// Deserializing runs the same checks as [`PublicKeySet::new`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "", try_from = "KeySetFields<V>")]
pub struct PublicKeySet<V: BlsVariant = Bls12381G2> {
    public_key: PublicKey<V>,
    threshold: usize,
    shares: BTreeMap<u8, PublicKeyShare<V>>,
}

#[derive(Deserialize)]
#[serde(bound = "")]
struct KeySetFields<V: BlsVariant> {
    public_key: PublicKey<V>,
    threshold: usize,
    shares: BTreeMap<u8, PublicKeyShare<V>>,
}

impl<V: BlsVariant> TryFrom<KeySetFields<V>> for PublicKeySet<V> {
    type Error = BlsError;

    fn try_from(f: KeySetFields<V>) -> Result<Self, Self::Error> {
        if let Some((k, s)) = f.shares.iter().find(|(k, s)| **k != s.index) {
            return Err(BlsError::Argument(format!(
                "key share {} stored under index {k}",
                s.index
            )));
        }
        Self::new(f.public_key, f.threshold, f.shares.into_values())
    }
}

impl<V: BlsVariant> PublicKeySet<V> {
    pub fn new<I>(public_key: PublicKey<V>, threshold: usize, shares: I) -> Result<Self, BlsError>
    where
        I: IntoIterator<Item = PublicKeyShare<V>>,
    {
        let mut map = BTreeMap::new();
        for s in shares {
            if s.index == 0 {
                return Err(BlsError::Argument("key share index must not be 0".into()));
            }
            if map.insert(s.index, s).is_some() {
                return Err(BlsError::DuplicateIndex(s.index));
            }
        }
        if threshold == 0 || threshold > map.len() {
            return Err(BlsError::Argument(format!(
                "threshold {threshold} out of range for {} key shares",
                map.len()
            )));
        }
        Ok(Self {
            public_key,
            threshold,
            shares: map,
        })
    }

    pub fn public_key(&self) -> &PublicKey<V> {
        &self.public_key
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn share(&self, index: u8) -> Option<&PublicKeyShare<V>> {
        self.shares.get(&index)
    }

    pub fn shares(&self) -> impl Iterator<Item = &PublicKeyShare<V>> {
        self.shares.values()
    }
}

/// A BLS secret key.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey<V: BlsVariant = Bls12381G2> {
    value: Fr,
    _variant: PhantomData<V>,
}

impl<V: BlsVariant> SecretKey<V> {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        loop {
            let s = Fr::rand(rng);
            if !s.is_zero() {
                return Self::from_scalar(s);
            }
        }
    }

    fn from_scalar(value: Fr) -> Self {
        Self {
            value,
            _variant: PhantomData,
        }
    }

    /// Little endian canonical encoding of the scalar, 32 bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut v = Vec::with_capacity(32);
        self.value
            .serialize_compressed(&mut v)
            .expect("serializing into a Vec never fails");
        v
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BlsError> {
        if bytes.len() != 32 {
            return Err(BlsError::Encoding(format!(
                "secret key must be 32 bytes, got {}",
                bytes.len()
            )));
        }
        let s = Fr::deserialize_compressed(bytes)?;
        if s.is_zero() {
            return Err(BlsError::Encoding("secret key must not be zero".into()));
        }
        Ok(Self::from_scalar(s))
    }

    pub fn public_key(&self) -> PublicKey<V> {
        PublicKey::new((V::PublicKeyGroup::generator() * self.value).into_affine())
    }

    pub fn sign(
        &self,
        engine: &Engine,
        scheme: SignatureScheme,
        msg: &[u8],
    ) -> Result<Signature<V>, BlsError> {
        let h = engine.hash_message(scheme, &self.public_key(), msg)?;
        Ok(Signature::new(scheme, (h.into_group() * self.value).into_affine()))
    }

    pub fn prove_possession(&self, engine: &Engine) -> Result<PossessionProof<V>, BlsError> {
        let h = engine.hash_possession(&self.public_key())?;
        Ok(PossessionProof {
            point: (h.into_group() * self.value).into_affine(),
        })
    }

    /// Split the key into `total` Shamir shares, any `threshold` of which
    /// can jointly sign or decrypt. Share `i` is `f(i)` for `i` in `1..=total`
    /// where `f` is a random polynomial of degree `threshold - 1` and
    /// `f(0)` is this key.
    pub fn split<R: Rng>(
        &self,
        threshold: usize,
        total: usize,
        rng: &mut R,
    ) -> Result<(PublicKeySet<V>, Vec<SecretKeyShare<V>>), BlsError> {
        if total == 0 || total > MAX_NODES {
            return Err(BlsError::Argument(format!(
                "number of key shares must be in 1..={MAX_NODES}, got {total}"
            )));
        }
        if threshold == 0 || threshold > total {
            return Err(BlsError::Argument(format!(
                "threshold must be in 1..={total}, got {threshold}"
            )));
        }

        let mut poly = DensePolynomial::<Fr>::rand(threshold - 1, rng);
        poly.coeffs[0] = self.value;

        let group_key = self.public_key();
        let values: Vec<(u8, Fr)> = (1..=total as u8)
            .map(|i| (i, poly.evaluate(&Fr::from(i))))
            .collect();
        poly.coeffs.zeroize();

        let points: Vec<V::PublicKeyGroup> = values
            .iter()
            .map(|(_, v)| V::PublicKeyGroup::generator() * v)
            .collect();
        let public_shares = V::PublicKeyGroup::normalize_batch(&points)
            .into_iter()
            .zip(&values)
            .map(|(key, (index, _))| PublicKeyShare { index: *index, key });

        let key_set = PublicKeySet::new(group_key, threshold, public_shares)?;
        let shares = values
            .into_iter()
            .map(|(index, value)| SecretKeyShare {
                index,
                value,
                group_key,
            })
            .collect();
        Ok((key_set, shares))
    }
}

impl<V: BlsVariant> Drop for SecretKey<V> {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}

impl<V: BlsVariant> ZeroizeOnDrop for SecretKey<V> {}

impl<V: BlsVariant> fmt::Debug for SecretKey<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey")
    }
}

/// One node's share of the group secret key.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKeyShare<V: BlsVariant = Bls12381G2> {
    index: u8,
    value: Fr,
    group_key: PublicKey<V>,
}

impl<V: BlsVariant> SecretKeyShare<V> {
    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn group_key(&self) -> &PublicKey<V> {
        &self.group_key
    }

    pub fn public_key_share(&self) -> PublicKeyShare<V> {
        PublicKeyShare {
            index: self.index,
            key: (V::PublicKeyGroup::generator() * self.value).into_affine(),
        }
    }

    /// Produce this node's partial signature over `msg`. Message augmentation
    /// uses the group key so that the combined signature verifies under it.
    pub fn sign(
        &self,
        engine: &Engine,
        scheme: SignatureScheme,
        msg: &[u8],
    ) -> Result<SignatureShare<V>, BlsError> {
        let h = engine.hash_message(scheme, &self.group_key, msg)?;
        let element = IndexedElement::new(self.index, (h.into_group() * self.value).into_affine())?;
        Ok(SignatureShare::new(scheme, element))
    }

    /// Produce this node's share of the identity key for `identity`.
    pub fn decryption_share(
        &self,
        engine: &Engine,
        identity: &[u8],
    ) -> Result<SignatureShare<V>, BlsError> {
        self.sign(engine, SignatureScheme::ProofOfPossession, identity)
    }
}

impl<V: BlsVariant> Drop for SecretKeyShare<V> {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}

impl<V: BlsVariant> ZeroizeOnDrop for SecretKeyShare<V> {}

impl<V: BlsVariant> fmt::Debug for SecretKeyShare<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKeyShare")
            .field("index", &self.index)
            .field("group_key", &self.group_key)
            .finish_non_exhaustive()
    }
}
