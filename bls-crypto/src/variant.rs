//! The two ways of placing BLS12-381 keys and signatures on the curve.
//!
//! [`Bls12381G2`] keeps public keys in G1 (48 bytes) and signatures in G2
//! (96 bytes). [`Bls12381G1`] swaps the groups: shorter signatures, longer
//! keys. Every key, share, signature and ciphertext type is generic over the
//! variant and defaults to [`Bls12381G2`].

use std::fmt::Debug;
use std::hash::Hash;

use ark_bls12_381::{
    Bls12_381, Fr, G1Affine, G1Projective, G2Affine, G2Projective, g1, g2,
};
use ark_ec::hashing::HashToCurve;
use ark_ec::hashing::curve_maps::wb::WBMap;
use ark_ec::hashing::map_to_curve_hasher::MapToCurveBasedHasher;
use ark_ec::pairing::{Pairing, PairingOutput};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::field_hashers::DefaultFieldHasher;
use ark_std::Zero;
use sha2::Sha256;

use crate::Engine;
use crate::encoding::{G1_BYTES, G2_BYTES};
use crate::engine::Hashers;
use crate::scheme::{
    DST_AUGMENTED, DST_BASIC, DST_G1_AUGMENTED, DST_G1_BASIC, DST_G1_POP_PROOF, DST_G1_POP_SIG,
    DST_POP_PROOF, DST_POP_SIG, SignatureScheme,
};

pub(crate) type G1Hasher =
    MapToCurveBasedHasher<G1Projective, DefaultFieldHasher<Sha256, 128>, WBMap<g1::Config>>;
pub(crate) type G2Hasher =
    MapToCurveBasedHasher<G2Projective, DefaultFieldHasher<Sha256, 128>, WBMap<g2::Config>>;

type G1Prepared = <Bls12_381 as Pairing>::G1Prepared;
type G2Prepared = <Bls12_381 as Pairing>::G2Prepared;

/// Affine point type public keys of variant `V` live in.
pub type PublicKeyPoint<V> = <<V as BlsVariant>::PublicKeyGroup as CurveGroup>::Affine;

/// Affine point type signatures, shares and identity keys of variant `V` live in.
pub type SignaturePoint<V> = <<V as BlsVariant>::SignatureGroup as CurveGroup>::Affine;

pub trait BlsVariant:
    'static + Send + Sync + Copy + Clone + Debug + PartialEq + Eq + Hash + Default
{
    type PublicKeyGroup: CurveGroup<ScalarField = Fr>;
    type SignatureGroup: CurveGroup<ScalarField = Fr>;

    #[doc(hidden)]
    type Hasher: HashToCurve<Self::SignatureGroup>;

    const NAME: &'static str;

    /// Size of a compressed public key or public key share.
    const PUBLIC_KEY_BYTES: usize;

    /// Size of a compressed signature or the point of a signature share.
    const SIGNATURE_BYTES: usize;

    const DST_BASIC: &'static [u8];
    const DST_AUGMENTED: &'static [u8];
    const DST_POP_SIG: &'static [u8];
    const DST_POP_PROOF: &'static [u8];

    /// The message hashing tag of a signature scheme.
    fn dst(scheme: SignatureScheme) -> &'static [u8] {
        match scheme {
            SignatureScheme::Basic => Self::DST_BASIC,
            SignatureScheme::MessageAugmentation => Self::DST_AUGMENTED,
            SignatureScheme::ProofOfPossession => Self::DST_POP_SIG,
        }
    }

    #[doc(hidden)]
    fn hashers(engine: &Engine) -> &Hashers<Self::Hasher>;

    /// The pairing with the arguments put in G1 and G2 order.
    fn pair(pk_side: &PublicKeyPoint<Self>, sig_side: &SignaturePoint<Self>) -> PairingOutput<Bls12_381>;

    /// Whether `e(g, sig) == e(pk, h)`, where `g` generates the public key group.
    #[doc(hidden)]
    fn pairing_check(
        engine: &Engine,
        pk: &PublicKeyPoint<Self>,
        sig: &SignaturePoint<Self>,
        h: &SignaturePoint<Self>,
    ) -> bool;
}

/// Public keys in G1, signatures in G2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Bls12381G2;

/// Public keys in G2, signatures in G1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Bls12381G1;

impl BlsVariant for Bls12381G2 {
    type PublicKeyGroup = G1Projective;
    type SignatureGroup = G2Projective;
    type Hasher = G2Hasher;

    const NAME: &'static str = "Bls12381G2";
    const PUBLIC_KEY_BYTES: usize = G1_BYTES;
    const SIGNATURE_BYTES: usize = G2_BYTES;

    const DST_BASIC: &'static [u8] = DST_BASIC;
    const DST_AUGMENTED: &'static [u8] = DST_AUGMENTED;
    const DST_POP_SIG: &'static [u8] = DST_POP_SIG;
    const DST_POP_PROOF: &'static [u8] = DST_POP_PROOF;

    fn hashers(engine: &Engine) -> &Hashers<G2Hasher> {
        &engine.g2
    }

    fn pair(pk_side: &G1Affine, sig_side: &G2Affine) -> PairingOutput<Bls12_381> {
        Bls12_381::pairing(*pk_side, *sig_side)
    }

    fn pairing_check(engine: &Engine, pk: &G1Affine, sig: &G2Affine, h: &G2Affine) -> bool {
        if pk.is_zero() || sig.is_zero() {
            return false;
        }
        Bls12_381::multi_pairing([engine.neg_g1.clone(), G1Prepared::from(*pk)], [*sig, *h])
            .is_zero()
    }
}

impl BlsVariant for Bls12381G1 {
    type PublicKeyGroup = G2Projective;
    type SignatureGroup = G1Projective;
    type Hasher = G1Hasher;

    const NAME: &'static str = "Bls12381G1";
    const PUBLIC_KEY_BYTES: usize = G2_BYTES;
    const SIGNATURE_BYTES: usize = G1_BYTES;

    const DST_BASIC: &'static [u8] = DST_G1_BASIC;
    const DST_AUGMENTED: &'static [u8] = DST_G1_AUGMENTED;
    const DST_POP_SIG: &'static [u8] = DST_G1_POP_SIG;
    const DST_POP_PROOF: &'static [u8] = DST_G1_POP_PROOF;

    fn hashers(engine: &Engine) -> &Hashers<G1Hasher> {
        &engine.g1
    }

    fn pair(pk_side: &G2Affine, sig_side: &G1Affine) -> PairingOutput<Bls12_381> {
        Bls12_381::pairing(*sig_side, *pk_side)
    }

    fn pairing_check(engine: &Engine, pk: &G2Affine, sig: &G1Affine, h: &G1Affine) -> bool {
        if pk.is_zero() || sig.is_zero() {
            return false;
        }
        Bls12_381::multi_pairing([*sig, *h], [engine.neg_g2.clone(), G2Prepared::from(*pk)])
            .is_zero()
    }
}
