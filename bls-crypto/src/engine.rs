use ark_bls12_381::{Bls12_381, G1Affine, G2Affine};
use ark_ec::AffineRepr;
use ark_ec::hashing::HashToCurve;
use ark_ec::pairing::Pairing;
use tracing::debug;

use crate::BlsError;
use crate::config::EngineConfig;
use crate::encoding::point_to_bytes;
use crate::keys::PublicKey;
use crate::scheme::SignatureScheme;
use crate::variant::{
    Bls12381G1, Bls12381G2, BlsVariant, G1Hasher, G2Hasher, PublicKeyPoint, SignaturePoint,
};

type G1Prepared = <Bls12_381 as Pairing>::G1Prepared;
type G2Prepared = <Bls12_381 as Pairing>::G2Prepared;

/// One hash to curve instance per domain of a variant.
pub struct Hashers<H> {
    basic: H,
    augmented: H,
    pop_sig: H,
    pop_proof: H,
}

impl<H> Hashers<H> {
    fn new<V: BlsVariant<Hasher = H>>() -> Result<Self, BlsError>
    where
        H: HashToCurve<V::SignatureGroup>,
    {
        let h = |dst: &[u8]| {
            <V::Hasher as HashToCurve<V::SignatureGroup>>::new(dst)
                .map_err(|e| BlsError::Crypto(e.to_string()))
        };
        Ok(Self {
            basic: h(V::DST_BASIC)?,
            augmented: h(V::DST_AUGMENTED)?,
            pop_sig: h(V::DST_POP_SIG)?,
            pop_proof: h(V::DST_POP_PROOF)?,
        })
    }
}

/// Handle owning everything that is computed once per process: the hash to
/// curve instances of every domain in both groups and the prepared negated
/// generators used by every verification equation.
///
/// An engine is immutable after [`Engine::initialize`]; share it by reference
/// across threads.
pub struct Engine {
    config: EngineConfig,
    pub(crate) g1: Hashers<G1Hasher>,
    pub(crate) g2: Hashers<G2Hasher>,
    pub(crate) neg_g1: G1Prepared,
    pub(crate) neg_g2: G2Prepared,
}

impl Engine {
    /// Create an engine with the default configuration.
    pub fn initialize() -> Result<Self, BlsError> {
        Self::new(EngineConfig::default())
    }

    pub fn new(config: EngineConfig) -> Result<Self, BlsError> {
        let engine = Self {
            g1: Hashers::new::<Bls12381G1>()?,
            g2: Hashers::new::<Bls12381G2>()?,
            neg_g1: G1Prepared::from(-G1Affine::generator()),
            neg_g2: G2Prepared::from(-G2Affine::generator()),
            config,
        };
        debug!(config = ?engine.config, "bls engine initialized");
        Ok(engine)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Hash a message into the signature group under the given scheme.
    /// Message augmentation prefixes the message with the group public key.
    pub(crate) fn hash_message<V: BlsVariant>(
        &self,
        scheme: SignatureScheme,
        pk: &PublicKey<V>,
        msg: &[u8],
    ) -> Result<SignaturePoint<V>, BlsError> {
        let hashers = V::hashers(self);
        let h = match scheme {
            SignatureScheme::Basic => hashers.basic.hash(msg),
            SignatureScheme::ProofOfPossession => hashers.pop_sig.hash(msg),
            SignatureScheme::MessageAugmentation => {
                let mut m = point_to_bytes(pk.as_affine());
                m.extend_from_slice(msg);
                hashers.augmented.hash(&m)
            }
        };
        h.map_err(|e| BlsError::Crypto(e.to_string()))
    }

    /// The point an identity is encrypted to. Its identity key is the
    /// proof of possession scheme signature over the identity.
    pub(crate) fn hash_identity<V: BlsVariant>(
        &self,
        identity: &[u8],
    ) -> Result<SignaturePoint<V>, BlsError> {
        V::hashers(self)
            .pop_sig
            .hash(identity)
            .map_err(|e| BlsError::Crypto(e.to_string()))
    }

    pub(crate) fn hash_possession<V: BlsVariant>(
        &self,
        pk: &PublicKey<V>,
    ) -> Result<SignaturePoint<V>, BlsError> {
        V::hashers(self)
            .pop_proof
            .hash(&point_to_bytes(pk.as_affine()))
            .map_err(|e| BlsError::Crypto(e.to_string()))
    }

    /// Checks `e(g, sig) == e(pk, h)` as a two term multi pairing.
    pub(crate) fn pairing_check<V: BlsVariant>(
        &self,
        pk: &PublicKeyPoint<V>,
        sig: &SignaturePoint<V>,
        h: &SignaturePoint<V>,
    ) -> bool {
        V::pairing_check(self, pk, sig, h)
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
