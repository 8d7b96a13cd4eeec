//! Threshold BLS over BLS12-381: identity based encryption to a group key and
//! combination of signature shares into group signatures.
//!
//! Keys, shares, signatures and ciphertexts are generic over a [`BlsVariant`].
//! The default, [`Bls12381G2`], keeps public keys in G1 and signatures, shares
//! and identity points in G2; [`Bls12381G1`] swaps the groups. An [`Engine`]
//! holds the per process precomputation for both and is passed by reference
//! to every operation. The [`wire`] module offers the same operations over
//! the string encodings used by bindings.

mod ciphertext;
mod combine;
mod config;
mod encoding;
mod engine;
mod error;
mod ibe;
mod interpolation;
mod keys;
mod scheme;
mod share;
mod signature;
mod variant;
pub mod wire;

pub use ciphertext::{Ciphertext, MIN_CIPHERTEXT_BYTES, SIGMA_BYTES};
pub use combine::combine_shares;
pub use config::EngineConfig;
pub use encoding::{G1_BYTES, G2_BYTES, base64_decode, base64_encode, hex_decode, hex_encode};
pub use engine::Engine;
pub use error::{BlsError, ConfigError};
pub use keys::{MAX_NODES, PublicKey, PublicKeySet, PublicKeyShare, SecretKey, SecretKeyShare};
pub use scheme::{
    DST_AUGMENTED, DST_BASIC, DST_G1_AUGMENTED, DST_G1_BASIC, DST_G1_POP_PROOF, DST_G1_POP_SIG,
    DST_POP_PROOF, DST_POP_SIG, Role, SignatureScheme,
};
pub use share::{IndexedElement, SHARE_BYTES, SignatureShare};
pub use signature::{PossessionProof, Signature};
pub use variant::{Bls12381G1, Bls12381G2, BlsVariant, PublicKeyPoint, SignaturePoint};
