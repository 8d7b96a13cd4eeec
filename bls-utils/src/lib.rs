//! Helpers for tests, benchmarks and local tooling around `bls-crypto`.

pub mod types;

use ark_std::rand::SeedableRng;
use bls_crypto::{BlsError, PublicKeySet, SecretKey, SecretKeyShare};
use rand_chacha::ChaCha20Rng;

pub use types::logging::init_logging;

/// Key material of one trusted dealer run.
#[derive(Debug)]
pub struct KeyMaterial {
    pub secret_key: SecretKey,
    pub key_set: PublicKeySet,
    pub shares: Vec<SecretKeyShare>,
}

/// Deterministic RNG for the given seed and purpose.
pub fn seeded_rng(seed: [u8; 32], purpose: &str) -> ChaCha20Rng {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&seed);
    hasher.update(purpose.as_bytes());
    ChaCha20Rng::from_seed(*hasher.finalize().as_bytes())
}

/// Deal a `threshold`-of-`total` key deterministically from `seed`.
///
/// The same inputs always produce the same keys, so fixtures can be
/// regenerated. Never use this outside of tests.
pub fn seeded_key_material(
    seed: [u8; 32],
    threshold: usize,
    total: usize,
) -> Result<KeyMaterial, BlsError> {
    let rng = &mut seeded_rng(seed, &format!("dealer-{threshold}-of-{total}"));
    let secret_key: SecretKey = SecretKey::random(rng);
    let (key_set, shares) = secret_key.split(threshold, total, rng)?;
    Ok(KeyMaterial {
        secret_key,
        key_set,
        shares,
    })
}

/// [`seeded_key_material`] with the all zero seed.
pub fn unsafe_zero_key_material(threshold: usize, total: usize) -> Result<KeyMaterial, BlsError> {
    seeded_key_material([0u8; 32], threshold, total)
}
