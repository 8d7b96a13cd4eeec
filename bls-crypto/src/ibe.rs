//! Identity based encryption to a threshold group key.
//!
//! The identity key of `id` is the proof of possession scheme signature
//! `sigma = H(id)^s` under the group secret `s`, so nodes hand out decryption
//! shares by signing the identity and any quorum combines them with the
//! ordinary signature machinery.
//!
//! Encryption draws a scalar `r` and a 32 byte seed, publishes `U = g^r`,
//! masks the seed with SHA-256 of `e(pk^r, H(id)) = e(U, sigma)` and masks the
//! length framed message with a SHAKE128 stream of the seed. The framing is
//! the only integrity check: a wrong identity key garbles the length prefix,
//! which decryption rejects in all but about one case in 256. Use the
//! verifying entry points when the shares are not trusted.

use ark_bls12_381::{Bls12_381, Fr};
use ark_ec::pairing::PairingOutput;
use ark_ec::{AffineRepr, CurveGroup, PrimeGroup};
use ark_ff::{BigInteger, Field, PrimeField, Zero};
use ark_std::rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};
use sha3::Shake128;
use sha3::digest::ExtendableOutput;
use tracing::debug;
use zeroize::Zeroizing;

use crate::ciphertext::{Ciphertext, SIGMA_BYTES};
use crate::combine::combine_shares;
use crate::encoding::{read_prefixed, write_varint};
use crate::keys::{PublicKey, PublicKeySet};
use crate::scheme::{Role, SignatureScheme};
use crate::share::SignatureShare;
use crate::signature::Signature;
use crate::variant::BlsVariant;
use crate::{BlsError, Engine};

impl Engine {
    /// Encrypt `message` to `identity` under the group key `pk`, drawing
    /// randomness from the thread local CSPRNG.
    pub fn encrypt<V: BlsVariant>(
        &self,
        pk: &PublicKey<V>,
        message: &[u8],
        identity: &[u8],
    ) -> Result<Ciphertext<V>, BlsError> {
        self.encrypt_with_rng(pk, message, identity, &mut ark_std::rand::thread_rng())
    }

    pub fn encrypt_with_rng<V: BlsVariant, R: RngCore + CryptoRng>(
        &self,
        pk: &PublicKey<V>,
        message: &[u8],
        identity: &[u8],
        rng: &mut R,
    ) -> Result<Ciphertext<V>, BlsError> {
        if pk.as_affine().is_zero() {
            return Err(BlsError::Encoding("public key is the point at infinity".into()));
        }
        let q = self.hash_identity::<V>(identity)?;
        let r = random_scalar(rng)?;
        let mut seed = Zeroizing::new([0u8; SIGMA_BYTES]);
        rng.try_fill_bytes(&mut *seed)
            .map_err(|e| BlsError::Crypto(format!("randomness source failed: {e}")))?;

        let u = (V::PublicKeyGroup::generator() * *r).into_affine();
        let k = V::pair(&(pk.as_affine().into_group() * *r).into_affine(), &q);
        let v = mask_seed(&k, &seed);

        let mut w = Vec::with_capacity(message.len() + 10);
        write_varint(&mut w, message.len() as u64);
        w.extend_from_slice(message);
        apply_keystream(&seed, &mut w);

        debug!(
            variant = V::NAME,
            identity_len = identity.len(),
            message_len = message.len(),
            "encrypted to identity"
        );
        Ok(Ciphertext {
            u,
            v,
            w,
            scheme: SignatureScheme::ProofOfPossession,
        })
    }

    /// Combine decryption shares without checking them and decrypt.
    ///
    /// Every supplied share takes part, so the threshold is implied by their
    /// number. A wrong or too small share set yields a wrong identity key,
    /// which almost always surfaces as a framing failure.
    pub fn decrypt_with_signature_shares<V: BlsVariant>(
        &self,
        ct: &Ciphertext<V>,
        shares: &[SignatureShare<V>],
    ) -> Result<Vec<u8>, BlsError> {
        let sigma =
            combine_shares(shares, shares.len(), Role::Decryption).map_err(BlsError::decryption)?;
        self.decrypt_with_key(ct, &sigma)
    }

    /// Combine decryption shares, check the result is the identity key of
    /// `identity` under `pk`, and decrypt.
    pub fn verify_and_decrypt_with_signature_shares<V: BlsVariant>(
        &self,
        pk: &PublicKey<V>,
        identity: &[u8],
        ct: &Ciphertext<V>,
        shares: &[SignatureShare<V>],
    ) -> Result<Vec<u8>, BlsError> {
        let sigma =
            combine_shares(shares, shares.len(), Role::Decryption).map_err(BlsError::decryption)?;
        self.verify_signature(pk, identity, &sigma)
            .map_err(BlsError::decryption)?;
        self.decrypt_with_key(ct, &sigma)
    }

    /// Check every share against the node's public key share, drop invalid
    /// ones, and decrypt with the rest if they still reach the threshold.
    pub fn verify_and_decrypt_with_key_set<V: BlsVariant>(
        &self,
        key_set: &PublicKeySet<V>,
        identity: &[u8],
        ct: &Ciphertext<V>,
        shares: &[SignatureShare<V>],
    ) -> Result<Vec<u8>, BlsError> {
        let sigma = self
            .combine_verified(key_set, identity, shares, Role::Decryption)
            .map_err(BlsError::decryption)?;
        self.decrypt_with_key(ct, &sigma)
    }

    /// Decrypt with a full identity key, such as one combined elsewhere.
    pub fn decrypt_with_key<V: BlsVariant>(
        &self,
        ct: &Ciphertext<V>,
        sigma: &Signature<V>,
    ) -> Result<Vec<u8>, BlsError> {
        if sigma.scheme() != SignatureScheme::ProofOfPossession || sigma.scheme() != ct.scheme {
            return Err(BlsError::decryption(BlsError::MismatchedContext(format!(
                "{} signature can not open a {} ciphertext",
                sigma.scheme(),
                ct.scheme
            ))));
        }
        let k = V::pair(&ct.u, sigma.as_affine());
        let seed = Zeroizing::new(mask_seed(&k, &ct.v));
        let mut framed = Zeroizing::new(ct.w.clone());
        apply_keystream(&seed, &mut framed);

        match read_prefixed(&framed) {
            Ok((m, [])) => Ok(m.to_vec()),
            _ => {
                debug!("ciphertext framing rejected");
                Err(BlsError::Decryption(None))
            }
        }
    }
}

/// XOR `seed` with SHA-256 over the twelve base field coefficients of `k`,
/// each 48 bytes big endian, in tower order.
fn mask_seed(k: &PairingOutput<Bls12_381>, seed: &[u8; SIGMA_BYTES]) -> [u8; SIGMA_BYTES] {
    let mut h = Sha256::new();
    for c in k.0.to_base_prime_field_elements() {
        h.update(c.into_bigint().to_bytes_be());
    }
    let digest: [u8; SIGMA_BYTES] = h.finalize().into();
    let mut out = *seed;
    out.iter_mut().zip(digest).for_each(|(o, d)| *o ^= d);
    out
}

/// XOR `data` in place with SHAKE128 of the seed.
fn apply_keystream(seed: &[u8; SIGMA_BYTES], data: &mut [u8]) {
    let mut stream = Zeroizing::new(vec![0u8; data.len()]);
    Shake128::digest_xof(seed, &mut stream);
    data.iter_mut().zip(stream.iter()).for_each(|(d, s)| *d ^= s);
}

/// Uniform non-zero scalar from 64 random bytes reduced modulo the group order.
fn random_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Zeroizing<Fr>, BlsError> {
    let mut seed = Zeroizing::new([0u8; 64]);
    loop {
        rng.try_fill_bytes(&mut *seed)
            .map_err(|e| BlsError::Crypto(format!("randomness source failed: {e}")))?;
        let r = Fr::from_le_bytes_mod_order(&*seed);
        if !r.is_zero() {
            return Ok(Zeroizing::new(r));
        }
    }
}
