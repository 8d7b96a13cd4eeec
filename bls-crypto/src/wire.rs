//! String in, string out entry points for bindings.
//!
//! Public keys are hex, identities and messages raw bytes, ciphertexts and
//! plaintexts padded base64, shares JSON and combined signatures hex.
//!
//! The variant is picked from the input: a 48 byte public key selects
//! [`Bls12381G2`], a 96 byte one [`Bls12381G1`]. Where no key is given, shares
//! are parsed as [`Bls12381G2`] first and as [`Bls12381G1`] if that fails.

use crate::ciphertext::Ciphertext;
use crate::encoding::{G1_BYTES, G2_BYTES, base64_decode, base64_encode, hex_decode};
use crate::keys::PublicKey;
use crate::scheme::SignatureScheme;
use crate::share::SignatureShare;
use crate::signature::Signature;
use crate::variant::{Bls12381G1, Bls12381G2, BlsVariant};
use crate::{BlsError, Engine};

/// Fewest shares [`combine_signature_shares`] accepts.
pub const MIN_COMBINE_SHARES: usize = 2;

enum AnyPublicKey {
    G2(PublicKey<Bls12381G2>),
    G1(PublicKey<Bls12381G1>),
}

impl AnyPublicKey {
    fn from_hex(s: &str) -> Result<Self, BlsError> {
        let bytes = hex_decode(s)?;
        match bytes.len() {
            G1_BYTES => Ok(Self::G2(PublicKey::from_bytes(&bytes)?)),
            G2_BYTES => Ok(Self::G1(PublicKey::from_bytes(&bytes)?)),
            n => Err(BlsError::Encoding(format!(
                "public key must be {G1_BYTES} or {G2_BYTES} bytes, got {n}"
            ))),
        }
    }
}

enum AnyShares {
    G2(Vec<SignatureShare<Bls12381G2>>),
    G1(Vec<SignatureShare<Bls12381G1>>),
}

impl AnyShares {
    fn from_json<S: AsRef<str>>(shares: &[S]) -> Result<Self, BlsError> {
        match parse_shares(shares) {
            Ok(s) => Ok(Self::G2(s)),
            Err(e) => parse_shares(shares).map(Self::G1).map_err(|_| e),
        }
    }
}

/// Encrypt `message` to `identity`; returns the base64 ciphertext.
pub fn encrypt(
    engine: &Engine,
    public_key: &str,
    message: &[u8],
    identity: &[u8],
) -> Result<String, BlsError> {
    match AnyPublicKey::from_hex(public_key)? {
        AnyPublicKey::G2(pk) => Ok(engine.encrypt(&pk, message, identity)?.to_base64()),
        AnyPublicKey::G1(pk) => Ok(engine.encrypt(&pk, message, identity)?.to_base64()),
    }
}

/// Combine JSON encoded decryption shares and decrypt; returns the base64 plaintext.
pub fn decrypt_with_signature_shares<S: AsRef<str>>(
    engine: &Engine,
    ciphertext: &str,
    shares: &[S],
) -> Result<String, BlsError> {
    let pt = match AnyShares::from_json(shares).map_err(BlsError::decryption)? {
        AnyShares::G2(shares) => decrypt_in(engine, ciphertext, &shares),
        AnyShares::G1(shares) => decrypt_in(engine, ciphertext, &shares),
    }?;
    Ok(base64_encode(&pt))
}

fn decrypt_in<V: BlsVariant>(
    engine: &Engine,
    ciphertext: &str,
    shares: &[SignatureShare<V>],
) -> Result<Vec<u8>, BlsError> {
    let ct = Ciphertext::<V>::from_base64(ciphertext)?;
    engine.decrypt_with_signature_shares(&ct, shares)
}

/// Like [`decrypt_with_signature_shares`] but checks the combined key
/// against `public_key` and `identity` first.
pub fn verify_and_decrypt_with_signature_shares<S: AsRef<str>>(
    engine: &Engine,
    public_key: &str,
    identity: &[u8],
    ciphertext: &str,
    shares: &[S],
) -> Result<String, BlsError> {
    let pt = match AnyPublicKey::from_hex(public_key)? {
        AnyPublicKey::G2(pk) => verify_and_decrypt_in(engine, &pk, identity, ciphertext, shares),
        AnyPublicKey::G1(pk) => verify_and_decrypt_in(engine, &pk, identity, ciphertext, shares),
    }?;
    Ok(base64_encode(&pt))
}

fn verify_and_decrypt_in<V: BlsVariant, S: AsRef<str>>(
    engine: &Engine,
    pk: &PublicKey<V>,
    identity: &[u8],
    ciphertext: &str,
    shares: &[S],
) -> Result<Vec<u8>, BlsError> {
    let ct = Ciphertext::<V>::from_base64(ciphertext)?;
    let shares = parse_shares::<V, S>(shares).map_err(BlsError::decryption)?;
    engine.verify_and_decrypt_with_signature_shares(pk, identity, &ct, &shares)
}

/// Combine JSON encoded signing shares; returns the hex signature, 192
/// characters for [`Bls12381G2`] shares and 96 for [`Bls12381G1`] ones.
///
/// At least [`MIN_COMBINE_SHARES`] shares are required.
pub fn combine_signature_shares<S: AsRef<str>>(
    engine: &Engine,
    shares: &[S],
) -> Result<String, BlsError> {
    if shares.len() < MIN_COMBINE_SHARES {
        return Err(BlsError::InsufficientShares {
            required: MIN_COMBINE_SHARES,
            got: shares.len(),
        });
    }
    match AnyShares::from_json(shares)? {
        AnyShares::G2(shares) => Ok(engine.combine_signature_shares(&shares)?.to_hex()),
        AnyShares::G1(shares) => Ok(engine.combine_signature_shares(&shares)?.to_hex()),
    }
}

/// Verify a signature given as the tagged JSON form, or as bare hex or
/// base64 of the compressed point. Bare encodings are taken to be proof of
/// possession scheme signatures.
pub fn verify_signature(
    engine: &Engine,
    public_key: &str,
    message: &[u8],
    signature: &str,
) -> Result<(), BlsError> {
    match AnyPublicKey::from_hex(public_key)? {
        AnyPublicKey::G2(pk) => engine.verify_signature(&pk, message, &parse_signature(signature)?),
        AnyPublicKey::G1(pk) => engine.verify_signature(&pk, message, &parse_signature(signature)?),
    }
}

fn parse_shares<V: BlsVariant, S: AsRef<str>>(
    shares: &[S],
) -> Result<Vec<SignatureShare<V>>, BlsError> {
    shares.iter().map(|s| SignatureShare::from_json(s.as_ref())).collect()
}

fn parse_signature<V: BlsVariant>(s: &str) -> Result<Signature<V>, BlsError> {
    let s = s.trim();
    if s.starts_with('{') {
        return serde_json::from_str(s).map_err(|e| BlsError::MalformedSignature(e.to_string()));
    }
    let scheme = SignatureScheme::ProofOfPossession;
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    if stripped.len() == 2 * V::SIGNATURE_BYTES && stripped.bytes().all(|b| b.is_ascii_hexdigit()) {
        let bytes = hex_decode(stripped).map_err(|e| BlsError::MalformedSignature(e.to_string()))?;
        return Signature::from_bytes(scheme, &bytes);
    }
    let bytes = base64_decode(s).map_err(|e| BlsError::MalformedSignature(e.to_string()))?;
    Signature::from_bytes(scheme, &bytes)
}
