use bls_crypto::{BlsError, Engine, EngineConfig, Role, SignatureScheme, wire};
use bls_utils::seeded_key_material;

use super::{pick, signing_shares, subsets};

const SCHEMES: [SignatureScheme; 3] = [
    SignatureScheme::Basic,
    SignatureScheme::MessageAugmentation,
    SignatureScheme::ProofOfPossession,
];

#[test]
fn quorum_independence() {
    let engine = Engine::initialize().unwrap();
    let km = seeded_key_material([10; 32], 3, 6).unwrap();
    let pk = km.key_set.public_key();

    for scheme in SCHEMES {
        let shares = signing_shares(&engine, &km.shares, scheme, b"quorum");
        let expected = km.secret_key.sign(&engine, scheme, b"quorum").unwrap();
        for quorum in subsets(6, 3) {
            let sig = engine
                .combine_signature_shares(&pick(&shares, &quorum))
                .unwrap();
            assert_eq!(sig.to_bytes(), expected.to_bytes());
            engine.verify_signature(pk, b"quorum", &sig).unwrap();
        }
    }
}

#[test]
fn below_threshold_signature_does_not_verify() {
    let engine = Engine::initialize().unwrap();
    let km = seeded_key_material([11; 32], 3, 4).unwrap();
    let shares = signing_shares(&engine, &km.shares, SignatureScheme::ProofOfPossession, b"m");
    let sig = engine.combine_signature_shares(&shares[..2]).unwrap();
    assert!(matches!(
        engine.verify_signature(km.key_set.public_key(), b"m", &sig),
        Err(BlsError::Verification)
    ));
}

#[test]
fn verified_signing_combine() {
    let engine = Engine::new(EngineConfig::builder().parallel_verify(false).build()).unwrap();
    let km = seeded_key_material([12; 32], 2, 4).unwrap();
    let mut shares = signing_shares(&engine, &km.shares, SignatureScheme::Basic, b"m");
    shares[3] = signing_shares(&engine, &km.shares, SignatureScheme::Basic, b"n")[3];

    let sig = engine
        .combine_verified(&km.key_set, b"m", &shares, Role::Signing)
        .unwrap();
    engine
        .verify_signature(km.key_set.public_key(), b"m", &sig)
        .unwrap();

    // Decryption only takes proof of possession shares.
    assert!(matches!(
        engine.combine_verified(&km.key_set, b"m", &shares, Role::Decryption),
        Err(BlsError::MismatchedContext(_))
    ));
}

#[test]
fn minimum_share_count_is_configurable() {
    let engine = Engine::new(EngineConfig::builder().min_signature_shares(2).build()).unwrap();
    let km = seeded_key_material([13; 32], 1, 3).unwrap();
    let shares = signing_shares(&engine, &km.shares, SignatureScheme::Basic, b"m");

    assert!(matches!(
        engine.combine_signature_shares(&shares[..1]),
        Err(BlsError::InsufficientShares {
            required: 2,
            got: 1
        })
    ));
    let sig = engine.combine_signature_shares(&shares[..2]).unwrap();
    engine
        .verify_signature(km.key_set.public_key(), b"m", &sig)
        .unwrap();
}

#[test]
fn string_interface() {
    let engine = Engine::initialize().unwrap();
    let km = seeded_key_material([14; 32], 2, 3).unwrap();
    let pk = km.key_set.public_key().to_hex();
    let shares: Vec<String> =
        signing_shares(&engine, &km.shares, SignatureScheme::ProofOfPossession, b"hello")
            .iter()
            .map(|s| s.to_json())
            .collect();

    let a = wire::combine_signature_shares(&engine, &shares[..2]).unwrap();
    let b = wire::combine_signature_shares(&engine, &shares[1..]).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 192);
    wire::verify_signature(&engine, &pk, b"hello", &a).unwrap();

    let mixed = vec![
        shares[0].clone(),
        signing_shares(&engine, &km.shares, SignatureScheme::Basic, b"hello")[1].to_json(),
    ];
    assert!(matches!(
        wire::combine_signature_shares(&engine, &mixed),
        Err(BlsError::MismatchedContext(_))
    ));
    let dup = vec![shares[0].clone(), shares[0].clone()];
    assert!(matches!(
        wire::combine_signature_shares(&engine, &dup),
        Err(BlsError::DuplicateIndex(1))
    ));
}

#[test]
fn possession_proofs() {
    let engine = Engine::initialize().unwrap();
    let a = seeded_key_material([15; 32], 1, 1).unwrap();
    let b = seeded_key_material([16; 32], 1, 1).unwrap();
    let proof = a.secret_key.prove_possession(&engine).unwrap();
    engine
        .verify_possession(a.key_set.public_key(), &proof)
        .unwrap();
    assert!(
        engine
            .verify_possession(b.key_set.public_key(), &proof)
            .is_err()
    );
}
