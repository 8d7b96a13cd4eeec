use ark_std::test_rng;
use bls_crypto::{Bls12381G2, BlsError, Ciphertext, Engine, EngineConfig, SecretKey, wire};
use bls_utils::{init_logging, seeded_key_material};

use super::{decryption_shares, not_recovered, pick, subsets};

const IDENTITY: &[u8] = b"encrypt_decrypt_works";
const MESSAGE: [u8; 32] = [
    240, 23, 185, 6, 87, 33, 173, 216, 53, 84, 80, 135, 190, 16, 58, 85, 97, 75, 3, 192, 215, 82,
    217, 5, 40, 65, 2, 214, 40, 177, 53, 150,
];

#[test]
fn every_quorum_decrypts() {
    init_logging();
    let engine = Engine::initialize().unwrap();
    let km = seeded_key_material([1; 32], 3, 5).unwrap();
    let ct = engine
        .encrypt(km.key_set.public_key(), &MESSAGE, IDENTITY)
        .unwrap();
    let shares = decryption_shares(&engine, &km.shares, IDENTITY);

    for k in 3..=5 {
        for quorum in subsets(5, k) {
            let subset = pick(&shares, &quorum);
            assert_eq!(
                engine.decrypt_with_signature_shares(&ct, &subset).unwrap(),
                MESSAGE
            );
            assert_eq!(
                engine
                    .verify_and_decrypt_with_signature_shares(
                        km.key_set.public_key(),
                        IDENTITY,
                        &ct,
                        &subset
                    )
                    .unwrap(),
                MESSAGE
            );
            assert_eq!(
                engine
                    .verify_and_decrypt_with_key_set(&km.key_set, IDENTITY, &ct, &subset)
                    .unwrap(),
                MESSAGE
            );
        }
    }
}

#[test]
fn threshold_minus_one_fails() {
    let engine = Engine::initialize().unwrap();
    let km = seeded_key_material([2; 32], 3, 5).unwrap();
    let ct = engine
        .encrypt(km.key_set.public_key(), b"top secret", IDENTITY)
        .unwrap();
    let shares = decryption_shares(&engine, &km.shares, IDENTITY);

    for quorum in subsets(5, 2) {
        let subset = pick(&shares, &quorum);
        assert!(not_recovered(
            engine.decrypt_with_signature_shares(&ct, &subset),
            b"top secret"
        ));
        let err = engine
            .verify_and_decrypt_with_key_set(&km.key_set, IDENTITY, &ct, &subset)
            .unwrap_err();
        assert!(matches!(
            err.root(),
            BlsError::InsufficientShares {
                required: 3,
                got: 2
            }
        ));
        let err = engine
            .verify_and_decrypt_with_signature_shares(
                km.key_set.public_key(),
                IDENTITY,
                &ct,
                &subset,
            )
            .unwrap_err();
        assert!(matches!(err.root(), BlsError::Verification));
    }
}

#[test]
fn identity_binding() {
    let engine = Engine::initialize().unwrap();
    let km = seeded_key_material([3; 32], 2, 3).unwrap();
    let ct = engine
        .encrypt(km.key_set.public_key(), b"for alice", b"alice")
        .unwrap();
    let bob = decryption_shares(&engine, &km.shares, b"bob");

    assert!(not_recovered(
        engine.decrypt_with_signature_shares(&ct, &bob),
        b"for alice"
    ));
    assert!(
        engine
            .verify_and_decrypt_with_signature_shares(km.key_set.public_key(), b"alice", &ct, &bob)
            .is_err()
    );
    assert!(matches!(
        engine
            .verify_and_decrypt_with_key_set(&km.key_set, b"alice", &ct, &bob)
            .unwrap_err()
            .root(),
        BlsError::InvalidShare { indices } if indices == &[1, 2, 3]
    ));

    let alice = decryption_shares(&engine, &km.shares, b"alice");
    assert_eq!(
        engine.decrypt_with_signature_shares(&ct, &alice).unwrap(),
        b"for alice"
    );
}

#[test]
fn tampered_share_is_dropped_when_verified() {
    let engine = Engine::new(EngineConfig::builder().parallel_verify(true).build()).unwrap();
    let km = seeded_key_material([4; 32], 3, 5).unwrap();
    let ct = engine
        .encrypt(km.key_set.public_key(), b"payload", IDENTITY)
        .unwrap();
    let mut shares = decryption_shares(&engine, &km.shares, IDENTITY);
    let forged = decryption_shares(&engine, &km.shares, b"something else");
    shares[0] = forged[0];

    // Unverified combination of all five is poisoned by the bad share.
    assert!(not_recovered(
        engine.decrypt_with_signature_shares(&ct, &shares),
        b"payload"
    ));

    // The verified path drops it and still has four good shares.
    assert_eq!(
        engine
            .verify_and_decrypt_with_key_set(&km.key_set, IDENTITY, &ct, &shares)
            .unwrap(),
        b"payload"
    );

    shares[1] = forged[1];
    shares[2] = forged[2];
    assert!(matches!(
        engine
            .verify_and_decrypt_with_key_set(&km.key_set, IDENTITY, &ct, &shares)
            .unwrap_err()
            .root(),
        BlsError::InvalidShare { indices } if indices == &[1, 2, 3]
    ));
}

#[test]
fn foreign_key_shares_do_not_decrypt() {
    let rng = &mut test_rng();
    let engine = Engine::initialize().unwrap();
    let (key_set, _) = SecretKey::<Bls12381G2>::random(rng).split(2, 3, rng).unwrap();
    let (_, other) = SecretKey::<Bls12381G2>::random(rng).split(2, 3, rng).unwrap();
    let ct = engine
        .encrypt(key_set.public_key(), b"m", IDENTITY)
        .unwrap();
    let shares = decryption_shares(&engine, &other, IDENTITY);
    assert!(not_recovered(
        engine.decrypt_with_signature_shares(&ct, &shares),
        b"m"
    ));
    assert!(
        engine
            .verify_and_decrypt_with_key_set(&key_set, IDENTITY, &ct, &shares)
            .is_err()
    );
}

#[test]
fn string_interface_round_trip() {
    let engine = Engine::initialize().unwrap();
    let km = seeded_key_material([5; 32], 2, 3).unwrap();
    let pk = km.key_set.public_key().to_hex();

    let ct = wire::encrypt(&engine, &pk, &MESSAGE, IDENTITY).unwrap();
    let parsed: Ciphertext = Ciphertext::from_base64(&ct).unwrap();
    assert_eq!(parsed.len(), bls_crypto::MIN_CIPHERTEXT_BYTES + MESSAGE.len());

    let shares: Vec<String> = decryption_shares(&engine, &km.shares, IDENTITY)
        .iter()
        .map(|s| s.to_json())
        .collect();
    let pt = wire::decrypt_with_signature_shares(&engine, &ct, &shares[..2]).unwrap();
    assert_eq!(bls_crypto::base64_decode(&pt).unwrap(), MESSAGE);

    let pt =
        wire::verify_and_decrypt_with_signature_shares(&engine, &pk, IDENTITY, &ct, &shares[1..])
            .unwrap();
    assert_eq!(bls_crypto::base64_decode(&pt).unwrap(), MESSAGE);

    let truncated = bls_crypto::base64_encode(&parsed.to_bytes()[..60]);
    assert!(matches!(
        wire::decrypt_with_signature_shares(&engine, &truncated, &shares),
        Err(BlsError::Encoding(_))
    ));
}
