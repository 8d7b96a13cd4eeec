use std::sync::Arc;
use std::thread;

use bls_crypto::{Engine, SignatureScheme};
use bls_utils::seeded_key_material;
use rayon::prelude::*;

use super::{decryption_shares, signing_shares};

#[test]
fn engine_is_shared_across_threads() {
    let engine = Arc::new(Engine::initialize().unwrap());
    let km = Arc::new(seeded_key_material([20; 32], 3, 5).unwrap());

    let handles: Vec<_> = (0..8u8)
        .map(|i| {
            let engine = Arc::clone(&engine);
            let km = Arc::clone(&km);
            thread::spawn(move || {
                let identity = format!("identity-{i}");
                let msg = vec![i; 100 + i as usize];
                let ct = engine
                    .encrypt(km.key_set.public_key(), &msg, identity.as_bytes())
                    .unwrap();
                let shares = decryption_shares(&engine, &km.shares, identity.as_bytes());
                let pt = engine
                    .verify_and_decrypt_with_key_set(&km.key_set, identity.as_bytes(), &ct, &shares)
                    .unwrap();
                assert_eq!(pt, msg);
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}

#[test]
fn combination_from_the_rayon_pool() {
    let engine = Engine::initialize().unwrap();
    let km = seeded_key_material([21; 32], 2, 3).unwrap();
    let msgs: Vec<Vec<u8>> = (0..16u8).map(|i| vec![i; 8]).collect();

    msgs.par_iter().for_each(|m| {
        let shares = signing_shares(&engine, &km.shares, SignatureScheme::Basic, m);
        let sig = engine.combine_signature_shares(&shares[1..]).unwrap();
        engine
            .verify_signature(km.key_set.public_key(), m, &sig)
            .unwrap();
    });
}
