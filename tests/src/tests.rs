mod concurrency;
mod decryption;
mod signing;

use bls_crypto::{BlsError, Engine, SecretKeyShare, SignatureScheme, SignatureShare};

/// All `k` element subsets of `0..n`, in lexicographic order.
pub(crate) fn subsets(n: usize, k: usize) -> Vec<Vec<usize>> {
    fn go(start: usize, n: usize, k: usize, cur: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if cur.len() == k {
            out.push(cur.clone());
            return;
        }
        for i in start..n {
            cur.push(i);
            go(i + 1, n, k, cur, out);
            cur.pop();
        }
    }
    let mut out = Vec::new();
    go(0, n, k, &mut Vec::with_capacity(k), &mut out);
    out
}

pub(crate) fn decryption_shares(
    engine: &Engine,
    keys: &[SecretKeyShare],
    identity: &[u8],
) -> Vec<SignatureShare> {
    keys.iter()
        .map(|k| k.decryption_share(engine, identity).expect("decryption share"))
        .collect()
}

pub(crate) fn signing_shares(
    engine: &Engine,
    keys: &[SecretKeyShare],
    scheme: SignatureScheme,
    msg: &[u8],
) -> Vec<SignatureShare> {
    keys.iter()
        .map(|k| k.sign(engine, scheme, msg).expect("signature share"))
        .collect()
}

/// Decryption with the wrong key either fails the length framing or yields
/// unrelated bytes; about one key in 256 passes the framing.
pub(crate) fn not_recovered(res: Result<Vec<u8>, BlsError>, msg: &[u8]) -> bool {
    res.map_or(true, |pt| pt != msg)
}

pub(crate) fn pick<T: Copy>(items: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|i| items[*i]).collect()
}

#[test]
fn subsets_are_complete() {
    assert_eq!(subsets(5, 3).len(), 10);
    assert_eq!(subsets(4, 4), vec![vec![0, 1, 2, 3]]);
    assert!(subsets(3, 0) == vec![Vec::<usize>::new()]);
}
