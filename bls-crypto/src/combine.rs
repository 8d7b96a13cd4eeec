//! Threshold combination of signature shares.
//!
//! Combination reconstructs `sigma = H(m)^s` from shares `H(m)^f(i)` by
//! Lagrange interpolation in the exponent over the indices present. It does
//! not, and cannot, tell whether the shares are genuine: a forged or
//! mismatched share yields a wrong point. Callers that need that guarantee
//! use [`Engine::combine_verified`].

use std::collections::BTreeSet;

use ark_bls12_381::Fr;
use ark_ec::CurveGroup;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::interpolation::{eval_points, interpolate_in_exponent};
use crate::keys::{PublicKey, PublicKeySet, PublicKeyShare};
use crate::scheme::{Role, SignatureScheme};
use crate::share::SignatureShare;
use crate::signature::Signature;
use crate::variant::{BlsVariant, SignaturePoint};
use crate::{BlsError, Engine};

/// Combine `shares` into a signature, requiring at least `threshold` of them.
///
/// Checks, in order: the set is non-empty, every share carries a scheme the
/// role accepts and all agree on it, no index repeats, and there are at least
/// `threshold` shares. All supplied shares take part in the interpolation.
pub fn combine_shares<V: BlsVariant>(
    shares: &[SignatureShare<V>],
    threshold: usize,
    role: Role,
) -> Result<Signature<V>, BlsError> {
    let Some(first) = shares.first() else {
        return Err(BlsError::InsufficientShares {
            required: threshold.max(1),
            got: 0,
        });
    };

    let scheme = check_consistency(first, shares, role)?;

    if threshold == 0 {
        return Err(BlsError::Argument("threshold must be at least 1".into()));
    }
    if shares.len() < threshold {
        return Err(BlsError::InsufficientShares {
            required: threshold,
            got: shares.len(),
        });
    }

    let indices: Vec<u8> = shares.iter().map(SignatureShare::index).collect();
    let xs: Vec<Fr> = eval_points(&indices);
    let ys: Vec<SignaturePoint<V>> = shares.iter().map(|s| *s.value()).collect();
    let sigma = interpolate_in_exponent::<V::SignatureGroup>(&xs, &ys)
        .map_err(|e| BlsError::Crypto(e.to_string()))?
        .into_affine();

    debug!(variant = V::NAME, %scheme, %role, shares = shares.len(), ?indices, "combined signature shares");
    Ok(Signature::new(scheme, sigma))
}

/// All shares carry the same scheme, the role accepts it and no index repeats.
fn check_consistency<V: BlsVariant>(
    first: &SignatureShare<V>,
    shares: &[SignatureShare<V>],
    role: Role,
) -> Result<SignatureScheme, BlsError> {
    let scheme = first.scheme();
    if !role.accepts(scheme) {
        return Err(BlsError::MismatchedContext(format!(
            "{scheme} shares can not be used for {role}"
        )));
    }
    if let Some(other) = shares.iter().find(|s| s.scheme() != scheme) {
        return Err(BlsError::MismatchedContext(format!(
            "mixed {scheme} and {} shares",
            other.scheme()
        )));
    }
    let mut seen = BTreeSet::new();
    if let Some(dup) = shares.iter().find(|s| !seen.insert(s.index())) {
        return Err(BlsError::DuplicateIndex(dup.index()));
    }
    Ok(scheme)
}

impl Engine {
    /// Verify every share against its node's public key share, drop the
    /// invalid ones and combine the rest.
    ///
    /// Fails with [`BlsError::InvalidShare`] naming the offending nodes if
    /// dropping them leaves fewer than `key_set.threshold()` shares.
    pub fn combine_verified<V: BlsVariant>(
        &self,
        key_set: &PublicKeySet<V>,
        msg: &[u8],
        shares: &[SignatureShare<V>],
        role: Role,
    ) -> Result<Signature<V>, BlsError> {
        let threshold = key_set.threshold();
        let Some(first) = shares.first() else {
            return Err(BlsError::InsufficientShares {
                required: threshold,
                got: 0,
            });
        };
        let scheme = check_consistency(first, shares, role)?;
        if shares.len() < threshold {
            return Err(BlsError::InsufficientShares {
                required: threshold,
                got: shares.len(),
            });
        }

        let h = self.hash_message(scheme, key_set.public_key(), msg)?;
        let check = |s: &SignatureShare<V>| match key_set.share(s.index()) {
            Some(pks) => self.pairing_check::<V>(pks.as_affine(), s.value(), &h),
            None => false,
        };
        let valid: Vec<bool> = if self.config().parallel_verify {
            shares.par_iter().map(check).collect()
        } else {
            shares.iter().map(check).collect()
        };

        let (good, bad): (Vec<_>, Vec<_>) = shares
            .iter()
            .zip(valid)
            .partition(|(_, ok)| *ok);
        let good: Vec<SignatureShare<V>> = good.into_iter().map(|(s, _)| *s).collect();
        let bad: Vec<u8> = bad.into_iter().map(|(s, _)| s.index()).collect();

        if !bad.is_empty() {
            warn!(nodes = ?bad, %role, "dropping invalid signature shares");
        }
        if good.len() < threshold {
            if bad.is_empty() {
                return Err(BlsError::InsufficientShares {
                    required: threshold,
                    got: good.len(),
                });
            }
            return Err(BlsError::InvalidShare { indices: bad });
        }

        combine_shares(&good, threshold, role)
    }

    /// Verify a single share against a node's public key share.
    pub fn verify_share<V: BlsVariant>(
        &self,
        group_key: &PublicKey<V>,
        key_share: &PublicKeyShare<V>,
        msg: &[u8],
        share: &SignatureShare<V>,
    ) -> Result<(), BlsError> {
        if key_share.index() != share.index() {
            return Err(BlsError::MismatchedContext(format!(
                "share of node {} checked against key of node {}",
                share.index(),
                key_share.index()
            )));
        }
        let h = self.hash_message(share.scheme(), group_key, msg)?;
        if self.pairing_check::<V>(key_share.as_affine(), share.value(), &h) {
            Ok(())
        } else {
            Err(BlsError::Verification)
        }
    }
}
