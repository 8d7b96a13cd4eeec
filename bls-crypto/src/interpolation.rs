//! Lagrange interpolation at zero, over the scalar field or in the exponent.
//!
//! Nodes are identified by their share index `i`, evaluated at `x_i = i`.

use ark_ec::CurveGroup;
use ark_ff::{Field, PrimeField, Zero, batch_inversion};

/// Barycentric Lagrange coefficients `L_i(0)` for the given evaluation points.
///
/// The points must be distinct and non-zero.
pub(crate) fn lagrange_coeffs_at_zero<F: Field>(xs: &[F]) -> Vec<F> {
    let mut w = vec![F::one(); xs.len()];
    for (i, x_i) in xs.iter().enumerate() {
        for (j, x_j) in xs.iter().enumerate() {
            if i != j {
                w[i] *= *x_i - x_j;
            }
        }
    }
    batch_inversion(&mut w);
    let l0 = xs.iter().fold(F::one(), |acc, x| acc * -*x);
    xs.iter().zip(&w).map(|(x, w)| l0 * w / -*x).collect()
}

/// The evaluation points of the given share indices.
pub(crate) fn eval_points<F: PrimeField>(indices: &[u8]) -> Vec<F> {
    indices.iter().map(|i| F::from(*i)).collect()
}

/// Given `g^f(x_i)` for every `x_i`, return `g^f(0)`.
pub(crate) fn interpolate_in_exponent<C: CurveGroup>(
    xs: &[C::ScalarField],
    ys: &[C::Affine],
) -> anyhow::Result<C> {
    anyhow::ensure!(xs.len() == ys.len(), "points and evaluations differ in length");
    anyhow::ensure!(!xs.is_empty(), "need at least one point");
    anyhow::ensure!(xs.iter().all(|x| !x.is_zero()), "evaluation point 0");
    let coeffs = lagrange_coeffs_at_zero(xs);
    C::msm(ys, &coeffs).map_err(|n| anyhow::anyhow!("msm length mismatch: {n}"))
}
