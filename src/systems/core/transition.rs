//! systems::core::transition — least-squares state dynamics estimation.
//!
//! Purpose
//! -------
//! Estimate the transition matrix and process-noise covariance shared by the
//! linear and nonlinear identification paths. Both reduce to the same
//! snapshot regression once a state sequence exists, so the regression lives
//! here exactly once.
//!
//! Key behaviors
//! -------------
//! - The transition solves `X₂ ≈ A·X₁` through the pseudo-inverse, so
//!   rank-deficient snapshot matrices yield the minimum-norm fit instead of
//!   failing. Rank deficiency is logged as a warning.
//! - The noise covariance is the outer product of the fit residuals scaled
//!   by `1 / (t − 1)` for a `t`-step sequence.

use ndarray::{s, Array2};

use crate::errors::{DSError, DSResult};
use crate::linalg::svd::pinv;

/// Estimate `(A, Q)` from a `k×t` state sequence.
///
/// ## Steps
/// 1. Split the sequence into snapshots `X₁ = x[:, ..t−1]` and
///    `X₂ = x[:, 1..]`.
/// 2. Solve `A = X₂ · X₁⁺`.
/// 3. Form residuals `V = X₂ − A·X₁` and `Q = V·Vᵀ / (t − 1)`.
///
/// # Errors
/// - `DSError::InvalidInput` when the sequence has no states or fewer than
///   two steps.
/// - `DSError::NumericalFailure` if the pseudo-inverse does not converge.
pub(crate) fn estimate_transition(x: &Array2<f64>) -> DSResult<(Array2<f64>, Array2<f64>)> {
    let (k, t) = (x.nrows(), x.ncols());
    if k == 0 || t < 2 {
        return Err(DSError::InvalidInput {
            what: "state sequence needs at least one state and two steps",
            rows: k,
            cols: t,
        });
    }

    let phi_one = x.slice(s![.., ..t - 1]);
    let phi_two = x.slice(s![.., 1..]);

    let snapshot_pinv = pinv(&phi_one.to_owned())?;
    let full_rank = k.min(t - 1);
    if snapshot_pinv.rank < full_rank {
        tracing::warn!(
            rank = snapshot_pinv.rank,
            expected = full_rank,
            "snapshot matrix is rank deficient; transition is the minimum-norm fit"
        );
    }

    let a = phi_two.dot(&snapshot_pinv.matrix);
    let residuals = &phi_two - &a.dot(&phi_one);
    let q = residuals.dot(&residuals.t()) / (t as f64 - 1.0);
    Ok((a, q))
}
