//! linalg::svd — singular value decomposition, pseudo-inverse, and range bases.
//!
//! Purpose
//! -------
//! Wrap the backend's singular value decomposition behind the small set of
//! primitives the engine needs: an exact thin SVD, a randomized range-finder
//! SVD for low-rank approximation, a Moore–Penrose pseudo-inverse with a
//! relative cutoff that reports the effective rank, and an orthonormal range
//! basis. Identification, transition estimation, canonicalization, and
//! alignment all solve through these helpers rather than touching the
//! backend directly.
//!
//! Key behaviors
//! -------------
//! - All decompositions run with a bounded iteration count; non-convergence
//!   surfaces as `DSError::NumericalFailure` instead of a panic.
//! - Singular values are delivered in descending order, so leading-component
//!   truncation (`U[:, 0..k]`) is a plain slice.
//! - The pseudo-inverse cutoff is relative: `max(rows, cols) · ε · σ_max`,
//!   matching the conventional dense-linear-algebra default. The effective
//!   rank (count of singular values above the cutoff) is reported so callers
//!   can flag rank-deficient solves.
//! - The randomized path implements a Gaussian range finder with QR
//!   re-orthonormalized power iterations, then an exact SVD of the small
//!   projected matrix; given a fixed RNG it is fully deterministic.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite; validated containers and model guards upstream are
//!   responsible for rejecting NaN/Inf before matrices reach this module.
//! - The randomized sketch width is clamped to `min(rows, cols)`, so the
//!   projected problem is never wider than the exact one.
//!
//! Testing notes
//! -------------
//! - Unit tests reconstruct small matrices from their factors, compare a
//!   pseudo-inverse against a hand-computed inverse, verify the
//!   Moore–Penrose identity on a rank-deficient matrix, check orthonormality
//!   of range bases, and confirm the randomized path recovers an exactly
//!   low-rank matrix deterministically under a fixed seed.

use nalgebra::DMatrix;
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use statrs::distribution::Normal;

use crate::errors::{DSError, DSResult};
use crate::linalg::bridge::{to_array1, to_array2, to_dmatrix};
use crate::linalg::MAX_BACKEND_ITERS;

/// ThinSvd — thin (economy) singular value decomposition `A ≈ U·diag(S)·Vᵗ`.
///
/// Purpose
/// -------
/// Carry the three factors of a thin SVD on the crate's public matrix
/// surface. For an `m×n` input the exact path yields `min(m, n)` components;
/// the randomized path yields exactly the requested `k`.
///
/// Fields
/// ------
/// - `u`: left singular vectors, one column per component.
/// - `s`: singular values, descending.
/// - `vt`: right singular vectors, transposed (one row per component).
#[derive(Debug, Clone)]
pub(crate) struct ThinSvd {
    pub u: Array2<f64>,
    pub s: Array1<f64>,
    pub vt: Array2<f64>,
}

/// PseudoInverse — Moore–Penrose inverse with its effective rank.
///
/// Fields
/// ------
/// - `matrix`: the pseudo-inverse itself (`n×m` for an `m×n` input).
/// - `rank`: number of singular values above `cutoff`.
/// - `cutoff`: the absolute truncation threshold that was applied.
#[derive(Debug, Clone)]
pub(crate) struct PseudoInverse {
    pub matrix: Array2<f64>,
    pub rank: usize,
    pub cutoff: f64,
}

/// Compute the exact thin SVD of a real matrix.
///
/// Returns
/// -------
/// `DSResult<ThinSvd>` with `min(rows, cols)` components, singular values
/// descending.
///
/// Errors
/// ------
/// - `DSError::NumericalFailure` if the backend iteration cap is exceeded.
pub(crate) fn thin_svd(a: &Array2<f64>) -> DSResult<ThinSvd> {
    let svd = to_dmatrix(a)
        .try_svd(true, true, f64::EPSILON, MAX_BACKEND_ITERS)
        .ok_or(DSError::NumericalFailure { op: "singular value decomposition" })?;
    let u = svd.u.ok_or(DSError::NumericalFailure { op: "singular value decomposition" })?;
    let v_t = svd.v_t.ok_or(DSError::NumericalFailure { op: "singular value decomposition" })?;

    Ok(ThinSvd {
        u: to_array2(&u),
        s: to_array1(&svd.singular_values),
        vt: to_array2(&v_t),
    })
}

/// Compute a randomized thin SVD truncated to `k` components.
///
/// ## Steps
/// 1. Draw a Gaussian test matrix `Ω` of width `l = min(k + oversamples,
///    min(rows, cols))` and sketch the range: `Z = A·Ω`.
/// 2. Orthonormalize via QR; run `power_iters` re-orthonormalized passes of
///    `AᵗQ` / `A(AᵗQ)` to sharpen the subspace for slowly decaying spectra.
/// 3. Project `B = QᵗA`, take its exact SVD, lift `U = Q·U_B`, and truncate
///    every factor to `k`.
///
/// # Arguments
/// - `a`: the matrix to factor.
/// - `k`: number of components to keep; must satisfy `1 ≤ k ≤ min(rows, cols)`.
/// - `oversamples`: extra sketch width beyond `k`.
/// - `power_iters`: number of power-iteration passes.
/// - `rng`: RNG driving the Gaussian sketch; fixing it fixes the output.
///
/// # Errors
/// - `DSError::InvalidInput` when `k` is zero or exceeds `min(rows, cols)`.
/// - `DSError::NumericalFailure` if the projected SVD does not converge.
pub(crate) fn randomized_svd(
    a: &Array2<f64>, k: usize, oversamples: usize, power_iters: usize, rng: &mut StdRng,
) -> DSResult<ThinSvd> {
    let (rows, cols) = (a.nrows(), a.ncols());
    if k == 0 || k > rows.min(cols) {
        return Err(DSError::InvalidInput {
            what: "component count must satisfy 1 <= k <= min(rows, cols)",
            rows,
            cols,
        });
    }
    let sketch = (k + oversamples).min(rows.min(cols));

    // statrs distributions sample through rand's `Distribution` trait.
    use rand::distributions::Distribution;
    let normal = Normal::new(0.0, 1.0).expect("unit normal has valid parameters");

    let m = to_dmatrix(a);
    let omega = DMatrix::from_fn(cols, sketch, |_, _| normal.sample(rng));
    let mut q = (&m * omega).qr().q();
    for _ in 0..power_iters {
        let q_tilde = (m.transpose() * &q).qr().q();
        q = (&m * q_tilde).qr().q();
    }

    let b = q.transpose() * &m;
    let svd = b
        .try_svd(true, true, f64::EPSILON, MAX_BACKEND_ITERS)
        .ok_or(DSError::NumericalFailure { op: "randomized svd projection" })?;
    let u_b = svd.u.ok_or(DSError::NumericalFailure { op: "randomized svd projection" })?;
    let v_t = svd.v_t.ok_or(DSError::NumericalFailure { op: "randomized svd projection" })?;
    let u = q * u_b;

    let u_full = to_array2(&u);
    let s_full = to_array1(&svd.singular_values);
    let vt_full = to_array2(&v_t);
    Ok(ThinSvd {
        u: u_full.slice(ndarray::s![.., ..k]).to_owned(),
        s: s_full.slice(ndarray::s![..k]).to_owned(),
        vt: vt_full.slice(ndarray::s![..k, ..]).to_owned(),
    })
}

/// Backend-side pseudo-inverse used by both the public-surface wrapper and
/// the Kronecker solve in canonicalization.
///
/// Returns the pseudo-inverse, the effective rank, and the applied cutoff.
pub(crate) fn pinv_na(m: &DMatrix<f64>) -> DSResult<(DMatrix<f64>, usize, f64)> {
    let svd = m
        .clone()
        .try_svd(true, true, f64::EPSILON, MAX_BACKEND_ITERS)
        .ok_or(DSError::NumericalFailure { op: "pseudo-inverse" })?;
    let sigma_max = svd.singular_values.iter().copied().fold(0.0_f64, f64::max);
    let cutoff = f64::EPSILON * m.nrows().max(m.ncols()) as f64 * sigma_max;
    let rank = svd.singular_values.iter().filter(|&&s| s > cutoff).count();
    let inverse = svd
        .pseudo_inverse(cutoff)
        .map_err(|_| DSError::NumericalFailure { op: "pseudo-inverse" })?;
    Ok((inverse, rank, cutoff))
}

/// Compute the Moore–Penrose pseudo-inverse of a real matrix.
///
/// # Errors
/// - `DSError::NumericalFailure` if the underlying SVD does not converge.
pub(crate) fn pinv(a: &Array2<f64>) -> DSResult<PseudoInverse> {
    let (inverse, rank, cutoff) = pinv_na(&to_dmatrix(a))?;
    Ok(PseudoInverse { matrix: to_array2(&inverse), rank, cutoff })
}

/// Compute an orthonormal basis for the range of a matrix.
///
/// Columns are the leading left singular vectors whose singular values
/// exceed the relative cutoff `max(rows, cols) · ε · σ_max`; the result has
/// one column per effective rank. For a full-rank square input this is an
/// orthogonal matrix.
///
/// # Errors
/// - `DSError::NumericalFailure` if the underlying SVD does not converge.
pub fn orth(a: &Array2<f64>) -> DSResult<Array2<f64>> {
    let decomp = thin_svd(a)?;
    let sigma_max = decomp.s.iter().copied().fold(0.0_f64, f64::max);
    let cutoff = f64::EPSILON * a.nrows().max(a.ncols()) as f64 * sigma_max;
    let rank = decomp.s.iter().filter(|&&s| s > cutoff).count();
    Ok(decomp.u.slice(ndarray::s![.., ..rank]).to_owned())
}
