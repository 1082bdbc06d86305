//! linalg::eig — eigenvalues and null-space eigenvector extraction.
//!
//! Purpose
//! -------
//! Provide the two spectral primitives canonicalization builds on: the full
//! complex eigenvalue set of a real matrix (via a real Schur reduction) and
//! individual eigenvectors recovered as null-space directions of the shifted
//! matrix `A − λI`.
//!
//! Key behaviors
//! -------------
//! - Eigenvalues come back in backend (Schur block) order; callers impose
//!   their own ordering.
//! - Eigenvectors are the trailing right singular vectors of `A − λI`. For a
//!   repeated eigenvalue, the `j`-th request returns the `(j+1)`-th smallest
//!   singular direction together with its singular value, so the caller can
//!   tell a genuine eigenvector (residual ≈ 0) from a padded direction of a
//!   defective eigenvalue (residual far from 0).
//! - Every vector is phase-rotated so its largest-modulus component lies on
//!   the positive real axis. This fixes the arbitrary complex phase,
//!   making extraction deterministic and returning numerically real vectors
//!   for real eigenvalues.
//!
//! Testing notes
//! -------------
//! - Unit tests check eigenvalue sets of diagonal and rotation matrices,
//!   null-direction recovery with residual reporting on diagonalizable and
//!   defective inputs, orthogonality of occurrence-indexed directions, and
//!   the realness guarantee of the phase convention.

use nalgebra::{Complex, DMatrix, DVector, Schur};

use crate::errors::{DSError, DSResult};
use crate::linalg::MAX_BACKEND_ITERS;

/// Compute all eigenvalues of a real square matrix as complex numbers.
///
/// # Errors
/// - `DSError::NumericalFailure` if the Schur iteration does not converge.
pub(crate) fn eigenvalues(a: &DMatrix<f64>) -> DSResult<Vec<Complex<f64>>> {
    let schur = Schur::try_new(a.clone(), f64::EPSILON, MAX_BACKEND_ITERS)
        .ok_or(DSError::NumericalFailure { op: "eigenvalue computation" })?;
    Ok(schur.complex_eigenvalues().iter().copied().collect())
}

/// Extract the `(occurrence + 1)`-th smallest singular direction of `A − λI`
/// together with its singular value.
///
/// ## Steps
/// 1. Form the complex shift `A − λI`.
/// 2. Take its SVD and read row `n − 1 − occurrence` of `Vᴴ`, conjugated, as
///    the candidate eigenvector.
/// 3. Rotate the vector's phase so its largest-modulus component is positive
///    real.
///
/// # Returns
/// The unit-norm direction and the associated singular value. A value near
/// zero certifies an eigenvector; a value far from zero means the null space
/// has fewer than `occurrence + 1` dimensions.
///
/// # Errors
/// - `DSError::InvalidInput` when `occurrence` is not below the matrix order.
/// - `DSError::NumericalFailure` if the SVD does not converge.
pub(crate) fn null_vector(
    a: &DMatrix<f64>, lambda: Complex<f64>, occurrence: usize,
) -> DSResult<(DVector<Complex<f64>>, f64)> {
    let n = a.nrows();
    if occurrence >= n {
        return Err(DSError::InvalidInput {
            what: "eigenvector occurrence must be below the matrix order",
            rows: n,
            cols: n,
        });
    }

    let shifted = DMatrix::from_fn(n, n, |i, j| {
        let entry = Complex::new(a[(i, j)], 0.0);
        if i == j { entry - lambda } else { entry }
    });
    let svd = shifted
        .try_svd(false, true, f64::EPSILON, MAX_BACKEND_ITERS)
        .ok_or(DSError::NumericalFailure { op: "eigenvector extraction" })?;
    let v_t = svd.v_t.ok_or(DSError::NumericalFailure { op: "eigenvector extraction" })?;

    let idx = n - 1 - occurrence;
    let sigma = svd.singular_values[idx];
    // Rows of Vᴴ are conjugated right singular vectors; adjoint restores the
    // column vector itself.
    let mut v: DVector<Complex<f64>> = v_t.row(idx).adjoint();

    let mut best = 0usize;
    let mut best_modulus = 0.0_f64;
    for (i, entry) in v.iter().enumerate() {
        if entry.norm() > best_modulus {
            best_modulus = entry.norm();
            best = i;
        }
    }
    if best_modulus > 0.0 {
        let rotation = (v[best] / Complex::new(best_modulus, 0.0)).conj();
        for entry in v.iter_mut() {
            *entry *= rotation;
        }
    }

    Ok((v, sigma))
}
