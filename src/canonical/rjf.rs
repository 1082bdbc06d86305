//! canonical::rjf — real Jordan form with a deterministic block layout.
//!
//! Purpose
//! -------
//! Decompose a real square matrix into its real Jordan form: 1×1 diagonal
//! blocks for real eigenvalues and 2×2 rotation-like blocks for complex
//! conjugate pairs, together with the similarity transform and an indicator
//! vector marking the first row of every block. The block layout is pinned
//! by an explicit eigenvalue ordering so that equal spectra always produce
//! the same form, which is what makes cross-model comparison meaningful.
//!
//! Key behaviors
//! -------------
//! - Eigenvalues are ordered by ascending absolute imaginary part; the
//!   exactly-real prefix is then re-sorted by descending real part. This is
//!   a layout convention, not a stability statement.
//! - Within each conjugate pair the positive-imaginary member leads, so the
//!   2×2 block is `[[re, im], [-im, re]]` with `im > 0`.
//! - Eigenvectors come from null-space extraction of the shifted matrix.
//!   Repeated eigenvalue values are tracked by occurrence so each repeat
//!   requests the next singular direction; a direction whose residual is
//!   far from zero (a defective eigenvalue) is reported through
//!   `NumericalWarning::DegenerateEigenbasis`.
//! - Real eigenvector columns are normalized by their first coordinate.
//!   A first coordinate below the configured epsilon raises
//!   `NumericalWarning::SmallNormalizer`, and the division still happens;
//!   the caller decides what a degenerate transform is worth.
//! - If the assembled eigenvector matrix cannot be inverted, the
//!   pseudo-inverse is used instead and
//!   `NumericalWarning::SingularTransform` is attached.
//!
//! Invariants & assumptions
//! ------------------------
//! - The Schur reduction reports exactly-zero imaginary parts for its 1×1
//!   blocks, so `im == 0.0` reliably separates real eigenvalues from
//!   complex pairs.
//! - Conjugate pair members sit adjacent after the imaginary-part sort.
//!
//! Conventions
//! -----------
//! - Block assembly and basis inversion are separate steps: the
//!   canonical-transform solver consumes the blocks and indicator directly
//!   and never inverts the eigenvector basis.
//!
//! Testing notes
//! -------------
//! - Unit tests verify the similarity identity `J·T ≈ T·A`, the block
//!   layout and indicator for mixed spectra, the canonical orientation of
//!   complex blocks, the small-normalizer warning with its configurable
//!   threshold, and the shape guards.

use nalgebra::Complex;
use ndarray::{Array1, Array2};

use crate::errors::{DSError, DSResult, NumericalWarning};
use crate::linalg::bridge::{to_array2, to_dmatrix};
use crate::linalg::eig::{eigenvalues, null_vector};
use crate::linalg::svd::pinv_na;

/// Relative residual above which a requested eigendirection is reported as
/// degenerate, scaled by `max(1, ‖A‖_F)`.
const EIGVEC_RESIDUAL_TOL: f64 = 1e-8;

/// JordanOptions — numerical thresholds of the Jordan-form computation.
///
/// Fields
/// ------
/// - `normalizer_eps`: first-coordinate magnitude below which a real
///   eigenvector normalization is flagged as degenerate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JordanOptions {
    pub normalizer_eps: f64,
}

impl Default for JordanOptions {
    fn default() -> Self {
        JordanOptions { normalizer_eps: 1e-12 }
    }
}

/// RealJordanForm — the computed form `J ≈ T·A·T⁻¹` with its block map.
///
/// Fields
/// ------
/// - `j`: block-diagonal real Jordan form.
/// - `t`: similarity transform satisfying `J ≈ T·A·T⁻¹` (equivalently
///   `J·T ≈ T·A`).
/// - `indicator`: 1.0 on the first row of every block, 0.0 on the second
///   row of a 2×2 block.
/// - `warnings`: numerical degeneracies observed along the way; an empty
///   list means a clean decomposition.
#[derive(Debug, Clone)]
pub struct RealJordanForm {
    pub j: Array2<f64>,
    pub t: Array2<f64>,
    pub indicator: Array1<f64>,
    pub warnings: Vec<NumericalWarning>,
}

/// Ordered Jordan blocks before basis inversion.
///
/// Carries the raw eigenvector basis alongside the form; only the public
/// wrapper inverts it.
#[derive(Debug, Clone)]
pub(crate) struct SpectralBlocks {
    pub j: Array2<f64>,
    pub basis: Array2<f64>,
    pub indicator: Array1<f64>,
    pub warnings: Vec<NumericalWarning>,
}

/// Compute the real Jordan form with default thresholds.
///
/// # Errors
/// - `DSError::ShapeError` for a non-square input.
/// - `DSError::InvalidInput` for an empty input.
/// - `DSError::NumericalFailure` if a decomposition does not converge.
pub fn real_jordan_form(a: &Array2<f64>) -> DSResult<RealJordanForm> {
    real_jordan_form_with(a, &JordanOptions::default())
}

/// Compute the real Jordan form with explicit thresholds.
///
/// ## Steps
/// 1. Assemble the ordered blocks, eigenvector basis, and indicator.
/// 2. Invert the basis (pseudo-inverse on failure, with a
///    `SingularTransform` warning) to obtain the returned transform.
///
/// # Errors
/// Same as [`real_jordan_form`].
pub fn real_jordan_form_with(a: &Array2<f64>, opts: &JordanOptions) -> DSResult<RealJordanForm> {
    let SpectralBlocks { j, basis, indicator, mut warnings } = spectral_blocks(a, opts)?;

    let basis_na = to_dmatrix(&basis);
    let t = match basis_na.clone().try_inverse() {
        Some(inverse) => to_array2(&inverse),
        None => {
            tracing::warn!("eigenvector matrix is singular; using the pseudo-inverse");
            warnings.push(NumericalWarning::SingularTransform { what: "eigenvector matrix" });
            let (pseudo, _, _) = pinv_na(&basis_na)?;
            to_array2(&pseudo)
        }
    };

    Ok(RealJordanForm { j, t, indicator, warnings })
}

/// Assemble the ordered Jordan blocks of a square matrix.
///
/// ## Steps
/// 1. Compute and order the eigenvalues: ascending `|im|`, then the real
///    prefix by descending real part, then each conjugate pair with the
///    positive-imaginary member first.
/// 2. Walk the ordered values, emitting a 1×1 block and a normalized real
///    eigenvector column per real value, or a 2×2 block with the real and
///    imaginary eigenvector parts as columns per conjugate pair.
pub(crate) fn spectral_blocks(a: &Array2<f64>, opts: &JordanOptions) -> DSResult<SpectralBlocks> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(DSError::ShapeError {
            what: "jordan form needs a square matrix",
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }
    if n == 0 {
        return Err(DSError::InvalidInput {
            what: "jordan form needs a non-empty matrix",
            rows: 0,
            cols: 0,
        });
    }

    let a_na = to_dmatrix(a);
    let mut lambdas = eigenvalues(&a_na)?;

    // Layout: ascending |im|, real prefix by descending re, +im leading
    // each pair.
    lambdas.sort_by(|x, y| x.im.abs().total_cmp(&y.im.abs()));
    let real_count = lambdas.iter().take_while(|z| z.im == 0.0).count();
    lambdas[..real_count].sort_by(|x, y| y.re.total_cmp(&x.re));
    let mut i = real_count;
    while i + 1 < lambdas.len() {
        if lambdas[i].im < 0.0 && lambdas[i + 1].im > 0.0 {
            lambdas.swap(i, i + 1);
        }
        i += 2;
    }

    let a_scale = a.iter().map(|v| v * v).sum::<f64>().sqrt().max(1.0);
    let mut j = Array2::<f64>::zeros((n, n));
    let mut basis = Array2::<f64>::zeros((n, n));
    let mut indicator = Array1::<f64>::zeros(n);
    let mut warnings = Vec::new();
    let mut seen: Vec<(Complex<f64>, usize)> = Vec::new();

    let mut col = 0usize;
    let mut idx = 0usize;
    while idx < lambdas.len() {
        let lambda = lambdas[idx];
        let occurrence = match seen.iter_mut().find(|(value, _)| *value == lambda) {
            Some(entry) => {
                entry.1 += 1;
                entry.1
            }
            None => {
                seen.push((lambda, 0));
                0
            }
        };

        let (v, residual) = null_vector(&a_na, lambda, occurrence)?;
        if residual > EIGVEC_RESIDUAL_TOL * a_scale {
            tracing::warn!(
                re = lambda.re,
                im = lambda.im,
                occurrence,
                residual,
                "eigenvalue repeat exceeds the null-space dimension"
            );
            warnings.push(NumericalWarning::DegenerateEigenbasis {
                re: lambda.re,
                im: lambda.im,
                occurrence,
                residual,
            });
        }

        if lambda.im == 0.0 {
            let normalizer = v[0];
            let magnitude = normalizer.norm();
            if magnitude < opts.normalizer_eps {
                tracing::warn!(column = col, magnitude, "eigenvector normalizer below epsilon");
                warnings.push(NumericalWarning::SmallNormalizer { column: col, magnitude });
            }
            for row in 0..n {
                basis[(row, col)] = (v[row] / normalizer).re;
            }
            j[(col, col)] = lambda.re;
            indicator[col] = 1.0;
            col += 1;
            idx += 1;
        } else {
            if idx + 1 >= lambdas.len() {
                return Err(DSError::NumericalFailure { op: "real jordan form assembly" });
            }
            for row in 0..n {
                basis[(row, col)] = v[row].re;
                basis[(row, col + 1)] = v[row].im;
            }
            j[(col, col)] = lambda.re;
            j[(col, col + 1)] = lambda.im;
            j[(col + 1, col)] = -lambda.im;
            j[(col + 1, col + 1)] = lambda.re;
            indicator[col] = 1.0;
            indicator[col + 1] = 0.0;
            col += 2;
            idx += 2;
        }
    }

    Ok(SpectralBlocks { j, basis, indicator, warnings })
}
