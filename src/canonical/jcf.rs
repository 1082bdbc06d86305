//! canonical::jcf — canonical state-space coordinates via a Jordan-aligned
//! transform.
//!
//! Purpose
//! -------
//! Identified models are only defined up to an invertible change of state
//! basis, so two models of the same process are not directly comparable.
//! This module computes a transform `P` that moves a model into canonical
//! coordinates pinned to its real Jordan form: `P` satisfies the Sylvester
//! equation `J·P = P·A` together with one normalization condition per
//! state, so equivalent models land on the same representative.
//!
//! Key behaviors
//! -------------
//! - The Sylvester equation is vectorized column-major into
//!   `(I⊗J − Aᵀ⊗I)·vec(P) = 0` and stacked with the normalization rows
//!   `(I⊗dᵀ)·vec(P) = colsum(C)`, where `d` is the Jordan block indicator.
//!   The stacked system is solved by pseudo-inverse, so a rank-deficient
//!   system yields the minimum-norm transform and a
//!   `NumericalWarning::RankDeficientPinv` instead of an error.
//! - Only the Jordan form and the block indicator feed the system; the
//!   eigenvector basis is never used, so eigenvector phase or degeneracy
//!   cannot perturb `P`.
//! - `convert_to_jcf` applies `P` to an identified model's dynamics,
//!   observation map, states, and initial mean. The noise statistics are
//!   intentionally absent from the result: the conversion does not map
//!   them.
//!
//! Invariants & assumptions
//! ------------------------
//! - For models related by a state-basis change `Q`, the transforms relate
//!   exactly as `P' = P·Q⁻¹` whenever the stacked system has full column
//!   rank, which is what makes canonical coordinates comparable across
//!   models.
//!
//! Downstream usage
//! ----------------
//! - `compare::align` consumes canonical or raw models alike; canonical
//!   coordinates are the right input when models come from independent
//!   identification runs.
//!
//! Testing notes
//! -------------
//! - The rank-deficient path has an exact hand-computable case (identity
//!   dynamics), which also pins the column-major reshape of the solution.

use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2};

use crate::canonical::rjf::{spectral_blocks, JordanOptions, SpectralBlocks};
use crate::errors::{DSError, DSResult, NumericalWarning};
use crate::linalg::bridge::{to_array2, to_dmatrix};
use crate::linalg::svd::pinv_na;
use crate::systems::models::LinearDS;

/// JcfTransform — the canonical transform and the degeneracies met while
/// computing it.
///
/// Fields
/// ------
/// - `p`: transform into canonical coordinates; apply as `P·A·P⁻¹`,
///   `C·P⁻¹`, `P·x`.
/// - `warnings`: accumulated from the Jordan-form step and the
///   pseudo-inverse solve.
#[derive(Debug, Clone)]
pub struct JcfTransform {
    pub p: Array2<f64>,
    pub warnings: Vec<NumericalWarning>,
}

/// CanonicalLds — an identified model expressed in canonical coordinates.
///
/// Fields
/// ------
/// - `a`: canonical state dynamics `P·A·P⁻¹`.
/// - `c`: canonical observation map `C·P⁻¹`.
/// - `x`: canonical state trajectory `P·X`.
/// - `init_m0`: canonical initial state mean `P·m₀`.
/// - `transform`: the transform `P` itself.
/// - `warnings`: degeneracies met while computing and applying `P`.
///
/// The process and observation noise statistics are not carried; the
/// conversion leaves them unmapped.
#[derive(Debug, Clone)]
pub struct CanonicalLds {
    pub a: Array2<f64>,
    pub c: Array2<f64>,
    pub x: Array2<f64>,
    pub init_m0: Array1<f64>,
    pub transform: Array2<f64>,
    pub warnings: Vec<NumericalWarning>,
}

/// Compute the canonical transform for a state matrix and observation map
/// with default thresholds.
///
/// # Errors
/// - `DSError::ShapeError` for a non-square state matrix or an observation
///   map whose column count differs from the state order.
/// - `DSError::InvalidInput` for empty inputs.
/// - `DSError::NumericalFailure` if a decomposition does not converge.
pub fn jcf_transform(a: &Array2<f64>, c: &Array2<f64>) -> DSResult<JcfTransform> {
    jcf_transform_with(a, c, &JordanOptions::default())
}

/// Compute the canonical transform with explicit thresholds.
///
/// ## Steps
/// 1. Assemble the ordered Jordan blocks and indicator of `a`.
/// 2. Vectorize `J·P = P·A` column-major and stack the per-state
///    normalization rows beneath it.
/// 3. Solve by pseudo-inverse; flag a rank-deficient system.
/// 4. Reshape the solution column-major into `P`.
///
/// # Errors
/// Same as [`jcf_transform`].
pub fn jcf_transform_with(
    a: &Array2<f64>,
    c: &Array2<f64>,
    opts: &JordanOptions,
) -> DSResult<JcfTransform> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(DSError::ShapeError {
            what: "canonical transform needs a square state matrix",
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }
    if c.ncols() != n {
        return Err(DSError::ShapeError {
            what: "observation map columns must match the state order",
            rows: c.nrows(),
            cols: c.ncols(),
        });
    }
    if c.nrows() == 0 {
        return Err(DSError::InvalidInput {
            what: "observation map must be non-empty",
            rows: 0,
            cols: c.ncols(),
        });
    }

    let SpectralBlocks { j, indicator, mut warnings, .. } = spectral_blocks(a, opts)?;

    let eye = DMatrix::<f64>::identity(n, n);
    let j_na = to_dmatrix(&j);
    let a_t = to_dmatrix(a).transpose();
    let sylvester = eye.kronecker(&j_na) - a_t.kronecker(&eye);
    let ind_row = DMatrix::<f64>::from_fn(1, n, |_, col| indicator[col]);
    let normalization = eye.kronecker(&ind_row);

    let mut system = DMatrix::<f64>::zeros(n * n + n, n * n);
    system.view_mut((0, 0), (n * n, n * n)).copy_from(&sylvester);
    system.view_mut((n * n, 0), (n, n * n)).copy_from(&normalization);
    let mut rhs = DVector::<f64>::zeros(n * n + n);
    for col in 0..n {
        rhs[n * n + col] = c.column(col).sum();
    }

    let (system_pinv, rank, _) = pinv_na(&system)?;
    if rank < n * n {
        tracing::warn!(
            expected = n * n,
            actual = rank,
            "canonical system is rank deficient; returning the minimum-norm transform"
        );
        warnings.push(NumericalWarning::RankDeficientPinv { expected: n * n, actual: rank });
    }
    let solution = &system_pinv * &rhs;

    let p = Array2::from_shape_fn((n, n), |(row, col)| solution[col * n + row]);
    Ok(JcfTransform { p, warnings })
}

/// Convert an identified model into canonical coordinates.
///
/// ## Steps
/// 1. Compute the canonical transform from the model's state matrix and
///    observation map.
/// 2. Invert the transform (pseudo-inverse on failure, with a
///    `SingularTransform` warning).
/// 3. Apply it to the dynamics, observation map, states, and initial
///    mean.
///
/// # Errors
/// - `DSError::NotReady` if the model has not been identified.
/// - Everything [`jcf_transform`] reports.
pub fn convert_to_jcf(model: &LinearDS) -> DSResult<CanonicalLds> {
    let params = model.params()?;
    let JcfTransform { p, mut warnings } = jcf_transform(&params.a, &params.c)?;

    let p_na = to_dmatrix(&p);
    let p_inv = match p_na.clone().try_inverse() {
        Some(inverse) => to_array2(&inverse),
        None => {
            tracing::warn!("canonical transform is singular; using the pseudo-inverse");
            warnings.push(NumericalWarning::SingularTransform { what: "canonical transform" });
            let (pseudo, _, _) = pinv_na(&p_na)?;
            to_array2(&pseudo)
        }
    };

    let a = p.dot(&params.a).dot(&p_inv);
    let c = params.c.dot(&p_inv);
    let x = p.dot(&params.x);
    let init_m0 = p.dot(&params.init_m0);
    Ok(CanonicalLds { a, c, x, init_m0, transform: p, warnings })
}
