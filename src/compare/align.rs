//! compare::align — express one model's parameters in another model's
//! state basis.
//!
//! Purpose
//! -------
//! Two models identified from related recordings describe their states in
//! private coordinate bases, so their parameter matrices cannot be
//! compared or blended entry by entry. The aligner computes the linear
//! map `F = pinv(C_target)·C_source` that carries the target's state
//! coordinates toward the source's, then re-expresses the target's
//! parameters through `F`, producing a new model in the source basis.
//!
//! Key behaviors
//! -------------
//! - The aligned model is a fresh value; neither input is modified and no
//!   matrix of the target is aliased into the result.
//! - The discrepancy is the sum of element-wise absolute differences
//!   between the raw, un-transformed target and source parameters across
//!   the observation map, dynamics, noise statistics, initial-state
//!   statistics, and observation means. It is a basis-sensitive sanity
//!   number, not a metric; a caller wanting a post-alignment distance
//!   computes it against the returned model.
//! - `R`, `Yavg`, and the state trajectory carry over from the target
//!   unchanged; the map only re-expresses basis-dependent parameters.
//!
//! Testing notes
//! -------------
//! - Aligning a model with itself is the fixed point: identity map, zero
//!   discrepancy. An orthogonal change of basis is the exactly solvable
//!   non-trivial case.

use ndarray::Array2;

use crate::errors::{DSError, DSResult};
use crate::linalg::svd::pinv;
use crate::systems::core::LdsParams;
use crate::systems::models::LinearDS;

/// Alignment — an aligned model plus the map and discrepancy behind it.
///
/// Fields
/// ------
/// - `model`: the target re-expressed in the source's state basis.
/// - `map`: the k×k alignment map `F = pinv(C_target)·C_source`.
/// - `discrepancy`: element-wise absolute difference between the raw
///   target and source parameters; 0 exactly when the models are equal.
#[derive(Debug, Clone)]
pub struct Alignment {
    pub model: LinearDS,
    pub map: Array2<f64>,
    pub discrepancy: f64,
}

/// Re-express the target model in the source model's state basis.
///
/// ## Steps
/// 1. Require both models to be identified, with matching state orders
///    and observation dimensions.
/// 2. Compute `F = pinv(C_target)·C_source`.
/// 3. Map the target parameters: `C·F`, `Fᵗ·A·F`, `Fᵗ·Q·F`, `Fᵗ·m₀`,
///    `diag(Fᵗ·diag(s₀)·F)`; copy `R`, `Yavg`, and the state trajectory
///    unchanged.
/// 4. Sum the element-wise absolute differences of the raw parameter sets
///    into the discrepancy.
///
/// # Errors
/// - `DSError::NotReady` if either model has not been identified.
/// - `DSError::ShapeError` if the state orders or observation dimensions
///   differ.
/// - `DSError::NumericalFailure` if the pseudo-inverse does not converge.
pub fn state_space_map(target: &LinearDS, source: &LinearDS) -> DSResult<Alignment> {
    let target_params = target.params()?;
    let source_params = source.params()?;
    if target.n_states() != source.n_states() {
        return Err(DSError::ShapeError {
            what: "aligned models must share the state order",
            rows: target.n_states(),
            cols: source.n_states(),
        });
    }
    if target_params.obs_dim() != source_params.obs_dim() {
        return Err(DSError::ShapeError {
            what: "aligned models must share the observation dimension",
            rows: target_params.obs_dim(),
            cols: source_params.obs_dim(),
        });
    }

    let decomp = pinv(&target_params.c)?;
    if decomp.rank < target.n_states() {
        tracing::warn!(
            rank = decomp.rank,
            expected = target.n_states(),
            "target observation map is rank deficient; alignment is a minimum-norm map"
        );
    }
    let map = decomp.matrix.dot(&source_params.c);
    let c = target_params.c.dot(&map);
    let a = map.t().dot(&target_params.a).dot(&map);
    let q = map.t().dot(&target_params.q).dot(&map);
    let init_m0 = map.t().dot(&target_params.init_m0);
    let init_s0 = map
        .t()
        .dot(&Array2::from_diag(&target_params.init_s0))
        .dot(&map)
        .diag()
        .to_owned();
    let discrepancy = parameter_discrepancy(target_params, source_params);

    let params = LdsParams {
        a,
        c,
        q,
        r: target_params.r,
        x: target_params.x.clone(),
        y_avg: target_params.y_avg.clone(),
        init_m0,
        init_s0,
    };
    let model = LinearDS::from_parts(target.n_states(), target.svd_method(), params);
    Ok(Alignment { model, map, discrepancy })
}

/// Sum of element-wise absolute differences across the basis-dependent
/// and scalar parameters; the state trajectory does not participate.
fn parameter_discrepancy(target: &LdsParams, source: &LdsParams) -> f64 {
    abs_sum(&target.c, &source.c)
        + abs_sum(&target.a, &source.a)
        + abs_sum(&target.q, &source.q)
        + (target.r - source.r).abs()
        + abs_sum(&target.init_m0, &source.init_m0)
        + abs_sum(&target.init_s0, &source.init_s0)
        + abs_sum(&target.y_avg, &source.y_avg)
}

fn abs_sum<D: ndarray::Dimension>(
    one: &ndarray::Array<f64, D>,
    two: &ndarray::Array<f64, D>,
) -> f64 {
    one.iter().zip(two.iter()).map(|(x, y)| (x - y).abs()).sum()
}
