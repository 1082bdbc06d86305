//! systems::models::nonlinear — dynamics over externally embedded states.
//!
//! Purpose
//! -------
//! Cover systems whose observation map is not linear: a caller-supplied
//! embedding turns raw observations into a low-dimensional state sequence,
//! and the engine estimates dynamics and initial-state statistics over that
//! sequence. The embedding is a trait seam, so kernel methods, learned
//! encoders, or plain projections all plug in the same way.
//!
//! Key behaviors
//! -------------
//! - The embedding contract is checked hard: one state-order row per
//!   observation step, every value finite.
//! - Initial-state statistics differ from the linear family: the first
//!   embedded state is kept verbatim, the mean and per-coordinate variance
//!   are taken over time, and observation noise is structurally zero.
//! - `naive_compare` gives a direct parameter-space distance between two
//!   identified bundles, summing Frobenius norms of the differences.

use ndarray::{Array1, Array2, Axis};

use crate::errors::{DSError, DSResult};
use crate::systems::core::observations::Observations;
use crate::systems::core::params::NldsParams;
use crate::systems::core::transition::estimate_transition;

/// StateEmbedding — maps observations into a state sequence.
///
/// Purpose
/// -------
/// The customization seam of the nonlinear family. Implementations reduce a
/// `d×t` observation matrix to a `k×t` state matrix for the requested state
/// order; the model validates the result against that contract.
///
/// Notes
/// -----
/// - Implementations should be deterministic for reproducible
///   identification, or seeded explicitly if they are not.
pub trait StateEmbedding {
    /// Embed observations into a `n_states×t` state matrix.
    ///
    /// # Errors
    /// Implementations report their own failures; the model adds shape and
    /// finiteness checks on the result.
    fn embed(&self, obs: &Observations, n_states: usize) -> DSResult<Array2<f64>>;
}

/// NonLinearDS — a dynamical system over embedded states.
///
/// Carries the embedding it was constructed with and, once `identify` has
/// run, the estimated [`NldsParams`] bundle.
#[derive(Debug, Clone)]
pub struct NonLinearDS<E: StateEmbedding> {
    n_states: usize,
    embedding: E,
    params: Option<NldsParams>,
}

impl<E: StateEmbedding> NonLinearDS<E> {
    /// Create an unidentified model around an embedding.
    ///
    /// # Errors
    /// - `DSError::InvalidConstruction` when `n_states` is zero.
    pub fn new(n_states: usize, embedding: E) -> DSResult<Self> {
        if n_states == 0 {
            return Err(DSError::InvalidConstruction {
                what: "state order must be at least one",
            });
        }
        Ok(NonLinearDS { n_states, embedding, params: None })
    }

    /// State order `k` fixed at construction.
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// The embedding this model identifies through.
    pub fn embedding(&self) -> &E {
        &self.embedding
    }

    /// Whether `identify` has installed a parameter bundle.
    pub fn is_ready(&self) -> bool {
        self.params.is_some()
    }

    /// The estimated parameters of a ready model.
    ///
    /// # Errors
    /// - `DSError::NotReady` before the first successful `identify`.
    pub fn params(&self) -> DSResult<&NldsParams> {
        self.params.as_ref().ok_or(DSError::NotReady { op: "parameter access" })
    }

    /// Embed the observations and estimate dynamics over the result.
    ///
    /// ## Steps
    /// 1. Run the embedding and enforce its `k×t` finite-output contract.
    /// 2. Regress dynamics through the shared snapshot fit.
    /// 3. Record the first embedded state, the time mean, and the
    ///    per-coordinate sample variance as initial-state statistics.
    ///
    /// # Errors
    /// - `DSError::ShapeError` when the embedding output has the wrong
    ///   shape.
    /// - `DSError::NonFiniteInput` at the first non-finite embedded value.
    /// - `DSError::InvalidInput` when fewer than two steps are available.
    pub fn identify(&mut self, obs: &Observations) -> DSResult<()> {
        let x = self.embedding.embed(obs, self.n_states)?;
        if x.nrows() != self.n_states || x.ncols() != obs.n_obs() {
            return Err(DSError::ShapeError {
                what: "embedding must produce one state-order row per observation step",
                rows: x.nrows(),
                cols: x.ncols(),
            });
        }
        for ((row, col), &value) in x.indexed_iter() {
            if !value.is_finite() {
                return Err(DSError::NonFiniteInput { row, col, value });
            }
        }
        tracing::debug!(
            n_states = self.n_states,
            n_obs = obs.n_obs(),
            "identifying nonlinear system"
        );

        let (a, q) = estimate_transition(&x)?;
        let t = x.ncols() as f64;
        let init_x0 = x.column(0).to_owned();
        let init_m0 = x.sum_axis(Axis(1)) / t;
        let init_s0 = Array1::from_shape_fn(self.n_states, |i| {
            let mean = init_m0[i];
            x.row(i).iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (t - 1.0)
        });

        let params = NldsParams { a, q, x, init_x0, init_m0, init_s0, r: 0.0 };
        params.validate(self.n_states)?;
        self.params = Some(params);
        Ok(())
    }
}

//------ Parameter-space comparison ------

/// Sum the Frobenius norms of the parameter differences between two
/// identified nonlinear bundles.
///
/// The distance covers the transition, noise covariance, state sequence,
/// and all three initial-state statistics; it is zero exactly when the
/// bundles agree.
///
/// # Errors
/// - `DSError::ShapeError` when the bundles disagree on state order or step
///   count.
pub fn naive_compare(one: &NldsParams, two: &NldsParams) -> DSResult<f64> {
    if one.n_states() != two.n_states() || one.x.ncols() != two.x.ncols() {
        return Err(DSError::ShapeError {
            what: "compared models must share state order and step count",
            rows: one.x.nrows(),
            cols: one.x.ncols(),
        });
    }
    let distance = frob_diff(&one.a, &two.a)
        + frob_diff(&one.q, &two.q)
        + frob_diff(&one.x, &two.x)
        + frob_diff(&one.init_x0, &two.init_x0)
        + frob_diff(&one.init_m0, &two.init_m0)
        + frob_diff(&one.init_s0, &two.init_s0);
    Ok(distance)
}

/// Frobenius norm of the elementwise difference.
fn frob_diff<D: ndarray::Dimension>(
    one: &ndarray::Array<f64, D>, two: &ndarray::Array<f64, D>,
) -> f64 {
    one.iter().zip(two.iter()).map(|(x, y)| (x - y).powi(2)).sum::<f64>().sqrt()
}
