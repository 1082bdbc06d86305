//! systems::models::linear — the linear dynamical system.
//!
//! Purpose
//! -------
//! Implement the crate's central model: a linear-Gaussian state-space system
//! identified from raw observations by subspace decomposition. The model
//! owns its state order and SVD choice from construction, estimates its full
//! parameter bundle in one `identify` pass, and exposes the bundle behind a
//! readiness gate to canonicalization, alignment, and synthesis.
//!
//! Key behaviors
//! -------------
//! - Identification is deterministic: the exact SVD path always is, and the
//!   randomized path is whenever a seed is fixed. Re-identifying the same
//!   data reproduces the same parameters bit for bit.
//! - The observation matrix is the leading left singular subspace of the
//!   centered data; states are the correspondingly scaled right singular
//!   vectors. Dynamics then come from the shared snapshot regression.
//! - The initial state mean is the first estimated state and the initial
//!   variance is zero: the trained trajectory starts exactly where the data
//!   did.
//! - Observation noise is summarized by one scalar variance pooled over
//!   every entry of the reconstruction residual.
//!
//! Invariants & assumptions
//! ------------------------
//! - `n_states >= 1` for every constructed model.
//! - A ready model's parameter bundle is internally consistent with its
//!   state order; `identify` either installs a full bundle or leaves the
//!   model unchanged.
//!
//! Conventions
//! -----------
//! - Observations are `d×t`, states `k×t`, both column-per-step.
//! - Identification requires `t >= k + 1` and `k <= min(d, t)`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover constructor and readiness gating, identification
//!   guards, exact recovery on noise-free low-rank data for both SVD
//!   paths, determinism, and serde round-tripping.

use ndarray::{s, Array1, Axis};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::errors::{DSError, DSResult};
use crate::linalg::svd::{randomized_svd, thin_svd, ThinSvd};
use crate::synthesis::{synthesize, SynthesisResult};
use crate::systems::core::observations::Observations;
use crate::systems::core::options::{SvdMethod, SynthesisOptions};
use crate::systems::core::params::LdsParams;
use crate::systems::core::transition::estimate_transition;

/// LinearDS — a linear dynamical system of fixed state order.
///
/// Purpose
/// -------
/// Estimate and carry the parameters of the state-space model
///
/// ```text
/// x_{t+1} = A·x_t + w_t,    w_t ~ N(0, Q)
/// y_t     = C·x_t + ȳ + v_t, v_t ~ N(0, r·I)
/// ```
///
/// from a `d×t` observation matrix. The model is constructed empty and
/// becomes ready once `identify` has run.
///
/// # Examples
///
/// ```
/// use ndarray::array;
/// use rust_dynsys::systems::{LinearDS, Observations};
///
/// let obs = Observations::new(array![[1.0, 2.0, 3.0], [2.0, 4.0, 6.0]])
///     .expect("finite observations");
/// let mut model = LinearDS::new(1).expect("positive state order");
/// model.identify(&obs).expect("identification succeeds");
/// assert!(model.is_ready());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearDS {
    n_states: usize,
    svd: SvdMethod,
    params: Option<LdsParams>,
}

impl LinearDS {
    /// Create an unidentified model with the exact SVD backend.
    ///
    /// # Errors
    /// - `DSError::InvalidConstruction` when `n_states` is zero.
    pub fn new(n_states: usize) -> DSResult<Self> {
        Self::with_method(n_states, SvdMethod::default())
    }

    /// Create an unidentified model with an explicit SVD backend.
    ///
    /// # Errors
    /// - `DSError::InvalidConstruction` when `n_states` is zero.
    pub fn with_method(n_states: usize, svd: SvdMethod) -> DSResult<Self> {
        if n_states == 0 {
            return Err(DSError::InvalidConstruction {
                what: "state order must be at least one",
            });
        }
        Ok(LinearDS { n_states, svd, params: None })
    }

    /// Assemble a ready model from an existing parameter bundle.
    ///
    /// Used by state-space alignment, which derives a consistent bundle
    /// rather than estimating one.
    pub(crate) fn from_parts(n_states: usize, svd: SvdMethod, params: LdsParams) -> Self {
        LinearDS { n_states, svd, params: Some(params) }
    }

    /// State order `k` fixed at construction.
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// The SVD backend identification runs on.
    pub fn svd_method(&self) -> SvdMethod {
        self.svd
    }

    /// Whether `identify` has installed a parameter bundle.
    pub fn is_ready(&self) -> bool {
        self.params.is_some()
    }

    /// The estimated parameters of a ready model.
    ///
    /// # Errors
    /// - `DSError::NotReady` before the first successful `identify`.
    pub fn params(&self) -> DSResult<&LdsParams> {
        self.params.as_ref().ok_or(DSError::NotReady { op: "parameter access" })
    }

    /// Estimate the full parameter bundle from observations.
    ///
    /// ## Steps
    /// 1. Remove the per-dimension mean `ȳ`.
    /// 2. Decompose the centered data, keeping `k` components: `C` is the
    ///    left subspace, `X = diag(S)·Vᵗ` the state sequence.
    /// 3. Regress dynamics: `A = X₂·X₁⁺`, `Q` from the residuals.
    /// 4. Take `m₀ = X[:, 0]`, `s₀ = 0`, and pool the reconstruction
    ///    residual into the scalar observation-noise variance `r`.
    /// 5. Validate the assembled bundle's shapes and install it atomically.
    ///
    /// Re-identifying replaces the previous bundle wholesale; the online
    /// wrappers rely on this.
    ///
    /// # Errors
    /// - `DSError::InvalidInput` when fewer than `k + 1` steps are given or
    ///   the state order exceeds `min(d, t)`.
    /// - `DSError::NumericalFailure` if a decomposition does not converge.
    pub fn identify(&mut self, obs: &Observations) -> DSResult<()> {
        let (d, t) = (obs.obs_dim(), obs.n_obs());
        let k = self.n_states;
        if t < k + 1 {
            return Err(DSError::InvalidInput {
                what: "identification needs at least one more step than states",
                rows: d,
                cols: t,
            });
        }
        if k > d.min(t) {
            return Err(DSError::InvalidInput {
                what: "state order must not exceed either observation dimension",
                rows: d,
                cols: t,
            });
        }
        tracing::debug!(obs_dim = d, n_obs = t, n_states = k, "identifying linear system");

        let y = obs.matrix();
        let y_avg = y.sum_axis(Axis(1)) / t as f64;
        let centered = y - &y_avg.view().insert_axis(Axis(1));

        let decomp = match self.svd {
            SvdMethod::Exact => {
                let full = thin_svd(&centered)?;
                ThinSvd {
                    u: full.u.slice(s![.., ..k]).to_owned(),
                    s: full.s.slice(s![..k]).to_owned(),
                    vt: full.vt.slice(s![..k, ..]).to_owned(),
                }
            }
            SvdMethod::Randomized { oversamples, power_iters, seed } => {
                let mut rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                randomized_svd(&centered, k, oversamples, power_iters, &mut rng)?
            }
        };

        let c = decomp.u;
        let mut x = decomp.vt;
        for (i, mut row) in x.outer_iter_mut().enumerate() {
            row *= decomp.s[i];
        }

        let (a, q) = estimate_transition(&x)?;
        let init_m0 = x.column(0).to_owned();
        let init_s0 = Array1::zeros(k);

        let residual = &centered - &c.dot(&x);
        let n = (d * t) as f64;
        let residual_mean = residual.sum() / n;
        let r = residual.iter().map(|v| (v - residual_mean).powi(2)).sum::<f64>() / n;

        let params = LdsParams { a, c, q, r, x, y_avg, init_m0, init_s0 };
        params.validate(k)?;
        self.params = Some(params);
        Ok(())
    }

    /// Generate a trajectory from the identified parameters.
    ///
    /// # Errors
    /// - `DSError::NotReady` before the first successful `identify`.
    /// - `DSError::InvalidConfig` for a zero horizon without state reuse.
    pub fn synthesize(&self, opts: &SynthesisOptions) -> DSResult<SynthesisResult> {
        let params =
            self.params.as_ref().ok_or(DSError::NotReady { op: "trajectory synthesis" })?;
        synthesize(params, opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Constructor and readiness gating.
    // - Identification guards on step count and state order.
    // - Reconstruction, vanishing residuals, and initial-state conventions
    //   on noise-free low-rank data, for both SVD backends.
    // - Determinism of repeated identification.
    // - Serde round-tripping of a ready model.
    //
    // They intentionally DO NOT cover:
    // - Synthesis output, canonicalization, and alignment, which have their
    //   own suites and an end-to-end integration test.
    // -------------------------------------------------------------------------

    /// Largest absolute elementwise difference between two matrices.
    fn max_abs_diff(a: &Array2<f64>, b: &Array2<f64>) -> f64 {
        a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).fold(0.0, f64::max)
    }

    /// Noise-free rank-2 observations: 4 dimensions, 30 steps, states
    /// rotating under a stable transition, plus a fixed offset.
    fn rank_two_observations() -> Observations {
        let a_true = array![
            [0.9 * 0.3_f64.cos(), -0.9 * 0.3_f64.sin()],
            [0.9 * 0.3_f64.sin(), 0.9 * 0.3_f64.cos()]
        ];
        let c_true = array![[1.0, 0.0], [0.5, 1.0], [-1.0, 0.5], [0.2, -0.7]];
        let offset = array![5.0, -3.0, 2.0, 0.0];

        let mut x = Array2::<f64>::zeros((2, 30));
        x.column_mut(0).assign(&array![1.0, 0.5]);
        for j in 1..30 {
            let next = a_true.dot(&x.column(j - 1).to_owned());
            x.column_mut(j).assign(&next);
        }
        let y = c_true.dot(&x) + &offset.view().insert_axis(Axis(1));
        Observations::new(y).expect("finite synthetic observations")
    }

    /// Assert the full identification contract on noise-free rank-2 data.
    fn assert_clean_identification(model: &LinearDS, obs: &Observations, tol: f64) {
        let params = model.params().expect("ready model");
        let y = obs.matrix();
        let y_avg = y.sum_axis(Axis(1)) / obs.n_obs() as f64;
        let centered = y - &y_avg.view().insert_axis(Axis(1));

        // Reconstruction: C·X must reproduce the centered data.
        let reconstruction = params.c.dot(&params.x);
        assert!(
            max_abs_diff(&reconstruction, &centered) < tol,
            "rank-2 data must be reconstructed exactly"
        );
        // States evolve linearly, so the regression leaves no residual.
        assert!(params.q.iter().all(|v| v.abs() < tol), "noise-free dynamics leave Q at zero");
        assert!(params.r < tol, "noise-free data leaves r at zero, got {}", params.r);
        // Initial-state conventions.
        assert_eq!(params.init_m0, params.x.column(0).to_owned());
        assert!(params.init_s0.iter().all(|v| *v == 0.0));
    }

    #[test]
    // Purpose
    // -------
    // Verify that a zero state order is rejected at construction.
    //
    // Given
    // -----
    // - `LinearDS::new(0)`.
    //
    // Expect
    // ------
    // - `DSError::InvalidConstruction`.
    fn new_rejects_zero_state_order() {
        // Act
        let result = LinearDS::new(0);

        // Assert
        match result {
            Err(DSError::InvalidConstruction { .. }) => (),
            other => panic!("expected InvalidConstruction, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the readiness gate before identification.
    //
    // Given
    // -----
    // - A freshly constructed 2-state model.
    //
    // Expect
    // ------
    // - `is_ready` is false; `params` and `synthesize` return
    //   `DSError::NotReady`.
    fn unidentified_model_gates_parameter_access_and_synthesis() {
        // Arrange
        let model = LinearDS::new(2).expect("valid order");

        // Act & Assert
        assert!(!model.is_ready());
        match model.params() {
            Err(DSError::NotReady { .. }) => (),
            other => panic!("expected NotReady from params, got {other:?}"),
        }
        match model.synthesize(&SynthesisOptions::default()) {
            Err(DSError::NotReady { .. }) => (),
            other => panic!("expected NotReady from synthesize, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the identification guards on step count and state order.
    //
    // Given
    // -----
    // - A 3-state model with 3 steps of 4-dimensional data (needs 4), and
    //   a 3-state model with 2-dimensional data (k > d).
    //
    // Expect
    // ------
    // - Both calls return `DSError::InvalidInput` and leave the model
    //   unready.
    fn identify_rejects_short_sequences_and_excessive_state_orders() {
        // Arrange
        let short = Observations::new(Array2::from_elem((4, 3), 1.0)).expect("valid matrix");
        let flat = Observations::new(Array2::from_elem((2, 10), 1.0)).expect("valid matrix");
        let mut model = LinearDS::new(3).expect("valid order");

        // Act & Assert
        match model.identify(&short) {
            Err(DSError::InvalidInput { rows: 4, cols: 3, .. }) => (),
            other => panic!("expected InvalidInput for short data, got {other:?}"),
        }
        match model.identify(&flat) {
            Err(DSError::InvalidInput { rows: 2, cols: 10, .. }) => (),
            other => panic!("expected InvalidInput for k > d, got {other:?}"),
        }
        assert!(!model.is_ready(), "failed identification must not install parameters");
    }

    #[test]
    // Purpose
    // -------
    // Verify the identification contract on noise-free rank-2 data with
    // the exact SVD backend.
    //
    // Given
    // -----
    // - The rank-2 reference observations and a 2-state model.
    //
    // Expect
    // ------
    // - Exact reconstruction, vanishing Q and r, and the initial-state
    //   conventions.
    fn identify_recovers_noise_free_rank_two_data_exactly() {
        // Arrange
        let obs = rank_two_observations();
        let mut model = LinearDS::new(2).expect("valid order");

        // Act
        model.identify(&obs).expect("identification must succeed");

        // Assert
        assert_clean_identification(&model, &obs, 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Verify the randomized backend reaches the same contract on exactly
    // low-rank data when seeded.
    //
    // Given
    // -----
    // - The rank-2 reference observations and a seeded randomized model.
    //
    // Expect
    // ------
    // - The same reconstruction contract within a looser tolerance.
    fn seeded_randomized_backend_matches_contract_on_low_rank_data() {
        // Arrange
        let obs = rank_two_observations();
        let method = SvdMethod::Randomized { oversamples: 6, power_iters: 2, seed: Some(11) };
        let mut model = LinearDS::with_method(2, method).expect("valid order");

        // Act
        model.identify(&obs).expect("identification must succeed");

        // Assert
        assert_clean_identification(&model, &obs, 1e-7);
    }

    #[test]
    // Purpose
    // -------
    // Verify that identifying the same data twice reproduces identical
    // parameters.
    //
    // Given
    // -----
    // - Two 2-state models identified on the reference observations.
    //
    // Expect
    // ------
    // - The parameter bundles compare equal bit for bit.
    fn repeated_identification_is_deterministic() {
        // Arrange
        let obs = rank_two_observations();
        let mut first = LinearDS::new(2).expect("valid order");
        let mut second = LinearDS::new(2).expect("valid order");

        // Act
        first.identify(&obs).expect("identification must succeed");
        second.identify(&obs).expect("identification must succeed");

        // Assert
        assert_eq!(first.params().expect("ready"), second.params().expect("ready"));
    }

    #[test]
    // Purpose
    // -------
    // Verify that a ready model survives a serde round trip.
    //
    // Given
    // -----
    // - A 2-state model identified on the reference observations,
    //   serialized to JSON and back.
    //
    // Expect
    // ------
    // - The restored model compares equal and is still ready.
    fn ready_model_round_trips_through_serde() {
        // Arrange
        let obs = rank_two_observations();
        let mut model = LinearDS::new(2).expect("valid order");
        model.identify(&obs).expect("identification must succeed");

        // Act
        let encoded = serde_json::to_string(&model).expect("serialization must succeed");
        let restored: LinearDS = serde_json::from_str(&encoded).expect("deserialization");

        // Assert
        assert_eq!(restored, model);
        assert!(restored.is_ready());
    }
}
