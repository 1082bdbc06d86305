//! synthesis — generate trajectories from identified parameters.
//!
//! Purpose
//! -------
//! Run an identified model forward as a generator: simulate the state
//! recursion from the initial-state statistics and map each state through
//! the observation model, with every stochastic term individually
//! switchable through `SynthesisOptions`.
//!
//! Key behaviors
//! -------------
//! - States either replay the model's estimated trajectory verbatim
//!   (`reuse_original_states`, which overrides the horizon with the
//!   trajectory length) or follow `x_t = A·x_{t-1}` from `initM0` for
//!   `horizon` steps.
//! - Process noise, on by default, perturbs the simulated recursion with
//!   covariance `Q` through the map `B = U·√S` from its SVD, and the
//!   first state with the element-wise `√initS0` scaling. Suppressing it
//!   makes the state path fully deterministic.
//! - Observations are `C·x_t + Yavg`, plus optional i.i.d. noise of
//!   variance `R` per element when `inject_observation_noise` is set.
//! - A fixed seed makes every run reproducible; an absent seed draws the
//!   generator from entropy.
//!
//! Invariants & assumptions
//! ------------------------
//! - The parameter bundle is shape-consistent; the model front door only
//!   hands over bundles produced by identification.
//! - A zero horizon is only meaningful when replaying original states;
//!   otherwise it is rejected as `InvalidConfig`.
//!
//! Testing notes
//! -------------
//! - The noise-free recursion is exactly checkable by hand; seeded runs
//!   are checked for reproducibility rather than distribution.

use ndarray::{Array1, Array2, Axis};
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;
use statrs::distribution::Normal;

use crate::errors::{DSError, DSResult};
use crate::linalg::svd::thin_svd;
use crate::systems::core::{LdsParams, SynthesisOptions};

/// SynthesisResult — one generated trajectory.
///
/// Fields
/// ------
/// - `observations`: D×τ synthetic observation matrix, one column per
///   step.
/// - `states`: k×τ state matrix behind it.
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    pub observations: Array2<f64>,
    pub states: Array2<f64>,
}

/// Generate a trajectory from an identified parameter bundle.
///
/// ## Steps
/// 1. Reject a zero horizon unless original states are reused.
/// 2. Build the state matrix: the stored trajectory verbatim, or the
///    simulated recursion with optional process noise.
/// 3. Map every state column through the observation model, with optional
///    observation noise.
///
/// # Errors
/// - `DSError::InvalidConfig` for a zero horizon without state reuse.
/// - `DSError::NumericalFailure` if the noise-map decomposition does not
///   converge.
pub fn synthesize(params: &LdsParams, opts: &SynthesisOptions) -> DSResult<SynthesisResult> {
    if opts.horizon == 0 && !opts.reuse_original_states {
        return Err(DSError::InvalidConfig {
            what: "synthesis horizon must be positive unless original states are reused",
        });
    }

    let n_states = params.n_states();
    let obs_dim = params.obs_dim();
    let mut rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let unit_normal = Normal::new(0.0, 1.0).expect("unit normal has valid parameters");

    let states = if opts.reuse_original_states {
        params.x.clone()
    } else {
        let noise_map = if opts.suppress_process_noise {
            None
        } else {
            Some(process_noise_map(&params.q)?)
        };

        let mut states = Array2::<f64>::zeros((n_states, opts.horizon));
        let mut first = params.init_m0.clone();
        if !opts.suppress_process_noise {
            let draw = gaussian_vector(n_states, &unit_normal, &mut rng);
            first = first + params.init_s0.mapv(f64::sqrt) * draw;
        }
        states.column_mut(0).assign(&first);
        for step in 1..opts.horizon {
            let mut next = params.a.dot(&states.column(step - 1));
            if let Some(map) = &noise_map {
                let draw = gaussian_vector(n_states, &unit_normal, &mut rng);
                next = next + map.dot(&draw);
            }
            states.column_mut(step).assign(&next);
        }
        states
    };

    let tau = states.ncols();
    let obs_std = params.r.sqrt();
    let mut observations = Array2::<f64>::zeros((obs_dim, tau));
    for step in 0..tau {
        let mut column = params.c.dot(&states.column(step)) + &params.y_avg;
        if opts.inject_observation_noise {
            let draw = gaussian_vector(obs_dim, &unit_normal, &mut rng);
            column = column + draw * obs_std;
        }
        observations.column_mut(step).assign(&column);
    }

    Ok(SynthesisResult { observations, states })
}

/// Square-root map of the process-noise covariance, `B = U·√S` from its
/// SVD, so `B·z` with unit-normal `z` has covariance `Q`.
fn process_noise_map(q: &Array2<f64>) -> DSResult<Array2<f64>> {
    let decomp = thin_svd(q)?;
    let mut map = decomp.u;
    for (col, mut column) in map.axis_iter_mut(Axis(1)).enumerate() {
        column *= decomp.s[col].sqrt();
    }
    Ok(map)
}

/// A vector of independent standard-normal draws.
fn gaussian_vector(len: usize, normal: &Normal, rng: &mut StdRng) -> Array1<f64> {
    Array1::from_shape_fn(len, |_| normal.sample(rng))
}
