//! systems::core::options — estimation and synthesis configuration.
//!
//! Purpose
//! -------
//! Collect the knobs a caller can turn without touching algorithm code: which
//! SVD backend identification runs on, and how trajectory synthesis treats
//! states, noise, horizon, and seeding. Both types are plain data with
//! field-struct updates (`SynthesisOptions { horizon: 100, ..Default::default() }`)
//! as the intended configuration style.
//!
//! Conventions
//! -----------
//! - Defaults reproduce the engine's reference behavior: exact SVD, fresh
//!   noisy trajectories of 50 steps under a fixed seed.
//! - `seed: None` opts into entropy-based seeding; any `Some` value makes
//!   the run reproducible.

use serde::{Deserialize, Serialize};

/// SvdMethod — which singular value decomposition identification uses.
///
/// Variants
/// --------
/// - `Exact`: full thin SVD of the centered observation matrix. The default.
/// - `Randomized`: Gaussian range-finder sketch, cheaper for wide
///   observation matrices when only a few states are retained.
///   - `oversamples`: extra sketch width beyond the state count.
///   - `power_iters`: subspace-sharpening passes.
///   - `seed`: RNG seed for the sketch; `None` draws from entropy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SvdMethod {
    Exact,
    Randomized { oversamples: usize, power_iters: usize, seed: Option<u64> },
}

impl Default for SvdMethod {
    fn default() -> Self {
        SvdMethod::Exact
    }
}

impl SvdMethod {
    /// Randomized SVD with the conventional sketch parameters
    /// (10 oversamples, 2 power iterations, entropy seeding).
    pub fn randomized() -> Self {
        SvdMethod::Randomized { oversamples: 10, power_iters: 2, seed: None }
    }
}

/// SynthesisOptions — how a trajectory is generated from an identified model.
///
/// Purpose
/// -------
/// Name every decision synthesis makes instead of encoding them in a mode
/// string. The flags compose: reusing original states ignores the horizon
/// and never injects process noise, while observation noise can be layered
/// onto either state source.
///
/// Fields
/// ------
/// - `reuse_original_states`: replay the state sequence estimated during
///   identification instead of simulating fresh states.
/// - `suppress_process_noise`: evolve states deterministically through the
///   transition matrix alone.
/// - `inject_observation_noise`: add measurement noise of variance `r` on
///   top of the emitted observations.
/// - `horizon`: number of steps to simulate; ignored when reusing original
///   states.
/// - `seed`: RNG seed; `None` draws from entropy.
///
/// Notes
/// -----
/// - A zero horizon is rejected at synthesis time unless original states
///   are reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthesisOptions {
    pub reuse_original_states: bool,
    pub suppress_process_noise: bool,
    pub inject_observation_noise: bool,
    pub horizon: usize,
    pub seed: Option<u64>,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        SynthesisOptions {
            reuse_original_states: false,
            suppress_process_noise: false,
            inject_observation_noise: false,
            horizon: 50,
            seed: Some(42),
        }
    }
}
