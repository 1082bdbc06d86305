//! systems::core::params — estimated parameter bundles.
//!
//! Purpose
//! -------
//! Define the plain-data outcome of identification for both model families:
//! the full linear-Gaussian parameter set and the reduced bundle a
//! nonlinear embedding admits. Models hold these behind a readiness gate;
//! the bundles themselves stay open structs so canonicalization, alignment,
//! and persistence can read every field without accessor ceremony.
//!
//! Key behaviors
//! -------------
//! - Both bundles serialize with `serde`, which is the crate's persistence
//!   story: write the model out, read it back, continue working.
//! - `validate` re-checks internal shape consistency against a declared
//!   state count. Identification runs it on every bundle before installing
//!   it, and it is the tool of choice for hand-built or deserialized
//!   values.
//!
//! Conventions
//! -----------
//! - States are columns: `x` is `k×t` for `k` states over `t` steps.
//! - Initial state variance is diagonal and stored as a length-`k` vector.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::errors::{DSError, DSResult};

/// LdsParams — parameters of an identified linear dynamical system.
///
/// Fields
/// ------
/// - `a`: `k×k` state transition matrix.
/// - `c`: `d×k` observation matrix.
/// - `q`: `k×k` process-noise covariance.
/// - `r`: scalar observation-noise variance.
/// - `x`: `k×t` state sequence estimated from the training data.
/// - `y_avg`: length-`d` observation mean removed before estimation.
/// - `init_m0`: length-`k` initial state mean.
/// - `init_s0`: length-`k` diagonal of the initial state covariance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LdsParams {
    pub a: Array2<f64>,
    pub c: Array2<f64>,
    pub q: Array2<f64>,
    pub r: f64,
    pub x: Array2<f64>,
    pub y_avg: Array1<f64>,
    pub init_m0: Array1<f64>,
    pub init_s0: Array1<f64>,
}

impl LdsParams {
    /// Declared state count `k`.
    pub fn n_states(&self) -> usize {
        self.a.nrows()
    }

    /// Observation dimension `d`.
    pub fn obs_dim(&self) -> usize {
        self.c.nrows()
    }

    /// Check internal shape consistency against a state count.
    ///
    /// # Errors
    /// - `DSError::ShapeError` naming the first field whose shape disagrees
    ///   with `n_states` or with the observation dimension implied by `c`.
    /// - `DSError::InvalidConstruction` when `r` is negative or non-finite.
    pub fn validate(&self, n_states: usize) -> DSResult<()> {
        let k = n_states;
        if self.a.nrows() != k || self.a.ncols() != k {
            return Err(DSError::ShapeError {
                what: "state transition matrix must be square of the state order",
                rows: self.a.nrows(),
                cols: self.a.ncols(),
            });
        }
        if self.c.nrows() == 0 || self.c.ncols() != k {
            return Err(DSError::ShapeError {
                what: "observation matrix must map states to a non-empty observation space",
                rows: self.c.nrows(),
                cols: self.c.ncols(),
            });
        }
        if self.q.nrows() != k || self.q.ncols() != k {
            return Err(DSError::ShapeError {
                what: "process-noise covariance must be square of the state order",
                rows: self.q.nrows(),
                cols: self.q.ncols(),
            });
        }
        if self.x.nrows() != k || self.x.ncols() == 0 {
            return Err(DSError::ShapeError {
                what: "state sequence must stack state-order rows over at least one step",
                rows: self.x.nrows(),
                cols: self.x.ncols(),
            });
        }
        if self.y_avg.len() != self.c.nrows() {
            return Err(DSError::ShapeError {
                what: "observation mean must match the observation dimension",
                rows: self.y_avg.len(),
                cols: self.c.nrows(),
            });
        }
        if self.init_m0.len() != k {
            return Err(DSError::ShapeError {
                what: "initial state mean must match the state order",
                rows: self.init_m0.len(),
                cols: k,
            });
        }
        if self.init_s0.len() != k {
            return Err(DSError::ShapeError {
                what: "initial state variance must match the state order",
                rows: self.init_s0.len(),
                cols: k,
            });
        }
        if !self.r.is_finite() || self.r < 0.0 {
            return Err(DSError::InvalidConstruction {
                what: "observation-noise variance must be finite and non-negative",
            });
        }
        Ok(())
    }
}

/// NldsParams — parameters of a nonlinear system over embedded states.
///
/// Purpose
/// -------
/// Carry what remains estimable once a nonlinear embedding replaces the
/// linear observation map: state dynamics and initial-state statistics. No
/// observation matrix or mean exists in this family; `r` is retained for
/// comparison arithmetic and is zero for embedded models.
///
/// Fields
/// ------
/// - `a`: `k×k` transition over embedded states.
/// - `q`: `k×k` process-noise covariance.
/// - `x`: `k×t` embedded state sequence.
/// - `init_x0`: length-`k` first embedded state.
/// - `init_m0`: length-`k` time mean of the embedded states.
/// - `init_s0`: length-`k` per-coordinate variance of the embedded states.
/// - `r`: observation-noise placeholder, zero for embedded models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NldsParams {
    pub a: Array2<f64>,
    pub q: Array2<f64>,
    pub x: Array2<f64>,
    pub init_x0: Array1<f64>,
    pub init_m0: Array1<f64>,
    pub init_s0: Array1<f64>,
    pub r: f64,
}

impl NldsParams {
    /// Declared state count `k`.
    pub fn n_states(&self) -> usize {
        self.a.nrows()
    }

    /// Check internal shape consistency against a state count.
    ///
    /// # Errors
    /// - `DSError::ShapeError` naming the first inconsistent field.
    pub fn validate(&self, n_states: usize) -> DSResult<()> {
        let k = n_states;
        if self.a.nrows() != k || self.a.ncols() != k {
            return Err(DSError::ShapeError {
                what: "state transition matrix must be square of the state order",
                rows: self.a.nrows(),
                cols: self.a.ncols(),
            });
        }
        if self.q.nrows() != k || self.q.ncols() != k {
            return Err(DSError::ShapeError {
                what: "process-noise covariance must be square of the state order",
                rows: self.q.nrows(),
                cols: self.q.ncols(),
            });
        }
        if self.x.nrows() != k || self.x.ncols() == 0 {
            return Err(DSError::ShapeError {
                what: "state sequence must stack state-order rows over at least one step",
                rows: self.x.nrows(),
                cols: self.x.ncols(),
            });
        }
        for (vector, what) in [
            (&self.init_x0, "first embedded state must match the state order"),
            (&self.init_m0, "initial state mean must match the state order"),
            (&self.init_s0, "initial state variance must match the state order"),
        ] {
            if vector.len() != k {
                return Err(DSError::ShapeError { what, rows: vector.len(), cols: k });
            }
        }
        Ok(())
    }
}
