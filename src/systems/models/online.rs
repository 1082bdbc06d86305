//! systems::models::online — streaming re-identification wrappers.
//!
//! Purpose
//! -------
//! Keep a model current against a stream of measurements. Each wrapper
//! pairs a model with a [`SlidingWindow`]: samples are pushed one at a
//! time, and whenever the window signals, the model is re-identified from
//! the buffered contents. Between signals the previous fit stays available.
//!
//! Key behaviors
//! -------------
//! - `update` returns whether this sample triggered a re-fit; `has_changed`
//!   answers the same question after the fact.
//! - The window must be able to hold more steps than the state order, so a
//!   full buffer always satisfies the identification guards.
//! - A rejected sample (wrong dimension, non-finite) leaves both the
//!   buffer and the current fit untouched.
//!
//! Conventions
//! -----------
//! - Capacity and shift follow the window's semantics: the first re-fit
//!   happens once the buffer fills (shifts of 1 or 2) or shortly after,
//!   then every `n_shift` samples.

use ndarray::Array1;

use crate::errors::{DSError, DSResult};
use crate::systems::core::options::SvdMethod;
use crate::systems::core::window::SlidingWindow;
use crate::systems::models::linear::LinearDS;
use crate::systems::models::nonlinear::{NonLinearDS, StateEmbedding};

/// OnlineLinearDS — a linear system re-identified over a sliding window.
#[derive(Debug, Clone)]
pub struct OnlineLinearDS {
    model: LinearDS,
    window: SlidingWindow,
}

impl OnlineLinearDS {
    /// Create a streaming model with the exact SVD backend.
    ///
    /// # Arguments
    /// - `n_states`: state order of the re-identified model.
    /// - `buf_len`: window capacity; must exceed `n_states`.
    /// - `n_shift`: samples between re-fits once the window is full.
    ///
    /// # Errors
    /// - `DSError::InvalidConstruction` for a zero state order, a zero
    ///   shift, or a capacity not above the state order.
    pub fn new(n_states: usize, buf_len: usize, n_shift: usize) -> DSResult<Self> {
        Self::with_method(n_states, SvdMethod::default(), buf_len, n_shift)
    }

    /// Create a streaming model with an explicit SVD backend.
    ///
    /// # Errors
    /// Same as [`OnlineLinearDS::new`].
    pub fn with_method(
        n_states: usize, svd: SvdMethod, buf_len: usize, n_shift: usize,
    ) -> DSResult<Self> {
        if buf_len <= n_states {
            return Err(DSError::InvalidConstruction {
                what: "window capacity must exceed the state order",
            });
        }
        Ok(OnlineLinearDS {
            model: LinearDS::with_method(n_states, svd)?,
            window: SlidingWindow::new(buf_len, n_shift)?,
        })
    }

    /// Push one sample; re-identify if the window signals.
    ///
    /// # Returns
    /// `true` when the model was re-identified from the current window.
    ///
    /// # Errors
    /// - Sample validation errors from the window (`ShapeError`,
    ///   `NonFiniteInput`); the current fit is untouched.
    /// - Identification errors when a signaled re-fit fails.
    pub fn update(&mut self, sample: Array1<f64>) -> DSResult<bool> {
        if self.window.push(sample)? {
            let obs = self.window.observation_matrix()?;
            tracing::debug!(n_obs = obs.n_obs(), "window signaled; re-identifying");
            self.model.identify(&obs)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Whether the most recent update re-identified the model.
    pub fn has_changed(&self) -> bool {
        self.window.has_changed()
    }

    /// The current fit. Unready until the first signaled re-fit.
    pub fn model(&self) -> &LinearDS {
        &self.model
    }

    /// The sample buffer.
    pub fn window(&self) -> &SlidingWindow {
        &self.window
    }
}

/// OnlineNonLinearDS — a nonlinear system re-identified over a sliding
/// window.
///
/// Streaming counterpart of [`NonLinearDS`]; the embedding runs on every
/// re-fit against the full window contents.
#[derive(Debug, Clone)]
pub struct OnlineNonLinearDS<E: StateEmbedding> {
    model: NonLinearDS<E>,
    window: SlidingWindow,
}

impl<E: StateEmbedding> OnlineNonLinearDS<E> {
    /// Create a streaming model around an embedding.
    ///
    /// # Errors
    /// - `DSError::InvalidConstruction` for a zero state order, a zero
    ///   shift, or a capacity not above the state order.
    pub fn new(n_states: usize, embedding: E, buf_len: usize, n_shift: usize) -> DSResult<Self> {
        if buf_len <= n_states {
            return Err(DSError::InvalidConstruction {
                what: "window capacity must exceed the state order",
            });
        }
        Ok(OnlineNonLinearDS {
            model: NonLinearDS::new(n_states, embedding)?,
            window: SlidingWindow::new(buf_len, n_shift)?,
        })
    }

    /// Push one sample; re-identify if the window signals.
    ///
    /// # Errors
    /// Same contract as [`OnlineLinearDS::update`].
    pub fn update(&mut self, sample: Array1<f64>) -> DSResult<bool> {
        if self.window.push(sample)? {
            let obs = self.window.observation_matrix()?;
            tracing::debug!(n_obs = obs.n_obs(), "window signaled; re-identifying");
            self.model.identify(&obs)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Whether the most recent update re-identified the model.
    pub fn has_changed(&self) -> bool {
        self.window.has_changed()
    }

    /// The current fit. Unready until the first signaled re-fit.
    pub fn model(&self) -> &NonLinearDS<E> {
        &self.model
    }

    /// The sample buffer.
    pub fn window(&self) -> &SlidingWindow {
        &self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    use crate::systems::core::observations::Observations;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The capacity-versus-order construction guard.
    // - Re-fit cadence on a stream and readiness transitions.
    // - Fit stability across rejected samples.
    // - The nonlinear wrapper following the same cadence through an
    //   embedding.
    //
    // They intentionally DO NOT cover:
    // - Window signal timing in isolation, which the window tests own.
    // -------------------------------------------------------------------------

    /// Sample of a decaying 2-dimensional trajectory.
    fn sample(step: usize) -> Array1<f64> {
        let x = 0.9_f64.powi(step as i32);
        array![2.0 * x + 1.0, -1.5 * x + 0.5]
    }

    /// Embedding that keeps the first `n_states` observation rows.
    struct LeadingRows;

    impl StateEmbedding for LeadingRows {
        fn embed(&self, obs: &Observations, n_states: usize) -> DSResult<Array2<f64>> {
            Ok(obs.matrix().slice(ndarray::s![..n_states, ..]).to_owned())
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that a window no larger than the state order is rejected.
    //
    // Given
    // -----
    // - Two states and a capacity of two.
    //
    // Expect
    // ------
    // - `DSError::InvalidConstruction`.
    fn new_rejects_window_not_exceeding_state_order() {
        // Act
        let result = OnlineLinearDS::new(2, 2, 1);

        // Assert
        match result {
            Err(DSError::InvalidConstruction { .. }) => (),
            other => panic!("expected InvalidConstruction, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the streaming cadence: unready while filling, re-fit on the
    // filling sample, then every second sample.
    //
    // Given
    // -----
    // - A 1-state model, capacity 3, shift 2, six streamed samples.
    //
    // Expect
    // ------
    // - Re-fits at samples 3 and 5; the model is ready from sample 3 on
    //   and its state sequence always spans the window.
    fn update_refits_on_window_cadence() {
        // Arrange
        let mut online = OnlineLinearDS::new(1, 3, 2).expect("valid configuration");

        // Act & Assert
        let mut refits = Vec::new();
        for step in 0..6 {
            let refit = online.update(sample(step)).expect("update must succeed");
            refits.push(refit);
            assert_eq!(online.has_changed(), refit, "flag must mirror the update");
            if step < 2 {
                assert!(!online.model().is_ready(), "model must wait for a full window");
            } else {
                assert!(online.model().is_ready(), "model must stay ready once fitted");
            }
        }
        assert_eq!(refits, vec![false, false, true, false, true, false]);
        let params = online.model().params().expect("ready model");
        assert_eq!(params.x.ncols(), 3, "each re-fit spans the full window");
    }

    #[test]
    // Purpose
    // -------
    // Verify that a rejected sample leaves the current fit in place.
    //
    // Given
    // -----
    // - A fitted streaming model, then a sample of the wrong dimension.
    //
    // Expect
    // ------
    // - `DSError::ShapeError`; the model still carries the previous
    //   parameters.
    fn rejected_sample_preserves_current_fit() {
        // Arrange
        let mut online = OnlineLinearDS::new(1, 2, 1).expect("valid configuration");
        online.update(sample(0)).expect("first sample");
        online.update(sample(1)).expect("second sample fills the window");
        let before = online.model().clone();

        // Act
        let result = online.update(array![1.0, 2.0, 3.0]);

        // Assert
        match result {
            Err(DSError::ShapeError { rows: 3, cols: 2, .. }) => (),
            other => panic!("expected ShapeError, got {other:?}"),
        }
        assert_eq!(online.model(), &before, "failed update must not disturb the fit");
        assert_eq!(online.window().len(), 2);
    }

    #[test]
    // Purpose
    // -------
    // Verify the nonlinear wrapper re-fits on the same cadence through its
    // embedding.
    //
    // Given
    // -----
    // - A 1-state model over `LeadingRows`, capacity 3, shift 1, four
    //   streamed samples.
    //
    // Expect
    // ------
    // - Re-fits at samples 3 and 4; the embedded state sequence spans the
    //   window.
    fn nonlinear_wrapper_refits_through_embedding() {
        // Arrange
        let mut online =
            OnlineNonLinearDS::new(1, LeadingRows, 3, 1).expect("valid configuration");

        // Act
        let refits: Vec<bool> = (0..4)
            .map(|step| online.update(sample(step)).expect("update must succeed"))
            .collect();

        // Assert
        assert_eq!(refits, vec![false, false, true, true]);
        let params = online.model().params().expect("ready model");
        assert_eq!(params.x.nrows(), 1);
        assert_eq!(params.x.ncols(), 3);
    }
}
