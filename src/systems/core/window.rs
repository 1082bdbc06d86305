//! systems::core::window — bounded sample buffer with a re-fit cadence.
//!
//! Purpose
//! -------
//! Buffer streaming measurements for the online models and decide when
//! enough new data has arrived to justify re-identifying. The window holds
//! the most recent `capacity` samples and raises a change signal on a fixed
//! cadence of `n_shift` pushes once full.
//!
//! Key behaviors
//! -------------
//! - Pushing into a full window evicts the oldest sample first; the buffer
//!   never exceeds its capacity.
//! - No signal is raised while the window is still filling.
//! - The first signal comes when the buffer fills (for shifts of 1 or 2) or
//!   `n_shift − 2` pushes later, and recurs every `n_shift` pushes from
//!   then on.
//! - Samples are validated on entry: the first push fixes the entry
//!   dimension, and non-finite values are rejected before they can poison
//!   the buffer.
//!
//! Downstream usage
//! ----------------
//! - `OnlineLinearDS` and `OnlineNonLinearDS` push through `update` and
//!   re-identify whenever `push` returns `true`.

use std::collections::VecDeque;

use ndarray::Array1;

use crate::errors::{DSError, DSResult};
use crate::systems::core::observations::Observations;

/// SlidingWindow — the most recent `capacity` samples plus a change signal.
///
/// Invariants
/// ----------
/// - `len() <= capacity()` at all times.
/// - Every buffered sample shares the dimension fixed by the first push and
///   contains only finite values.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    buf: VecDeque<Array1<f64>>,
    capacity: usize,
    n_shift: usize,
    countdown: usize,
    changed: bool,
    entry_dim: Option<usize>,
}

impl SlidingWindow {
    /// Create an empty window.
    ///
    /// # Arguments
    /// - `capacity`: number of samples the window retains.
    /// - `n_shift`: pushes between change signals once the window is full.
    ///
    /// # Errors
    /// - `DSError::InvalidConstruction` when either argument is zero.
    pub fn new(capacity: usize, n_shift: usize) -> DSResult<Self> {
        if capacity == 0 {
            return Err(DSError::InvalidConstruction { what: "window capacity must be positive" });
        }
        if n_shift == 0 {
            return Err(DSError::InvalidConstruction { what: "window shift must be positive" });
        }
        Ok(SlidingWindow {
            buf: VecDeque::with_capacity(capacity),
            capacity,
            n_shift,
            countdown: n_shift - 1,
            changed: false,
            entry_dim: None,
        })
    }

    /// Push one sample, evicting the oldest if the window is full.
    ///
    /// # Returns
    /// `true` when enough new data has accumulated that the caller should
    /// re-identify from the current contents.
    ///
    /// # Errors
    /// - `DSError::ShapeError` when the sample disagrees with the entry
    ///   dimension fixed by the first push.
    /// - `DSError::NonFiniteInput` at the first NaN or infinite component;
    ///   the window is left untouched.
    pub fn push(&mut self, sample: Array1<f64>) -> DSResult<bool> {
        if let Some(dim) = self.entry_dim {
            if sample.len() != dim {
                return Err(DSError::ShapeError {
                    what: "window samples must share one dimension",
                    rows: sample.len(),
                    cols: dim,
                });
            }
        } else if sample.is_empty() {
            return Err(DSError::InvalidInput {
                what: "window samples must be non-empty",
                rows: 0,
                cols: 1,
            });
        }
        // The column this sample will occupy in the assembled matrix.
        let col = self.buf.len().min(self.capacity - 1);
        for (row, &value) in sample.iter().enumerate() {
            if !value.is_finite() {
                return Err(DSError::NonFiniteInput { row, col, value });
            }
        }

        self.entry_dim = Some(sample.len());
        if self.buf.len() == self.capacity {
            self.buf.pop_front();
        }
        self.buf.push_back(sample);

        if self.buf.len() < self.capacity {
            self.changed = false;
            return Ok(false);
        }
        if self.countdown > 0 {
            self.countdown -= 1;
        }
        if self.countdown == 0 {
            self.countdown = self.n_shift;
            self.changed = true;
        } else {
            self.changed = false;
        }
        Ok(self.changed)
    }

    /// Whether the most recent push raised the change signal.
    pub fn has_changed(&self) -> bool {
        self.changed
    }

    /// Number of buffered samples.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the window holds no samples.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Whether the window holds `capacity` samples.
    pub fn is_full(&self) -> bool {
        self.buf.len() == self.capacity
    }

    /// Retention capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Pushes between change signals once full.
    pub fn n_shift(&self) -> usize {
        self.n_shift
    }

    /// Sample dimension fixed by the first push, if any sample has arrived.
    pub fn entry_dim(&self) -> Option<usize> {
        self.entry_dim
    }

    /// Assemble the buffered samples, oldest first, into observations.
    ///
    /// # Errors
    /// - `DSError::InvalidInput` when the window is empty.
    pub fn observation_matrix(&self) -> DSResult<Observations> {
        let columns: Vec<Array1<f64>> = self.buf.iter().cloned().collect();
        Observations::from_columns(&columns)
    }
}
