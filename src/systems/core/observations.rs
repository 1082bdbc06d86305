//! systems::core::observations — validated observation matrices.
//!
//! Purpose
//! -------
//! Gate every sequence of measurements entering the engine through one
//! validated container. Identification, online updates, and synthesis all
//! consume `Observations`, so shape and finiteness are checked exactly once,
//! at the boundary, and never again downstream.
//!
//! Key behaviors
//! -------------
//! - Observations are stored column-per-time-step: a `d×t` matrix holds `t`
//!   measurements of dimension `d`.
//! - Construction rejects empty matrices and reports the first non-finite
//!   entry with its exact position, so callers can locate bad samples in
//!   long recordings.
//!
//! Downstream usage
//! ----------------
//! - `LinearDS::identify` and `NonLinearDS::identify` take `&Observations`.
//! - `SlidingWindow` assembles its buffered samples into an `Observations`
//!   via `from_columns` before re-identification.

use ndarray::{Array1, Array2};

use crate::errors::{DSError, DSResult};

/// Observations — a validated `d×t` matrix of `t` measurements of dimension `d`.
///
/// Purpose
/// -------
/// Own the raw data a dynamical system is estimated from. The inner matrix
/// is guaranteed non-empty and fully finite for the lifetime of the value.
///
/// Invariants
/// ----------
/// - `obs_dim() >= 1` and `n_obs() >= 1`.
/// - Every entry is finite.
#[derive(Debug, Clone, PartialEq)]
pub struct Observations {
    matrix: Array2<f64>,
}

impl Observations {
    /// Validate and wrap a `d×t` observation matrix.
    ///
    /// # Errors
    /// - `DSError::InvalidInput` when either dimension is zero.
    /// - `DSError::NonFiniteInput` at the first NaN or infinite entry.
    pub fn new(matrix: Array2<f64>) -> DSResult<Self> {
        validate(&matrix)?;
        Ok(Observations { matrix })
    }

    /// Assemble observations from time-ordered column samples.
    ///
    /// # Errors
    /// - `DSError::InvalidInput` when `columns` is empty or its first sample
    ///   has dimension zero.
    /// - `DSError::ShapeError` when samples disagree on dimension.
    /// - `DSError::NonFiniteInput` at the first NaN or infinite entry.
    pub fn from_columns(columns: &[Array1<f64>]) -> DSResult<Self> {
        let Some(first) = columns.first() else {
            return Err(DSError::InvalidInput {
                what: "observation matrix must be non-empty",
                rows: 0,
                cols: 0,
            });
        };
        let dim = first.len();
        for col in columns {
            if col.len() != dim {
                return Err(DSError::ShapeError {
                    what: "observation samples must share one dimension",
                    rows: col.len(),
                    cols: dim,
                });
            }
        }
        let matrix = Array2::from_shape_fn((dim, columns.len()), |(i, j)| columns[j][i]);
        Self::new(matrix)
    }

    /// Dimension `d` of a single measurement.
    pub fn obs_dim(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of time steps `t`.
    pub fn n_obs(&self) -> usize {
        self.matrix.ncols()
    }

    /// The underlying `d×t` matrix.
    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }
}

//------ Validation ------

/// Reject empty or non-finite observation matrices.
fn validate(matrix: &Array2<f64>) -> DSResult<()> {
    if matrix.nrows() == 0 || matrix.ncols() == 0 {
        return Err(DSError::InvalidInput {
            what: "observation matrix must be non-empty",
            rows: matrix.nrows(),
            cols: matrix.ncols(),
        });
    }
    for ((row, col), &value) in matrix.indexed_iter() {
        if !value.is_finite() {
            return Err(DSError::NonFiniteInput { row, col, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Acceptance of a well-formed matrix and accessor values.
    // - Rejection of empty matrices and of NaN/infinite entries with exact
    //   positions.
    // - Column assembly ordering and its shape guard.
    //
    // They intentionally DO NOT cover:
    // - Downstream consumption by identification, which integration tests
    //   exercise.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that a finite non-empty matrix is accepted and reported with
    // the right dimensions.
    //
    // Given
    // -----
    // - A 2×3 matrix of finite values.
    //
    // Expect
    // ------
    // - Construction succeeds, `obs_dim` is 2, `n_obs` is 3.
    fn new_accepts_finite_matrix_and_reports_dimensions() {
        // Arrange
        let matrix = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];

        // Act
        let obs = Observations::new(matrix.clone()).expect("valid matrix must be accepted");

        // Assert
        assert_eq!(obs.obs_dim(), 2);
        assert_eq!(obs.n_obs(), 3);
        assert_eq!(obs.matrix(), &matrix);
    }

    #[test]
    // Purpose
    // -------
    // Verify that matrices with a zero dimension are rejected.
    //
    // Given
    // -----
    // - A 0×3 matrix and a 2×0 matrix.
    //
    // Expect
    // ------
    // - Both constructions return `DSError::InvalidInput`.
    fn new_rejects_empty_matrices() {
        // Arrange
        let no_rows = Array2::<f64>::zeros((0, 3));
        let no_cols = Array2::<f64>::zeros((2, 0));

        // Act & Assert
        match Observations::new(no_rows) {
            Err(DSError::InvalidInput { rows: 0, cols: 3, .. }) => (),
            other => panic!("expected InvalidInput for zero rows, got {other:?}"),
        }
        match Observations::new(no_cols) {
            Err(DSError::InvalidInput { rows: 2, cols: 0, .. }) => (),
            other => panic!("expected InvalidInput for zero columns, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that the first non-finite entry is reported with its position.
    //
    // Given
    // -----
    // - A 2×2 matrix with NaN at (1, 0).
    //
    // Expect
    // ------
    // - `DSError::NonFiniteInput` carrying row 1, column 0.
    fn new_reports_position_of_non_finite_entry() {
        // Arrange
        let matrix = array![[1.0, 2.0], [f64::NAN, 4.0]];

        // Act
        let result = Observations::new(matrix);

        // Assert
        match result {
            Err(DSError::NonFiniteInput { row: 1, col: 0, value }) => {
                assert!(value.is_nan(), "payload must carry the offending value")
            }
            other => panic!("expected NonFiniteInput at (1, 0), got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that infinities are rejected like NaNs.
    //
    // Given
    // -----
    // - A 1×2 matrix with +∞ at (0, 1).
    //
    // Expect
    // ------
    // - `DSError::NonFiniteInput` carrying row 0, column 1.
    fn new_rejects_infinite_entries() {
        // Arrange
        let matrix = array![[1.0, f64::INFINITY]];

        // Act
        let result = Observations::new(matrix);

        // Assert
        match result {
            Err(DSError::NonFiniteInput { row: 0, col: 1, .. }) => (),
            other => panic!("expected NonFiniteInput at (0, 1), got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that column assembly places sample `j` into column `j`.
    //
    // Given
    // -----
    // - Three 2-dimensional samples.
    //
    // Expect
    // ------
    // - A 2×3 matrix whose columns are the samples in order.
    fn from_columns_places_samples_in_time_order() {
        // Arrange
        let columns = vec![array![1.0, 2.0], array![3.0, 4.0], array![5.0, 6.0]];

        // Act
        let obs = Observations::from_columns(&columns).expect("assembly must succeed");

        // Assert
        let expected = array![[1.0, 3.0, 5.0], [2.0, 4.0, 6.0]];
        assert_eq!(obs.matrix(), &expected);
    }

    #[test]
    // Purpose
    // -------
    // Verify that mismatched sample dimensions are rejected.
    //
    // Given
    // -----
    // - A 2-dimensional sample followed by a 3-dimensional one.
    //
    // Expect
    // ------
    // - `DSError::ShapeError`.
    fn from_columns_rejects_mismatched_sample_dimensions() {
        // Arrange
        let columns = vec![array![1.0, 2.0], array![3.0, 4.0, 5.0]];

        // Act
        let result = Observations::from_columns(&columns);

        // Assert
        match result {
            Err(DSError::ShapeError { rows: 3, cols: 2, .. }) => (),
            other => panic!("expected ShapeError, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that an empty sample list is rejected.
    //
    // Given
    // -----
    // - No samples.
    //
    // Expect
    // ------
    // - `DSError::InvalidInput`.
    fn from_columns_rejects_empty_sample_list() {
        // Arrange
        let columns: Vec<Array1<f64>> = Vec::new();

        // Act
        let result = Observations::from_columns(&columns);

        // Assert
        match result {
            Err(DSError::InvalidInput { rows: 0, cols: 0, .. }) => (),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }
}
