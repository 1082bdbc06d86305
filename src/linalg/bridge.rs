//! linalg::bridge — conversions between the ndarray surface and the nalgebra backend.
//!
//! Purpose
//! -------
//! Keep the two matrix worlds strictly separated: the crate's public API
//! speaks `ndarray` (`Array1`/`Array2`), while decompositions (SVD, Schur,
//! Kronecker products, inverses) run on `nalgebra`'s `DMatrix`/`DVector`.
//! All crossings happen through the copy helpers in this module, so no
//! nalgebra type ever leaks into a public signature.
//!
//! Conventions
//! -----------
//! - `ndarray` iteration is logical row-major; `nalgebra` storage is
//!   column-major. The helpers copy element-by-element through indexed
//!   access, so layout differences never corrupt ordering.
//! - Conversions allocate; callers that need repeated crossings should
//!   convert once and stay on one side for the duration of a computation.
//!
//! Testing notes
//! -------------
//! - Unit tests check element placement for non-square shapes in both
//!   directions and round-trip equality for vectors.

use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2};

/// Copy a real `ndarray` matrix into a freshly allocated `DMatrix`.
pub(crate) fn to_dmatrix(a: &Array2<f64>) -> DMatrix<f64> {
    DMatrix::from_fn(a.nrows(), a.ncols(), |i, j| a[[i, j]])
}

/// Copy a real `ndarray` vector into a freshly allocated `DVector`.
pub(crate) fn to_dvector(a: &Array1<f64>) -> DVector<f64> {
    DVector::from_iterator(a.len(), a.iter().copied())
}

/// Copy a `DMatrix` back onto the `ndarray` surface.
pub(crate) fn to_array2(m: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| m[(i, j)])
}

/// Copy a `DVector` back onto the `ndarray` surface.
pub(crate) fn to_array1(v: &DVector<f64>) -> Array1<f64> {
    Array1::from_iter(v.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Element placement for a non-square matrix in both directions, so a
    //   row-major/column-major mix-up cannot pass unnoticed.
    // - Vector round-trips.
    //
    // They intentionally DO NOT cover:
    // - Decomposition behavior, which lives in `linalg::svd` / `linalg::eig`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `to_dmatrix` places every element of a 2×3 matrix at the
    // same (row, col) position on the nalgebra side.
    //
    // Given
    // -----
    // - The matrix [[1, 2, 3], [4, 5, 6]].
    //
    // Expect
    // ------
    // - `m[(i, j)]` equals the ndarray entry for every coordinate.
    fn to_dmatrix_preserves_element_positions() {
        // Arrange
        let a = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];

        // Act
        let m = to_dmatrix(&a);

        // Assert
        assert_eq!(m.nrows(), 2);
        assert_eq!(m.ncols(), 3);
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(m[(i, j)], a[[i, j]], "mismatch at ({i}, {j})");
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that `to_array2` inverts `to_dmatrix` exactly for a non-square
    // matrix.
    //
    // Given
    // -----
    // - A 3×2 matrix with distinct entries.
    //
    // Expect
    // ------
    // - Converting to `DMatrix` and back reproduces the original.
    fn to_array2_round_trips_non_square_matrix() {
        // Arrange
        let a = array![[1.0, -2.0], [0.5, 7.0], [-3.0, 4.0]];

        // Act
        let round_tripped = to_array2(&to_dmatrix(&a));

        // Assert
        assert_eq!(round_tripped, a);
    }

    #[test]
    // Purpose
    // -------
    // Verify that vectors survive a round trip through the backend
    // representation unchanged.
    //
    // Given
    // -----
    // - A length-4 vector with distinct entries.
    //
    // Expect
    // ------
    // - `to_array1(to_dvector(v))` equals `v`.
    fn vector_conversions_round_trip() {
        // Arrange
        let v = array![1.0, -1.0, 2.5, 0.0];

        // Act
        let round_tripped = to_array1(&to_dvector(&v));

        // Assert
        assert_eq!(round_tripped, v);
    }
}
