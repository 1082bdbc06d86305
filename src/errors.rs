//! errors — shared error types and numerical-warning values.
//!
//! Purpose
//! -------
//! Provide the crate-wide error enum [`DSError`], the result alias
//! [`DSResult`], and the non-error [`NumericalWarning`] value used to surface
//! numerical degeneracies alongside otherwise successful results. Every
//! fallible operation in the crate reports through these types; none panic on
//! user-facing invalid input.
//!
//! Key behaviors
//! -------------
//! - Group failures into a small set of kinds: construction, input
//!   validation, shape constraints, readiness, configuration, and backend
//!   numerical failures.
//! - Attach human-readable `Display` messages phrased as domain constraints,
//!   embedding the offending dimensions or values.
//! - Keep numerical degeneracies (near-zero normalizers, deficient
//!   eigenbases, singular transforms, rank-deficient least squares) out of
//!   the error channel: they are reported as [`NumericalWarning`] values
//!   carried in outcome structs, so callers see both the result and the
//!   degeneracy instead of silent NaN propagation.
//!
//! Invariants & assumptions
//! ------------------------
//! - Errors are raised synchronously at the call that detects them and are
//!   never retried internally; retry is a caller policy.
//! - `DSError` values are small, cheap to clone, and carry just enough
//!   payload (dimensions, coordinates, values) for diagnostics without
//!   owning large matrices.
//!
//! Conventions
//! -----------
//! - `ShapeError` payloads report the offending dimensions as observed; the
//!   `what` text names the violated constraint.
//! - `NonFiniteInput` reports matrix coordinates `(row, col)`; for vector
//!   inputs the column index is 0.
//!
//! Downstream usage
//! ----------------
//! - All public operations return [`DSResult<T>`]; callers match on
//!   [`DSError`] variants for recovery or logging.
//! - Canonicalization outcomes ([`crate::canonical`]) expose
//!   `warnings: Vec<NumericalWarning>`; an empty vector means the
//!   computation saw no degeneracy.
//!
//! Testing notes
//! -------------
//! - Unit tests here verify that each variant's `Display` message embeds its
//!   payload. Error *raising* is exercised by the modules that own the
//!   corresponding guards.

pub type DSResult<T> = Result<T, DSError>;

/// DSError — failure conditions across the dynamical-system engine.
///
/// Purpose
/// -------
/// Represent all validation and computation failures raised by model
/// construction, identification, canonicalization, alignment, windowed
/// estimation, and synthesis.
///
/// Variants
/// --------
/// - `InvalidConstruction { what }`
///   A constructor argument violates a structural constraint (zero shift
///   count, zero window capacity, window shorter than the order requires).
/// - `InvalidInput { what, rows, cols }`
///   An observation matrix or state trajectory cannot be used: too few
///   columns for the requested order, empty input, or an order exceeding
///   what the input can support. `rows`/`cols` are the offending dimensions.
/// - `NonFiniteInput { row, col, value }`
///   A NaN or infinite entry was found at the given coordinates.
/// - `ShapeError { what, rows, cols }`
///   A matrix fails a shape constraint (non-square input to a Jordan-form
///   routine, mismatched state dimensions between operands, inconsistent
///   buffered vector lengths).
/// - `NotReady { op }`
///   The named operation requires a fully populated model but was invoked
///   on one that has not been identified.
/// - `InvalidConfig { what }`
///   A configuration record is unusable (zero synthesis horizon while
///   simulating states, cluster count outside `1..=n`).
/// - `NumericalFailure { op }`
///   A backend decomposition (SVD, Schur) failed to converge within its
///   iteration cap. Distinct from [`NumericalWarning`], which accompanies a
///   *successful* result.
///
/// Invariants
/// ----------
/// - Payloads are copies of scalars observed at the failure site; no matrix
///   data is captured.
///
/// Notes
/// -----
/// - Implements [`std::error::Error`] and [`std::fmt::Display`] for
///   idiomatic `?`-based propagation.
#[derive(Debug, Clone, PartialEq)]
pub enum DSError {
    //------ Construction ------
    InvalidConstruction { what: &'static str },
    //------ Input validation ------
    InvalidInput { what: &'static str, rows: usize, cols: usize },
    NonFiniteInput { row: usize, col: usize, value: f64 },
    ShapeError { what: &'static str, rows: usize, cols: usize },
    //------ Lifecycle & configuration ------
    NotReady { op: &'static str },
    InvalidConfig { what: &'static str },
    //------ Backend ------
    NumericalFailure { op: &'static str },
}

impl std::error::Error for DSError {}

impl std::fmt::Display for DSError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DSError::InvalidConstruction { what } => {
                write!(f, "Invalid construction: {what}.")
            }
            DSError::InvalidInput { what, rows, cols } => {
                write!(f, "Invalid input: {what} (got {rows} x {cols}).")
            }
            DSError::NonFiniteInput { row, col, value } => {
                write!(f, "Non-finite value {value} at ({row}, {col}). All entries must be finite.")
            }
            DSError::ShapeError { what, rows, cols } => {
                write!(f, "Shape constraint violated: {what} (got {rows} x {cols}).")
            }
            DSError::NotReady { op } => {
                write!(f, "Model is not ready: {op} requires a successful identification first.")
            }
            DSError::InvalidConfig { what } => {
                write!(f, "Invalid configuration: {what}.")
            }
            DSError::NumericalFailure { op } => {
                write!(f, "Numerical backend failure: {op} did not converge.")
            }
        }
    }
}

/// NumericalWarning — degeneracy observed during an otherwise successful run.
///
/// Purpose
/// -------
/// Carry numerical-fragility reports alongside results instead of either
/// failing the whole computation or silently propagating Inf/NaN. Outcome
/// structs in [`crate::canonical`] collect these; callers decide whether a
/// degenerate result is acceptable.
///
/// Variants
/// --------
/// - `SmallNormalizer { column, magnitude }`
///   A real eigenvector's first coordinate fell below the configured epsilon
///   before the canonical normalization divided by it.
/// - `DegenerateEigenbasis { re, im, occurrence, residual }`
///   A repeated eigenvalue did not yield enough independent null directions;
///   the reported occurrence was filled with a non-null singular vector whose
///   residual `‖(A − λI)v‖` is given.
/// - `SingularTransform { what }`
///   A built similarity transform was not invertible; the pseudo-inverse was
///   used in its place.
/// - `RankDeficientPinv { expected, actual }`
///   A least-squares solve truncated singular values below its cutoff and
///   operated at lower rank than the system nominally has.
///
/// Notes
/// -----
/// - Not an error type on purpose: every variant accompanies a delivered
///   result. Sites that emit one also emit a `tracing` warn event.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericalWarning {
    SmallNormalizer { column: usize, magnitude: f64 },
    DegenerateEigenbasis { re: f64, im: f64, occurrence: usize, residual: f64 },
    SingularTransform { what: &'static str },
    RankDeficientPinv { expected: usize, actual: usize },
}

impl std::fmt::Display for NumericalWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericalWarning::SmallNormalizer { column, magnitude } => {
                write!(
                    f,
                    "eigenvector normalizer for column {column} has magnitude {magnitude}, \
                     below the configured epsilon"
                )
            }
            NumericalWarning::DegenerateEigenbasis { re, im, occurrence, residual } => {
                write!(
                    f,
                    "eigenvalue {re}{im:+}i (occurrence {occurrence}) has no further null \
                     direction; filled with a vector of residual {residual}"
                )
            }
            NumericalWarning::SingularTransform { what } => {
                write!(f, "{what} is singular; pseudo-inverse used in place of the inverse")
            }
            NumericalWarning::RankDeficientPinv { expected, actual } => {
                write!(f, "least-squares system has rank {actual}, expected {expected}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `Display` formatting for DSError variants, including payload embedding.
    // - `Display` formatting for NumericalWarning variants.
    //
    // They intentionally DO NOT cover:
    // - The raising of these errors, which is exercised where the guards live
    //   (observation containers, models, canonicalization, synthesis).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `DSError::InvalidInput` embeds both offending dimensions
    // in its `Display` representation.
    //
    // Given
    // -----
    // - An `InvalidInput` with rows = 12 and cols = 3.
    //
    // Expect
    // ------
    // - `format!("{err}")` contains "12" and "3".
    fn ds_error_invalid_input_includes_dimensions_in_display() {
        // Arrange
        let err = DSError::InvalidInput {
            what: "need at least n_states + 1 observation columns",
            rows: 12,
            cols: 3,
        };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("12"), "Display should include row count.\nGot: {msg}");
        assert!(msg.contains('3'), "Display should include column count.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `DSError::NonFiniteInput` reports the offending value and
    // its coordinates.
    //
    // Given
    // -----
    // - A `NonFiniteInput` at (2, 7) with a NaN payload.
    //
    // Expect
    // ------
    // - `format!("{err}")` contains "2", "7", and "NaN".
    fn ds_error_non_finite_input_includes_coordinates_in_display() {
        // Arrange
        let err = DSError::NonFiniteInput { row: 2, col: 7, value: f64::NAN };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains('2') && msg.contains('7'), "coordinates missing.\nGot: {msg}");
        assert!(msg.contains("NaN"), "non-finite payload missing.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `DSError::NotReady` names the operation that required a
    // populated model.
    //
    // Given
    // -----
    // - A `NotReady` for the synthesize operation.
    //
    // Expect
    // ------
    // - `format!("{err}")` contains "synthesize".
    fn ds_error_not_ready_names_operation_in_display() {
        // Arrange
        let err = DSError::NotReady { op: "synthesize" };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("synthesize"), "operation name missing.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `NumericalWarning::RankDeficientPinv` embeds both the
    // expected and the observed rank.
    //
    // Given
    // -----
    // - A `RankDeficientPinv` with expected = 25 and actual = 23.
    //
    // Expect
    // ------
    // - `format!("{warning}")` contains "25" and "23".
    fn numerical_warning_rank_deficient_pinv_includes_ranks_in_display() {
        // Arrange
        let warning = NumericalWarning::RankDeficientPinv { expected: 25, actual: 23 };

        // Act
        let msg = warning.to_string();

        // Assert
        assert!(msg.contains("25"), "expected rank missing.\nGot: {msg}");
        assert!(msg.contains("23"), "actual rank missing.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `NumericalWarning::SmallNormalizer` reports the affected
    // column index.
    //
    // Given
    // -----
    // - A `SmallNormalizer` for column 4.
    //
    // Expect
    // ------
    // - `format!("{warning}")` contains "4".
    fn numerical_warning_small_normalizer_includes_column_in_display() {
        // Arrange
        let warning = NumericalWarning::SmallNormalizer { column: 4, magnitude: 1e-15 };

        // Act
        let msg = warning.to_string();

        // Assert
        assert!(msg.contains('4'), "column index missing.\nGot: {msg}");
    }
}
