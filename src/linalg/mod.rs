//! linalg — shared dense linear algebra used across the engine.
//!
//! Purpose
//! -------
//! Keep every decomposition the engine performs behind one small internal
//! surface. The public plane of the crate speaks `ndarray`; the numerical
//! backend is `nalgebra`. This module owns both the conversions between the
//! two and the SVD/eigen primitives built on the backend, so the rest of the
//! crate never mixes matrix types ad hoc.
//!
//! Submodules
//! ----------
//! - `bridge`: loss-free conversions between `ndarray` and `nalgebra` types.
//! - `svd`: thin and randomized SVD, pseudo-inverse with rank reporting,
//!   orthonormal range bases.
//! - `eig`: complex eigenvalues and null-space eigenvector extraction.
//!
//! Conventions
//! -----------
//! - Iterative decompositions share one iteration cap and report
//!   non-convergence as `DSError::NumericalFailure`; nothing in this module
//!   panics on numerical trouble.

pub(crate) mod bridge;
pub(crate) mod eig;
pub(crate) mod svd;

/// Iteration cap shared by every backend decomposition (SVD and Schur).
///
/// Generous for the matrix orders this crate works at; hitting it indicates
/// a genuinely pathological input rather than a tight budget.
pub(crate) const MAX_BACKEND_ITERS: usize = 10_000;

// ---- Re-exports (primary public surface) ----------------------------------

pub use svd::orth;
