//! rust_dynsys — linear dynamical systems: identification, canonical
//! forms, cross-model comparison, and synthesis.
//!
//! Purpose
//! -------
//! Serve as the crate root for a self-contained dynamical-systems engine:
//! estimate linear-Gaussian state-space models from multivariate
//! observation sequences, reduce them to canonical coordinates, compare
//! and align models identified in different state bases, re-estimate
//! online over sliding windows, and generate synthetic trajectories from
//! fitted parameters.
//!
//! Key behaviors
//! -------------
//! - `systems` owns the model types (`LinearDS`, `NonLinearDS`, their
//!   online wrappers) and the shared identification machinery; its
//!   `prelude` is the convenient import for callers.
//! - `canonical` removes the state-basis ambiguity of identified models
//!   through the real Jordan form and the canonical similarity transform.
//! - `compare` aligns one model into another's basis and plumbs distance
//!   matrices into an external clustering stage.
//! - `synthesis` runs identified parameters forward as a generator with
//!   switchable noise sources.
//! - `linalg` is the internal facade over the dense backend; callers see
//!   `ndarray` types everywhere.
//!
//! Invariants & assumptions
//! ------------------------
//! - Observation matrices are D×T with one column per time step; state
//!   trajectories are k×T in the same convention.
//! - Every operation needing a fitted model goes through a readiness
//!   gate; partially populated parameter bundles are unrepresentable.
//! - Numerical degeneracies that the algorithms survive (rank-deficient
//!   solves, near-zero normalizers, singular transforms) surface as
//!   `NumericalWarning` values next to the result, never as silent NaN
//!   propagation.
//!
//! Conventions
//! -----------
//! - All computation is synchronous and CPU-bound; nothing blocks, and no
//!   state is shared between model instances, so batch callers can run
//!   one model per worker without coordination.
//! - Mutating operations (`identify`, `update`) act on `&mut self`;
//!   transforming operations (canonicalization, alignment, synthesis)
//!   return new values and leave their inputs untouched.
//! - Diagnostics use `tracing` at debug/warn level; results never depend
//!   on a subscriber being installed.
//!
//! Downstream usage
//! ----------------
//! - Model types and parameter bundles serialize with `serde` for a
//!   surrounding persistence layer; the crate fixes no wire format.
//! - Clustering and model-distance algorithms stay behind the trait seams
//!   in `compare::cluster`.
//!
//! Testing notes
//! -------------
//! - Each module carries unit tests next to the code; the end-to-end
//!   identification/canonicalization/synthesis path and its invariance
//!   properties live in `tests/integration_lds_pipeline.rs`.

pub mod canonical;
pub mod compare;
pub mod errors;
pub mod linalg;
pub mod synthesis;
pub mod systems;

// ---- Re-exports (primary public surface) ----------------------------------

pub use errors::{DSError, DSResult, NumericalWarning};
