//! compare — cross-model comparison tools.
//!
//! Identified models live in private state bases, so comparing them takes
//! either an explicit change of basis (`align`) or a basis-insensitive
//! distance supplied by the caller (`cluster`). The alignment path is
//! self-contained; the clustering path is deliberately a pair of trait
//! seams with only the matrix plumbing implemented here.

pub mod align;
pub mod cluster;

// ---- Re-exports (primary public surface) ----------------------------------

pub use align::{state_space_map, Alignment};
pub use cluster::{cluster, pairwise_distances, ClusterBackend, Clustering, ModelDistance};
