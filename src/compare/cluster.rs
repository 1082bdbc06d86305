//! compare::cluster — plumbing between identified models and an external
//! clustering stage.
//!
//! Purpose
//! -------
//! Model-space clustering needs two collaborators this crate does not
//! provide: a distance between two identified models and a clustering
//! algorithm over a distance matrix. Both are trait seams here; this
//! module contributes the driver that assembles the pairwise distance
//! matrix and the entry point that conditions it before delegation.
//!
//! Key behaviors
//! -------------
//! - `pairwise_distances` fills only the strict upper triangle, exactly
//!   one metric evaluation per unordered pair; the rest stays zero.
//! - `cluster` symmetrizes its input as `D' = D + Dᵗ − diag(D)` before
//!   delegating, which turns an upper-triangular matrix into the full
//!   symmetric one and leaves an already-symmetric matrix unchanged.
//!
//! Downstream usage
//! ----------------
//! - Batch pipelines identify models independently, run
//!   `pairwise_distances`, then `cluster`; both steps are synchronous and
//!   carry no shared state, so the distance loop parallelizes at the
//!   caller's discretion.

use ndarray::Array2;

use crate::errors::{DSError, DSResult};
use crate::systems::models::LinearDS;

/// Distance between two identified models.
///
/// Implementations bound the comparison by `max_order`, the number of
/// leading eigenmodes or subspace dimensions allowed to participate.
pub trait ModelDistance {
    fn distance(&self, one: &LinearDS, two: &LinearDS, max_order: usize) -> DSResult<f64>;
}

/// Clustering algorithm over a symmetric non-negative distance matrix.
///
/// Implementations receive the conditioned matrix from [`cluster`] and
/// return a low-dimensional embedding plus one representative row index
/// per cluster.
pub trait ClusterBackend {
    fn cluster(&self, distances: &Array2<f64>, k: usize) -> DSResult<Clustering>;
}

/// Clustering — the backend's embedding and chosen representatives.
///
/// Fields
/// ------
/// - `embedding`: one row per model, typically 2-D.
/// - `representatives`: one row index per cluster, the embedding point
///   closest to each cluster centroid.
#[derive(Debug, Clone)]
pub struct Clustering {
    pub embedding: Array2<f64>,
    pub representatives: Vec<usize>,
}

/// Assemble the pairwise distance matrix over a set of models.
///
/// Evaluates the metric once per unordered pair into the strict upper
/// triangle; the lower triangle and diagonal stay zero, which is the
/// layout [`cluster`] expects to symmetrize.
///
/// # Errors
/// Whatever the metric reports, typically `DSError::NotReady` for an
/// unidentified model.
pub fn pairwise_distances<M: ModelDistance>(
    metric: &M,
    models: &[LinearDS],
    max_order: usize,
) -> DSResult<Array2<f64>> {
    let n = models.len();
    let mut distances = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in (i + 1)..n {
            distances[(i, j)] = metric.distance(&models[i], &models[j], max_order)?;
        }
    }
    Ok(distances)
}

/// Condition a distance matrix and delegate to a clustering backend.
///
/// ## Steps
/// 1. Require a square matrix and a cluster count in `1..=n`.
/// 2. Symmetrize: `D' = D + Dᵗ − diag(D)`.
/// 3. Delegate to the backend.
///
/// # Errors
/// - `DSError::ShapeError` for a non-square matrix.
/// - `DSError::InvalidConfig` for a cluster count of zero or above the
///   model count.
/// - Whatever the backend reports.
pub fn cluster<B: ClusterBackend>(
    backend: &B,
    distances: &Array2<f64>,
    k: usize,
) -> DSResult<Clustering> {
    let n = distances.nrows();
    if n != distances.ncols() {
        return Err(DSError::ShapeError {
            what: "distance matrix must be square",
            rows: distances.nrows(),
            cols: distances.ncols(),
        });
    }
    if k == 0 || k > n {
        return Err(DSError::InvalidConfig {
            what: "cluster count must be positive and at most the model count",
        });
    }

    let mut symmetric = distances + &distances.t();
    for i in 0..n {
        symmetric[(i, i)] -= distances[(i, i)];
    }
    backend.cluster(&symmetric, k)
}
