//! systems — dynamical system models and their shared infrastructure.
//!
//! Purpose
//! -------
//! House everything needed to turn raw measurement sequences into working
//! models: validated observation containers, estimation and synthesis
//! configuration, the two model families (linear state-space systems and
//! systems over nonlinear embeddings), and streaming wrappers that
//! re-identify over a sliding window.
//!
//! Key behaviors
//! -------------
//! - Identify a [`LinearDS`] from a `d×t` observation matrix via subspace
//!   decomposition, with an exact or randomized SVD selected through
//!   [`SvdMethod`].
//! - Identify a [`NonLinearDS`] by delegating dimensionality reduction to a
//!   [`StateEmbedding`] implementation and estimating dynamics over the
//!   embedded states.
//! - Keep either family current against streams with [`OnlineLinearDS`] and
//!   [`OnlineNonLinearDS`], which re-fit on the cadence of a
//!   [`SlidingWindow`].
//! - Generate trajectories from ready linear models through
//!   [`LinearDS::synthesize`] configured by [`SynthesisOptions`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Data enters through [`Observations`], which guarantees non-empty,
//!   fully finite matrices; nothing downstream re-validates raw data.
//! - Models gate parameter access behind readiness: every accessor that
//!   needs estimates reports `NotReady` before the first successful
//!   `identify`.
//! - Estimated bundles ([`LdsParams`], [`NldsParams`]) are open structs;
//!   canonicalization and alignment consume them directly.
//!
//! Conventions
//! -----------
//! - Matrices are column-per-time-step throughout: observations `d×t`,
//!   states `k×t`.
//! - Configuration is plain data updated with struct-update syntax rather
//!   than builder chains.
//!
//! Downstream usage
//! ----------------
//! - Typical code imports the main surface in one line:
//!
//!   ```rust
//!   use rust_dynsys::systems::prelude::*;
//!   ```
//!
//! - The canonical-form and alignment subtrees consume ready models from
//!   here; synthesis consumes their parameter bundles.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its guards and estimation
//!   contracts; the crate-level integration test drives the full pipeline
//!   from raw observations to synthesized trajectories.

pub mod core;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::observations::Observations;
pub use self::core::options::{SvdMethod, SynthesisOptions};
pub use self::core::params::{LdsParams, NldsParams};
pub use self::core::window::SlidingWindow;
pub use self::models::linear::LinearDS;
pub use self::models::nonlinear::{naive_compare, NonLinearDS, StateEmbedding};
pub use self::models::online::{OnlineLinearDS, OnlineNonLinearDS};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_dynsys::systems::prelude::*;
//
// to import the modeling surface in a single line.

pub mod prelude {
    pub use super::core::observations::Observations;
    pub use super::core::options::{SvdMethod, SynthesisOptions};
    pub use super::core::params::{LdsParams, NldsParams};
    pub use super::models::linear::LinearDS;
    pub use super::models::nonlinear::{NonLinearDS, StateEmbedding};
    pub use super::models::online::{OnlineLinearDS, OnlineNonLinearDS};
}
