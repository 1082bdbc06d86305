//! systems::core — shared building blocks of the model layer.
//!
//! Purpose
//! -------
//! House everything the model families have in common: validated
//! observation containers, estimation and synthesis configuration, the
//! parameter bundles identification produces, the snapshot regression both
//! families estimate dynamics with, and the sliding window behind the
//! online variants.
//!
//! Conventions
//! -----------
//! - Data enters through [`Observations`] and is never re-validated
//!   downstream.
//! - Parameter bundles are open structs; readiness gating lives on the
//!   models, not here.

pub mod observations;
pub mod options;
pub mod params;
pub(crate) mod transition;
pub mod window;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::observations::Observations;
pub use self::options::{SvdMethod, SynthesisOptions};
pub use self::params::{LdsParams, NldsParams};
pub use self::window::SlidingWindow;
