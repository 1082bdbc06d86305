//! canonical — canonical forms and coordinates for identified models.
//!
//! Identified state-space models are only defined up to an invertible
//! change of state basis. This subtree removes that freedom: `rjf`
//! computes the real Jordan form with a deterministic block layout, and
//! `jcf` turns it into a similarity transform that moves a model onto a
//! canonical representative, making independently identified models
//! directly comparable.

pub mod jcf;
pub mod rjf;

// ---- Re-exports (primary public surface) ----------------------------------

pub use jcf::{convert_to_jcf, jcf_transform, jcf_transform_with, CanonicalLds, JcfTransform};
pub use rjf::{real_jordan_form, real_jordan_form_with, JordanOptions, RealJordanForm};
