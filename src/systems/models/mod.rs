//! systems::models — the model families.
//!
//! Purpose
//! -------
//! Group the estimable systems: the linear family with its subspace
//! identification, the nonlinear family over caller-supplied embeddings,
//! and the streaming wrappers that keep either family current against a
//! sample stream.

pub mod linear;
pub mod nonlinear;
pub mod online;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::linear::LinearDS;
pub use self::nonlinear::{naive_compare, NonLinearDS, StateEmbedding};
pub use self::online::{OnlineLinearDS, OnlineNonLinearDS};
