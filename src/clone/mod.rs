//! Clone Engine Module
//!
//! The polymorphic clone engine:
//! - configuration deep-copy with per-category value semantics
//! - ordered variant classification
//! - recursive, best-effort layer tree reconstruction

mod engine;
mod table;

pub use engine::{CloneEngine, CloneEvent};
