//! Mapstamp - Detached Copies of Live Map Scenes
//!
//! Mapstamp deep-copies a mutable map scene graph — tiles, markers,
//! vector shapes, overlays, nested groups — into a structurally
//! equivalent tree that shares no mutable state with the original, so it
//! can be rendered into an isolated, disposable context such as a print
//! surface.
//!
//! # Architecture
//!
//! - [`layer`]: the closed layer union and its configuration records
//! - [`clone`]: the polymorphic clone engine (classification,
//!   configuration deep-copy, recursive reconstruction)
//! - [`print`]: the thin snapshot surface a print orchestrator consumes
//!
//! Cloning is best-effort by design: a layer that cannot be cloned
//! (tooltips, unrecognized third-party types) is dropped with a
//! non-fatal diagnostic rather than failing the whole copy.

pub mod clone;
pub mod error;
pub mod geojson;
pub mod geometry;
pub mod layer;
pub mod print;

pub use clone::{CloneEngine, CloneEvent};
pub use error::{MapstampError, Result};
pub use geometry::{LatLng, LatLngBounds};
pub use layer::{Layer, LayerKind, Options};
