//! Print snapshot surface
//!
//! The thin boundary consumed by a print orchestrator: given a handle on
//! the live map, produce a fully detached copy of its attached layers and
//! its own configuration record, ready to hand to a disposable rendering
//! surface. Which renderer configuration to carry over, and destroying
//! the temporary surface afterwards, remain the orchestrator's job.

use crate::clone::CloneEngine;
use crate::layer::{Layer, Options};

/// A minimal handle on the live scene: attached layers plus the map's own
/// options (view, zoom, active renderer, and so on — forwarded opaquely)
#[derive(Debug, Default)]
pub struct Map {
    layers: Vec<Layer>,
    options: Options,
}

impl Map {
    pub fn new(options: Options) -> Self {
        Self {
            layers: Vec::new(),
            options,
        }
    }

    /// Attach a layer; attachment order is preserved in snapshots
    pub fn add_layer(&mut self, layer: Layer) -> &mut Self {
        self.layers.push(layer);
        self
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn options(&self) -> &Options {
        &self.options
    }
}

/// A detached copy of a live map, safe to mutate and dispose
#[derive(Debug)]
pub struct PrintSnapshot {
    /// Clones of the map's attached layers, unclonable ones dropped
    pub layers: Vec<Layer>,
    /// Clone of the map's own options, minus the reserved `"layers"` key
    pub options: Options,
}

/// Take a detached snapshot of a live map
///
/// Best-effort: attached layers that cannot be cloned are omitted, with
/// the survivors keeping their attachment order.
pub fn snapshot(map: &Map, engine: &CloneEngine) -> PrintSnapshot {
    let layers = map
        .layers()
        .iter()
        .filter_map(|layer| engine.clone_layer(layer))
        .collect();
    PrintSnapshot {
        layers,
        options: engine.clone_basic_options_without_layers(map.options()),
    }
}
