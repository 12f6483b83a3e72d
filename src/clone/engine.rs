//! Clone engine
//!
//! Deep-copies configuration records and layer trees. Every operation is
//! a pure, synchronous traversal: the engine reads from the source tree
//! and allocates a disjoint new tree, keeping no state between calls
//! beyond the injected diagnostics sink.
//!
//! Failure is always best-effort degradation, never an error: a layer
//! that cannot be cloned contributes nothing to the copy, and the
//! traversal keeps going for its siblings.

use crate::clone::table::VARIANT_TABLE;
use crate::layer::{Layer, LayerKind, OptionValue, Options, LAYERS_OPTION};

/// Version string reported alongside unrecognized-layer diagnostics
const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A non-fatal diagnostic emitted during cloning
#[derive(Debug)]
pub enum CloneEvent<'a> {
    /// No known variant matched the input layer; its subtree was dropped
    UnrecognizedLayer {
        type_name: &'a str,
        engine_version: &'static str,
    },
    /// A geojson layer failed to serialize or rebuild and was dropped
    GeoJsonRoundTripFailed { reason: String },
}

type DiagnosticSink = Box<dyn Fn(&CloneEvent<'_>) + Send + Sync>;

/// The polymorphic clone engine
///
/// Stateless across calls. Construct one per use or share one freely;
/// classification and cloning are deterministic either way.
pub struct CloneEngine {
    diagnostics: DiagnosticSink,
}

impl Default for CloneEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CloneEngine {
    /// Create an engine whose diagnostics go to the `log` facade
    pub fn new() -> Self {
        Self {
            diagnostics: Box::new(|event| match event {
                CloneEvent::UnrecognizedLayer {
                    type_name,
                    engine_version,
                } => {
                    log::info!(
                        "unknown layer '{}', cannot clone this layer (mapstamp {})",
                        type_name,
                        engine_version
                    );
                }
                CloneEvent::GeoJsonRoundTripFailed { reason } => {
                    log::warn!("geojson layer dropped from clone: {}", reason);
                }
            }),
        }
    }

    /// Create an engine with a caller-supplied diagnostics sink
    ///
    /// The sink observes unrecognized-variant and round-trip-failure
    /// events without the engine depending on any concrete logging
    /// mechanism.
    pub fn with_diagnostics(sink: impl Fn(&CloneEvent<'_>) + Send + Sync + 'static) -> Self {
        Self {
            diagnostics: Box::new(sink),
        }
    }

    pub(crate) fn emit(&self, event: &CloneEvent<'_>) {
        (self.diagnostics)(event);
    }

    /// Deep-copy a configuration record
    ///
    /// Per entry: a self-duplicating value yields its duplicate, an
    /// embedded layer is cloned recursively, everything else passes
    /// through (plain data by value, shared references by reference).
    /// An embedded layer that fails to clone drops its entry. The result
    /// is always a fresh record; an empty input yields an empty output.
    pub fn clone_options(&self, options: &Options) -> Options {
        options
            .iter()
            .filter_map(|(name, value)| {
                self.clone_value(value)
                    .map(|cloned| (name.to_string(), cloned))
            })
            .collect()
    }

    /// Deep-copy a configuration record, minus the reserved `"layers"` key
    ///
    /// Group membership is structural, not configuration; it is
    /// reconstructed separately and must not be double-copied. The rest
    /// of the record goes through [`CloneEngine::clone_options`].
    pub fn clone_basic_options_without_layers(&self, options: &Options) -> Options {
        options
            .iter()
            .filter(|(name, _)| *name != LAYERS_OPTION)
            .filter_map(|(name, value)| {
                self.clone_value(value)
                    .map(|cloned| (name.to_string(), cloned))
            })
            .collect()
    }

    fn clone_value(&self, value: &OptionValue) -> Option<OptionValue> {
        match value {
            OptionValue::Plain(plain) => Some(OptionValue::Plain(plain.clone())),
            OptionValue::Shared(reference) => {
                Some(OptionValue::Shared(std::sync::Arc::clone(reference)))
            }
            OptionValue::Custom(clonable) => Some(OptionValue::Custom(clonable.duplicate())),
            OptionValue::Layer(layer) => self
                .clone_layer(layer)
                .map(|cloned| OptionValue::Layer(Box::new(cloned))),
        }
    }

    /// Classify a layer against the ordered variant table
    ///
    /// Returns `None` for foreign layers. Pure and deterministic: the
    /// same variant always yields the same tag.
    pub fn classify(&self, layer: &Layer) -> Option<LayerKind> {
        VARIANT_TABLE
            .iter()
            .find(|entry| (entry.matches)(layer))
            .map(|entry| entry.kind)
    }

    /// Produce a detached clone of a layer, or `None` if it cannot be
    /// cloned
    ///
    /// Tooltips are a designed no-op. An unrecognized layer emits a
    /// diagnostic and returns `None`; it never panics. Composites clone
    /// recursively, dropping children that fail.
    pub fn clone_layer(&self, layer: &Layer) -> Option<Layer> {
        for entry in VARIANT_TABLE {
            if (entry.matches)(layer) {
                return (entry.reconstruct)(self, layer);
            }
        }

        let type_name = match layer {
            Layer::Foreign(foreign) => foreign.type_name(),
            _ => "unknown",
        };
        self.emit(&CloneEvent::UnrecognizedLayer {
            type_name,
            engine_version: ENGINE_VERSION,
        });
        None
    }

    /// Clone every direct child of a composite layer
    ///
    /// Children that fail to clone are skipped; survivors keep their
    /// relative order. A non-composite input, or a composite with no
    /// clonable children, yields an empty sequence.
    pub fn clone_inner_layers(&self, layer: &Layer) -> Vec<Layer> {
        let mut cloned = Vec::new();
        if let Some(group) = layer.as_group() {
            group.each_layer(|child| {
                if let Some(copy) = self.clone_layer(child) {
                    cloned.push(copy);
                }
            });
        }
        cloned
    }
}
