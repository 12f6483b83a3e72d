//! Layer Model Module
//!
//! Layers form the map's scene graph: a tree of geometric and visual
//! elements (tile sources, markers, vector shapes, overlays) with two
//! composite variants that nest arbitrarily. The variant set is closed;
//! third-party layer types enter only through [`Layer::Foreign`] and are
//! never clonable.
//!
//! `Layer` deliberately does not implement `Clone`. A structurally
//! detached copy is only available through the clone engine, which is the
//! single place that knows each variant's copy semantics.

mod options;

pub use options::{Clonable, OptionValue, Options, LAYERS_OPTION};

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;
use crate::geojson::{self, Feature};
use crate::geometry::{LatLng, LatLngBounds};

/// A third-party layer type the registry does not recognize
///
/// Carries just enough identity for diagnostics.
pub trait ForeignLayer: fmt::Debug + Send + Sync {
    /// Human-readable type name, reported when cloning fails
    fn type_name(&self) -> &str;
}

/// Classification tag for a recognized layer variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Svg,
    Canvas,
    WmsTileLayer,
    TileLayer,
    ImageOverlay,
    Marker,
    Popup,
    Circle,
    CircleMarker,
    Rectangle,
    Polygon,
    MultiPolyline,
    MultiPolygon,
    Polyline,
    GeoJson,
    FeatureGroup,
    LayerGroup,
    Tooltip,
}

impl LayerKind {
    pub fn name(&self) -> &'static str {
        match self {
            LayerKind::Svg => "svg-renderer",
            LayerKind::Canvas => "canvas-renderer",
            LayerKind::WmsTileLayer => "wms-tile-layer",
            LayerKind::TileLayer => "tile-layer",
            LayerKind::ImageOverlay => "image-overlay",
            LayerKind::Marker => "marker",
            LayerKind::Popup => "popup",
            LayerKind::Circle => "circle",
            LayerKind::CircleMarker => "circle-marker",
            LayerKind::Rectangle => "rectangle",
            LayerKind::Polygon => "polygon",
            LayerKind::MultiPolyline => "multi-polyline",
            LayerKind::MultiPolygon => "multi-polygon",
            LayerKind::Polyline => "polyline",
            LayerKind::GeoJson => "geojson",
            LayerKind::FeatureGroup => "feature-group",
            LayerKind::LayerGroup => "layer-group",
            LayerKind::Tooltip => "tooltip",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A popup bubble anchored to a geographic point
///
/// The constructor takes only options; position and content are applied
/// through setters afterwards, which is also how the clone engine
/// reconstructs one.
#[derive(Debug, Default)]
pub struct Popup {
    position: Option<LatLng>,
    content: String,
    options: Options,
}

impl Popup {
    pub fn new(options: Options) -> Self {
        Self {
            position: None,
            content: String::new(),
            options,
        }
    }

    pub fn set_lat_lng(&mut self, position: LatLng) -> &mut Self {
        self.position = Some(position);
        self
    }

    pub fn set_content(&mut self, content: impl Into<String>) -> &mut Self {
        self.content = content.into();
        self
    }

    pub fn lat_lng(&self) -> Option<LatLng> {
        self.position
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn options(&self) -> &Options {
        &self.options
    }
}

/// A layer backed by GeoJSON features
///
/// The feature list is mutable after construction; serializing through
/// [`GeoJsonLayer::to_geojson`] always reflects the current state, which
/// is what the clone engine rebuilds from.
#[derive(Debug)]
pub struct GeoJsonLayer {
    features: Vec<Feature>,
    options: Options,
}

impl GeoJsonLayer {
    /// Build a layer from any GeoJSON object (feature collection, single
    /// feature, or bare geometry)
    ///
    /// # Errors
    /// Returns an error if the value is not parseable GeoJSON.
    pub fn new(data: &Value, options: Options) -> Result<Self> {
        Ok(Self {
            features: geojson::features_from_value(data)?,
            options,
        })
    }

    pub fn from_features(features: Vec<Feature>, options: Options) -> Self {
        Self { features, options }
    }

    /// Append a feature to the layer
    pub fn add_feature(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Serialize the layer's current features as a `FeatureCollection`
    pub fn to_geojson(&self) -> Result<Value> {
        geojson::collection_to_value(&self.features)
    }

    pub fn options(&self) -> &Options {
        &self.options
    }
}

/// An ordered collection of child layers
///
/// Backs both composite variants. Children are structural data, not
/// configuration: a group's `Options` record never describes them.
/// Enumeration order follows insertion order, the de facto contract.
#[derive(Debug, Default)]
pub struct Group {
    children: Vec<Layer>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_layers(children: Vec<Layer>) -> Self {
        Self { children }
    }

    pub fn add_layer(&mut self, layer: Layer) -> &mut Self {
        self.children.push(layer);
        self
    }

    /// Visit every direct child in insertion order
    pub fn each_layer(&self, mut visit: impl FnMut(&Layer)) {
        for child in &self.children {
            visit(child);
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.children
    }
}

/// A map layer: one variant of the closed scene-graph union
#[derive(Debug)]
pub enum Layer {
    /// SVG vector renderer (configuration only, no geometry)
    Svg { options: Options },
    /// Canvas vector renderer (configuration only, no geometry)
    Canvas { options: Options },
    /// Tiled imagery served by a WMS endpoint
    WmsTileLayer { url: String, options: Options },
    /// Generic tiled imagery
    TileLayer { url: String, options: Options },
    /// A single static image stretched over geographic bounds
    ImageOverlay {
        url: String,
        bounds: LatLngBounds,
        options: Options,
    },
    /// A point marker
    Marker { position: LatLng, options: Options },
    /// A popup bubble with textual content
    Popup(Popup),
    /// A circle with a geographic (meter) radius
    Circle {
        center: LatLng,
        radius: f64,
        options: Options,
    },
    /// A circle marker with a fixed pixel radius (radius lives in options)
    CircleMarker { center: LatLng, options: Options },
    /// An axis-aligned rectangle
    Rectangle {
        bounds: LatLngBounds,
        options: Options,
    },
    /// A polygon, possibly with holes (one vertex ring per entry)
    Polygon {
        rings: Vec<Vec<LatLng>>,
        options: Options,
    },
    /// Deprecated multi-path polyline, kept for pre-1.0 scene graphs
    MultiPolyline {
        paths: Vec<Vec<LatLng>>,
        options: Options,
    },
    /// Deprecated multi-polygon, kept for pre-1.0 scene graphs
    MultiPolygon {
        polygons: Vec<Vec<Vec<LatLng>>>,
        options: Options,
    },
    /// A polyline with one or more paths
    Polyline {
        paths: Vec<Vec<LatLng>>,
        options: Options,
    },
    /// A GeoJSON-backed feature layer
    GeoJson(GeoJsonLayer),
    /// Composite: semantically grouped children
    FeatureGroup(Group),
    /// Composite: plain grouping of children
    LayerGroup(Group),
    /// A tooltip annotation; has no independent position once detached
    Tooltip { options: Options },
    /// A third-party layer outside the known variant set
    Foreign(Arc<dyn ForeignLayer>),
}

impl Layer {
    /// The layer's own configuration record, if the variant carries one
    ///
    /// Composites and foreign layers carry none.
    pub fn options(&self) -> Option<&Options> {
        match self {
            Layer::Svg { options }
            | Layer::Canvas { options }
            | Layer::WmsTileLayer { options, .. }
            | Layer::TileLayer { options, .. }
            | Layer::ImageOverlay { options, .. }
            | Layer::Marker { options, .. }
            | Layer::Circle { options, .. }
            | Layer::CircleMarker { options, .. }
            | Layer::Rectangle { options, .. }
            | Layer::Polygon { options, .. }
            | Layer::MultiPolyline { options, .. }
            | Layer::MultiPolygon { options, .. }
            | Layer::Polyline { options, .. }
            | Layer::Tooltip { options } => Some(options),
            Layer::Popup(popup) => Some(popup.options()),
            Layer::GeoJson(layer) => Some(layer.options()),
            Layer::FeatureGroup(_) | Layer::LayerGroup(_) | Layer::Foreign(_) => None,
        }
    }

    /// The composite body, if this layer is a group
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Layer::FeatureGroup(group) | Layer::LayerGroup(group) => Some(group),
            _ => None,
        }
    }
}
