//! Ordered variant dispatch table
//!
//! One entry per recognized layer variant, in priority order: most
//! specific first, so an input that would satisfy several categories is
//! attributed to its most specific one (WMS before generic tiles,
//! rectangle before polygon before polyline, feature group before plain
//! group). Classification and reconstruction both walk this table, which
//! keeps the two views of "what variant is this" in a single place.

use crate::clone::engine::{CloneEngine, CloneEvent};
use crate::layer::{GeoJsonLayer, Group, Layer, LayerKind, Popup};

pub(crate) struct VariantEntry {
    pub kind: LayerKind,
    pub matches: fn(&Layer) -> bool,
    pub reconstruct: fn(&CloneEngine, &Layer) -> Option<Layer>,
}

pub(crate) static VARIANT_TABLE: &[VariantEntry] = &[
    VariantEntry {
        kind: LayerKind::Svg,
        matches: |layer| matches!(layer, Layer::Svg { .. }),
        reconstruct: clone_svg,
    },
    VariantEntry {
        kind: LayerKind::Canvas,
        matches: |layer| matches!(layer, Layer::Canvas { .. }),
        reconstruct: clone_canvas,
    },
    VariantEntry {
        kind: LayerKind::WmsTileLayer,
        matches: |layer| matches!(layer, Layer::WmsTileLayer { .. }),
        reconstruct: clone_wms_tile_layer,
    },
    VariantEntry {
        kind: LayerKind::TileLayer,
        matches: |layer| matches!(layer, Layer::TileLayer { .. }),
        reconstruct: clone_tile_layer,
    },
    VariantEntry {
        kind: LayerKind::ImageOverlay,
        matches: |layer| matches!(layer, Layer::ImageOverlay { .. }),
        reconstruct: clone_image_overlay,
    },
    VariantEntry {
        kind: LayerKind::Marker,
        matches: |layer| matches!(layer, Layer::Marker { .. }),
        reconstruct: clone_marker,
    },
    VariantEntry {
        kind: LayerKind::Popup,
        matches: |layer| matches!(layer, Layer::Popup(_)),
        reconstruct: clone_popup,
    },
    VariantEntry {
        kind: LayerKind::Circle,
        matches: |layer| matches!(layer, Layer::Circle { .. }),
        reconstruct: clone_circle,
    },
    VariantEntry {
        kind: LayerKind::CircleMarker,
        matches: |layer| matches!(layer, Layer::CircleMarker { .. }),
        reconstruct: clone_circle_marker,
    },
    VariantEntry {
        kind: LayerKind::Rectangle,
        matches: |layer| matches!(layer, Layer::Rectangle { .. }),
        reconstruct: clone_rectangle,
    },
    VariantEntry {
        kind: LayerKind::Polygon,
        matches: |layer| matches!(layer, Layer::Polygon { .. }),
        reconstruct: clone_polygon,
    },
    VariantEntry {
        kind: LayerKind::MultiPolyline,
        matches: |layer| matches!(layer, Layer::MultiPolyline { .. }),
        reconstruct: clone_multi_polyline,
    },
    VariantEntry {
        kind: LayerKind::MultiPolygon,
        matches: |layer| matches!(layer, Layer::MultiPolygon { .. }),
        reconstruct: clone_multi_polygon,
    },
    VariantEntry {
        kind: LayerKind::Polyline,
        matches: |layer| matches!(layer, Layer::Polyline { .. }),
        reconstruct: clone_polyline,
    },
    VariantEntry {
        kind: LayerKind::GeoJson,
        matches: |layer| matches!(layer, Layer::GeoJson(_)),
        reconstruct: clone_geojson,
    },
    VariantEntry {
        kind: LayerKind::FeatureGroup,
        matches: |layer| matches!(layer, Layer::FeatureGroup(_)),
        reconstruct: clone_feature_group,
    },
    VariantEntry {
        kind: LayerKind::LayerGroup,
        matches: |layer| matches!(layer, Layer::LayerGroup(_)),
        reconstruct: clone_layer_group,
    },
    VariantEntry {
        kind: LayerKind::Tooltip,
        matches: |layer| matches!(layer, Layer::Tooltip { .. }),
        reconstruct: clone_tooltip,
    },
];

fn clone_svg(engine: &CloneEngine, layer: &Layer) -> Option<Layer> {
    let Layer::Svg { options } = layer else {
        return None;
    };
    Some(Layer::Svg {
        options: engine.clone_options(options),
    })
}

fn clone_canvas(engine: &CloneEngine, layer: &Layer) -> Option<Layer> {
    let Layer::Canvas { options } = layer else {
        return None;
    };
    Some(Layer::Canvas {
        options: engine.clone_options(options),
    })
}

fn clone_wms_tile_layer(engine: &CloneEngine, layer: &Layer) -> Option<Layer> {
    let Layer::WmsTileLayer { url, options } = layer else {
        return None;
    };
    Some(Layer::WmsTileLayer {
        url: url.clone(),
        options: engine.clone_options(options),
    })
}

fn clone_tile_layer(engine: &CloneEngine, layer: &Layer) -> Option<Layer> {
    let Layer::TileLayer { url, options } = layer else {
        return None;
    };
    Some(Layer::TileLayer {
        url: url.clone(),
        options: engine.clone_options(options),
    })
}

fn clone_image_overlay(engine: &CloneEngine, layer: &Layer) -> Option<Layer> {
    let Layer::ImageOverlay {
        url,
        bounds,
        options,
    } = layer
    else {
        return None;
    };
    Some(Layer::ImageOverlay {
        url: url.clone(),
        bounds: *bounds,
        options: engine.clone_options(options),
    })
}

fn clone_marker(engine: &CloneEngine, layer: &Layer) -> Option<Layer> {
    let Layer::Marker { position, options } = layer else {
        return None;
    };
    Some(Layer::Marker {
        position: *position,
        options: engine.clone_options(options),
    })
}

// The popup constructor takes only options; position and content go
// through its setters, same as a caller would.
fn clone_popup(engine: &CloneEngine, layer: &Layer) -> Option<Layer> {
    let Layer::Popup(source) = layer else {
        return None;
    };
    let mut popup = Popup::new(engine.clone_options(source.options()));
    if let Some(position) = source.lat_lng() {
        popup.set_lat_lng(position);
    }
    popup.set_content(source.content());
    Some(Layer::Popup(popup))
}

fn clone_circle(engine: &CloneEngine, layer: &Layer) -> Option<Layer> {
    let Layer::Circle {
        center,
        radius,
        options,
    } = layer
    else {
        return None;
    };
    Some(Layer::Circle {
        center: *center,
        radius: *radius,
        options: engine.clone_options(options),
    })
}

fn clone_circle_marker(engine: &CloneEngine, layer: &Layer) -> Option<Layer> {
    let Layer::CircleMarker { center, options } = layer else {
        return None;
    };
    Some(Layer::CircleMarker {
        center: *center,
        options: engine.clone_options(options),
    })
}

fn clone_rectangle(engine: &CloneEngine, layer: &Layer) -> Option<Layer> {
    let Layer::Rectangle { bounds, options } = layer else {
        return None;
    };
    Some(Layer::Rectangle {
        bounds: *bounds,
        options: engine.clone_options(options),
    })
}

fn clone_polygon(engine: &CloneEngine, layer: &Layer) -> Option<Layer> {
    let Layer::Polygon { rings, options } = layer else {
        return None;
    };
    Some(Layer::Polygon {
        rings: rings.clone(),
        options: engine.clone_options(options),
    })
}

// The multi-polyline variant was dropped upstream; its clone is a modern
// polyline with the same paths.
fn clone_multi_polyline(engine: &CloneEngine, layer: &Layer) -> Option<Layer> {
    let Layer::MultiPolyline { paths, options } = layer else {
        return None;
    };
    Some(Layer::Polyline {
        paths: paths.clone(),
        options: engine.clone_options(options),
    })
}

fn clone_multi_polygon(engine: &CloneEngine, layer: &Layer) -> Option<Layer> {
    let Layer::MultiPolygon { polygons, options } = layer else {
        return None;
    };
    Some(Layer::MultiPolygon {
        polygons: polygons.clone(),
        options: engine.clone_options(options),
    })
}

fn clone_polyline(engine: &CloneEngine, layer: &Layer) -> Option<Layer> {
    let Layer::Polyline { paths, options } = layer else {
        return None;
    };
    Some(Layer::Polyline {
        paths: paths.clone(),
        options: engine.clone_options(options),
    })
}

// Serialize-out and rebuild rather than copying fields, so the clone
// reflects the layer's current geometry even after mutation.
fn clone_geojson(engine: &CloneEngine, layer: &Layer) -> Option<Layer> {
    let Layer::GeoJson(source) = layer else {
        return None;
    };
    let serialized = match source.to_geojson() {
        Ok(value) => value,
        Err(error) => {
            engine.emit(&CloneEvent::GeoJsonRoundTripFailed {
                reason: error.to_string(),
            });
            return None;
        }
    };
    match GeoJsonLayer::new(&serialized, engine.clone_options(source.options())) {
        Ok(rebuilt) => Some(Layer::GeoJson(rebuilt)),
        Err(error) => {
            engine.emit(&CloneEvent::GeoJsonRoundTripFailed {
                reason: error.to_string(),
            });
            None
        }
    }
}

fn clone_feature_group(engine: &CloneEngine, layer: &Layer) -> Option<Layer> {
    matches!(layer, Layer::FeatureGroup(_)).then(|| {
        Layer::FeatureGroup(Group::from_layers(engine.clone_inner_layers(layer)))
    })
}

fn clone_layer_group(engine: &CloneEngine, layer: &Layer) -> Option<Layer> {
    matches!(layer, Layer::LayerGroup(_))
        .then(|| Layer::LayerGroup(Group::from_layers(engine.clone_inner_layers(layer))))
}

// Tooltips carry no independent position once detached from their owning
// layer, so cloning one is a designed no-op, not a failure.
fn clone_tooltip(_engine: &CloneEngine, _layer: &Layer) -> Option<Layer> {
    None
}
