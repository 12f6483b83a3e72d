//! Integration Tests
//!
//! End-to-end properties of the clone engine over whole scene graphs.

use std::any::Any;
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

use mapstamp::clone::{CloneEngine, CloneEvent};
use mapstamp::geojson::{Feature, Geometry};
use mapstamp::layer::{Clonable, ForeignLayer, GeoJsonLayer, Group, OptionValue, Popup};
use mapstamp::{LatLng, LatLngBounds, Layer, LayerKind, Options};

/// Helper to build a marker layer
fn marker(lat: f64, lng: f64, options: Options) -> Layer {
    Layer::Marker {
        position: LatLng::new(lat, lng),
        options,
    }
}

fn bounds() -> LatLngBounds {
    LatLngBounds::new(LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0))
}

fn square_path() -> Vec<LatLng> {
    vec![
        LatLng::new(0.0, 0.0),
        LatLng::new(0.0, 1.0),
        LatLng::new(1.0, 1.0),
        LatLng::new(0.0, 0.0),
    ]
}

#[derive(Debug)]
struct HexbinLayer;

impl ForeignLayer for HexbinLayer {
    fn type_name(&self) -> &str {
        "HexbinLayer"
    }
}

#[derive(Debug, Clone, PartialEq)]
struct IconSpec {
    url: String,
    size: (u32, u32),
}

impl Clonable for IconSpec {
    fn duplicate(&self) -> Box<dyn Clonable> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn sample_layer(kind: LayerKind) -> Layer {
    match kind {
        LayerKind::Svg => Layer::Svg {
            options: Options::new(),
        },
        LayerKind::Canvas => Layer::Canvas {
            options: Options::new(),
        },
        LayerKind::WmsTileLayer => Layer::WmsTileLayer {
            url: "https://wms.example/service".to_string(),
            options: Options::new(),
        },
        LayerKind::TileLayer => Layer::TileLayer {
            url: "https://tile.example/{z}/{x}/{y}.png".to_string(),
            options: Options::new(),
        },
        LayerKind::ImageOverlay => Layer::ImageOverlay {
            url: "https://img.example/plan.png".to_string(),
            bounds: bounds(),
            options: Options::new(),
        },
        LayerKind::Marker => marker(10.0, 20.0, Options::new()),
        LayerKind::Popup => Layer::Popup(Popup::new(Options::new())),
        LayerKind::Circle => Layer::Circle {
            center: LatLng::new(5.0, 5.0),
            radius: 250.0,
            options: Options::new(),
        },
        LayerKind::CircleMarker => Layer::CircleMarker {
            center: LatLng::new(5.0, 5.0),
            options: Options::new(),
        },
        LayerKind::Rectangle => Layer::Rectangle {
            bounds: bounds(),
            options: Options::new(),
        },
        LayerKind::Polygon => Layer::Polygon {
            rings: vec![square_path()],
            options: Options::new(),
        },
        LayerKind::MultiPolyline => Layer::MultiPolyline {
            paths: vec![square_path()],
            options: Options::new(),
        },
        LayerKind::MultiPolygon => Layer::MultiPolygon {
            polygons: vec![vec![square_path()]],
            options: Options::new(),
        },
        LayerKind::Polyline => Layer::Polyline {
            paths: vec![square_path()],
            options: Options::new(),
        },
        LayerKind::GeoJson => Layer::GeoJson(GeoJsonLayer::from_features(
            vec![Feature::new(Geometry::Point {
                coordinates: vec![2.35, 48.85],
            })],
            Options::new(),
        )),
        LayerKind::FeatureGroup => Layer::FeatureGroup(Group::new()),
        LayerKind::LayerGroup => Layer::LayerGroup(Group::new()),
        LayerKind::Tooltip => Layer::Tooltip {
            options: Options::new(),
        },
    }
}

// === Classification ===

#[test_case(LayerKind::Svg)]
#[test_case(LayerKind::Canvas)]
#[test_case(LayerKind::WmsTileLayer)]
#[test_case(LayerKind::TileLayer)]
#[test_case(LayerKind::ImageOverlay)]
#[test_case(LayerKind::Marker)]
#[test_case(LayerKind::Popup)]
#[test_case(LayerKind::Circle)]
#[test_case(LayerKind::CircleMarker)]
#[test_case(LayerKind::Rectangle)]
#[test_case(LayerKind::Polygon)]
#[test_case(LayerKind::MultiPolyline)]
#[test_case(LayerKind::MultiPolygon)]
#[test_case(LayerKind::Polyline)]
#[test_case(LayerKind::GeoJson)]
#[test_case(LayerKind::FeatureGroup)]
#[test_case(LayerKind::LayerGroup)]
#[test_case(LayerKind::Tooltip)]
fn classification_matches_variant(kind: LayerKind) {
    let engine = CloneEngine::new();
    assert_eq!(engine.classify(&sample_layer(kind)), Some(kind));
}

#[test]
fn foreign_layer_classifies_to_none() {
    let engine = CloneEngine::new();
    assert_eq!(engine.classify(&Layer::Foreign(Arc::new(HexbinLayer))), None);
}

// === Non-aliasing ===

#[test]
fn clonable_option_values_are_distinct_but_equal() {
    let engine = CloneEngine::new();
    let mut options = Options::new();
    options.set(
        "icon",
        OptionValue::Custom(Box::new(IconSpec {
            url: "pin.png".to_string(),
            size: (24, 36),
        })),
    );
    let source = marker(10.0, 20.0, options);

    let clone = engine.clone_layer(&source).unwrap();
    let source_icon = source
        .options()
        .unwrap()
        .get("icon")
        .and_then(OptionValue::as_custom)
        .and_then(|c| c.as_any().downcast_ref::<IconSpec>())
        .unwrap();
    let clone_icon = clone
        .options()
        .unwrap()
        .get("icon")
        .and_then(OptionValue::as_custom)
        .and_then(|c| c.as_any().downcast_ref::<IconSpec>())
        .unwrap();

    assert_eq!(source_icon, clone_icon);
    assert!(
        !std::ptr::eq(source_icon, clone_icon),
        "clonable values must not alias their source"
    );
}

#[test]
fn shared_references_alias_by_design() {
    let engine = CloneEngine::new();
    let pane: Arc<dyn Any + Send + Sync> = Arc::new("print-pane");
    let mut options = Options::new();
    options.set("pane", OptionValue::Shared(Arc::clone(&pane)));

    let clone = engine.clone_layer(&marker(0.0, 0.0, options)).unwrap();
    let cloned_pane = clone
        .options()
        .unwrap()
        .get("pane")
        .and_then(OptionValue::as_shared)
        .unwrap();
    assert!(Arc::ptr_eq(cloned_pane, &pane));
}

// === Idempotent re-clone ===

#[test]
fn cloning_a_clone_is_closed_over_the_variant_set() {
    let engine = CloneEngine::new();
    let mut group = Group::new();
    group.add_layer(sample_layer(LayerKind::Circle));
    group.add_layer(sample_layer(LayerKind::GeoJson));
    group.add_layer(sample_layer(LayerKind::TileLayer));
    let source = Layer::FeatureGroup(group);

    let first = engine.clone_layer(&source).unwrap();
    let second = engine.clone_layer(&first).unwrap();

    assert_eq!(engine.classify(&second), Some(LayerKind::FeatureGroup));
    assert_eq!(second.as_group().unwrap().len(), 3);
    let kinds: Vec<_> = second
        .as_group()
        .unwrap()
        .layers()
        .iter()
        .map(|layer| engine.classify(layer).unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec![LayerKind::Circle, LayerKind::GeoJson, LayerKind::TileLayer]
    );
}

// === Composite behavior ===

#[test]
fn failing_middle_child_preserves_sibling_order() {
    let engine = CloneEngine::new();
    let mut group = Group::new();
    group.add_layer(marker(1.0, 1.0, Options::new()));
    group.add_layer(Layer::Foreign(Arc::new(HexbinLayer)));
    group.add_layer(marker(3.0, 3.0, Options::new()));

    let clone = engine.clone_layer(&Layer::LayerGroup(group)).unwrap();
    let survivors: Vec<f64> = clone
        .as_group()
        .unwrap()
        .layers()
        .iter()
        .map(|layer| match layer {
            Layer::Marker { position, .. } => position.lat,
            other => panic!("unexpected survivor: {:?}", other),
        })
        .collect();
    assert_eq!(survivors, vec![1.0, 3.0]);
}

#[test]
fn empty_group_clones_to_empty_group() {
    let engine = CloneEngine::new();
    let clone = engine.clone_layer(&Layer::LayerGroup(Group::new())).unwrap();
    assert!(clone.as_group().unwrap().is_empty());
}

#[test]
fn nested_groups_clone_recursively() {
    let engine = CloneEngine::new();
    let mut inner = Group::new();
    inner.add_layer(marker(7.0, 7.0, Options::new()));
    let mut outer = Group::new();
    outer.add_layer(Layer::FeatureGroup(inner));
    outer.add_layer(sample_layer(LayerKind::Polyline));

    let clone = engine.clone_layer(&Layer::LayerGroup(outer)).unwrap();
    let children = clone.as_group().unwrap().layers();
    assert_eq!(children.len(), 2);
    let nested = children[0].as_group().unwrap();
    assert_eq!(nested.len(), 1);
    assert!(matches!(nested.layers()[0], Layer::Marker { .. }));
}

// === Degradation ===

#[test]
fn tooltip_clone_is_a_noop() {
    let engine = CloneEngine::new();
    assert!(engine.clone_layer(&sample_layer(LayerKind::Tooltip)).is_none());
}

#[test]
fn unknown_variant_reports_through_the_injected_sink() {
    let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink_seen = Arc::clone(&seen);
    let engine = CloneEngine::with_diagnostics(move |event| {
        if let CloneEvent::UnrecognizedLayer { type_name, .. } = event {
            sink_seen.lock().unwrap().push(type_name.to_string());
        }
    });

    assert!(engine
        .clone_layer(&Layer::Foreign(Arc::new(HexbinLayer)))
        .is_none());
    assert_eq!(*seen.lock().unwrap(), vec!["HexbinLayer".to_string()]);
}

// === GeoJSON current-state semantics ===

#[test]
fn geojson_clone_reflects_post_construction_mutation() {
    let engine = CloneEngine::new();
    let data = json!({"type": "Point", "coordinates": [0.0, 0.0]});
    let mut layer = GeoJsonLayer::new(&data, Options::new()).unwrap();
    layer.add_feature(Feature::new(Geometry::LineString {
        coordinates: vec![vec![0.0, 0.0], vec![1.0, 1.0]],
    }));

    let clone = engine.clone_layer(&Layer::GeoJson(layer)).unwrap();
    let Layer::GeoJson(copy) = clone else {
        panic!("expected geojson layer");
    };
    assert_eq!(copy.features().len(), 2);
    assert!(matches!(copy.features()[1].geometry, Geometry::LineString { .. }));
}

// === Scenario ===

#[test]
fn feature_group_with_marker_and_tooltip() {
    let engine = CloneEngine::new();

    let mut marker_options = Options::new();
    marker_options.set("draggable", true);
    let mut group = Group::new();
    group.add_layer(marker(10.0, 20.0, marker_options));
    group.add_layer(sample_layer(LayerKind::Tooltip));
    let source = Layer::FeatureGroup(group);

    let clone = engine.clone_layer(&source).unwrap();

    assert_eq!(engine.classify(&clone), Some(LayerKind::FeatureGroup));
    let children = clone.as_group().unwrap().layers();
    assert_eq!(children.len(), 1, "tooltip must be silently omitted");

    let Layer::Marker { position, options } = &children[0] else {
        panic!("expected a marker child");
    };
    assert_eq!(*position, LatLng::new(10.0, 20.0));
    assert_eq!(
        options.get("draggable").and_then(OptionValue::as_plain),
        Some(&json!(true))
    );

    // Equal but distinct configuration
    let source_options = source.as_group().unwrap().layers()[0].options().unwrap();
    assert!(!std::ptr::eq(source_options, options));
}
