//! Typed GeoJSON geometry model
//!
//! A minimal GeoJSON (RFC 7946) representation used by the geojson layer
//! variant. The clone engine never copies a geojson layer field-by-field;
//! it serializes the layer's current state back out through this module
//! and rebuilds from the serialization, so a clone always reflects
//! post-construction mutations.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{MapstampError, Result};

/// A GeoJSON position: `[lng, lat]`, optionally with altitude
pub type Position = Vec<f64>;

/// GeoJSON geometry object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    GeometryCollection { geometries: Vec<Geometry> },
}

/// A GeoJSON feature: one geometry plus free-form properties
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: Map<String, Value>,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            properties: Map::new(),
        }
    }

    pub fn with_properties(geometry: Geometry, properties: Map<String, Value>) -> Self {
        Self {
            geometry,
            properties,
        }
    }

    /// Serialize this feature as a GeoJSON `Feature` object
    pub fn to_value(&self) -> Result<Value> {
        Ok(json!({
            "type": "Feature",
            "geometry": serde_json::to_value(&self.geometry)?,
            "properties": Value::Object(self.properties.clone()),
        }))
    }

    /// Parse a GeoJSON `Feature` object
    ///
    /// # Errors
    /// Returns `UnsupportedGeoJson` if the object is not a feature, and
    /// `InvalidGeometry` if its geometry member does not parse.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object_type = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if object_type != "Feature" {
            return Err(MapstampError::UnsupportedGeoJson {
                object_type: object_type.to_string(),
            });
        }

        let geometry_value = value
            .get("geometry")
            .ok_or_else(|| MapstampError::InvalidGeometry {
                reason: "feature has no geometry member".to_string(),
            })?;
        let geometry = serde_json::from_value(geometry_value.clone()).map_err(|e| {
            MapstampError::InvalidGeometry {
                reason: e.to_string(),
            }
        })?;

        let properties = match value.get("properties") {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };

        Ok(Self {
            geometry,
            properties,
        })
    }
}

/// Serialize a feature list as a GeoJSON `FeatureCollection`
pub fn collection_to_value(features: &[Feature]) -> Result<Value> {
    let features: Result<Vec<Value>> = features.iter().map(Feature::to_value).collect();
    Ok(json!({
        "type": "FeatureCollection",
        "features": features?,
    }))
}

/// Parse a feature list out of any GeoJSON object
///
/// Accepts a `FeatureCollection`, a single `Feature`, or a bare geometry
/// object (wrapped into a property-less feature).
pub fn features_from_value(value: &Value) -> Result<Vec<Feature>> {
    let object_type = value
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or_default();

    match object_type {
        "FeatureCollection" => {
            let members = value
                .get("features")
                .and_then(Value::as_array)
                .ok_or_else(|| MapstampError::InvalidGeometry {
                    reason: "feature collection has no features array".to_string(),
                })?;
            members.iter().map(Feature::from_value).collect()
        }
        "Feature" => Ok(vec![Feature::from_value(value)?]),
        "Point" | "MultiPoint" | "LineString" | "MultiLineString" | "Polygon"
        | "MultiPolygon" | "GeometryCollection" => {
            let geometry = serde_json::from_value(value.clone()).map_err(|e| {
                MapstampError::InvalidGeometry {
                    reason: e.to_string(),
                }
            })?;
            Ok(vec![Feature::new(geometry)])
        }
        other => Err(MapstampError::UnsupportedGeoJson {
            object_type: other.to_string(),
        }),
    }
}
