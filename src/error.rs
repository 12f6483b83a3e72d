//! Error handling for Mapstamp
//!
//! The clone paths themselves never fail: an unclonable layer degrades to
//! `None` plus a diagnostic. Errors only exist at the GeoJSON boundary,
//! where malformed geometry data is a real, reportable condition.

use thiserror::Error;

/// Result type alias for Mapstamp operations
pub type Result<T> = std::result::Result<T, MapstampError>;

/// Main error type for Mapstamp operations
#[derive(Error, Debug)]
pub enum MapstampError {
    #[error("Invalid GeoJSON geometry: {reason}")]
    InvalidGeometry { reason: String },

    #[error("Unsupported GeoJSON object type: {object_type}")]
    UnsupportedGeoJson { object_type: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MapstampError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            MapstampError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            MapstampError::UnsupportedGeoJson { .. } => "UNSUPPORTED_GEOJSON",
            MapstampError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}
