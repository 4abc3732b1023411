use serde::{Deserialize, Serialize};

/// A position in signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    /// Returns `None` unless both components are finite and in range.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        valid.then_some(Self {
            latitude,
            longitude,
        })
    }
}

/// Enrichment for a single served image. Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureMetadata {
    pub coordinates: Option<GeoCoordinate>,
    /// Normalized to `YYYY-MM-DD HH:MM:SS`.
    pub date_taken: Option<String>,
    pub place_name: Option<String>,
}

impl CaptureMetadata {
    /// True once nothing more can be learned by geocoding again.
    pub const fn is_complete(&self) -> bool {
        self.coordinates.is_none() || self.place_name.is_some()
    }
}
