//! Reverse geocoding: turning a [`GeoCoordinate`] into a human-readable place name.
//!
//! Two interchangeable strategies implement [`ReverseGeocode`]: an offline
//! nearest-neighbour lookup in the bundled GeoNames dataset and a remote
//! Nominatim-compatible service. A failure in either degrades to `None`.
mod offline;
mod remote;

pub use offline::OfflineGeocoder;
pub use remote::{NominatimAddress, NominatimResponse, RemoteGeocoder};

use crate::structs::GeoCoordinate;
use async_trait::async_trait;
use clap::ValueEnum;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Invalid geocoder base URL: {0}")]
    InvalidUrl(String),
}

#[async_trait]
pub trait ReverseGeocode: Send + Sync {
    /// Resolves `coord` to a place name. Must not fail the caller.
    async fn resolve(&self, coord: GeoCoordinate) -> Option<String>;
}

/// Geocoder that never resolves anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGeocoder;

#[async_trait]
impl ReverseGeocode for NoGeocoder {
    async fn resolve(&self, _coord: GeoCoordinate) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum GeocoderBackend {
    /// Bundled GeoNames dataset, no network access.
    #[default]
    Offline,
    /// Nominatim-compatible reverse geocoding service.
    Remote,
    /// Disable place name lookup.
    #[value(name = "none")]
    Disabled,
}

/// Upper bound for any remote lookup.
pub const MAX_REMOTE_TIMEOUT: Duration = Duration::from_secs(5);

/// Builds the configured geocoder.
///
/// # Errors
///
/// Returns [`GeocodeError`] if the remote backend's HTTP client or URL is invalid.
pub fn build_geocoder(
    backend: GeocoderBackend,
    remote_url: &str,
    remote_timeout: Duration,
) -> Result<Arc<dyn ReverseGeocode>, GeocodeError> {
    let geocoder: Arc<dyn ReverseGeocode> = match backend {
        GeocoderBackend::Offline => Arc::new(OfflineGeocoder::new()),
        GeocoderBackend::Remote => Arc::new(
            RemoteGeocoder::builder()
                .base_url(remote_url.to_string())
                .timeout(remote_timeout)
                .build()?,
        ),
        GeocoderBackend::Disabled => Arc::new(NoGeocoder),
    };
    Ok(geocoder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_geocoder_never_resolves() {
        let coord = GeoCoordinate::new(48.8566, 2.3522).unwrap();
        assert_eq!(NoGeocoder.resolve(coord).await, None);
    }

    #[test]
    fn test_build_remote_rejects_bad_url() {
        let result = build_geocoder(GeocoderBackend::Remote, "not a url", MAX_REMOTE_TIMEOUT);
        assert!(matches!(result, Err(GeocodeError::InvalidUrl(_))));
    }

    #[test]
    fn test_build_each_backend() {
        for backend in [GeocoderBackend::Remote, GeocoderBackend::Disabled] {
            assert!(
                build_geocoder(backend, "http://127.0.0.1:9", MAX_REMOTE_TIMEOUT).is_ok(),
                "{backend:?} should build"
            );
        }
    }
}
