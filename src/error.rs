use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for the server. Every variant is fatal at startup;
/// per-request enrichment failures never surface as a `ServerError`.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to scan image directory: {0}")]
    Walk(#[from] walkdir::Error),

    // --- Startup Logic Errors ---
    #[error("No image files found in {}", .0.display())]
    NoImages(PathBuf),

    #[error("Failed to load TLS certificate or key: {0}")]
    Tls(std::io::Error),

    #[error("Could not resolve bind address {0}")]
    BindAddress(String),

    // --- External Service Initialization Errors ---
    #[error("Geocoder initialization failed: {0}")]
    Geocode(#[from] crate::geocoding::GeocodeError),
}
