//! # Random Image Server
//!
//! Serve one image from a folder per request over HTTPS, picked at random or
//! reproducibly from a caller-supplied seed, and describe it in response headers.
//!
//! ## Key Features
//!
//! - **Seeded Selection**: `GET /?i=42` always returns the same image for an unchanged folder.
//! - **GPS Location**: Reads EXIF GPS tags and reports them as `X-Geo-Location`.
//! - **Place Names**: Resolves coordinates offline (GeoNames) or through a Nominatim-compatible service.
//! - **Capture Date**: Reports `DateTimeOriginal` (or the modification date) as `X-Date-Taken`.
//! - **CORS**: Every custom header is listed in `Access-Control-Expose-Headers`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use random_image_server::{AppState, ImageIndex, OfflineGeocoder, router};
//!
//! # fn main() -> Result<(), random_image_server::ServerError> {
//! let index = ImageIndex::build(Path::new("images"))?;
//! let state = AppState::builder()
//!     .index(index)
//!     .geocoder(Arc::new(OfflineGeocoder::new()))
//!     .metadata_cache_size(256)
//!     .build();
//! let app = router(state);
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
mod error;
pub mod features;
pub mod geocoding;
mod index;
pub mod response;
pub mod selector;
pub mod server;
mod structs;
mod utils;

#[cfg(test)]
mod test_utils;

pub use error::ServerError;
pub use geocoding::{GeocoderBackend, OfflineGeocoder, RemoteGeocoder, ReverseGeocode};
pub use index::{ImageContentType, ImageEntry, ImageIndex};
pub use server::{AppState, router, serve};
pub use structs::{CaptureMetadata, GeoCoordinate};
pub use utils::{IMAGE_EXTENSIONS, has_image_extension};
