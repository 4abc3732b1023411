//! Metadata extraction from an image's embedded EXIF container.
pub mod date;
pub mod gps;
pub mod metadata;

pub use metadata::{extract, extract_from_bytes};
