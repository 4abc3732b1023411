use crate::features::date::get_date_taken;
use crate::features::gps::get_gps_coordinates;
use crate::index::ImageEntry;
use crate::structs::CaptureMetadata;
use exif::Exif;
use std::io::Cursor;
use tracing::debug;

/// Reads the EXIF container from an in-memory image, if it has one.
pub fn read_exif_container(bytes: &[u8]) -> Option<Exif> {
    exif::Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .inspect_err(|e| debug!(error = %e, "no readable EXIF container"))
        .ok()
}

/// Extracts GPS coordinates and capture date from image bytes.
///
/// Never fails: anything missing or malformed leaves the field as `None`.
/// `place_name` is always `None` here; it is filled in by a geocoder.
pub fn extract_from_bytes(bytes: &[u8]) -> CaptureMetadata {
    let Some(exif) = read_exif_container(bytes) else {
        return CaptureMetadata::default();
    };
    CaptureMetadata {
        coordinates: get_gps_coordinates(&exif),
        date_taken: get_date_taken(&exif),
        place_name: None,
    }
}

/// Reads `entry` from disk and extracts its metadata. An unreadable file
/// yields empty metadata.
pub fn extract(entry: &ImageEntry) -> CaptureMetadata {
    match std::fs::read(entry.path()) {
        Ok(bytes) => extract_from_bytes(&bytes),
        Err(e) => {
            debug!(path = %entry.path().display(), error = %e, "could not read image for metadata");
            CaptureMetadata::default()
        }
    }
}
