//! Turns a selected image and its enrichment into an HTTP response.

use crate::index::ImageEntry;
use crate::structs::CaptureMetadata;
use axum::body::{Body, Bytes};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_EXPOSE_HEADERS, CONTENT_TYPE,
};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

pub const X_FILENAME: &str = "X-Filename";
pub const X_GEO_LOCATION: &str = "X-Geo-Location";
pub const X_LOCATION_NAME: &str = "X-Location-Name";
pub const X_DATE_TAKEN: &str = "X-Date-Taken";

/// A fully assembled response for one served image.
///
/// Custom headers can only be added through [`ResponseEnvelope::push_custom`],
/// which also appends the name to the expose-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub allow_origin: String,
    pub body: Bytes,
    custom_headers: Vec<(&'static str, String)>,
    expose: Vec<&'static str>,
}

impl ResponseEnvelope {
    fn new(content_type: &'static str, allow_origin: String, body: Bytes) -> Self {
        Self {
            status: StatusCode::OK,
            content_type,
            allow_origin,
            body,
            custom_headers: Vec::new(),
            expose: Vec::new(),
        }
    }

    fn push_custom(&mut self, name: &'static str, value: String) {
        self.custom_headers.push((name, value));
        self.expose.push(name);
    }

    /// Custom headers in emission order.
    pub fn custom_headers(&self) -> &[(&'static str, String)] {
        &self.custom_headers
    }

    pub fn custom_header(&self, name: &str) -> Option<&str> {
        self.custom_headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Value of `Access-Control-Expose-Headers`.
    pub fn expose_list(&self) -> String {
        self.expose.join(", ")
    }
}

/// Control bytes, non-ASCII and `%` itself, so encoded values decode unambiguously.
const HEADER_ENCODE_SET: &AsciiSet = &CONTROLS.add(b'%');

/// Header-safe rendering: bytes in [`HEADER_ENCODE_SET`] are percent-encoded.
fn header_value(value: &str) -> HeaderValue {
    let encoded = utf8_percent_encode(value, HEADER_ENCODE_SET).to_string();
    HeaderValue::from_str(&encoded).unwrap_or_else(|_| HeaderValue::from_static(""))
}

pub fn format_geo_location(latitude: f64, longitude: f64) -> String {
    format!("{latitude:.6},{longitude:.6}")
}

/// Assembles headers for `entry` in fixed order: content type, filename, then
/// geo location, place name and capture date when present.
///
/// `origin` is echoed back as the allowed CORS origin, defaulting to `*`.
pub fn assemble(
    entry: &ImageEntry,
    metadata: &CaptureMetadata,
    origin: Option<&str>,
    body: Bytes,
) -> ResponseEnvelope {
    let allow_origin = origin.unwrap_or("*").to_string();
    let mut envelope = ResponseEnvelope::new(entry.content_type().mime(), allow_origin, body);

    envelope.push_custom(X_FILENAME, entry.path().to_string_lossy().into_owned());
    if let Some(coord) = metadata.coordinates {
        envelope.push_custom(
            X_GEO_LOCATION,
            format_geo_location(coord.latitude, coord.longitude),
        );
    }
    if let Some(place_name) = &metadata.place_name {
        envelope.push_custom(X_LOCATION_NAME, place_name.clone());
    }
    if let Some(date_taken) = &metadata.date_taken {
        envelope.push_custom(X_DATE_TAKEN, date_taken.clone());
    }
    envelope
}

impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(self.content_type));
        for (name, value) in &self.custom_headers {
            if let Ok(name) = HeaderName::from_bytes(name.as_bytes()) {
                headers.insert(name, header_value(value));
            }
        }
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, header_value(&self.allow_origin));
        headers.insert(ACCESS_CONTROL_EXPOSE_HEADERS, header_value(&self.expose_list()));

        (self.status, headers, Body::from(self.body)).into_response()
    }
}
