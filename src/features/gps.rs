use crate::structs::GeoCoordinate;
use exif::{Exif, In, Tag, Value};

/// Reads the GPS position from an EXIF container.
///
/// All four of `GPSLatitude`, `GPSLatitudeRef`, `GPSLongitude` and
/// `GPSLongitudeRef` must be present; anything missing or malformed yields `None`.
pub fn get_gps_coordinates(exif: &Exif) -> Option<GeoCoordinate> {
    let latitude = signed_coordinate(exif, Tag::GPSLatitude, Tag::GPSLatitudeRef, b'S')?;
    let longitude = signed_coordinate(exif, Tag::GPSLongitude, Tag::GPSLongitudeRef, b'W')?;
    GeoCoordinate::new(latitude, longitude)
}

fn signed_coordinate(exif: &Exif, value_tag: Tag, ref_tag: Tag, negative_ref: u8) -> Option<f64> {
    let value = exif.get_field(value_tag, In::PRIMARY)?;
    let reference = exif.get_field(ref_tag, In::PRIMARY)?;
    let reference = ascii_ref(&reference.value)?;
    let decimal = dms_to_decimal(&value.value)?;
    Some(if reference.eq_ignore_ascii_case(&negative_ref) {
        -decimal
    } else {
        decimal
    })
}

/// First non-blank byte of an ASCII reference tag ("N", "S", "E", "W").
fn ascii_ref(value: &Value) -> Option<u8> {
    match value {
        Value::Ascii(parts) => parts
            .first()?
            .iter()
            .copied()
            .find(|b| !b.is_ascii_whitespace() && *b != 0),
        _ => None,
    }
}

/// Converts a (degrees, minutes, seconds) rational triple to decimal degrees.
pub fn dms_to_decimal(value: &Value) -> Option<f64> {
    let Value::Rational(parts) = value else {
        return None;
    };
    let [degrees, minutes, seconds] = parts.get(..3)? else {
        return None;
    };
    if degrees.denom == 0 || minutes.denom == 0 || seconds.denom == 0 {
        return None;
    }
    let decimal = degrees.to_f64() + minutes.to_f64() / 60.0 + seconds.to_f64() / 3600.0;
    decimal.is_finite().then_some(decimal)
}
