//! Builders for in-memory image fixtures used across the unit tests.

use exif::experimental::Writer;
use exif::{Exif, Field, In, Rational, Tag, Value};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Bytes of a GIF header. GIFs carry no EXIF container.
pub const GIF_BYTES: &[u8] = b"GIF89a\x01\x00\x01\x00\x00\x00\x00;";

/// Collects EXIF fields and serializes them as a bare TIFF block or wrapped
/// in a minimal JPEG (SOI, APP1 "Exif", EOI).
#[derive(Default)]
pub struct ExifFixture {
    fields: Vec<Field>,
}

impl ExifFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gps(mut self, latitude: f64, lat_ref: char, longitude: f64, lon_ref: char) -> Self {
        self.fields.push(ascii_field(Tag::GPSLatitudeRef, &lat_ref.to_string()));
        self.fields.push(Field {
            tag: Tag::GPSLatitude,
            ifd_num: In::PRIMARY,
            value: decimal_to_dms(latitude),
        });
        self.fields.push(ascii_field(Tag::GPSLongitudeRef, &lon_ref.to_string()));
        self.fields.push(Field {
            tag: Tag::GPSLongitude,
            ifd_num: In::PRIMARY,
            value: decimal_to_dms(longitude),
        });
        self
    }

    pub fn date_original(mut self, value: &str) -> Self {
        self.fields.push(ascii_field(Tag::DateTimeOriginal, value));
        self
    }

    pub fn modify_date(mut self, value: &str) -> Self {
        self.fields.push(ascii_field(Tag::DateTime, value));
        self
    }

    pub fn without(mut self, tag: Tag) -> Self {
        self.fields.retain(|field| field.tag != tag);
        self
    }

    pub fn to_tiff(&self) -> Vec<u8> {
        let mut writer = Writer::new();
        for field in &self.fields {
            writer.push_field(field);
        }
        let mut buf = Cursor::new(Vec::new());
        writer.write(&mut buf, false).unwrap();
        buf.into_inner()
    }

    pub fn to_jpeg(&self) -> Vec<u8> {
        let tiff = self.to_tiff();
        let segment_len = u16::try_from(2 + 6 + tiff.len()).unwrap();

        let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
        jpeg.extend_from_slice(&segment_len.to_be_bytes());
        jpeg.extend_from_slice(b"Exif\0\0");
        jpeg.extend_from_slice(&tiff);
        jpeg.extend_from_slice(&[0xFF, 0xD9]);
        jpeg
    }
}

fn ascii_field(tag: Tag, value: &str) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![value.as_bytes().to_vec()]),
    }
}

fn decimal_to_dms(decimal: f64) -> Value {
    let decimal = decimal.abs();
    let degrees = decimal.trunc();
    let minutes = ((decimal - degrees) * 60.0).trunc();
    let seconds = (decimal - degrees - minutes / 60.0) * 3600.0;
    Value::Rational(vec![
        Rational::from((degrees as u32, 1)),
        Rational::from((minutes as u32, 1)),
        Rational::from(((seconds * 10_000.0).round() as u32, 10_000)),
    ])
}

pub fn read_exif(bytes: &[u8]) -> Exif {
    exif::Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .unwrap()
}

/// Writes `bytes` to `dir/name`, creating parent directories.
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, bytes).unwrap();
    path
}
