use chrono::NaiveDateTime;
use exif::{Exif, In, Tag, Value};

const EXIF_FORMAT: &str = "%Y:%m:%d %H:%M:%S";
const OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Capture time from `DateTimeOriginal`, falling back to the IFD0 `DateTime`
/// (last modification), normalized to `YYYY-MM-DD HH:MM:SS`.
///
/// A tag that is present but unparseable falls through to the next source.
pub fn get_date_taken(exif: &Exif) -> Option<String> {
    [Tag::DateTimeOriginal, Tag::DateTime]
        .into_iter()
        .find_map(|tag| {
            exif.get_field(tag, In::PRIMARY)
                .and_then(|field| ascii_value(&field.value))
                .and_then(|raw| normalize_exif_datetime(&raw))
        })
}

fn ascii_value(value: &Value) -> Option<String> {
    match value {
        Value::Ascii(parts) => parts.first().map(|bytes| {
            String::from_utf8_lossy(bytes)
                .trim_matches(['\0', ' '])
                .to_string()
        }),
        _ => None,
    }
}

/// Turns `"YYYY:MM:DD HH:MM:SS"` into `"YYYY-MM-DD HH:MM:SS"`.
///
/// Strings that are not a valid EXIF datetime (including the all-blank
/// `"0000:00:00 00:00:00"` placeholder cameras write) yield `None`.
pub fn normalize_exif_datetime(raw: &str) -> Option<String> {
    NaiveDateTime::parse_from_str(raw.trim(), EXIF_FORMAT)
        .ok()
        .map(|dt| dt.format(OUTPUT_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ExifFixture, read_exif};

    #[test]
    fn test_normalize_replaces_date_colons() {
        assert_eq!(
            normalize_exif_datetime("2023:06:01 12:34:56"),
            Some("2023-06-01 12:34:56".to_string())
        );
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert_eq!(normalize_exif_datetime(""), None);
        assert_eq!(normalize_exif_datetime("yesterday"), None);
        assert_eq!(normalize_exif_datetime("0000:00:00 00:00:00"), None);
        assert_eq!(normalize_exif_datetime("2023:13:01 12:34:56"), None);
    }

    #[test]
    fn test_normalize_rejects_impossible_calendar_dates() {
        assert_eq!(normalize_exif_datetime("2023:02:30 10:00:00"), None);
        assert_eq!(normalize_exif_datetime("2023:04:31 10:00:00"), None);
        assert_eq!(
            normalize_exif_datetime("2024:02:29 10:00:00"),
            Some("2024-02-29 10:00:00".to_string())
        );
    }

    #[test]
    fn test_prefers_original_capture_time() {
        let exif = read_exif(
            &ExifFixture::new()
                .date_original("2019:07:14 08:00:00")
                .modify_date("2021:01:01 00:00:00")
                .to_jpeg(),
        );
        assert_eq!(get_date_taken(&exif), Some("2019-07-14 08:00:00".to_string()));
    }

    #[test]
    fn test_falls_back_to_modify_date() {
        let exif = read_exif(&ExifFixture::new().modify_date("2021:01:01 10:11:12").to_jpeg());
        assert_eq!(get_date_taken(&exif), Some("2021-01-01 10:11:12".to_string()));
    }

    #[test]
    fn test_unparseable_original_falls_back() {
        let exif = read_exif(
            &ExifFixture::new()
                .date_original("not a date")
                .modify_date("2021:01:01 10:11:12")
                .to_jpeg(),
        );
        assert_eq!(get_date_taken(&exif), Some("2021-01-01 10:11:12".to_string()));
    }

    #[test]
    fn test_no_date_tags() {
        let exif = read_exif(&ExifFixture::new().gps(1.0, 'N', 1.0, 'E').to_jpeg());
        assert_eq!(get_date_taken(&exif), None);
    }
}
