use crate::geocoding::ReverseGeocode;
use crate::structs::GeoCoordinate;
use async_trait::async_trait;
use reverse_geocoder::ReverseGeocoder;

/// Nearest-neighbour lookup in the GeoNames cities dataset bundled with
/// `reverse_geocoder`. Loading the dataset is done once at construction.
pub struct OfflineGeocoder {
    geocoder: ReverseGeocoder,
}

impl OfflineGeocoder {
    pub fn new() -> Self {
        Self {
            geocoder: ReverseGeocoder::new(),
        }
    }

    /// Locality, sub-region, region and country code joined by ", ",
    /// skipping empty parts.
    pub fn place_name(&self, coord: GeoCoordinate) -> Option<String> {
        let search_result = self.geocoder.search((coord.latitude, coord.longitude));
        let record = search_result.record;
        compose_place_name(&[
            record.name.as_str(),
            record.admin2.as_str(),
            record.admin1.as_str(),
            record.cc.as_str(),
        ])
    }
}

impl Default for OfflineGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReverseGeocode for OfflineGeocoder {
    async fn resolve(&self, coord: GeoCoordinate) -> Option<String> {
        self.place_name(coord)
    }
}

fn compose_place_name(parts: &[&str]) -> Option<String> {
    let parts: Vec<&str> = parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect();
    (!parts.is_empty()).then(|| parts.join(", "))
}
