use crate::geocoding::{GeocodeError, MAX_REMOTE_TIMEOUT, ReverseGeocode};
use crate::structs::GeoCoordinate;
use async_trait::async_trait;
use bon::bon;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Address fields of a Nominatim `jsonv2` reverse response that can name a place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NominatimAddress {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub municipality: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NominatimResponse {
    pub address: Option<NominatimAddress>,
    pub display_name: Option<String>,
}

impl NominatimResponse {
    /// Picks the most specific populated address field and appends the country.
    /// Without any usable address field, falls back to the first two
    /// segments of `display_name`.
    pub fn place_name(&self) -> Option<String> {
        self.address
            .as_ref()
            .and_then(address_place_name)
            .or_else(|| {
                let display_name = non_empty(self.display_name.as_ref())?;
                Some(
                    display_name
                        .split(", ")
                        .take(2)
                        .collect::<Vec<_>>()
                        .join(", "),
                )
            })
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn address_place_name(address: &NominatimAddress) -> Option<String> {
    let priority = [
        (&address.city, false),
        (&address.town, false),
        (&address.village, false),
        (&address.municipality, false),
        (&address.county, false),
        (&address.state, false),
        (&address.country, true),
    ];
    let (name, is_country) = priority
        .into_iter()
        .find_map(|(field, is_country)| non_empty(field.as_ref()).map(|name| (name, is_country)))?;

    match non_empty(address.country.as_ref()) {
        Some(country) if !is_country => Some(format!("{name}, {country}")),
        _ => Some(name.to_string()),
    }
}

/// Reverse geocoder backed by a Nominatim-compatible HTTP service.
pub struct RemoteGeocoder {
    client: Client,
    endpoint: Url,
}

#[bon]
impl RemoteGeocoder {
    /// Constructs a `RemoteGeocoder` via a builder pattern.
    ///
    /// # Builder Arguments
    ///
    /// * `base_url: String` - Root of the service, e.g. `https://nominatim.openstreetmap.org`. `/reverse` is appended.
    /// * `timeout: Duration` - (Default: 5 s) Whole-request timeout, capped at [`MAX_REMOTE_TIMEOUT`].
    /// * `user_agent: String` - (Default: crate name and version) Sent with every request; Nominatim's usage policy requires one.
    ///
    /// # Errors
    ///
    /// * [`GeocodeError::InvalidUrl`] if `base_url` is not an absolute URL.
    /// * [`GeocodeError::Client`] if the HTTP client cannot be built.
    #[builder]
    pub fn new(
        base_url: String,
        #[builder(default = MAX_REMOTE_TIMEOUT)] timeout: Duration,
        #[builder(default = DEFAULT_USER_AGENT.to_string())] user_agent: String,
    ) -> Result<Self, GeocodeError> {
        let endpoint = format!("{}/reverse", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&endpoint)
            .map_err(|e| GeocodeError::InvalidUrl(format!("{base_url}: {e}")))?;
        let client = Client::builder()
            .timeout(timeout.min(MAX_REMOTE_TIMEOUT))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, endpoint })
    }
}

impl RemoteGeocoder {
    async fn lookup(&self, coord: GeoCoordinate) -> Result<NominatimResponse, String> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", coord.latitude.to_string()),
                ("lon", coord.longitude.to_string()),
                ("zoom", "10".to_string()),
                ("addressdetails", "1".to_string()),
            ])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| e.to_string())?;
        let body = response.bytes().await.map_err(|e| e.to_string())?;
        serde_json::from_slice(&body).map_err(|e| format!("malformed response: {e}"))
    }
}

#[async_trait]
impl ReverseGeocode for RemoteGeocoder {
    async fn resolve(&self, coord: GeoCoordinate) -> Option<String> {
        match self.lookup(coord).await {
            Ok(response) => response.place_name(),
            Err(error) => {
                warn!(
                    latitude = coord.latitude,
                    longitude = coord.longitude,
                    %error,
                    "reverse geocoding failed"
                );
                None
            }
        }
    }
}
