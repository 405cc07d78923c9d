// Position lookup for the weather tile

use super::{Locator, ProviderError, check_status};
use crate::engine::weather::{Coordinates, Place};
use serde::Deserialize;

pub const IP_API_URL: &str = "http://ip-api.com/json/";

/// Approximate position from the public IP address.
pub struct IpLocator {
    client: reqwest::blocking::Client,
    url: String,
}

impl IpLocator {
    pub fn new(client: reqwest::blocking::Client) -> Self {
        Self {
            client,
            url: IP_API_URL.to_string(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    city: Option<String>,
}

pub fn decode_response(body: &str) -> Result<Place, ProviderError> {
    let parsed: IpApiResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Decode(e.to_string()))?;

    if parsed.status != "success" {
        return Err(ProviderError::LocationDenied(
            parsed.message.unwrap_or(parsed.status),
        ));
    }

    let (Some(latitude), Some(longitude)) = (parsed.lat, parsed.lon) else {
        return Err(ProviderError::Decode("missing lat/lon".to_string()));
    };

    let coordinates = Coordinates {
        latitude,
        longitude,
    };
    let name = parsed
        .city
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| coordinates.to_string());

    Ok(Place { name, coordinates })
}

impl Locator for IpLocator {
    fn locate(&self) -> Result<Place, ProviderError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("fields", "status,message,lat,lon,city")])
            .send()?;
        let body = check_status(response)?.text()?;
        decode_response(&body)
    }
}

/// Position taken from configuration.
#[derive(Debug, Clone)]
pub struct FixedLocator {
    place: Place,
}

impl FixedLocator {
    pub fn new(place: Place) -> Self {
        Self { place }
    }
}

impl Locator for FixedLocator {
    fn locate(&self) -> Result<Place, ProviderError> {
        Ok(self.place.clone())
    }
}

/// Ask the locator once; any failure lands on the default location.
pub fn resolve_place(locator: &dyn Locator) -> Place {
    match locator.locate() {
        Ok(place) => {
            tracing::info!(place = %place.name, at = %place.coordinates, "location resolved");
            place
        }
        Err(e) => {
            tracing::debug!(error = %e, "location lookup failed, using default");
            Place::fallback()
        }
    }
}
