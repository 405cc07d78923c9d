// Current conditions from the Open-Meteo forecast API (no key required)

use super::{ProviderError, WeatherProvider, check_status};
use crate::engine::weather::{Coordinates, WeatherObservation};
use serde::Deserialize;

pub const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com/v1";

pub struct OpenMeteoProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl OpenMeteoProvider {
    pub fn new(client: reqwest::blocking::Client) -> Self {
        Self {
            client,
            base_url: OPEN_METEO_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentBlock>,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: f64,
    #[serde(default)]
    apparent_temperature: Option<f64>,
    weather_code: f64,
}

pub fn decode_response(body: &str) -> Result<WeatherObservation, ProviderError> {
    let parsed: ForecastResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Decode(e.to_string()))?;
    let current = parsed
        .current
        .ok_or_else(|| ProviderError::Decode("missing \"current\" block".to_string()))?;

    if !current.weather_code.is_finite() || current.weather_code < 0.0 {
        return Err(ProviderError::Decode(format!(
            "invalid weather code {}",
            current.weather_code
        )));
    }

    Ok(WeatherObservation {
        condition_code: current.weather_code.round().min(u16::MAX as f64) as u16,
        temperature: current.temperature_2m,
        apparent_temperature: current.apparent_temperature,
    })
}

impl WeatherProvider for OpenMeteoProvider {
    fn current_weather(&self, at: Coordinates) -> Result<WeatherObservation, ProviderError> {
        let url = format!("{}/forecast", self.base_url);
        tracing::debug!(%at, "requesting weather");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", at.latitude.to_string()),
                ("longitude", at.longitude.to_string()),
                (
                    "current",
                    "temperature_2m,apparent_temperature,weather_code".to_string(),
                ),
                ("timezone", "auto".to_string()),
            ])
            .send()?;
        let body = check_status(response)?.text()?;
        decode_response(&body)
    }
}
