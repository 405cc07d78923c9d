//! Remote content sources for the news and weather tiles.
//!
//! Each source sits behind a small blocking trait so the dashboard can run
//! it on a worker thread and tests can swap in canned answers.

pub mod gemini;
pub mod locate;
pub mod open_meteo;

use super::news::NewsResponse;
use super::weather::{Coordinates, Place, WeatherObservation};
use std::time::Duration;
use thiserror::Error;

pub use gemini::GeminiNewsProvider;
pub use locate::{FixedLocator, IpLocator, resolve_place};
pub use open_meteo::OpenMeteoProvider;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no API key configured (set GEMINI_API_KEY or [provider] api_key)")]
    MissingApiKey,

    #[error("network access disabled (offline mode)")]
    Offline,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected provider response: {0}")]
    Decode(String),

    #[error("location unavailable: {0}")]
    LocationDenied(String),
}

impl ProviderError {
    /// Failures the user can only fix by changing credentials.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::MissingApiKey)
            || matches!(self, Self::Status { status, .. } if *status == 401 || *status == 403)
    }
}

pub trait NewsProvider: Send + Sync {
    fn search_news(&self, query: &str) -> Result<NewsResponse, ProviderError>;
}

pub trait WeatherProvider: Send + Sync {
    fn current_weather(&self, at: Coordinates) -> Result<WeatherObservation, ProviderError>;
}

/// One-shot position lookup.
pub trait Locator: Send + Sync {
    fn locate(&self) -> Result<Place, ProviderError>;
}

/// Stand-in used with `--offline`: every call fails without touching the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineProvider;

impl NewsProvider for OfflineProvider {
    fn search_news(&self, _query: &str) -> Result<NewsResponse, ProviderError> {
        Err(ProviderError::Offline)
    }
}

impl WeatherProvider for OfflineProvider {
    fn current_weather(&self, _at: Coordinates) -> Result<WeatherObservation, ProviderError> {
        Err(ProviderError::Offline)
    }
}

impl Locator for OfflineProvider {
    fn locate(&self) -> Result<Place, ProviderError> {
        Err(ProviderError::Offline)
    }
}

/// Shared blocking HTTP client.
pub fn build_client(timeout: Duration) -> Result<reqwest::blocking::Client, ProviderError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("zendash/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Turn a non-success response into `ProviderError::Status`, keeping a
/// short excerpt of the body for the log.
pub(crate) fn check_status(
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    let excerpt: String = body.chars().take(200).collect();
    Err(ProviderError::Status {
        status: status.as_u16(),
        body: excerpt,
    })
}
