// Weather readout: condition mapping and panel state

use super::worker::{RequestSeq, RequestSequencer};
use std::fmt;

/// Taipei, used whenever no position is available.
pub const DEFAULT_LOCATION: Coordinates = Coordinates {
    latitude: 25.0330,
    longitude: 121.5654,
};
pub const DEFAULT_LOCATION_NAME: &str = "Taipei / 台北";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.latitude >= 0.0 { 'N' } else { 'S' };
        let ew = if self.longitude >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "{:.2}°{} {:.2}°{}",
            self.latitude.abs(),
            ns,
            self.longitude.abs(),
            ew
        )
    }
}

/// A resolved place to ask the weather for.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub coordinates: Coordinates,
}

impl Place {
    pub fn fallback() -> Self {
        Self {
            name: DEFAULT_LOCATION_NAME.to_string(),
            coordinates: DEFAULT_LOCATION,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Clear,
    Cloudy,
    Fog,
    Rain,
    Snow,
    Thunderstorm,
}

impl Condition {
    /// Map a WMO weather interpretation code. Unknown codes read as cloudy.
    pub fn from_wmo_code(code: u16) -> Self {
        match code {
            0 | 1 => Self::Clear,
            2 | 3 => Self::Cloudy,
            45 | 48 => Self::Fog,
            51..=67 | 80..=82 => Self::Rain,
            71..=77 | 85 | 86 => Self::Snow,
            95..=99 => Self::Thunderstorm,
            _ => Self::Cloudy,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Clear => "Clear / 晴朗",
            Self::Cloudy => "Cloudy / 多雲",
            Self::Fog => "Fog / 霧",
            Self::Rain => "Rain / 有雨",
            Self::Snow => "Snow / 下雪",
            Self::Thunderstorm => "Thunderstorm / 雷雨",
        }
    }

    pub fn icon(self) -> WeatherIcon {
        match self {
            Self::Clear => WeatherIcon::Sun,
            Self::Cloudy => WeatherIcon::Cloud,
            Self::Fog => WeatherIcon::Mist,
            Self::Rain => WeatherIcon::CloudRain,
            Self::Snow => WeatherIcon::Snowflake,
            Self::Thunderstorm => WeatherIcon::Lightning,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherIcon {
    Sun,
    Cloud,
    Mist,
    CloudRain,
    Snowflake,
    Lightning,
}

impl WeatherIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Sun => "☀",
            Self::Cloud => "☁",
            Self::Mist => "≋",
            Self::CloudRain => "☂",
            Self::Snowflake => "❄",
            Self::Lightning => "⚡",
        }
    }
}

/// Raw provider answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherObservation {
    pub condition_code: u16,
    pub temperature: f64,
    pub apparent_temperature: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub location: String,
    pub condition: Condition,
    pub temp: f64,
    pub feels_like: Option<f64>,
}

impl WeatherReading {
    pub fn from_observation(location: impl Into<String>, obs: &WeatherObservation) -> Self {
        Self {
            location: location.into(),
            condition: Condition::from_wmo_code(obs.condition_code),
            temp: obs.temperature,
            feels_like: obs.apparent_temperature,
        }
    }

    /// Zeroed reading shown when the provider could not be reached.
    pub fn placeholder(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            condition: Condition::Cloudy,
            temp: 0.0,
            feels_like: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WeatherStatus {
    Locating,
    Loading,
    Ready,
    Error(String),
}

pub struct WeatherPanel {
    reading: WeatherReading,
    status: WeatherStatus,
    place: Option<Place>,
    sequencer: RequestSequencer,
}

impl Default for WeatherPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherPanel {
    pub fn new() -> Self {
        Self {
            reading: WeatherReading::placeholder(DEFAULT_LOCATION_NAME),
            status: WeatherStatus::Locating,
            place: None,
            sequencer: RequestSequencer::default(),
        }
    }

    pub fn reading(&self) -> &WeatherReading {
        &self.reading
    }

    pub fn status(&self) -> &WeatherStatus {
        &self.status
    }

    /// Last place a fetch was issued for.
    pub fn place(&self) -> Option<&Place> {
        self.place.as_ref()
    }

    /// Start a fetch for `place`; the place is remembered for later refreshes.
    pub fn begin(&mut self, place: Place) -> (RequestSeq, Place) {
        let seq = self.sequencer.issue();
        self.place = Some(place.clone());
        self.status = WeatherStatus::Loading;
        tracing::debug!(seq = seq.0, place = %place.name, "weather fetch issued");
        (seq, place)
    }

    /// Start a fetch for the remembered place (or the fallback).
    pub fn refresh(&mut self) -> (RequestSeq, Place) {
        let place = self.place.clone().unwrap_or_else(Place::fallback);
        self.begin(place)
    }

    pub fn complete<E: fmt::Display>(
        &mut self,
        seq: RequestSeq,
        result: Result<WeatherObservation, E>,
    ) -> bool {
        if !self.sequencer.is_current(seq) {
            tracing::debug!(seq = seq.0, "dropping stale weather response");
            return false;
        }

        let location = self
            .place
            .as_ref()
            .map(|p| p.name.clone())
            .unwrap_or_else(|| DEFAULT_LOCATION_NAME.to_string());

        match result {
            Ok(obs) => {
                self.reading = WeatherReading::from_observation(location, &obs);
                self.status = WeatherStatus::Ready;
            }
            Err(e) => {
                tracing::warn!(error = %e, "weather fetch failed");
                self.reading = WeatherReading::placeholder(location);
                self.status = WeatherStatus::Error(e.to_string());
            }
        }
        true
    }
}
