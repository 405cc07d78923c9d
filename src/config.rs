// Global configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::news::DEFAULT_NEWS_QUERY;
use crate::engine::provider::gemini::DEFAULT_GEMINI_MODEL;
use crate::engine::timer::TimerDurations;
use crate::engine::weather::{Coordinates, Place};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,

    #[serde(default)]
    pub news: NewsConfig,

    #[serde(default)]
    pub weather: WeatherConfig,

    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Length of a focus block in minutes
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u32,

    /// Length of a break block in minutes
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,

    /// Dashboard redraw cadence while running
    #[serde(default = "default_refresh_ms")]
    pub refresh_ms: u64,

    /// Ring the terminal bell when a block finishes
    #[serde(default = "default_true_config")]
    pub bell: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsConfig {
    /// Query issued when the dashboard starts
    #[serde(default = "default_news_query")]
    pub default_query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Minutes between automatic weather refreshes
    #[serde(default = "default_refresh_minutes")]
    pub refresh_minutes: u64,

    /// Look up the position from the public IP when no coordinates are set
    #[serde(default = "default_true_config")]
    pub ip_lookup: bool,

    /// Fixed position (both must be set to take effect)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    /// Display name for the fixed position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Gemini API key (GEMINI_API_KEY takes over when this is unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Gemini model used for news search
    #[serde(default = "default_model")]
    pub model: String,

    /// Per-request timeout for every remote call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Where timer state, memos and the log file live
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_focus_minutes() -> u32 {
    25
}

fn default_break_minutes() -> u32 {
    5
}

fn default_refresh_ms() -> u64 {
    200
}

fn default_true_config() -> bool {
    true
}

fn default_news_query() -> String {
    DEFAULT_NEWS_QUERY.to_string()
}

fn default_refresh_minutes() -> u64 {
    30
}

fn default_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            break_minutes: default_break_minutes(),
            refresh_ms: default_refresh_ms(),
            bell: true,
        }
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            default_query: default_news_query(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            refresh_minutes: default_refresh_minutes(),
            ip_lookup: true,
            latitude: None,
            longitude: None,
            location_name: None,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "macos") {
            dirs::home_dir()
                .context("Could not determine home directory")?
                .join(".config")
                .join("zendash")
        } else {
            dirs::config_dir()
                .context("Could not determine config directory")?
                .join("zendash")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from disk, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Config::default();

            // Try to save the default config, but don't fail if we can't
            if let Err(e) = config.save_to(&config_path) {
                eprintln!("Warning: Could not create default config file: {:#}", e);
                eprintln!(
                    "Using built-in defaults. Run 'zendash init-config' to create a config file."
                );
            }

            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.sanitize();
        Ok(config)
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Check if config file exists
    pub fn exists() -> bool {
        Self::config_path().map(|p| p.exists()).unwrap_or(false)
    }

    /// Create a default config file if it doesn't exist
    pub fn ensure_default() -> Result<()> {
        if !Self::exists() {
            Config::default().save()?;
        }
        Ok(())
    }

    /// Zero durations and cadences make no sense; raise them to the minimum.
    fn sanitize(&mut self) {
        self.timer.focus_minutes = self.timer.focus_minutes.max(1);
        self.timer.break_minutes = self.timer.break_minutes.max(1);
        self.timer.refresh_ms = self.timer.refresh_ms.max(16);
        self.weather.refresh_minutes = self.weather.refresh_minutes.max(1);
        self.provider.timeout_secs = self.provider.timeout_secs.max(1);
        if self.news.default_query.trim().is_empty() {
            self.news.default_query = default_news_query();
        }
    }

    pub fn durations(&self) -> TimerDurations {
        TimerDurations::from_minutes(self.timer.focus_minutes, self.timer.break_minutes)
    }

    /// Configured key first, then the environment.
    pub fn api_key(&self) -> Option<String> {
        self.provider
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|k| !k.trim().is_empty())
    }

    /// Position pinned in the config, if both coordinates are present.
    pub fn fixed_place(&self) -> Option<Place> {
        let (latitude, longitude) = (self.weather.latitude?, self.weather.longitude?);
        let coordinates = Coordinates {
            latitude,
            longitude,
        };
        let name = self
            .weather
            .location_name
            .clone()
            .unwrap_or_else(|| coordinates.to_string());
        Some(Place { name, coordinates })
    }

    /// Resolve the data directory: command line, then config, then the platform default.
    pub fn data_dir(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = cli_override {
            return Ok(dir.to_path_buf());
        }
        if let Some(dir) = &self.storage.data_dir {
            return Ok(dir.clone());
        }
        Ok(dirs::data_dir()
            .context("Could not determine data directory")?
            .join("zendash"))
    }
}
