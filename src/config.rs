use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::predict::{
    N2yoClient, ObserverLocation, PredictionRequest, ProviderError, TrackedSatellite,
    DEFAULT_BASE_URL,
};
use crate::timezone::TimeZoneConverter;

/// Overrides `provider.api_key` when set
pub const API_KEY_ENV: &str = "N2YO_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unknown time zone: {0}")]
    UnknownTimeZone(String),
    #[error("invalid station coordinates: {0}")]
    InvalidCoordinates(String),
    #[error("invalid duration '{value}': {message}")]
    InvalidDuration { value: String, message: String },
    #[error("no satellites configured")]
    NoSatellites,
    #[error("duplicate satellite id: {0}")]
    DuplicateSatellite(String),
    #[error("no provider API key (set provider.api_key or N2YO_API_KEY)")]
    MissingApiKey,
    #[error("cannot build provider client: {0}")]
    Client(#[from] ProviderError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub station: StationConfig,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    pub provider: ProviderConfig,
    #[serde(default = "TrackedSatellite::noaa_defaults")]
    pub satellites: Vec<TrackedSatellite>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationConfig {
    pub name: Option<String>,
    pub coordinates: String,
    #[serde(default)]
    pub altitude_m: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    /// Prediction horizon in days
    #[serde(default = "default_days")]
    pub days: u32,
    /// Passes peaking below this elevation are not requested
    #[serde(default = "default_min_elevation")]
    pub min_elevation: u32,
    /// Per-request timeout, e.g. "10s"
    #[serde(default = "default_timeout")]
    pub timeout: String,
}

fn default_timezone() -> String {
    "America/New_York".to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_days() -> u32 {
    2
}

fn default_min_elevation() -> u32 {
    10
}

fn default_timeout() -> String {
    "10s".to_string()
}

/// Validated configuration, ready to drive a session
#[derive(Debug, Clone)]
pub struct Settings {
    pub station_name: Option<String>,
    pub observer: ObserverLocation,
    pub converter: TimeZoneConverter,
    pub base_url: String,
    pub api_key: String,
    pub request: PredictionRequest,
    pub timeout: Duration,
    pub satellites: Vec<TrackedSatellite>,
}

impl Settings {
    pub fn provider(&self) -> Result<N2yoClient, ConfigError> {
        Ok(N2yoClient::new(
            &self.base_url,
            &self.api_key,
            self.request.clone(),
            self.timeout,
        )?)
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Validate everything a refresh depends on. Failures here are fatal.
    pub fn resolve(&self) -> Result<Settings, ConfigError> {
        let key_override = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
        self.resolve_with(key_override)
    }

    pub fn resolve_with(&self, api_key_override: Option<String>) -> Result<Settings, ConfigError> {
        let observer = ObserverLocation::from_coordinates(
            &self.station.coordinates,
            Some(self.station.altitude_m),
        )
        .ok_or_else(|| ConfigError::InvalidCoordinates(self.station.coordinates.clone()))?;

        let converter = TimeZoneConverter::new(&self.timezone)?;
        let timeout = parse_duration(&self.provider.timeout)?;

        if self.satellites.is_empty() {
            return Err(ConfigError::NoSatellites);
        }
        let mut seen = HashSet::new();
        for sat in &self.satellites {
            if !seen.insert(sat.id.as_str()) {
                return Err(ConfigError::DuplicateSatellite(sat.id.clone()));
            }
        }

        let api_key = api_key_override.unwrap_or_else(|| self.provider.api_key.clone());
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        Ok(Settings {
            station_name: self.station.name.clone(),
            observer,
            converter,
            base_url: self.provider.base_url.clone(),
            api_key,
            request: PredictionRequest {
                observer,
                days: self.provider.days,
                min_elevation_deg: self.provider.min_elevation,
            },
            timeout,
            satellites: self.satellites.clone(),
        })
    }
}

fn parse_duration(s: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(s.trim()).map_err(|e| ConfigError::InvalidDuration {
        value: s.to_string(),
        message: e.to_string(),
    })
}
