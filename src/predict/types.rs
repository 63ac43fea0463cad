use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A satellite the session requests passes for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedSatellite {
    pub id: String,
    pub name: String,
    pub norad_id: u32,
    #[serde(default)]
    pub frequency: Option<String>,
}

impl TrackedSatellite {
    pub fn new(id: &str, name: &str, norad_id: u32, frequency: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            norad_id,
            frequency: frequency.map(String::from),
        }
    }

    /// The NOAA POES birds still broadcasting APT
    pub fn noaa_defaults() -> Vec<Self> {
        vec![
            Self::new("15", "NOAA 15", 25338, Some("137.620 MHz")),
            Self::new("18", "NOAA 18", 28654, Some("137.9125 MHz")),
            Self::new("19", "NOAA 19", 33591, Some("137.100 MHz")),
        ]
    }
}

/// A predicted pass, normalized from a provider response.
///
/// Always satisfies `start <= peak <= end`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassRecord {
    pub satellite_id: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub start: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub peak: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub end: DateTime<Utc>,
    pub start_azimuth_deg: f64,
    pub peak_azimuth_deg: f64,
    pub end_azimuth_deg: f64,
    pub start_elevation_deg: f64,
    pub peak_elevation_deg: f64,
    pub end_elevation_deg: f64,
    pub start_compass: String,
    pub peak_compass: String,
    pub end_compass: String,
}

impl PassRecord {
    pub fn duration_seconds(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }

    /// Start, peak and end geometry as (azimuth, elevation) pairs
    pub fn track(&self) -> [(f64, f64); 3] {
        [
            (self.start_azimuth_deg, self.start_elevation_deg),
            (self.peak_azimuth_deg, self.peak_elevation_deg),
            (self.end_azimuth_deg, self.end_elevation_deg),
        ]
    }
}
