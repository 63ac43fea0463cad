use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

use crate::config::ConfigError;

/// Display layouts for local times
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPattern {
    /// "Mar 14 06:32 PM", used in the pass table
    Table,
    /// "2024-03-14 06:32:00 PM"
    Full,
    /// "06:32 PM", the time half of "45° at 06:32 PM"
    Clock,
}

impl DisplayPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayPattern::Table => "%b %d %I:%M %p",
            DisplayPattern::Full => "%Y-%m-%d %I:%M:%S %p",
            DisplayPattern::Clock => "%I:%M %p",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TimeZoneConverter {
    zone: Tz,
}

impl TimeZoneConverter {
    /// Resolve an IANA zone name such as "America/New_York".
    pub fn new(zone_id: &str) -> Result<Self, ConfigError> {
        let zone = zone_id
            .trim()
            .parse::<Tz>()
            .map_err(|_| ConfigError::UnknownTimeZone(zone_id.to_string()))?;
        Ok(Self { zone })
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    pub fn to_local(&self, instant: DateTime<Utc>) -> DateTime<Tz> {
        instant.with_timezone(&self.zone)
    }

    /// `None` when the epoch is outside the representable range
    pub fn to_local_epoch(&self, epoch_seconds: i64) -> Option<DateTime<Tz>> {
        DateTime::from_timestamp(epoch_seconds, 0).map(|utc| self.to_local(utc))
    }

    pub fn local_hour(&self, instant: DateTime<Utc>) -> u32 {
        self.to_local(instant).hour()
    }

    pub fn format(&self, local: &DateTime<Tz>, pattern: DisplayPattern) -> String {
        local.format(pattern.as_str()).to_string()
    }

    pub fn format_utc(&self, instant: DateTime<Utc>, pattern: DisplayPattern) -> String {
        self.format(&self.to_local(instant), pattern)
    }
}
