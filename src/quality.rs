use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::predict::PassRecord;
use crate::timezone::TimeZoneConverter;

const HIGH_ELEVATION_DEG: f64 = 60.0;
const MID_ELEVATION_DEG: f64 = 30.0;
const BEST_ELEVATION_DEG: f64 = 40.0;
/// Local hours [start, end) in which a pass can count as best
const DAYTIME_HOURS: std::ops::Range<u32> = 8..20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum QualityTier {
    Low,
    Mid,
    High,
}

impl QualityTier {
    pub fn from_elevation(peak_elevation_deg: f64) -> Self {
        if peak_elevation_deg > HIGH_ELEVATION_DEG {
            QualityTier::High
        } else if peak_elevation_deg > MID_ELEVATION_DEG {
            QualityTier::Mid
        } else {
            QualityTier::Low
        }
    }

    /// Row tag the display shell styles on
    pub fn tag(&self) -> &'static str {
        match self {
            QualityTier::High => "high",
            QualityTier::Mid => "mid",
            QualityTier::Low => "low",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            QualityTier::High => "green",
            QualityTier::Mid => "orange",
            QualityTier::Low => "red",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub tier: QualityTier,
    pub is_best: bool,
}

/// A pass together with its quality, as handed to the display shell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedPass {
    pub record: PassRecord,
    pub classification: Classification,
}

impl ClassifiedPass {
    /// Classify against the start hour in the converter's zone
    pub fn new(record: PassRecord, converter: &TimeZoneConverter) -> Self {
        let hour = converter.local_hour(record.start);
        let classification = classify(&record, hour);
        Self {
            record,
            classification,
        }
    }
}

pub fn classify(record: &PassRecord, local_start_hour: u32) -> Classification {
    classify_elevation(record.peak_elevation_deg, local_start_hour)
}

/// Tier comes from elevation alone; best also needs a daytime start.
pub fn classify_elevation(peak_elevation_deg: f64, local_start_hour: u32) -> Classification {
    Classification {
        tier: QualityTier::from_elevation(peak_elevation_deg),
        is_best: peak_elevation_deg > BEST_ELEVATION_DEG
            && DAYTIME_HOURS.contains(&local_start_hour),
    }
}
