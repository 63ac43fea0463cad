use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::predict::PassRecord;
use crate::quality::{ClassifiedPass, QualityTier};
use crate::timezone::{DisplayPattern, TimeZoneConverter};

/// Columns of the pass table, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Column {
    #[strum(to_string = "NOAA", serialize = "satellite")]
    Satellite,
    #[strum(to_string = "Start Time", serialize = "start")]
    StartTime,
    #[strum(to_string = "Start Azimuth", serialize = "start-azimuth")]
    StartAzimuth,
    #[strum(to_string = "Max Elevation", serialize = "elevation")]
    MaxElevation,
    #[strum(to_string = "End Time", serialize = "end")]
    EndTime,
    #[strum(to_string = "End Azimuth", serialize = "end-azimuth")]
    EndAzimuth,
    #[strum(to_string = "Pass Quality", serialize = "quality")]
    Quality,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Satellite,
        Column::StartTime,
        Column::StartAzimuth,
        Column::MaxElevation,
        Column::EndTime,
        Column::EndAzimuth,
        Column::Quality,
    ];
}

/// Formatted cells for one pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub satellite: String,
    pub start_time: String,
    pub start_azimuth: String,
    pub max_elevation: String,
    pub end_time: String,
    pub end_azimuth: String,
    /// Tier name for best passes, empty otherwise
    pub quality: String,
    pub tier: QualityTier,
}

impl DisplayRow {
    pub fn cell(&self, column: Column) -> &str {
        match column {
            Column::Satellite => &self.satellite,
            Column::StartTime => &self.start_time,
            Column::StartAzimuth => &self.start_azimuth,
            Column::MaxElevation => &self.max_elevation,
            Column::EndTime => &self.end_time,
            Column::EndAzimuth => &self.end_azimuth,
            Column::Quality => &self.quality,
        }
    }

    pub fn cells(&self) -> [&str; 7] {
        Column::ALL.map(|c| self.cell(c))
    }
}

pub fn classify_and_format(record: &PassRecord, converter: &TimeZoneConverter) -> DisplayRow {
    format_row(&ClassifiedPass::new(record.clone(), converter), converter)
}

pub fn format_row(pass: &ClassifiedPass, converter: &TimeZoneConverter) -> DisplayRow {
    let record = &pass.record;
    let classification = pass.classification;
    let quality = if classification.is_best {
        classification.tier.to_string()
    } else {
        String::new()
    };

    DisplayRow {
        satellite: record.satellite_id.clone(),
        start_time: converter.format_utc(record.start, DisplayPattern::Table),
        start_azimuth: bearing(record.start_azimuth_deg, &record.start_compass),
        max_elevation: format!(
            "{}° at {}",
            record.peak_elevation_deg,
            converter.format_utc(record.peak, DisplayPattern::Clock)
        ),
        end_time: converter.format_utc(record.end, DisplayPattern::Table),
        end_azimuth: bearing(record.end_azimuth_deg, &record.end_compass),
        quality,
        tier: classification.tier,
    }
}

fn bearing(azimuth_deg: f64, compass: &str) -> String {
    format!("{}° ({})", azimuth_deg, compass)
}
