use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::predict::error::MalformedPassError;
use crate::predict::types::PassRecord;

/// One pass entry as the provider sends it. Every field is optional here;
/// the defaulting rules live in [`normalize_entry`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPass {
    #[serde(rename = "startUTC", default, deserialize_with = "lenient_i64")]
    start_utc: Option<i64>,
    #[serde(rename = "maxUTC", default, deserialize_with = "lenient_i64")]
    max_utc: Option<i64>,
    #[serde(rename = "endUTC", default, deserialize_with = "lenient_i64")]
    end_utc: Option<i64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    start_az: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    max_az: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    end_az: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    start_el: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    max_el: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    end_el: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    start_az_compass: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    max_az_compass: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    end_az_compass: Option<String>,
}

/// Normalize every entry of one satellite's response, dropping malformed ones.
/// Input order is preserved.
pub fn normalize(satellite_id: &str, entries: &[Value]) -> Vec<PassRecord> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| match normalize_entry(satellite_id, entry) {
            Ok(record) => Some(record),
            Err(e) => {
                log::debug!("Dropping pass {} for satellite {}: {}", i, satellite_id, e);
                None
            }
        })
        .collect()
}

pub fn normalize_entry(satellite_id: &str, entry: &Value) -> Result<PassRecord, MalformedPassError> {
    if !entry.is_object() {
        return Err(MalformedPassError::NotAnObject);
    }
    let raw = RawPass::deserialize(entry).map_err(|e| MalformedPassError::Invalid(e.to_string()))?;

    let start_utc = raw
        .start_utc
        .ok_or(MalformedPassError::MissingField("startUTC"))?;
    let max_utc = raw.max_utc.ok_or(MalformedPassError::MissingField("maxUTC"))?;
    let end_utc = raw.end_utc.ok_or(MalformedPassError::MissingField("endUTC"))?;

    if start_utc > max_utc || max_utc > end_utc {
        return Err(MalformedPassError::OutOfOrder {
            start: start_utc,
            peak: max_utc,
            end: end_utc,
        });
    }

    Ok(PassRecord {
        satellite_id: satellite_id.to_string(),
        start: to_instant("startUTC", start_utc)?,
        peak: to_instant("maxUTC", max_utc)?,
        end: to_instant("endUTC", end_utc)?,
        start_azimuth_deg: azimuth(raw.start_az),
        peak_azimuth_deg: azimuth(raw.max_az),
        end_azimuth_deg: azimuth(raw.end_az),
        start_elevation_deg: raw.start_el.unwrap_or(0.0),
        peak_elevation_deg: raw.max_el.unwrap_or(0.0),
        end_elevation_deg: raw.end_el.unwrap_or(0.0),
        start_compass: raw.start_az_compass.unwrap_or_default(),
        peak_compass: raw.max_az_compass.unwrap_or_default(),
        end_compass: raw.end_az_compass.unwrap_or_default(),
    })
}

fn to_instant(field: &'static str, epoch: i64) -> Result<DateTime<Utc>, MalformedPassError> {
    DateTime::from_timestamp(epoch, 0)
        .ok_or(MalformedPassError::TimestampOutOfRange { field, value: epoch })
}

fn azimuth(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0).rem_euclid(360.0)
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom(format!("unrepresentable number {}", n)))?,
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(de::Error::custom)?,
        Some(other) => return Err(de::Error::custom(format!("expected number, found {}", other))),
    };
    if !value.is_finite() {
        return Err(de::Error::custom("non-finite number"));
    }
    Ok(Some(value))
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_i64() {
                return Ok(Some(v));
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(Some(f as i64)),
                _ => Err(de::Error::custom(format!("expected integer timestamp, found {}", n))),
            }
        }
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s.trim().parse::<i64>().map(Some).map_err(de::Error::custom),
        Some(other) => Err(de::Error::custom(format!("expected timestamp, found {}", other))),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!("expected string, found {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_entry() -> Value {
        json!({
            "startAz": 331.22,
            "startAzCompass": "NW",
            "startUTC": 1710455520,
            "maxAz": 62.1,
            "maxAzCompass": "ENE",
            "maxEl": 45,
            "maxUTC": 1710455940,
            "endAz": 152.9,
            "endAzCompass": "SSE",
            "endUTC": 1710456420
        })
    }

    #[test]
    fn normalizes_full_entry() {
        let record = normalize_entry("18", &full_entry()).unwrap();
        assert_eq!(record.satellite_id, "18");
        assert_eq!(record.start.timestamp(), 1710455520);
        assert_eq!(record.peak.timestamp(), 1710455940);
        assert_eq!(record.end.timestamp(), 1710456420);
        assert_eq!(record.start_azimuth_deg, 331.22);
        assert_eq!(record.peak_elevation_deg, 45.0);
        assert_eq!(record.start_compass, "NW");
        assert_eq!(record.peak_compass, "ENE");
        assert_eq!(record.end_compass, "SSE");
        assert_eq!(record.duration_seconds(), 900);
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let entry = json!({ "startUTC": 100, "maxUTC": 200, "endUTC": 300 });
        let record = normalize_entry("15", &entry).unwrap();
        assert_eq!(record.start_azimuth_deg, 0.0);
        assert_eq!(record.peak_azimuth_deg, 0.0);
        assert_eq!(record.start_elevation_deg, 0.0);
        assert_eq!(record.peak_elevation_deg, 0.0);
        assert_eq!(record.end_elevation_deg, 0.0);
        assert_eq!(record.start_compass, "");
        assert_eq!(record.end_compass, "");
    }

    #[test]
    fn null_and_string_fields_are_tolerated() {
        let entry = json!({
            "startUTC": "100",
            "maxUTC": 200.0,
            "endUTC": 300,
            "maxEl": "61.5",
            "startEl": null,
            "endAzCompass": null
        });
        let record = normalize_entry("19", &entry).unwrap();
        assert_eq!(record.start.timestamp(), 100);
        assert_eq!(record.peak.timestamp(), 200);
        assert_eq!(record.peak_elevation_deg, 61.5);
        assert_eq!(record.start_elevation_deg, 0.0);
        assert_eq!(record.end_compass, "");
    }

    #[test]
    fn azimuth_is_wrapped_into_compass_range() {
        let entry = json!({ "startUTC": 1, "maxUTC": 2, "endUTC": 3, "startAz": 360.0, "endAz": -10.0 });
        let record = normalize_entry("15", &entry).unwrap();
        assert_eq!(record.start_azimuth_deg, 0.0);
        assert_eq!(record.end_azimuth_deg, 350.0);
    }

    #[test]
    fn missing_timestamp_is_malformed() {
        let mut entry = full_entry();
        entry.as_object_mut().unwrap().remove("endUTC");
        assert_eq!(
            normalize_entry("18", &entry),
            Err(MalformedPassError::MissingField("endUTC"))
        );
    }

    #[test]
    fn out_of_order_times_are_malformed() {
        let entry = json!({ "startUTC": 300, "maxUTC": 200, "endUTC": 400 });
        assert!(matches!(
            normalize_entry("18", &entry),
            Err(MalformedPassError::OutOfOrder { .. })
        ));
    }

    #[test]
    fn garbage_values_are_malformed() {
        assert_eq!(
            normalize_entry("18", &json!([1, 2, 3])),
            Err(MalformedPassError::NotAnObject)
        );
        let entry = json!({ "startUTC": 1, "maxUTC": 2, "endUTC": 3, "maxEl": { "deg": 4 } });
        assert!(matches!(
            normalize_entry("18", &entry),
            Err(MalformedPassError::Invalid(_))
        ));
        let entry = json!({ "startUTC": 1, "maxUTC": 2, "endUTC": 3, "maxEl": "NaN" });
        assert!(matches!(
            normalize_entry("18", &entry),
            Err(MalformedPassError::Invalid(_))
        ));
    }

    #[test]
    fn dropped_entry_keeps_siblings() {
        let mut broken = full_entry();
        broken.as_object_mut().unwrap().remove("endUTC");
        let mut later = full_entry();
        later["startUTC"] = json!(1710500000);
        later["maxUTC"] = json!(1710500400);
        later["endUTC"] = json!(1710500900);

        let records = normalize("18", &[full_entry(), broken, later]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].start.timestamp(), 1710455520);
        assert_eq!(records[1].start.timestamp(), 1710500000);
    }

    #[test]
    fn empty_batch_is_empty() {
        assert!(normalize("18", &[]).is_empty());
    }

    #[test]
    fn records_keep_time_ordering() {
        let entries = vec![
            full_entry(),
            json!({ "startUTC": 5, "maxUTC": 5, "endUTC": 5 }),
            json!({ "startUTC": 9, "maxUTC": 4, "endUTC": 10 }),
        ];
        let records = normalize("15", &entries);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.start <= r.peak && r.peak <= r.end));
    }
}
