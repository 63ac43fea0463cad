use std::cmp::{Ordering, Reverse};
use std::collections::HashMap;

use chrono::{NaiveDateTime, NaiveTime};

use crate::display::row::Column;
use crate::quality::ClassifiedPass;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
// Table cells carry no year; a leap year keeps "Feb 29" parseable.
const PLACEHOLDER_YEAR: i32 = 2000;

/// Ordering key recovered from a formatted table cell.
///
/// Keys of different kinds order by kind (time, date, number, text), so a
/// mixed column still sorts deterministically.
#[derive(Debug, Clone)]
pub enum SortKey {
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    Number(f64),
    Text(String),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Time(_) => 0,
            SortKey::DateTime(_) => 1,
            SortKey::Number(_) => 2,
            SortKey::Text(_) => 3,
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Time(a), SortKey::Time(b)) => a.cmp(b),
            (SortKey::DateTime(a), SortKey::DateTime(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

/// Best-effort key for a display cell. Never fails: anything that does not
/// parse sorts as lowercase text.
pub fn sort_key(cell: &str) -> SortKey {
    parse_key(cell).unwrap_or_else(|| SortKey::Text(cell.to_lowercase()))
}

fn parse_key(cell: &str) -> Option<SortKey> {
    // "45° at 06:32 PM"
    if let Some(idx) = cell.rfind("at") {
        let time = cell[idx + "at".len()..].trim();
        return NaiveTime::parse_from_str(time, "%I:%M %p")
            .ok()
            .map(SortKey::Time);
    }

    // "Mar 14 06:32 PM"
    if MONTHS.iter().any(|m| cell.contains(m)) {
        let dated = format!("{} {}", PLACEHOLDER_YEAR, cell.trim());
        return NaiveDateTime::parse_from_str(&dated, "%Y %b %d %I:%M %p")
            .ok()
            .map(SortKey::DateTime);
    }

    // "331.22° (NW)", or a bare number
    let leading = cell.split('°').next()?.trim();
    leading.parse::<f64>().ok().map(SortKey::Number)
}

/// Per-column sort direction for one display session.
///
/// Every sort of a column flips its direction; the first sort is ascending.
#[derive(Debug, Default)]
pub struct SortState {
    descending: HashMap<String, bool>,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direction the next sort of `column` will use
    pub fn is_descending(&self, column: &str) -> bool {
        self.descending.get(column).copied().unwrap_or(false)
    }

    /// Sort `rows` by the heuristic key of their `column` cell, then flip the
    /// column's direction. Returns whether this sort was descending.
    pub fn sort_rows<'c, T, F>(&mut self, column: &str, rows: &mut [T], cell: F) -> bool
    where
        F: Fn(&T) -> &'c str,
    {
        let descending = self.is_descending(column);
        if descending {
            rows.sort_by_cached_key(|row| Reverse(sort_key(cell(row))));
        } else {
            rows.sort_by_cached_key(|row| sort_key(cell(row)));
        }
        self.descending.insert(column.to_string(), !descending);
        descending
    }

    pub fn reset(&mut self) {
        self.descending.clear();
    }
}

/// Typed ordering of two passes by the field behind a column
pub fn compare_passes(column: Column, a: &ClassifiedPass, b: &ClassifiedPass) -> Ordering {
    let (ra, rb) = (&a.record, &b.record);
    let ord = match column {
        Column::Satellite => natural_id(&ra.satellite_id).cmp(&natural_id(&rb.satellite_id)),
        Column::StartTime => ra.start.cmp(&rb.start),
        Column::StartAzimuth => ra.start_azimuth_deg.total_cmp(&rb.start_azimuth_deg),
        Column::MaxElevation => ra
            .peak_elevation_deg
            .total_cmp(&rb.peak_elevation_deg)
            .then(ra.peak.cmp(&rb.peak)),
        Column::EndTime => ra.end.cmp(&rb.end),
        Column::EndAzimuth => ra.end_azimuth_deg.total_cmp(&rb.end_azimuth_deg),
        Column::Quality => {
            let qa = (a.classification.is_best, a.classification.tier);
            let qb = (b.classification.is_best, b.classification.tier);
            qa.cmp(&qb)
        }
    };
    ord.then(ra.start.cmp(&rb.start))
}

/// Sort passes by their typed fields. Preferred over the heuristic key.
pub fn sort_passes(passes: &mut [ClassifiedPass], column: Column, descending: bool) {
    passes.sort_by(|a, b| {
        let ord = compare_passes(column, a, b);
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
}

// Numeric ids compare by value, so "15" < "100"
fn natural_id(id: &str) -> (Option<u64>, &str) {
    match id.trim().parse::<u64>() {
        Ok(n) => (Some(n), id),
        Err(_) => (None, id),
    }
}
