use std::collections::HashMap;

use serde_json::{json, Value};

use pass_o_mat::display::Column;
use pass_o_mat::predict::{PassProvider, ProviderError, TrackedSatellite};
use pass_o_mat::quality::QualityTier;
use pass_o_mat::session::refresh_satellite;
use pass_o_mat::timezone::TimeZoneConverter;
use pass_o_mat::Session;

enum Reply {
    Passes(Vec<Value>),
    Status(u16),
    NoData(&'static str),
}

#[derive(Default)]
struct FakeProvider {
    replies: HashMap<u32, Reply>,
}

impl FakeProvider {
    fn with(mut self, norad_id: u32, reply: Reply) -> Self {
        self.replies.insert(norad_id, reply);
        self
    }
}

impl PassProvider for FakeProvider {
    fn fetch_passes(&self, norad_id: u32) -> Result<Vec<Value>, ProviderError> {
        match self.replies.get(&norad_id) {
            Some(Reply::Passes(p)) => Ok(p.clone()),
            Some(Reply::Status(status)) => Err(ProviderError::Status { status: *status }),
            Some(Reply::NoData(msg)) => Err(ProviderError::Data(msg.to_string())),
            None => Ok(Vec::new()),
        }
    }
}

// 2024-03-14T16:00:00Z, noon EDT
const NOON_EDT: i64 = 1_710_432_000;

fn entry(start: i64, max_el: f64, start_az: f64, start_compass: &str) -> Value {
    json!({
        "startAz": start_az,
        "startAzCompass": start_compass,
        "startUTC": start,
        "maxAz": 90.0,
        "maxAzCompass": "E",
        "maxEl": max_el,
        "maxUTC": start + 400,
        "endAz": 170.0,
        "endAzCompass": "S",
        "endUTC": start + 800
    })
}

fn eastern() -> TimeZoneConverter {
    TimeZoneConverter::new("America/New_York").unwrap()
}

fn session(provider: FakeProvider) -> Session<FakeProvider> {
    Session::new(provider, TrackedSatellite::noaa_defaults(), eastern())
}

#[test]
fn refresh_merges_satellites_in_order() {
    let provider = FakeProvider::default()
        .with(25338, Reply::Passes(vec![entry(NOON_EDT, 65.0, 10.0, "N")]))
        .with(
            28654,
            Reply::Passes(vec![
                entry(NOON_EDT + 3600, 35.0, 200.0, "SSW"),
                entry(NOON_EDT + 7200, 20.0, 300.0, "WNW"),
            ]),
        );
    let mut session = session(provider);

    let summary = session.refresh();
    assert_eq!(summary.pass_count, 3);
    assert!(summary.warnings.is_empty());

    let tiers: Vec<_> = session.passes().iter().map(|p| p.classification.tier).collect();
    assert_eq!(tiers, vec![QualityTier::High, QualityTier::Mid, QualityTier::Low]);

    let rows = session.rows();
    assert_eq!(rows[0].satellite, "15");
    assert_eq!(rows[0].start_time, "Mar 14 12:00 PM");
    assert_eq!(rows[0].quality, "HIGH");
    assert_eq!(rows[1].quality, "");
    assert_eq!(rows[2].start_azimuth, "300° (WNW)");
}

#[test]
fn failing_satellite_does_not_abort_refresh() {
    let provider = FakeProvider::default()
        .with(25338, Reply::Status(503))
        .with(28654, Reply::NoData("Invalid API Key!"))
        .with(33591, Reply::Passes(vec![entry(NOON_EDT, 50.0, 10.0, "N")]));
    let mut session = session(provider);

    let summary = session.refresh();
    assert_eq!(summary.pass_count, 1);
    assert_eq!(summary.warnings.len(), 2);
    assert_eq!(summary.warnings[0].satellite, "NOAA 15");
    assert!(summary.warnings[0].error.is_transport());
    assert_eq!(summary.warnings[1].satellite, "NOAA 18");
    assert!(!summary.warnings[1].error.is_transport());
    assert_eq!(session.rows()[0].satellite, "19");
}

#[test]
fn refresh_replaces_previous_results() {
    let provider = FakeProvider::default()
        .with(25338, Reply::Passes(vec![entry(NOON_EDT, 65.0, 10.0, "N")]));
    let mut session = session(provider);
    session.refresh();
    assert_eq!(session.passes().len(), 1);
    session.refresh();
    assert_eq!(session.passes().len(), 1);
}

#[test]
fn empty_response_is_empty_not_error() {
    let provider = FakeProvider::default().with(25338, Reply::Passes(Vec::new()));
    let sat = TrackedSatellite::noaa_defaults().remove(0);
    let passes = refresh_satellite(&provider, &sat, &eastern()).unwrap();
    assert!(passes.is_empty());
}

#[test]
fn malformed_entries_are_dropped_silently() {
    let mut broken = entry(NOON_EDT + 100, 80.0, 0.0, "N");
    broken.as_object_mut().unwrap().remove("endUTC");
    let provider = FakeProvider::default().with(
        25338,
        Reply::Passes(vec![entry(NOON_EDT, 65.0, 10.0, "N"), broken]),
    );
    let mut session = session(provider);
    let summary = session.refresh();
    assert_eq!(summary.pass_count, 1);
    assert!(summary.warnings.is_empty());
}

#[test]
fn header_clicks_toggle_direction() {
    let provider = FakeProvider::default().with(
        25338,
        Reply::Passes(vec![
            entry(NOON_EDT, 40.0, 120.5, "ESE"),
            entry(NOON_EDT + 6000, 40.0, 5.0, "N"),
            entry(NOON_EDT + 12000, 40.0, 300.0, "WNW"),
        ]),
    );
    let mut session = session(provider);
    session.refresh();

    assert!(!session.sort_column(Column::StartAzimuth));
    let ascending: Vec<_> = session.rows().iter().map(|r| r.start_azimuth.clone()).collect();
    assert_eq!(ascending, vec!["5° (N)", "120.5° (ESE)", "300° (WNW)"]);

    assert!(session.sort_column(Column::StartAzimuth));
    let descending: Vec<_> = session.rows().iter().map(|r| r.start_azimuth.clone()).collect();
    let mut reversed = ascending.clone();
    reversed.reverse();
    assert_eq!(descending, reversed);
}

#[test]
fn typed_ordering_by_elevation() {
    let provider = FakeProvider::default().with(
        25338,
        Reply::Passes(vec![
            entry(NOON_EDT, 9.5, 0.0, "N"),
            entry(NOON_EDT + 6000, 75.0, 0.0, "N"),
            entry(NOON_EDT + 12000, 30.0, 0.0, "N"),
        ]),
    );
    let mut session = session(provider);
    session.refresh();

    session.order_by(Column::MaxElevation, true);
    let elevations: Vec<_> = session
        .table()
        .iter()
        .map(|(pass, _)| pass.record.peak_elevation_deg)
        .collect();
    assert_eq!(elevations, vec![75.0, 30.0, 9.5]);
}

#[test]
fn selecting_a_row_replaces_the_plot() {
    let provider = FakeProvider::default()
        .with(25338, Reply::Passes(vec![entry(NOON_EDT, 90.0, 0.0, "N")]))
        .with(28654, Reply::Passes(vec![entry(NOON_EDT + 3600, 45.0, 180.0, "S")]));
    let mut session = session(provider);
    session.refresh();
    assert!(session.current_plot().is_none());

    let plot = session.select_row(0).unwrap();
    assert_eq!(plot.title, "NOAA 15 Pass Path");
    assert_eq!(plot.traces.len(), 1);
    assert_eq!(plot.traces[0].points[1].radius, 0.0);
    assert_eq!(plot.traces[0].annotations[0].text, "Start: N");

    let plot = session.select_row(1).unwrap();
    assert_eq!(plot.title, "NOAA 18 Pass Path");
    assert!((plot.traces[0].points[0].theta - std::f64::consts::PI).abs() < 1e-12);

    assert!(session.select_row(7).is_none());
    assert_eq!(session.current_plot().unwrap().title, "NOAA 18 Pass Path");
}

#[test]
fn selection_follows_display_order() {
    let provider = FakeProvider::default()
        .with(25338, Reply::Passes(vec![entry(NOON_EDT + 3600, 45.0, 0.0, "N")]))
        .with(28654, Reply::Passes(vec![entry(NOON_EDT, 45.0, 0.0, "N")]));
    let mut session = session(provider);
    session.refresh();
    session.sort_column(Column::StartTime);

    let plot = session.select_row(0).unwrap();
    assert_eq!(plot.title, "NOAA 18 Pass Path");
}

#[test]
fn rows_with_same_start_cell_plot_together() {
    let provider = FakeProvider::default().with(
        25338,
        Reply::Passes(vec![
            entry(NOON_EDT, 45.0, 0.0, "N"),
            entry(NOON_EDT + 20, 50.0, 10.0, "N"),
        ]),
    );
    let mut session = session(provider);
    session.refresh();
    let plot = session.select_row(1).unwrap();
    assert_eq!(plot.traces.len(), 2);
}
