//! Filter Invariant Tests
//!
//! Tests for coordinated filtering:
//! - Clearing a filter is idempotent
//! - Filters on different dimensions commute
//! - A group never sees its own dimension's filter
//! - Group totals equal the count under every other filter
//! - List nodes are stable per record identity

use chrono::{NaiveDate, NaiveDateTime};
use crossview::chart::{BrushGesture, BrushState, ClipRect};
use crossview::dashboard::{
    build_flight_dashboard, Dashboard, FlightOptions, DATE_CHART, DELAY_CHART, DISTANCE_CHART,
    HOUR_CHART,
};
use crossview::index::{Crossfilter, FilterIndex, GroupId, IndexKey, Range};
use crossview::record::{Record, RecordId, RecordLoader, RecordStore};

// =============================================================================
// Helper Functions
// =============================================================================

fn at(month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2001, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn store(rows: &[(NaiveDateTime, f64, f64, &str, &str)]) -> RecordStore {
    let mut loader = RecordLoader::default();
    for (ts, delay, distance, origin, destination) in rows {
        loader.push(*ts, *delay, *distance, *origin, *destination);
    }
    loader.finish()
}

fn sample() -> RecordStore {
    store(&[
        (at(2, 1, 6, 15), -12.0, 320.0, "SFO", "LAX"),
        (at(2, 1, 9, 40), 3.0, 1450.0, "SFO", "JFK"),
        (at(2, 2, 13, 5), 27.0, 640.0, "OAK", "SEA"),
        (at(2, 3, 18, 30), 0.0, 90.0, "SJC", "LAX"),
        (at(2, 5, 21, 0), 185.0, 2400.0, "LAX", "ORD"),
        (at(2, 8, 7, 55), -70.0, 1100.0, "SEA", "SFO"),
        (at(2, 9, 11, 20), 41.0, 510.0, "OAK", "LAX"),
        (at(2, 11, 16, 45), -2.0, 780.0, "SFO", "PHX"),
    ])
}

fn no_date_filter() -> FlightOptions {
    FlightOptions {
        date_filter: None,
        ..FlightOptions::default()
    }
}

fn mounted(store: RecordStore) -> Dashboard {
    let mut dashboard = build_flight_dashboard(store, &no_date_filter()).unwrap();
    dashboard.mount().unwrap();
    dashboard
}

fn group_total(index: &Crossfilter, group: GroupId) -> u64 {
    index.group_all(group).unwrap().iter().map(|b| b.value).sum()
}

fn delay(r: &Record) -> IndexKey {
    IndexKey::from_number(r.delay_minutes.clamp(-60.0, 149.0))
}

fn destination(r: &Record) -> IndexKey {
    IndexKey::from_text(r.destination.clone())
}

fn by_ten(k: &IndexKey) -> IndexKey {
    IndexKey::from_number((k.as_number().unwrap_or(0.0) / 10.0).floor() * 10.0)
}

fn same(k: &IndexKey) -> IndexKey {
    k.clone()
}

// =============================================================================
// Idempotence Tests
// =============================================================================

/// Clearing twice leaves state and rendered output as clearing once.
#[test]
fn test_clear_filter_twice_equals_once() {
    let mut dashboard = mounted(sample());
    dashboard.set_filter(DELAY_CHART, Some(Range::new(-60.0, 10.0))).unwrap();

    dashboard.set_filter(DELAY_CHART, None).unwrap();
    let once = dashboard.snapshot().unwrap();
    dashboard.set_filter(DELAY_CHART, None).unwrap();
    let twice = dashboard.snapshot().unwrap();

    assert_eq!(once.readout, twice.readout);
    for (a, b) in once.charts.iter().zip(&twice.charts) {
        let (va, vb) = (a.view.as_ref().unwrap(), b.view.as_ref().unwrap());
        assert_eq!(a.extent, b.extent);
        assert_eq!(a.state, b.state);
        assert_eq!(va.bars, vb.bars);
        assert_eq!(va.clip, vb.clip);
        assert_eq!(va.reset_visible, vb.reset_visible);
    }
    assert_eq!(once.list, twice.list);
}

// =============================================================================
// Commutativity Tests
// =============================================================================

/// Delay then distance matches distance then delay.
#[test]
fn test_unrelated_filters_commute() {
    let delay_range = Some(Range::new(-10.0, 50.0));
    let distance_range = Some(Range::new(300.0, 1500.0));

    let mut ab = mounted(sample());
    ab.set_filter(DELAY_CHART, delay_range).unwrap();
    ab.set_filter(DISTANCE_CHART, distance_range).unwrap();

    let mut ba = mounted(sample());
    ba.set_filter(DISTANCE_CHART, distance_range).unwrap();
    ba.set_filter(DELAY_CHART, delay_range).unwrap();

    assert_eq!(ab.readout(), ba.readout());
    assert_eq!(ab.list().identities(), ba.list().identities());
    assert_eq!(ab.readout().unwrap().matched, 4);
}

// =============================================================================
// Self-Exclusion Tests
// =============================================================================

/// A chart's bars do not move when only its own filter changes.
#[test]
fn test_own_filter_does_not_change_own_bars() {
    let mut dashboard = mounted(sample());
    let before = dashboard.chart(HOUR_CHART).unwrap().view().unwrap().bars.clone();
    let delay_before = dashboard.chart(DELAY_CHART).unwrap().view().unwrap().bars.clone();

    dashboard.set_filter(HOUR_CHART, Some(Range::new(6.0, 12.0))).unwrap();

    assert_eq!(dashboard.chart(HOUR_CHART).unwrap().view().unwrap().bars, before);
    assert_ne!(dashboard.chart(DELAY_CHART).unwrap().view().unwrap().bars, delay_before);
}

/// Group totals ignore the owning dimension's filter.
#[test]
fn test_group_ignores_own_dimension() {
    let mut cf = Crossfilter::new(sample());
    let d = cf.dimension("delay", delay).unwrap();
    let delays = cf.group(d, "delays", by_ten).unwrap();

    let full = cf.group_all(delays).unwrap();
    cf.filter_range(d, Range::new(0.0, 10.0)).unwrap();

    assert_eq!(cf.group_all(delays).unwrap(), full);
    assert_eq!(cf.matched_count(), 2);
}

// =============================================================================
// Conservation Tests
// =============================================================================

/// Every group's total equals the count under the other dimensions' filters.
#[test]
fn test_group_totals_equal_other_filter_count() {
    let mut cf = Crossfilter::new(sample());
    let d = cf.dimension("delay", delay).unwrap();
    let delays = cf.group(d, "delays", by_ten).unwrap();
    let dest = cf.dimension("destination", destination).unwrap();
    let dests = cf.group(dest, "destinations", same).unwrap();

    cf.filter_range(d, Range::new(-60.0, 30.0)).unwrap();
    let delay_only = cf.matched_count() as u64;
    assert_eq!(group_total(&cf, dests), delay_only);
    assert_eq!(group_total(&cf, delays), 8);
    assert_eq!(delay_only, 6);
}

/// Clamped outliers stay counted by every other dimension.
#[test]
fn test_clamp_does_not_exclude_records() {
    let mut dashboard = mounted(sample());
    let total = dashboard.readout().unwrap().total;
    assert_eq!(total, 8);

    // 185-minute delay and 2400-mile flight are only folded, never dropped
    dashboard.set_filter(HOUR_CHART, Some(Range::new(20.0, 22.0))).unwrap();
    assert_eq!(dashboard.readout().unwrap().matched, 1);
    let delay_view = dashboard.chart(DELAY_CHART).unwrap().view().unwrap();
    assert!(delay_view.bars.contains("M200,100V0h9V100"));
}

// =============================================================================
// Identity Stability Tests
// =============================================================================

/// A record listed before and after a filter change keeps its node.
#[test]
fn test_list_nodes_survive_filter_changes() {
    let mut dashboard = mounted(sample());
    let node = dashboard.list().node_of(RecordId::new(2)).unwrap();

    dashboard.set_filter(DISTANCE_CHART, Some(Range::new(500.0, 1000.0))).unwrap();
    assert_eq!(dashboard.list().node_of(RecordId::new(2)), Some(node));
    assert!(dashboard.list().node_of(RecordId::new(0)).is_none());

    dashboard.reset_filter(DISTANCE_CHART).unwrap();
    assert_eq!(dashboard.list().node_of(RecordId::new(2)), Some(node));
    assert_eq!(dashboard.list().last_stats().rows_reused, 3);
    assert_eq!(dashboard.list().last_stats().rows_created, 5);
}

// =============================================================================
// Scenario Tests
// =============================================================================

fn three_same_day() -> RecordStore {
    store(&[
        (at(2, 1, 8, 0), -5.0, 400.0, "SFO", "LAX"),
        (at(2, 1, 9, 0), 0.0, 400.0, "SFO", "SEA"),
        (at(2, 1, 10, 0), 20.0, 400.0, "SFO", "LAX"),
    ])
}

/// Half-open delay filters over delays -5, 0, 20, with destination counts
/// following the matched records.
#[test]
fn test_delay_filter_drives_destination_counts() {
    let mut cf = Crossfilter::new(three_same_day());
    let d = cf.dimension("delay", delay).unwrap();
    let dest = cf.dimension("destination", destination).unwrap();
    let dests = cf.group(dest, "destinations", same).unwrap();

    // [-60, 0) excludes the on-time record
    cf.filter_range(d, Range::new(-60.0, 0.0)).unwrap();
    assert_eq!(cf.matched_count(), 1);

    // [-60, 1) keeps both records at or below zero
    cf.filter_range(d, Range::new(-60.0, 1.0)).unwrap();
    assert_eq!(cf.matched_count(), 2);

    let buckets = cf.group_all(dests).unwrap();
    let count = |code: &str| {
        buckets
            .iter()
            .find(|b| b.key.as_text() == Some(code))
            .map(|b| b.value)
    };
    assert_eq!(count("LAX"), Some(1));
    assert_eq!(count("SEA"), Some(1));
    assert_eq!(group_total(&cf, dests), 2);
}

/// An empty brush ends in the same state as never brushing.
#[test]
fn test_empty_brush_equals_no_brush() {
    let mut brushed = mounted(three_same_day());
    let untouched = mounted(three_same_day());

    brushed.brush(DELAY_CHART, BrushGesture::Start { x: 70.0 }).unwrap();
    brushed.brush(DELAY_CHART, BrushGesture::Move { x: 70.0 }).unwrap();
    brushed.brush(DELAY_CHART, BrushGesture::End).unwrap();

    assert_eq!(brushed.readout().unwrap().matched, 3);
    assert_eq!(brushed.readout(), untouched.readout());

    let chart = brushed.chart(DELAY_CHART).unwrap();
    assert_eq!(chart.brush_state(), BrushState::Idle);
    assert!(!chart.reset_affordance().visible);
    assert_eq!(chart.clip(), ClipRect::full(210.0));
    assert_eq!(
        chart.view().unwrap().bars,
        untouched.chart(DELAY_CHART).unwrap().view().unwrap().bars
    );
}

/// Delay 149 lands in bucket 140; delay 200 clamps into the same top bucket.
#[test]
fn test_delay_bucket_edges() {
    let mut cf = Crossfilter::new(store(&[
        (at(2, 1, 8, 0), 149.0, 100.0, "SFO", "LAX"),
        (at(2, 1, 8, 0), 200.0, 100.0, "SFO", "LAX"),
    ]));
    let d = cf.dimension("delay", delay).unwrap();
    let delays = cf.group(d, "delays", by_ten).unwrap();

    let buckets = cf.group_all(delays).unwrap();
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].key.as_number(), Some(140.0));
    assert_eq!(buckets[0].value, 2);
}

/// A full drag on the date chart snaps to whole days.
#[test]
fn test_date_brush_rounds_to_days() {
    let mut dashboard = build_flight_dashboard(sample(), &FlightOptions::default()).unwrap();
    dashboard.mount().unwrap();
    // Default preselection is February
    assert_eq!(dashboard.readout().unwrap().matched, 8);

    // 10px per day from Jan 1: x=312 is Feb 1 + 0.2 days, x=338 is Feb 3 + 0.8 days
    dashboard.brush(DATE_CHART, BrushGesture::Start { x: 312.0 }).unwrap();
    dashboard.brush(DATE_CHART, BrushGesture::Move { x: 338.0 }).unwrap();

    let extent = dashboard.chart(DATE_CHART).unwrap().extent().unwrap();
    assert_eq!(extent.width() % 86_400.0, 0.0);
    let feb1 = at(2, 1, 0, 0).and_utc().timestamp() as f64;
    let feb4 = at(2, 4, 0, 0).and_utc().timestamp() as f64;
    assert_eq!(extent, Range::new(feb1, feb4));
    // Records on Feb 1, 2 and 3
    assert_eq!(dashboard.readout().unwrap().matched, 4);
}
