//! Flight dashboard assembly
//!
//! Four charts in fixed order (time of day, arrival delay, distance, date),
//! origin/destination summaries, and the list over the date dimension.

use chrono::{NaiveDate, Timelike};
use tracing::info;

use super::coordinator::Dashboard;
use super::errors::DashboardResult;
use crate::chart::{ChartConfig, LinearScale};
use crate::index::{Crossfilter, IndexKey, Range};
use crate::list::{ListComponent, DEFAULT_LIST_LIMIT};
use crate::record::{Record, RecordStore, DEFAULT_BASE_YEAR};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Positions of the flight charts
pub const HOUR_CHART: usize = 0;
pub const DELAY_CHART: usize = 1;
pub const DISTANCE_CHART: usize = 2;
pub const DATE_CHART: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct FlightOptions {
    pub base_year: i32,
    pub list_limit: usize,
    /// Initial `[start, end)` of the date chart
    pub date_filter: Option<[NaiveDate; 2]>,
}

impl FlightOptions {
    /// Defaults for `base_year`: February of that year preselected
    pub fn for_year(base_year: i32) -> Self {
        Self {
            base_year,
            list_limit: DEFAULT_LIST_LIMIT,
            date_filter: default_date_filter(base_year),
        }
    }
}

impl Default for FlightOptions {
    fn default() -> Self {
        Self::for_year(DEFAULT_BASE_YEAR)
    }
}

/// `[Feb 1, Mar 1)` of `year`
pub fn default_date_filter(year: i32) -> Option<[NaiveDate; 2]> {
    Some([
        NaiveDate::from_ymd_opt(year, 2, 1)?,
        NaiveDate::from_ymd_opt(year, 3, 1)?,
    ])
}

fn midnight_seconds(day: NaiveDate) -> f64 {
    day.and_time(chrono::NaiveTime::MIN).and_utc().timestamp() as f64
}

fn number(key: &IndexKey) -> f64 {
    key.as_number().unwrap_or(0.0)
}

// ==================
// Accessors
// ==================

fn hour_of_day(r: &Record) -> IndexKey {
    let ts = r.timestamp;
    IndexKey::from_number(ts.hour() as f64 + ts.minute() as f64 / 60.0)
}

fn clamped_delay(r: &Record) -> IndexKey {
    IndexKey::from_number(r.delay_minutes.clamp(-60.0, 149.0))
}

fn capped_distance(r: &Record) -> IndexKey {
    IndexKey::from_number(r.distance.min(1999.0))
}

fn departure_seconds(r: &Record) -> IndexKey {
    IndexKey::from_number(r.timestamp.and_utc().timestamp() as f64)
}

fn origin_code(r: &Record) -> IndexKey {
    IndexKey::from_text(r.origin.clone())
}

fn destination_code(r: &Record) -> IndexKey {
    IndexKey::from_text(r.destination.clone())
}

// ==================
// Bucketers
// ==================

fn whole_hour(k: &IndexKey) -> IndexKey {
    IndexKey::from_number(number(k).floor())
}

fn ten_minutes(k: &IndexKey) -> IndexKey {
    IndexKey::from_number((number(k) / 10.0).floor() * 10.0)
}

fn fifty_miles(k: &IndexKey) -> IndexKey {
    IndexKey::from_number((number(k) / 50.0).floor() * 50.0)
}

fn start_of_day(k: &IndexKey) -> IndexKey {
    IndexKey::from_number((number(k) / SECONDS_PER_DAY).floor() * SECONDS_PER_DAY)
}

fn same_key(k: &IndexKey) -> IndexKey {
    k.clone()
}

/// Nearest midnight; exactly noon rounds up
pub fn round_to_day(seconds: f64) -> f64 {
    ((seconds + SECONDS_PER_DAY / 2.0) / SECONDS_PER_DAY).floor() * SECONDS_PER_DAY
}

/// Assemble the flight dashboard over `store`. Not yet mounted.
pub fn build_flight_dashboard(store: RecordStore, options: &FlightOptions) -> DashboardResult<Dashboard> {
    let mut cf = Crossfilter::new(store);

    let date = cf.dimension("date", departure_seconds)?;
    let dates = cf.group(date, "dates", start_of_day)?;
    let hour = cf.dimension("hour", hour_of_day)?;
    let hours = cf.group(hour, "hours", whole_hour)?;
    let delay = cf.dimension("delay", clamped_delay)?;
    let delays = cf.group(delay, "delays", ten_minutes)?;
    let distance = cf.dimension("distance", capped_distance)?;
    let distances = cf.group(distance, "distances", fifty_miles)?;
    let origin = cf.dimension("origin", origin_code)?;
    let origins = cf.group(origin, "origins", same_key)?;
    let destination = cf.dimension("destination", destination_code)?;
    let destinations = cf.group(destination, "destinations", same_key)?;

    let mut dashboard = Dashboard::new(cf, ListComponent::new(date, options.list_limit));

    dashboard.add_chart(
        ChartConfig::builder()
            .title("Time of Day")
            .dimension(hour)
            .group(hours)
            .x_scale(LinearScale::rounded([0.0, 24.0], [0.0, 240.0]))
            .build()?,
    )?;
    dashboard.add_chart(
        ChartConfig::builder()
            .title("Arrival Delay (min.)")
            .dimension(delay)
            .group(delays)
            .x_scale(LinearScale::rounded([-60.0, 150.0], [0.0, 210.0]))
            .build()?,
    )?;
    dashboard.add_chart(
        ChartConfig::builder()
            .title("Distance (mi.)")
            .dimension(distance)
            .group(distances)
            .x_scale(LinearScale::rounded([0.0, 2000.0], [0.0, 400.0]))
            .build()?,
    )?;

    let year = options.base_year;
    let domain = [
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 4, 1),
    ];
    let domain = match domain {
        [Some(start), Some(end)] => [midnight_seconds(start), midnight_seconds(end)],
        _ => [0.0, 90.0 * SECONDS_PER_DAY],
    };
    let initial = options
        .date_filter
        .map(|[start, end]| Range::new(midnight_seconds(start), midnight_seconds(end)));
    dashboard.add_chart(
        ChartConfig::builder()
            .title("Date")
            .dimension(date)
            .group(dates)
            .round(round_to_day)
            .x_scale(LinearScale::rounded(domain, [0.0, 900.0]))
            .filter(initial)
            .build()?,
    )?;

    dashboard.add_summary_group("origins", origins);
    dashboard.add_summary_group("destinations", destinations);

    info!(
        charts = dashboard.charts().len(),
        base_year = year,
        list_limit = options.list_limit,
        "flight dashboard assembled"
    );
    Ok(dashboard)
}
