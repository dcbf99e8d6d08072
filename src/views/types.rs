//! Serializable record types for the exported views.
//!
//! Absent values serialize as explicit `null` — the dashboard relies on
//! the distinction between "no data" and zero.

use serde::Serialize;
use std::collections::BTreeMap;

/// One agency in the latest report year: descriptive attributes, summed
/// operating metrics, operated modes, and derived ratios.
#[derive(Debug, Serialize)]
pub struct AgencySnapshot {
    pub ntd_id: i64,
    pub agency: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub organization_type: Option<String>,
    pub reporter_type: Option<String>,
    pub primary_uza_population: Option<f64>,
    pub agency_voms: Option<f64>,
    pub uza_name: Option<String>,
    pub unlinked_passenger_trips: f64,
    pub total_operating_expenses: f64,
    pub fare_revenues_earned: f64,
    pub vehicle_revenue_hours: f64,
    pub vehicle_revenue_miles: f64,
    pub modes: Vec<String>,
    pub cost_per_trip: Option<f64>,
    pub fare_per_trip: Option<f64>,
    pub farebox_recovery: Option<f64>,
    pub trips_per_hour: Option<f64>,
    pub rides_per_capita: Option<f64>,
}

/// One (agency, year) row of operating history.
#[derive(Debug, Serialize)]
pub struct AgencyYearRecord {
    pub ntd_id: i64,
    pub report_year: i32,
    pub agency: Option<String>,
    pub unlinked_passenger_trips: f64,
    pub total_operating_expenses: f64,
    pub fare_revenues_earned: f64,
    pub vehicle_revenue_hours: f64,
    pub vehicle_revenue_miles: f64,
    pub agency_voms: Option<f64>,
    pub primary_uza_population: Option<f64>,
    pub rides_per_capita: Option<f64>,
}

/// One (agency, mode) row for the latest report year.
#[derive(Debug, Serialize)]
pub struct AgencyModeRecord {
    pub ntd_id: i64,
    pub mode: String,
    pub agency: Option<String>,
    pub unlinked_passenger_trips: f64,
    pub total_operating_expenses: f64,
    pub fare_revenues_earned: f64,
    pub vehicle_revenue_hours: f64,
    pub mode_voms: f64,
}

/// National totals for one (report year, mode) pair, summed across all
/// agencies including those excluded from the snapshot.
#[derive(Debug, Serialize)]
pub struct NationalModeYearRecord {
    pub report_year: i32,
    pub mode: String,
    pub unlinked_passenger_trips: f64,
    pub total_operating_expenses: f64,
    pub fare_revenues_earned: f64,
    pub vehicle_revenue_hours: f64,
}

/// A filter-facet bucket: half-open range with a display label.
#[derive(Debug, Serialize)]
pub struct RangeBand {
    pub label: &'static str,
    pub min: u64,
    pub max: Option<u64>,
}

/// Filter-facet metadata describing the combined table.
#[derive(Debug, Serialize)]
pub struct FilterMetadata {
    pub years: Vec<i32>,
    pub latest_year: i32,
    pub modes: Vec<String>,
    pub mode_names: BTreeMap<&'static str, &'static str>,
    pub states: Vec<String>,
    pub organization_types: Vec<String>,
    pub reporter_types: Vec<String>,
    pub uza_names: Vec<String>,
    pub total_agencies: usize,
    pub total_records: usize,
    pub ridership_ranges: &'static [RangeBand],
    pub population_ranges: &'static [RangeBand],
}
