//! Combines the per-year tables into one longitudinal record collection.
//!
//! Rows are concatenated in ascending year order with source row order
//! preserved; downstream `first` aggregations depend on this ordering.

use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::table::YearTable;

/// One row of the longitudinal table, restricted to the reconciled schema.
///
/// Fields outside the schema stay `None` for every record. Numeric metrics
/// are coerced on construction; a value that fails to parse is `None`
/// ("no data"), never zero.
#[derive(Debug, Clone, Default)]
pub struct CombinedRecord {
    pub agency: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub ntd_id: Option<i64>,
    pub organization_type: Option<String>,
    pub reporter_type: Option<String>,
    pub report_year: i32,
    pub primary_uza_population: Option<f64>,
    pub mode: Option<String>,
    pub mode_name: Option<String>,
    pub type_of_service: Option<String>,
    pub mode_voms: Option<f64>,
    pub agency_voms: Option<f64>,
    pub fare_revenues_earned: Option<f64>,
    pub total_operating_expenses: Option<f64>,
    pub unlinked_passenger_trips: Option<f64>,
    pub vehicle_revenue_hours: Option<f64>,
    pub vehicle_revenue_miles: Option<f64>,
    pub passenger_miles: Option<f64>,
    pub cost_per_hour: Option<f64>,
    pub passengers_per_hour: Option<f64>,
    pub cost_per_passenger: Option<f64>,
    pub fare_revenues_per_unlinked: Option<f64>,
    /// Lookup-only attribute joined from 2022+ sources.
    pub uza_name: Option<String>,
}

/// First report year that carries the `uza_name` attribute.
const UZA_NAME_SINCE: i32 = 2022;

/// Builds the combined longitudinal table from the loaded years, restricted
/// to the reconciled `schema`, enriched with the recent-year UZA name
/// lookup, with all numeric metrics coerced.
pub fn combine(tables: &[YearTable], schema: &[String]) -> Vec<CombinedRecord> {
    let uza_lookup = build_uza_lookup(tables);

    let mut records = Vec::new();
    let mut coercion_failures = 0usize;

    for table in tables {
        // Resolve schema columns once per year; None when that column was
        // outside this year's file (cannot happen for intersection columns).
        let col = |name: &str| -> Option<usize> {
            schema
                .iter()
                .any(|c| c == name)
                .then(|| table.column_index(name))
                .flatten()
        };
        let idx_agency = col("agency");
        let idx_city = col("city");
        let idx_state = col("state");
        let idx_ntd_id = col("ntd_id");
        let idx_org = col("organization_type");
        let idx_reporter = col("reporter_type");
        let idx_year = col("report_year");
        let idx_mode = col("mode");
        let idx_mode_name = col("mode_name");
        let idx_service = col("type_of_service");
        let numeric: Vec<(usize, Option<usize>)> = NUMERIC_COLUMNS
            .iter()
            .enumerate()
            .map(|(slot, &name)| (slot, col(name)))
            .collect();

        for row in &table.rows {
            let text = |idx: Option<usize>| -> Option<String> {
                let v = row.get(idx?)?.trim();
                (!v.is_empty()).then(|| v.to_string())
            };

            let mut rec = CombinedRecord {
                agency: text(idx_agency),
                city: text(idx_city),
                state: text(idx_state),
                ntd_id: text(idx_ntd_id).and_then(|v| v.parse().ok()),
                organization_type: text(idx_org),
                reporter_type: text(idx_reporter),
                report_year: text(idx_year)
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(table.year),
                mode: text(idx_mode),
                mode_name: text(idx_mode_name),
                type_of_service: text(idx_service),
                ..Default::default()
            };

            for &(slot, idx) in &numeric {
                let Some(raw) = text(idx) else { continue };
                match coerce_numeric(&raw) {
                    Some(v) => *numeric_slot(&mut rec, slot) = Some(v),
                    None => coercion_failures += 1,
                }
            }

            rec.uza_name = rec.ntd_id.and_then(|id| uza_lookup.get(&id).cloned());
            records.push(rec);
        }
    }

    if coercion_failures > 0 {
        warn!(coercion_failures, "metric values left absent by numeric coercion");
    }
    info!(rows = records.len(), "combined all years");
    records
}

/// The 13 metric columns coerced to numbers, in [`CombinedRecord`] order.
static NUMERIC_COLUMNS: &[&str] = &[
    "primary_uza_population",
    "mode_voms",
    "agency_voms",
    "fare_revenues_earned",
    "total_operating_expenses",
    "unlinked_passenger_trips",
    "vehicle_revenue_hours",
    "vehicle_revenue_miles",
    "passenger_miles",
    "cost_per_hour",
    "passengers_per_hour",
    "cost_per_passenger",
    "fare_revenues_per_unlinked",
];

fn numeric_slot(rec: &mut CombinedRecord, slot: usize) -> &mut Option<f64> {
    match slot {
        0 => &mut rec.primary_uza_population,
        1 => &mut rec.mode_voms,
        2 => &mut rec.agency_voms,
        3 => &mut rec.fare_revenues_earned,
        4 => &mut rec.total_operating_expenses,
        5 => &mut rec.unlinked_passenger_trips,
        6 => &mut rec.vehicle_revenue_hours,
        7 => &mut rec.vehicle_revenue_miles,
        8 => &mut rec.passenger_miles,
        9 => &mut rec.cost_per_hour,
        10 => &mut rec.passengers_per_hour,
        11 => &mut rec.cost_per_passenger,
        12 => &mut rec.fare_revenues_per_unlinked,
        _ => unreachable!("slot index matches NUMERIC_COLUMNS"),
    }
}

/// Parses a metric cell, tolerating thousands-separator commas.
fn coerce_numeric(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// ntd_id → uza_name, first occurrence wins, from 2022+ years only (the
/// attribute is not collected in earlier filings).
fn build_uza_lookup(tables: &[YearTable]) -> BTreeMap<i64, String> {
    let mut lookup = BTreeMap::new();
    for table in tables.iter().filter(|t| t.year >= UZA_NAME_SINCE) {
        let (Some(id_idx), Some(uza_idx)) =
            (table.column_index("ntd_id"), table.column_index("uza_name"))
        else {
            continue;
        };
        for row in &table.rows {
            let Some(id) = row.get(id_idx).and_then(|v| v.trim().parse::<i64>().ok()) else {
                continue;
            };
            let Some(name) = row.get(uza_idx).map(|v| v.trim()).filter(|v| !v.is_empty()) else {
                continue;
            };
            lookup.entry(id).or_insert_with(|| name.to_string());
        }
    }
    lookup
}
