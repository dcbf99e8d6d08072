//! Column reconciliation across heterogeneous report years.

use std::collections::HashSet;
use tracing::info;

use crate::table::YearTable;

/// Columns the dashboard needs, in output order: agency identity, location
/// and classification, population, mode, the core operating metrics, and
/// the pre-computed ratio columns carried by some years.
pub static KEY_COLUMNS: &[&str] = &[
    "agency",
    "city",
    "state",
    "ntd_id",
    "organization_type",
    "reporter_type",
    "report_year",
    "primary_uza_population",
    "mode",
    "mode_name",
    "type_of_service",
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

/// Computes the fixed output schema: the ordered intersection of
/// [`KEY_COLUMNS`] with the columns present in *every* loaded year.
pub fn output_schema(tables: &[YearTable]) -> Vec<String> {
    let mut common: HashSet<&str> = match tables.first() {
        Some(t) => t.column_set(),
        None => return Vec::new(),
    };
    for t in &tables[1..] {
        let set = t.column_set();
        common.retain(|c| set.contains(c));
    }

    let schema: Vec<String> = KEY_COLUMNS
        .iter()
        .filter(|c| common.contains(**c))
        .map(|c| c.to_string())
        .collect();

    info!(
        common_columns = common.len(),
        schema_columns = schema.len(),
        "reconciled columns across years"
    );
    schema
}
