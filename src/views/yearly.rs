//! Per-agency yearly history: the `agency_yearly` view.

use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

use crate::combine::CombinedRecord;
use crate::views::types::AgencyYearRecord;
use crate::views::util::{add_opt, first_opt, ratio};

#[derive(Default)]
struct Acc {
    agency: Option<String>,
    trips: f64,
    expenses: f64,
    fares: f64,
    hours: f64,
    miles: f64,
    agency_voms: Option<f64>,
    primary_uza_population: Option<f64>,
}

/// Builds the (agency, year) history, restricted to agencies present in
/// the snapshot (`valid_ids`).
///
/// rides_per_capita divides the year's summed trips by the group's
/// first-observed primary_uza_population (see DESIGN.md on the population
/// basis for this ratio).
pub fn build(records: &[CombinedRecord], valid_ids: &BTreeSet<i64>) -> Vec<AgencyYearRecord> {
    let mut groups: BTreeMap<(i64, i32), Acc> = BTreeMap::new();

    for rec in records {
        let Some(id) = rec.ntd_id else { continue };
        if !valid_ids.contains(&id) {
            continue;
        }
        let acc = groups.entry((id, rec.report_year)).or_default();

        first_opt(&mut acc.agency, rec.agency.clone());
        first_opt(&mut acc.agency_voms, rec.agency_voms);
        first_opt(&mut acc.primary_uza_population, rec.primary_uza_population);

        add_opt(&mut acc.trips, rec.unlinked_passenger_trips);
        add_opt(&mut acc.expenses, rec.total_operating_expenses);
        add_opt(&mut acc.fares, rec.fare_revenues_earned);
        add_opt(&mut acc.hours, rec.vehicle_revenue_hours);
        add_opt(&mut acc.miles, rec.vehicle_revenue_miles);
    }

    let out: Vec<AgencyYearRecord> = groups
        .into_iter()
        .map(|((ntd_id, report_year), acc)| AgencyYearRecord {
            ntd_id,
            report_year,
            rides_per_capita: ratio(Some(acc.trips), acc.primary_uza_population, 2),
            agency: acc.agency,
            unlinked_passenger_trips: acc.trips,
            total_operating_expenses: acc.expenses,
            fare_revenues_earned: acc.fares,
            vehicle_revenue_hours: acc.hours,
            vehicle_revenue_miles: acc.miles,
            agency_voms: acc.agency_voms,
            primary_uza_population: acc.primary_uza_population,
        })
        .collect();

    info!(rows = out.len(), "built agency yearly history");
    out
}
