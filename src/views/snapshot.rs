//! Latest-year agency snapshot: the `agencies` view.

use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

use crate::combine::CombinedRecord;
use crate::views::types::AgencySnapshot;
use crate::views::util::{add_opt, first_opt, ratio};

#[derive(Default)]
struct Acc {
    agency: Option<String>,
    city: Option<String>,
    state: Option<String>,
    organization_type: Option<String>,
    reporter_type: Option<String>,
    primary_uza_population: Option<f64>,
    agency_voms: Option<f64>,
    uza_name: Option<String>,
    trips: f64,
    expenses: f64,
    fares: f64,
    hours: f64,
    miles: f64,
    modes: BTreeSet<String>,
}

/// Latest report year present in the combined table.
pub fn latest_year(records: &[CombinedRecord]) -> Option<i32> {
    records.iter().map(|r| r.report_year).max()
}

/// Builds the agency snapshot for the latest year.
///
/// Groups latest-year rows by ntd_id (keyless rows excluded), takes
/// first-observed descriptive attributes, sums the five operating metrics,
/// collects the distinct operated modes, derives the five ratios, drops
/// agencies with no ridership, and sorts by summed trips descending.
pub fn build(records: &[CombinedRecord], latest: i32) -> Vec<AgencySnapshot> {
    let mut groups: BTreeMap<i64, Acc> = BTreeMap::new();

    for rec in records.iter().filter(|r| r.report_year == latest) {
        let Some(id) = rec.ntd_id else { continue };
        let acc = groups.entry(id).or_default();

        first_opt(&mut acc.agency, rec.agency.clone());
        first_opt(&mut acc.city, rec.city.clone());
        first_opt(&mut acc.state, rec.state.clone());
        first_opt(&mut acc.organization_type, rec.organization_type.clone());
        first_opt(&mut acc.reporter_type, rec.reporter_type.clone());
        first_opt(&mut acc.primary_uza_population, rec.primary_uza_population);
        first_opt(&mut acc.agency_voms, rec.agency_voms);
        first_opt(&mut acc.uza_name, rec.uza_name.clone());

        add_opt(&mut acc.trips, rec.unlinked_passenger_trips);
        add_opt(&mut acc.expenses, rec.total_operating_expenses);
        add_opt(&mut acc.fares, rec.fare_revenues_earned);
        add_opt(&mut acc.hours, rec.vehicle_revenue_hours);
        add_opt(&mut acc.miles, rec.vehicle_revenue_miles);

        if let Some(mode) = &rec.mode {
            acc.modes.insert(mode.clone());
        }
    }

    let total_groups = groups.len();
    let mut snapshots: Vec<AgencySnapshot> = groups
        .into_iter()
        .filter(|(_, acc)| acc.trips > 0.0)
        .map(|(ntd_id, acc)| AgencySnapshot {
            ntd_id,
            cost_per_trip: ratio(Some(acc.expenses), Some(acc.trips), 2),
            fare_per_trip: ratio(Some(acc.fares), Some(acc.trips), 2),
            farebox_recovery: ratio(Some(acc.fares), Some(acc.expenses), 4),
            trips_per_hour: ratio(Some(acc.trips), Some(acc.hours), 2),
            rides_per_capita: ratio(Some(acc.trips), acc.primary_uza_population, 2),
            agency: acc.agency,
            city: acc.city,
            state: acc.state,
            organization_type: acc.organization_type,
            reporter_type: acc.reporter_type,
            primary_uza_population: acc.primary_uza_population,
            agency_voms: acc.agency_voms,
            uza_name: acc.uza_name,
            unlinked_passenger_trips: acc.trips,
            total_operating_expenses: acc.expenses,
            fare_revenues_earned: acc.fares,
            vehicle_revenue_hours: acc.hours,
            vehicle_revenue_miles: acc.miles,
            modes: acc.modes.into_iter().collect(),
        })
        .collect();

    // Ridership descending; id ascending on ties for a stable output order
    snapshots.sort_by(|a, b| {
        b.unlinked_passenger_trips
            .total_cmp(&a.unlinked_passenger_trips)
            .then(a.ntd_id.cmp(&b.ntd_id))
    });

    info!(
        latest,
        agencies = snapshots.len(),
        dropped_no_ridership = total_groups - snapshots.len(),
        "built agency snapshot"
    );
    snapshots
}
