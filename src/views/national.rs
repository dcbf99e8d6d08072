//! National year × mode totals: the `yearly_mode_totals` view.

use std::collections::BTreeMap;
use tracing::info;

use crate::combine::CombinedRecord;
use crate::views::types::NationalModeYearRecord;
use crate::views::util::add_opt;

#[derive(Default)]
struct Acc {
    trips: f64,
    expenses: f64,
    fares: f64,
    hours: f64,
}

/// Sums the four core metrics over the whole combined table by
/// (report year, mode). Unlike the agency views this applies no ridership
/// filter and keeps keyless-id rows; only rows without a mode are excluded.
pub fn build(records: &[CombinedRecord]) -> Vec<NationalModeYearRecord> {
    let mut groups: BTreeMap<(i32, String), Acc> = BTreeMap::new();

    for rec in records {
        let Some(mode) = rec.mode.clone() else { continue };
        let acc = groups.entry((rec.report_year, mode)).or_default();
        add_opt(&mut acc.trips, rec.unlinked_passenger_trips);
        add_opt(&mut acc.expenses, rec.total_operating_expenses);
        add_opt(&mut acc.fares, rec.fare_revenues_earned);
        add_opt(&mut acc.hours, rec.vehicle_revenue_hours);
    }

    let out: Vec<NationalModeYearRecord> = groups
        .into_iter()
        .map(|((report_year, mode), acc)| NationalModeYearRecord {
            report_year,
            mode,
            unlinked_passenger_trips: acc.trips,
            total_operating_expenses: acc.expenses,
            fare_revenues_earned: acc.fares,
            vehicle_revenue_hours: acc.hours,
        })
        .collect();

    info!(rows = out.len(), "built national mode totals");
    out
}
