//! Per-agency mode breakdown for the latest year: the `agency_modes` view.

use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

use crate::combine::CombinedRecord;
use crate::views::types::AgencyModeRecord;
use crate::views::util::{add_opt, first_opt};

#[derive(Default)]
struct Acc {
    agency: Option<String>,
    trips: f64,
    expenses: f64,
    fares: f64,
    hours: f64,
    voms: f64,
}

/// Builds the (agency, mode) breakdown from latest-year rows, restricted
/// to agencies present in the snapshot. Rows without an id or a mode are
/// excluded.
pub fn build(
    records: &[CombinedRecord],
    latest: i32,
    valid_ids: &BTreeSet<i64>,
) -> Vec<AgencyModeRecord> {
    let mut groups: BTreeMap<(i64, String), Acc> = BTreeMap::new();

    for rec in records.iter().filter(|r| r.report_year == latest) {
        let Some(id) = rec.ntd_id else { continue };
        if !valid_ids.contains(&id) {
            continue;
        }
        let Some(mode) = rec.mode.clone() else { continue };
        let acc = groups.entry((id, mode)).or_default();

        first_opt(&mut acc.agency, rec.agency.clone());
        add_opt(&mut acc.trips, rec.unlinked_passenger_trips);
        add_opt(&mut acc.expenses, rec.total_operating_expenses);
        add_opt(&mut acc.fares, rec.fare_revenues_earned);
        add_opt(&mut acc.hours, rec.vehicle_revenue_hours);
        add_opt(&mut acc.voms, rec.mode_voms);
    }

    let out: Vec<AgencyModeRecord> = groups
        .into_iter()
        .map(|((ntd_id, mode), acc)| AgencyModeRecord {
            ntd_id,
            mode,
            agency: acc.agency,
            unlinked_passenger_trips: acc.trips,
            total_operating_expenses: acc.expenses,
            fare_revenues_earned: acc.fares,
            vehicle_revenue_hours: acc.hours,
            mode_voms: acc.voms,
        })
        .collect();

    info!(rows = out.len(), latest, "built agency mode breakdown");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: i64, mode: &str, trips: f64) -> CombinedRecord {
        CombinedRecord {
            ntd_id: Some(id),
            report_year: 2024,
            mode: Some(mode.to_string()),
            unlinked_passenger_trips: Some(trips),
            ..Default::default()
        }
    }

    #[test]
    fn test_grouped_by_agency_and_mode() {
        let records = vec![rec(1, "MB", 100.0), rec(1, "MB", 50.0), rec(1, "HR", 10.0)];
        let out = build(&records, 2024, &BTreeSet::from([1]));
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].mode, "HR");
        assert_eq!(out[1].mode, "MB");
        assert_eq!(out[1].unlinked_passenger_trips, 150.0);
    }

    #[test]
    fn test_modeless_rows_excluded() {
        let mut r = rec(1, "MB", 100.0);
        r.mode = None;
        assert!(build(&[r], 2024, &BTreeSet::from([1])).is_empty());
    }

    #[test]
    fn test_restricted_to_snapshot_agencies() {
        let records = vec![rec(1, "MB", 100.0), rec(9, "MB", 100.0)];
        let out = build(&records, 2024, &BTreeSet::from([1]));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].ntd_id, 1);
    }
}
