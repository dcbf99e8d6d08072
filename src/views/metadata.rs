//! Filter-facet metadata describing the combined table.

use std::collections::{BTreeMap, BTreeSet};

use crate::combine::CombinedRecord;
use crate::views::types::{FilterMetadata, RangeBand};

/// Mode code → display name, as published by the NTD glossary.
pub static MODE_NAMES: &[(&str, &str)] = &[
    ("AR", "Alaska Railroad"),
    ("CB", "Commuter Bus"),
    ("CC", "Cable Car"),
    ("CR", "Commuter Rail"),
    ("DR", "Demand Response"),
    ("DT", "Demand Response Taxi"),
    ("FB", "Ferryboat"),
    ("HR", "Heavy Rail"),
    ("IP", "Inclined Plane"),
    ("JT", "Jitney"),
    ("LR", "Light Rail"),
    ("MB", "Bus"),
    ("MG", "Monorail/Automated Guideway"),
    ("PB", "Publico"),
    ("RB", "Bus Rapid Transit"),
    ("SR", "Streetcar Rail"),
    ("TB", "Trolleybus"),
    ("TR", "Aerial Tramway"),
    ("VP", "Vanpool"),
    ("YR", "Hybrid Rail"),
];

/// Ridership size bands for dashboard filtering, largest first.
pub static RIDERSHIP_RANGES: &[RangeBand] = &[
    RangeBand { label: "Very Large (>100M trips)", min: 100_000_000, max: None },
    RangeBand { label: "Large (10M-100M trips)", min: 10_000_000, max: Some(100_000_000) },
    RangeBand { label: "Medium (1M-10M trips)", min: 1_000_000, max: Some(10_000_000) },
    RangeBand { label: "Small (100K-1M trips)", min: 100_000, max: Some(1_000_000) },
    RangeBand { label: "Very Small (<100K trips)", min: 0, max: Some(100_000) },
];

/// UZA population size bands for dashboard filtering, largest first.
pub static POPULATION_RANGES: &[RangeBand] = &[
    RangeBand { label: "Very Large (>2M)", min: 2_000_000, max: None },
    RangeBand { label: "Large (500K-2M)", min: 500_000, max: Some(2_000_000) },
    RangeBand { label: "Medium (100K-500K)", min: 100_000, max: Some(500_000) },
    RangeBand { label: "Small (50K-100K)", min: 50_000, max: Some(100_000) },
    RangeBand { label: "Very Small (<50K)", min: 0, max: Some(50_000) },
];

/// Builds the filter metadata from the full combined table (all years,
/// pre-ridership-filter).
pub fn build(records: &[CombinedRecord], years: &[i32], latest: i32) -> FilterMetadata {
    let mut states = BTreeSet::new();
    let mut organization_types = BTreeSet::new();
    let mut reporter_types = BTreeSet::new();
    let mut uza_names = BTreeSet::new();
    let mut modes = BTreeSet::new();
    let mut agency_ids = BTreeSet::new();

    for rec in records {
        if let Some(v) = &rec.state {
            states.insert(v.clone());
        }
        if let Some(v) = &rec.organization_type {
            organization_types.insert(v.clone());
        }
        if let Some(v) = &rec.reporter_type {
            reporter_types.insert(v.clone());
        }
        if let Some(v) = &rec.uza_name {
            uza_names.insert(v.clone());
        }
        if let Some(v) = &rec.mode {
            modes.insert(v.clone());
        }
        if let Some(id) = rec.ntd_id {
            agency_ids.insert(id);
        }
    }

    let mut sorted_years = years.to_vec();
    sorted_years.sort_unstable();

    FilterMetadata {
        years: sorted_years,
        latest_year: latest,
        modes: modes.into_iter().collect(),
        mode_names: MODE_NAMES.iter().copied().collect::<BTreeMap<_, _>>(),
        states: states.into_iter().collect(),
        organization_types: organization_types.into_iter().collect(),
        reporter_types: reporter_types.into_iter().collect(),
        uza_names: uza_names.into_iter().collect(),
        total_agencies: agency_ids.len(),
        total_records: records.len(),
        ridership_ranges: RIDERSHIP_RANGES,
        population_ranges: POPULATION_RANGES,
    }
}
