//! Full-pipeline test over the fixture years.
//!
//! The fixtures exercise the awkward parts of the real data: a
//! state-prefixed legacy id, a Windows-1252 byte, comma-formatted metrics,
//! an unparsable id and metric, a schema column present in only one year,
//! and a zero-ridership agency.

use ntd_preprocess::pipeline;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

fn run_fixture_pipeline(name: &str) -> PathBuf {
    let input = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let output = std::env::temp_dir().join(format!("ntd_preprocess_it_{name}"));
    let _ = fs::remove_dir_all(&output);
    pipeline::run(&input, &output, &[2021, 2023]).expect("pipeline run failed");
    output
}

fn read_json(dir: &Path, name: &str) -> Value {
    let text = fs::read_to_string(dir.join(format!("{name}.json"))).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_agencies_view() {
    let out = run_fixture_pipeline("agencies");
    let agencies = read_json(&out, "agencies");
    let agencies = agencies.as_array().unwrap();

    // Agency 77 reported zero trips in the latest year and is dropped;
    // the unparsable-id row is keyless and never forms a group.
    assert_eq!(agencies.len(), 2);
    // Sorted by ridership descending
    let a = &agencies[0];

    // Legacy 2021 id 9012345 and 2023 id 12345 reconcile to one agency
    assert_eq!(a["ntd_id"], 12345);
    assert_eq!(a["agency"], "Metro Transit");
    assert_eq!(a["uza_name"], "Caen, TX");

    // Latest-year sums across the MB and HR rows
    assert_eq!(a["unlinked_passenger_trips"], 1_000_000.0);
    assert_eq!(a["total_operating_expenses"], 2_900_000.0);
    assert_eq!(a["modes"], serde_json::json!(["HR", "MB"]));

    // Derived ratios at their stated precision
    assert_eq!(a["cost_per_trip"], 2.9);
    assert_eq!(a["fare_per_trip"], 0.63);
    assert_eq!(a["farebox_recovery"], 0.2172);
    assert_eq!(a["trips_per_hour"], 17.54);
    assert_eq!(a["rides_per_capita"], 0.95);

    // The tramway has no expenses, hours, or population: undefined
    // ratios are explicit nulls, never infinities or zeros.
    let t = &agencies[1];
    assert_eq!(t["ntd_id"], 888);
    assert_eq!(t["cost_per_trip"], 0.0);
    assert_eq!(t["farebox_recovery"], Value::Null);
    assert_eq!(t["trips_per_hour"], Value::Null);
    assert_eq!(t["rides_per_capita"], Value::Null);
    assert_eq!(t["primary_uza_population"], Value::Null);
    assert_eq!(t["uza_name"], Value::Null);

    fs::remove_dir_all(&out).unwrap();
}

#[test]
fn test_agency_yearly_view() {
    let out = run_fixture_pipeline("yearly");
    let rows = read_json(&out, "agency_yearly");
    let rows = rows.as_array().unwrap();

    // Snapshot-surviving agencies only: 12345 across both years plus the
    // tramway's single 2023 filing. Agency 77 is filtered everywhere.
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r["ntd_id"] != 77));

    let metro: Vec<_> = rows.iter().filter(|r| r["ntd_id"] == 12345).collect();
    assert_eq!(metro.len(), 2);

    let y2021 = metro.iter().find(|r| r["report_year"] == 2021).unwrap();
    // "1,200,000" in the source coerces with commas stripped
    assert_eq!(y2021["unlinked_passenger_trips"], 1_200_000.0);
    assert_eq!(y2021["rides_per_capita"], 1.2);

    let y2023 = metro.iter().find(|r| r["report_year"] == 2023).unwrap();
    assert_eq!(y2023["unlinked_passenger_trips"], 1_000_000.0);
    assert_eq!(y2023["rides_per_capita"], 0.95);

    fs::remove_dir_all(&out).unwrap();
}

#[test]
fn test_agency_modes_and_national_cross_check() {
    let out = run_fixture_pipeline("modes");
    let modes = read_json(&out, "agency_modes");
    let modes = modes.as_array().unwrap();
    let national = read_json(&out, "yearly_mode_totals");
    let national = national.as_array().unwrap();

    assert_eq!(modes.len(), 3);
    let mb = modes.iter().find(|r| r["mode"] == "MB").unwrap();
    assert_eq!(mb["unlinked_passenger_trips"], 900_000.0);
    assert_eq!(mb["mode_voms"], 95.0);

    // National view keeps what the agency views drop: the zero-ridership
    // agency (DR) and the keyless row (FB) still total here.
    let nat_2023_dr = national
        .iter()
        .find(|r| r["report_year"] == 2023 && r["mode"] == "DR")
        .unwrap();
    assert_eq!(nat_2023_dr["unlinked_passenger_trips"], 0.0);
    assert_eq!(nat_2023_dr["total_operating_expenses"], 95_000.0);
    assert!(
        national
            .iter()
            .any(|r| r["report_year"] == 2023 && r["mode"] == "FB")
    );

    // Cross-check: for latest-year modes operated only by snapshot
    // agencies, the national totals equal the agency_modes sums.
    for mode in ["MB", "HR", "IP"] {
        let nat = national
            .iter()
            .find(|r| r["report_year"] == 2023 && r["mode"] == mode)
            .unwrap();
        let agency_sum: f64 = modes
            .iter()
            .filter(|r| r["mode"] == mode)
            .map(|r| r["unlinked_passenger_trips"].as_f64().unwrap())
            .sum();
        assert_eq!(nat["unlinked_passenger_trips"].as_f64().unwrap(), agency_sum);
    }

    fs::remove_dir_all(&out).unwrap();
}

#[test]
fn test_metadata_view() {
    let out = run_fixture_pipeline("metadata");
    let meta = read_json(&out, "metadata");

    assert_eq!(meta["years"], serde_json::json!([2021, 2023]));
    assert_eq!(meta["latest_year"], 2023);
    assert_eq!(meta["states"], serde_json::json!(["CO", "KS", "TX", "ZZ"]));
    assert_eq!(
        meta["modes"],
        serde_json::json!(["DR", "FB", "HR", "IP", "MB"])
    );
    assert_eq!(meta["mode_names"].as_object().unwrap().len(), 20);
    assert_eq!(meta["mode_names"]["MB"], "Bus");

    // Distinct ids across all years; the keyless row does not count
    assert_eq!(meta["total_agencies"], 3);
    assert_eq!(meta["total_records"], 7);

    assert_eq!(meta["ridership_ranges"].as_array().unwrap().len(), 5);
    assert_eq!(meta["population_ranges"].as_array().unwrap().len(), 5);
    assert_eq!(meta["ridership_ranges"][0]["max"], Value::Null);

    fs::remove_dir_all(&out).unwrap();
}

#[test]
fn test_missing_year_aborts_with_no_output() {
    let input = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let output = std::env::temp_dir().join("ntd_preprocess_it_missing_year");
    let _ = fs::remove_dir_all(&output);

    // 2022 has no fixture file: the whole run fails before writing
    let err = pipeline::run(&input, &output, &[2021, 2022, 2023]).unwrap_err();
    assert!(err.to_string().contains("2022"));
    assert!(!output.exists());
}

#[test]
fn test_schema_is_ordered_key_intersection() {
    let input = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let schema = pipeline::report_schema(&input, &[2021, 2023]).unwrap();

    // passenger_miles appears only in 2021 and drops out; uza_name is not
    // a key column; everything else survives in priority order.
    assert_eq!(
        schema,
        vec![
            "agency",
            "city",
            "state",
            "ntd_id",
            "organization_type",
            "reporter_type",
            "report_year",
            "primary_uza_population",
            "mode",
            "mode_voms",
            "agency_voms",
            "fare_revenues_earned",
            "total_operating_expenses",
            "unlinked_passenger_trips",
            "vehicle_revenue_hours",
            "vehicle_revenue_miles",
        ]
    );
}
