//! End-to-end preprocessing: load → reconcile → combine → views → export.

use anyhow::{Context, Result, bail};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::info;

use crate::combine::combine;
use crate::loader::load_years;
use crate::output::{write_json, write_json_pretty};
use crate::reconcile::output_schema;
use crate::views::{metadata, modes, national, snapshot, yearly};

/// Runs the whole pipeline: reads one CSV per configured year from
/// `input_dir` and writes the five dashboard JSON files into `output_dir`.
///
/// All years load before anything is written, so a source failure leaves
/// no partial output.
pub fn run(input_dir: &Path, output_dir: &Path, years: &[i32]) -> Result<()> {
    if years.is_empty() {
        bail!("no report years configured");
    }

    let tables = load_years(input_dir, years)?;
    let schema = output_schema(&tables);
    let records = combine(&tables, &schema);

    let latest = snapshot::latest_year(&records)
        .context("combined table is empty; nothing to aggregate")?;

    let agencies = snapshot::build(&records, latest);
    let valid_ids: BTreeSet<i64> = agencies.iter().map(|a| a.ntd_id).collect();
    let agency_yearly = yearly::build(&records, &valid_ids);
    let agency_modes = modes::build(&records, latest, &valid_ids);
    let yearly_mode_totals = national::build(&records);
    let meta = metadata::build(&records, years, latest);

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    write_json(output_dir, "agencies", &agencies)?;
    write_json(output_dir, "agency_yearly", &agency_yearly)?;
    write_json(output_dir, "agency_modes", &agency_modes)?;
    write_json(output_dir, "yearly_mode_totals", &yearly_mode_totals)?;
    write_json_pretty(output_dir, "metadata", &meta)?;

    info!(
        latest,
        agencies = agencies.len(),
        yearly_rows = agency_yearly.len(),
        mode_rows = agency_modes.len(),
        national_rows = yearly_mode_totals.len(),
        "preprocessing complete"
    );
    Ok(())
}

/// Loads the configured years and logs the reconciled output schema
/// without writing anything.
pub fn report_schema(input_dir: &Path, years: &[i32]) -> Result<Vec<String>> {
    if years.is_empty() {
        bail!("no report years configured");
    }
    let tables = load_years(input_dir, years)?;
    let schema = output_schema(&tables);
    info!(schema = ?schema, "reconciled output schema");
    Ok(schema)
}
