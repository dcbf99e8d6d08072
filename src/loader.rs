//! Source loading: one CSV per configured report year.
//!
//! Loading is all-or-nothing per year: a missing or malformed file aborts
//! the whole run, since the downstream column intersection requires every
//! configured year to be present.

use anyhow::{Context, Result};
use encoding_rs::WINDOWS_1252;
use std::borrow::Cow;
use std::path::Path;
use tracing::{info, warn};

use crate::normalize::{normalize_column, normalize_ntd_id};
use crate::table::YearTable;

/// Loads `{dir}/{year}.csv` into a normalized [`YearTable`].
///
/// Headers are canonicalized to snake_case, `ntd_id` values are normalized
/// per the year's identifier rules (failed parses leave an empty cell and
/// are counted), and a `report_year` column is injected if the source
/// lacks one.
pub fn load_year(dir: &Path, year: i32) -> Result<YearTable> {
    let path = dir.join(format!("{year}.csv"));
    let bytes = std::fs::read(&path)
        .with_context(|| format!("reading source file for {year}: {}", path.display()))?;
    let text = decode_source(&bytes);

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = rdr
        .headers()
        .with_context(|| format!("reading header row for {year}"))?
        .clone();
    let mut columns: Vec<String> = headers.iter().map(normalize_column).collect();

    let ntd_idx = columns.iter().position(|c| c == "ntd_id");
    let inject_year = !columns.iter().any(|c| c == "report_year");
    if inject_year {
        columns.push("report_year".to_string());
    }

    let mut rows = Vec::new();
    let mut id_failures = 0usize;
    for record in rdr.records() {
        let record = record.with_context(|| format!("parsing a row of the {year} file"))?;
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        // flexible: short rows pad out so every row matches the header width
        row.resize(columns.len() - usize::from(inject_year), String::new());

        if let Some(idx) = ntd_idx {
            let raw = row[idx].trim();
            if raw.is_empty() {
                // already keyless, not a parse failure
            } else if let Some(id) = normalize_ntd_id(raw, year) {
                row[idx] = id.to_string();
            } else {
                id_failures += 1;
                row[idx] = String::new();
            }
        }
        if inject_year {
            row.push(year.to_string());
        }
        rows.push(row);
    }

    if id_failures > 0 {
        warn!(year, id_failures, "rows left keyless by unparsable ntd_id");
    }
    info!(
        year,
        rows = rows.len(),
        columns = columns.len(),
        injected_report_year = inject_year,
        "loaded source year"
    );

    Ok(YearTable { year, columns, rows })
}

/// Loads every configured year, in ascending year order.
pub fn load_years(dir: &Path, years: &[i32]) -> Result<Vec<YearTable>> {
    let mut sorted = years.to_vec();
    sorted.sort_unstable();
    sorted.iter().map(|&y| load_year(dir, y)).collect()
}

/// Decodes source bytes as UTF-8 when valid, otherwise as Windows-1252.
///
/// Older NTD exports are single-byte Western text; recent ones are UTF-8.
fn decode_source(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => {
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            text
        }
    }
}
