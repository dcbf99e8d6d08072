//! JSON export for the dashboard data directory.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

/// Serializes a value as compact JSON into `{dir}/{name}.json`.
///
/// Used for the record-array views; the dashboard reads them verbatim.
pub fn write_json(dir: &Path, name: &str, value: &impl Serialize) -> Result<()> {
    write(dir, name, value, false)
}

/// Serializes a value as pretty-printed JSON into `{dir}/{name}.json`.
pub fn write_json_pretty(dir: &Path, name: &str, value: &impl Serialize) -> Result<()> {
    write(dir, name, value, true)
}

fn write(dir: &Path, name: &str, value: &impl Serialize, pretty: bool) -> Result<()> {
    let path = dir.join(format!("{name}.json"));
    let file = File::create(&path)
        .with_context(|| format!("creating output file {}", path.display()))?;
    let mut w = BufWriter::new(file);
    if pretty {
        serde_json::to_writer_pretty(&mut w, value)
    } else {
        serde_json::to_writer(&mut w, value)
    }
    .with_context(|| format!("writing {name}.json"))?;
    info!(file = %path.display(), "wrote output");
    Ok(())
}
