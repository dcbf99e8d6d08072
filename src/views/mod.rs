//! Pre-aggregated dashboard views derived from the combined table.
//!
//! Each view is computed independently from the combined records: the
//! latest-year agency snapshot, per-agency yearly history, per-agency mode
//! breakdown, national year × mode totals, and the filter metadata.

pub mod metadata;
pub mod modes;
pub mod national;
pub mod snapshot;
pub mod types;
pub mod util;
pub mod yearly;
