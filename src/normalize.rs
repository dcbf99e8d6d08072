//! Identifier and column-name normalization across report years.
//!
//! Pre-2022 NTD filings prefix the stable 5-digit NTD code with a state
//! code; 2022+ filings use the bare code. Column headers also drift between
//! years (casing, embedded newlines, punctuation), so they are canonicalized
//! to snake_case before any cross-year comparison.

/// Normalizes a raw NTD identifier for a given report year.
///
/// For years <= 2021, raw values longer than 5 characters keep only the
/// trailing 5 (the actual NTD code portion). The result is parsed as an
/// integer, discarding leading zeros. Non-numeric residue yields `None`
/// rather than an error; such rows stay in the table but are keyless for
/// identifier-grouped aggregations.
pub fn normalize_ntd_id(raw: &str, year: i32) -> Option<i64> {
    let mut s = raw.trim();
    let n = s.chars().count();
    if year <= 2021 && n > 5 {
        let (split, _) = s.char_indices().nth(n - 5)?;
        s = &s[split..];
    }
    s.parse::<i64>().ok()
}

/// Canonicalizes a raw column header to snake_case.
///
/// Lowercase, embedded newlines removed, runs of whitespace collapsed to a
/// single underscore, all remaining non-word characters stripped.
pub fn normalize_column(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    // Each whitespace run becomes one underscore; newlines are dropped first
    // and do not start or split a run.
    let mut pending_runs = 0usize;
    let mut in_run = false;
    for c in lowered.chars() {
        if c == '\n' || c == '\r' {
            continue;
        }
        if c.is_whitespace() {
            if !in_run {
                pending_runs += 1;
                in_run = true;
            }
            continue;
        }
        in_run = false;
        if c.is_ascii_alphanumeric() || c == '_' {
            for _ in 0..pending_runs {
                out.push('_');
            }
            pending_runs = 0;
            out.push(c);
        }
    }
    for _ in 0..pending_runs {
        out.push('_');
    }
    out
}
