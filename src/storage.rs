//! Export of drawn series as tidy rows.

use crate::error::{Result, WeoError};
use crate::models::Series;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// One exported observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRow {
    pub country_code: String,
    pub country_name: String,
    pub subject_code: String,
    pub year: i32,
    pub value: f64,
}

/// Flatten `series` into rows, keeping series order and ascending years.
pub fn series_rows(series: &[Series], subject_code: &str) -> Vec<SeriesRow> {
    series
        .iter()
        .flat_map(|s| {
            s.values.iter().map(move |p| SeriesRow {
                country_code: s.country_code.clone(),
                country_name: s.country_name.clone(),
                subject_code: subject_code.to_string(),
                year: p.year(),
                value: p.y,
            })
        })
        .collect()
}

/// Prefix cells a spreadsheet would evaluate as a formula.
fn neutralize(cell: &str) -> String {
    match cell.chars().next() {
        Some('=' | '+' | '-' | '@') => format!("'{cell}"),
        _ => cell.to_string(),
    }
}

/// Save rows as CSV with header. Text cells that start like a formula are quoted.
pub fn save_series_csv<P: AsRef<Path>>(rows: &[SeriesRow], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.write_record(["country_code", "country_name", "subject_code", "year", "value"])?;
    for r in rows {
        wtr.write_record([
            neutralize(&r.country_code),
            neutralize(&r.country_name),
            neutralize(&r.subject_code),
            r.year.to_string(),
            r.value.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save rows as a pretty JSON array.
pub fn save_series_json<P: AsRef<Path>>(rows: &[SeriesRow], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(rows)
        .map_err(|e| WeoError::InvalidArgument(format!("serialize rows: {e}")))?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Pick the writer from the file extension (`.json`, anything else is CSV).
pub fn save_series<P: AsRef<Path>>(rows: &[SeriesRow], path: P) -> Result<()> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => save_series_json(rows, path),
        _ => save_series_csv(rows, path),
    }?;
    log::info!("exported {} rows to {}", rows.len(), path.display());
    Ok(())
}
