//! Cell parsing, entry construction, and per-subject series extraction.

use crate::catalog::{CountryNames, is_country_code};
use crate::models::{Series, SeriesPoint, WeoEntry, WeoRow, YearValue};
use ahash::AHashMap;
use chrono::NaiveDate;

/// Parse a numeric cell. Thousands separators are stripped; empty, `n/a`,
/// `--` and any other non-numeric or non-finite text mean "no data".
pub fn parse_cell(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// January 1 of `year`.
pub fn year_start(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
}

/// Build one entry per row with at least one valid value in `[start_year, end_year]`.
pub fn weo_entry(
    row: &WeoRow,
    names: &CountryNames,
    start_year: i32,
    end_year: i32,
) -> Option<WeoEntry> {
    if !is_country_code(&row.country_code) || row.subject_code.is_empty() {
        return None;
    }
    let values: Vec<YearValue> = row
        .years
        .iter()
        .filter(|c| (start_year..=end_year).contains(&c.year))
        .filter_map(|c| parse_cell(&c.raw).map(|value| YearValue { year: c.year, value }))
        .collect();
    if values.is_empty() {
        return None;
    }
    Some(WeoEntry {
        country_code: row.country_code.clone(),
        country_name: names.resolve(&row.country_code, &row.country),
        subject_code: row.subject_code.clone(),
        subject_name: row.subject.clone(),
        unit: row.units.clone(),
        scale: row.scale.clone(),
        values,
    })
}

/// One series per country having data for `subject_code`, in dataset order.
pub fn extract_series(entries: &[WeoEntry], subject_code: &str) -> Vec<Series> {
    let out: Vec<Series> = entries
        .iter()
        .filter(|e| e.subject_code == subject_code)
        .filter_map(|e| {
            let values: Vec<SeriesPoint> = e
                .values
                .iter()
                .filter_map(|v| year_start(v.year).map(|x| SeriesPoint { x, y: v.value }))
                .collect();
            if values.is_empty() {
                return None;
            }
            Some(Series {
                country_code: e.country_code.clone(),
                country_name: e.country_name.clone(),
                values,
                min_y: None,
                max_y: None,
                color: None,
                legend_y: None,
            })
        })
        .collect();
    log::debug!("subject {}: {} series", subject_code, out.len());
    out
}

/// Series for `selected` country codes, in selection order.
///
/// Codes without a series for the current subject are dropped; a code that
/// is not a well-formed country code is also logged.
pub fn select_series(series: &[Series], selected: &[String]) -> Vec<Series> {
    let by_code: AHashMap<&str, &Series> = series
        .iter()
        .map(|s| (s.country_code.as_str(), s))
        .collect();
    selected
        .iter()
        .filter_map(|code| match by_code.get(code.as_str()) {
            Some(s) => Some((*s).clone()),
            None => {
                if is_country_code(code) {
                    log::debug!("no data for {code} in current subject");
                } else {
                    log::warn!("unknown country code '{code}'");
                }
                None
            }
        })
        .collect()
}
