//! Unique-keyed projections of the WEO table: countries, subjects, years.

use crate::error::{Result, WeoError};
use crate::models::{Country, CountryRef, Subject, WeoTable};
use crate::schema;
use ahash::{AHashMap, AHashSet};
use regex::Regex;
use std::sync::OnceLock;

/// One reduced record: the retained columns of the first row seen for a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    fields: Vec<(String, Option<String>)>,
}

impl CatalogEntry {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn fields(&self) -> &[(String, Option<String>)] {
        &self.fields
    }
}

/// Keep the first row for every distinct value of `key_field`, reduced to `return_fields`.
///
/// Rows with an empty key and rows whose key is listed in `exclude_values` are
/// skipped. Output follows first-occurrence order.
pub fn build_catalog(
    table: &WeoTable,
    key_field: &str,
    return_fields: &[&str],
    exclude_values: &[String],
) -> Result<Vec<CatalogEntry>> {
    for column in std::iter::once(&key_field).chain(return_fields) {
        if !table.has_column(column) {
            return Err(WeoError::InvalidArgument(format!(
                "unknown column '{column}'"
            )));
        }
    }

    let mut seen: AHashSet<&str> = AHashSet::new();
    let mut out = Vec::new();
    for row in &table.rows {
        let Some(key) = row.get(key_field) else {
            continue;
        };
        if exclude_values.iter().any(|x| x == key) || !seen.insert(key) {
            continue;
        }
        out.push(CatalogEntry {
            fields: return_fields
                .iter()
                .map(|f| (f.to_string(), row.get(f).map(str::to_string)))
                .collect(),
        });
    }
    Ok(out)
}

fn iso3() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z]{3}$").expect("static regex"))
}

/// Whether `code` is a three-letter uppercase country code.
pub fn is_country_code(code: &str) -> bool {
    iso3().is_match(code)
}

/// Canonical country names keyed by code, built from the reference table.
#[derive(Debug, Clone, Default)]
pub struct CountryNames {
    names: AHashMap<String, String>,
}

impl CountryNames {
    pub fn from_refs(refs: &[CountryRef]) -> Self {
        let mut names = AHashMap::with_capacity(refs.len());
        for r in refs {
            if r.country_name.is_empty() {
                continue;
            }
            names
                .entry(r.country_code.clone())
                .or_insert_with(|| r.country_name.clone());
        }
        Self { names }
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    /// Reference name if there is one, else the dataset's own name.
    pub fn resolve(&self, code: &str, fallback: &str) -> String {
        self.get(code).unwrap_or(fallback).to_string()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Distinct countries in file order, names overridden by `names`.
pub fn countries(table: &WeoTable, names: &CountryNames) -> Result<Vec<Country>> {
    let entries = build_catalog(table, schema::ISO, &[schema::ISO, schema::COUNTRY], &[])?;
    let mut out = Vec::with_capacity(entries.len());
    for e in entries {
        let code = e.get(schema::ISO).unwrap_or_default();
        if !is_country_code(code) {
            log::warn!("skipping row with malformed country code '{code}'");
            continue;
        }
        let own = e.get(schema::COUNTRY).unwrap_or(code);
        out.push(Country {
            country_code: code.to_string(),
            country_name: names.resolve(code, own),
        });
    }
    Ok(out)
}

/// Distinct subjects in file order, minus `excluded`.
pub fn subjects(table: &WeoTable, excluded: &[String]) -> Result<Vec<Subject>> {
    let entries = build_catalog(
        table,
        schema::WEO_SUBJECT_CODE,
        &[
            schema::WEO_SUBJECT_CODE,
            schema::SUBJECT_DESCRIPTOR,
            schema::UNITS,
            schema::SCALE,
        ],
        excluded,
    )?;
    Ok(entries
        .into_iter()
        .map(|e| Subject {
            subject_code: e.get(schema::WEO_SUBJECT_CODE).unwrap_or_default().to_string(),
            subject_name: e.get(schema::SUBJECT_DESCRIPTOR).unwrap_or_default().to_string(),
            unit: e.get(schema::UNITS).unwrap_or_default().to_string(),
            scale: e.get(schema::SCALE).unwrap_or_default().to_string(),
        })
        .collect())
}

/// Every year of the fixed dataset range.
pub fn years(start_year: i32, end_year: i32) -> Vec<i32> {
    (start_year..=end_year).collect()
}
