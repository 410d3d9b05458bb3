//! The loaded WEO dataset: catalogs plus parsed entries, read-only after load.

use crate::catalog::{self, CountryNames};
use crate::config::ChartConfig;
use crate::error::{Result, WeoError};
use crate::extract::weo_entry;
use crate::loader;
use crate::models::{Country, CountryRef, Subject, WeoEntry, WeoRow, WeoTable};
use crate::schema;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Dataset {
    pub countries: Vec<Country>,
    pub subjects: Vec<Subject>,
    pub entries: Vec<WeoEntry>,
    pub years: Vec<i32>,
    names: CountryNames,
}

impl Dataset {
    /// Load the WEO file and, if given, the country reference file.
    pub fn load<P: AsRef<Path>>(
        weo_path: P,
        ref_path: Option<&Path>,
        cfg: &ChartConfig,
    ) -> Result<Self> {
        let table = loader::load_weo_table(weo_path)?;
        let refs = match ref_path {
            Some(p) => loader::load_country_refs(p)?,
            None => Vec::new(),
        };
        Self::from_table(table, &refs, cfg)
    }

    /// Build from an already parsed table.
    ///
    /// Every year column of `cfg`'s range must be present.
    pub fn from_table(table: WeoTable, refs: &[CountryRef], cfg: &ChartConfig) -> Result<Self> {
        let present = table.year_columns();
        if let Some(missing) = (cfg.start_year..=cfg.end_year).find(|y| !present.contains(y)) {
            return Err(WeoError::MissingColumn {
                file: "WEO table".into(),
                column: missing.to_string(),
            });
        }
        let names = CountryNames::from_refs(refs);
        let countries = catalog::countries(&table, &names)?;
        let subjects = catalog::subjects(&table, &cfg.excluded_subjects)?;
        let entries = Self::entries(&table.rows, &names, cfg);
        log::info!(
            "dataset: {} countries, {} subjects, {} entries",
            countries.len(),
            subjects.len(),
            entries.len()
        );
        Ok(Self {
            countries,
            subjects,
            entries,
            years: catalog::years(cfg.start_year, cfg.end_year),
            names,
        })
    }

    /// Build from typed rows; the header is the fixed WEO schema plus the year range.
    pub fn from_rows(rows: Vec<WeoRow>, refs: &[CountryRef], cfg: &ChartConfig) -> Result<Self> {
        let headers = schema::WEO_COLUMNS
            .iter()
            .map(|(c, _)| c.to_string())
            .chain((cfg.start_year..=cfg.end_year).map(|y| y.to_string()))
            .collect();
        Self::from_table(WeoTable { headers, rows }, refs, cfg)
    }

    fn entries(rows: &[WeoRow], names: &CountryNames, cfg: &ChartConfig) -> Vec<WeoEntry> {
        rows.iter()
            .filter(|r| !cfg.excluded_subjects.contains(&r.subject_code))
            .filter_map(|r| weo_entry(r, names, cfg.start_year, cfg.end_year))
            .collect()
    }

    pub fn subject(&self, code: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.subject_code == code)
    }

    pub fn country(&self, code: &str) -> Option<&Country> {
        self.countries.iter().find(|c| c.country_code == code)
    }

    pub fn country_names(&self) -> &CountryNames {
        &self.names
    }
}
