use crate::color::Rgba;
use crate::schema::{self, WeoField};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Raw year cell as found in the WEO file (thousands separators and all).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearCell {
    pub year: i32,
    pub raw: String,
}

/// One row of the WEO export: one (country, subject) pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeoRow {
    pub country_code: String,
    pub country: String,
    pub subject_code: String,
    pub subject: String,
    pub subject_notes: String,
    pub units: String,
    pub scale: String,
    pub series_notes: String,
    pub estimates_start_after: String,
    /// Ascending by year, one cell per year column of the file.
    pub years: Vec<YearCell>,
}

impl WeoRow {
    pub fn field(&self, field: WeoField) -> &str {
        match field {
            WeoField::CountryCode => &self.country_code,
            WeoField::Country => &self.country,
            WeoField::SubjectCode => &self.subject_code,
            WeoField::Subject => &self.subject,
            WeoField::SubjectNotes => &self.subject_notes,
            WeoField::Units => &self.units,
            WeoField::Scale => &self.scale,
            WeoField::SeriesNotes => &self.series_notes,
            WeoField::EstimatesStartAfter => &self.estimates_start_after,
        }
    }

    pub fn field_mut(&mut self, field: WeoField) -> &mut String {
        match field {
            WeoField::CountryCode => &mut self.country_code,
            WeoField::Country => &mut self.country,
            WeoField::SubjectCode => &mut self.subject_code,
            WeoField::Subject => &mut self.subject,
            WeoField::SubjectNotes => &mut self.subject_notes,
            WeoField::Units => &mut self.units,
            WeoField::Scale => &mut self.scale,
            WeoField::SeriesNotes => &mut self.series_notes,
            WeoField::EstimatesStartAfter => &mut self.estimates_start_after,
        }
    }

    /// Value of a column by its file name. Empty cells read as `None`.
    pub fn get(&self, column: &str) -> Option<&str> {
        let value = match schema::weo_field(column) {
            Some(field) => self.field(field),
            None => {
                let year = schema::year_column(column)?;
                self.years.iter().find(|c| c.year == year)?.raw.as_str()
            }
        };
        let value = value.trim();
        if value.is_empty() { None } else { Some(value) }
    }
}

/// Header plus rows of a loaded WEO file.
#[derive(Debug, Clone, Default)]
pub struct WeoTable {
    pub headers: Vec<String>,
    pub rows: Vec<WeoRow>,
}

impl WeoTable {
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    /// Year columns present in the header, ascending.
    pub fn year_columns(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self
            .headers
            .iter()
            .filter_map(|h| schema::year_column(h))
            .collect();
        years.sort_unstable();
        years
    }
}

/// Reference row mapping a country code to its canonical names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRef {
    pub country_code: String,
    pub country_name: String,
    pub long_country_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub country_code: String,
    pub country_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub subject_code: String,
    pub subject_name: String,
    pub unit: String,
    pub scale: String,
}

impl Subject {
    /// Selector text, e.g. "Current account balance as U.S. dollars (BCA)".
    pub fn display_name(&self) -> String {
        format!("{} as {} ({})", self.subject_name, self.unit, self.subject_code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearValue {
    pub year: i32,
    pub value: f64,
}

/// Parsed values of one WEO row. Never built with an empty `values`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeoEntry {
    pub country_code: String,
    pub country_name: String,
    pub subject_code: String,
    pub subject_name: String,
    pub unit: String,
    pub scale: String,
    pub values: Vec<YearValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub x: NaiveDate,
    pub y: f64,
}

impl SeriesPoint {
    pub fn year(&self) -> i32 {
        self.x.year()
    }
}

/// One country's values for the selected subject, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub country_code: String,
    pub country_name: String,
    pub values: Vec<SeriesPoint>,
    pub min_y: Option<f64>,
    pub max_y: Option<f64>,
    #[serde(skip)]
    pub color: Option<Rgba>,
    /// Last value inside the visible window; anchors the legend label.
    pub legend_y: Option<f64>,
}

impl Series {
    /// Points whose year lies in `[from_year, to_year]`.
    pub fn points_in(&self, from_year: i32, to_year: i32) -> impl Iterator<Item = &SeriesPoint> {
        self.values
            .iter()
            .filter(move |p| (from_year..=to_year).contains(&p.year()))
    }
}
