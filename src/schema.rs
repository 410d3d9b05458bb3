//! Fixed column names of the WEO export and the reference table, and the
//! mapping from those names onto typed row fields.
//!
//! The names must match the upstream files verbatim. A renamed upstream column
//! is fixed here and nowhere else.

pub const ISO: &str = "ISO";
pub const WEO_SUBJECT_CODE: &str = "WEO Subject Code";
pub const COUNTRY: &str = "Country";
pub const SUBJECT_DESCRIPTOR: &str = "Subject Descriptor";
pub const SUBJECT_NOTES: &str = "Subject Notes";
pub const UNITS: &str = "Units";
pub const SCALE: &str = "Scale";
pub const SERIES_NOTES: &str = "Country/Series-specific Notes";
pub const ESTIMATES_START_AFTER: &str = "Estimates Start After";

pub const REF_COUNTRY_CODE: &str = "Country Code";
pub const REF_SHORT_NAME: &str = "Short Name";
pub const REF_LONG_NAME: &str = "Long Name";

/// Named (non-year) fields of a WEO row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeoField {
    CountryCode,
    Country,
    SubjectCode,
    Subject,
    SubjectNotes,
    Units,
    Scale,
    SeriesNotes,
    EstimatesStartAfter,
}

/// Column name → field. Every entry is required in the WEO header.
pub const WEO_COLUMNS: [(&str, WeoField); 9] = [
    (ISO, WeoField::CountryCode),
    (WEO_SUBJECT_CODE, WeoField::SubjectCode),
    (COUNTRY, WeoField::Country),
    (SUBJECT_DESCRIPTOR, WeoField::Subject),
    (SUBJECT_NOTES, WeoField::SubjectNotes),
    (UNITS, WeoField::Units),
    (SCALE, WeoField::Scale),
    (SERIES_NOTES, WeoField::SeriesNotes),
    (ESTIMATES_START_AFTER, WeoField::EstimatesStartAfter),
];

/// Named fields of a reference-table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefField {
    CountryCode,
    ShortName,
    LongName,
}

pub const REF_COLUMNS: [(&str, RefField); 3] = [
    (REF_COUNTRY_CODE, RefField::CountryCode),
    (REF_SHORT_NAME, RefField::ShortName),
    (REF_LONG_NAME, RefField::LongName),
];

/// Look up the typed field for a WEO column name.
pub fn weo_field(column: &str) -> Option<WeoField> {
    WEO_COLUMNS
        .iter()
        .find(|(name, _)| *name == column)
        .map(|(_, field)| *field)
}

/// Year columns are named by the bare four-digit year.
pub fn year_column(column: &str) -> Option<i32> {
    if column.len() == 4 && column.bytes().all(|b| b.is_ascii_digit()) {
        column.parse().ok()
    } else {
        None
    }
}
