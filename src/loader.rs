//! Readers for the tab-separated WEO export and the country reference table.
//!
//! Cells are UTF-8 where they can be. The IMF publishes the export in
//! Latin-1, so a cell that is not valid UTF-8 is read as Latin-1 instead of
//! aborting the load.

use crate::error::{Result, WeoError};
use crate::models::{CountryRef, WeoRow, WeoTable, YearCell};
use crate::schema::{self, RefField};
use csv::{ByteRecord, ReaderBuilder};
use std::fs::File;
use std::io::Read;
use std::path::Path;

fn decode(bytes: &[u8]) -> String {
    let text = match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        // Latin-1 bytes are the first 256 code points.
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    };
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .to_string()
}

fn cell(rec: &ByteRecord, idx: usize) -> String {
    rec.get(idx).map(decode).unwrap_or_default()
}

fn column_index(headers: &[String], column: &str, source: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| WeoError::MissingColumn {
            file: source.to_string(),
            column: column.to_string(),
        })
}

/// Load the WEO export from a file.
pub fn load_weo_table<P: AsRef<Path>>(path: P) -> Result<WeoTable> {
    let path = path.as_ref();
    let file = File::open(path)?;
    read_weo_table(file, &path.display().to_string())
}

/// Parse a WEO export from any reader. `source` names the input in errors.
pub fn read_weo_table<R: Read>(reader: R, source: &str) -> Result<WeoTable> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.byte_headers()?.iter().map(decode).collect();

    let mut named = Vec::with_capacity(schema::WEO_COLUMNS.len());
    for (column, field) in schema::WEO_COLUMNS {
        named.push((column_index(&headers, column, source)?, field));
    }

    let mut year_idx: Vec<(usize, i32)> = headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| schema::year_column(h).map(|y| (i, y)))
        .collect();
    year_idx.sort_by_key(|(_, y)| *y);

    let mut rows = Vec::new();
    for rec in rdr.byte_records() {
        let rec = rec?;
        let mut row = WeoRow::default();
        for (idx, field) in &named {
            *row.field_mut(*field) = cell(&rec, *idx);
        }
        row.years = year_idx
            .iter()
            .map(|(idx, year)| YearCell {
                year: *year,
                raw: cell(&rec, *idx),
            })
            .collect();
        rows.push(row);
    }

    log::debug!(
        "{}: {} rows, {} year columns",
        source,
        rows.len(),
        year_idx.len()
    );
    Ok(WeoTable { headers, rows })
}

/// Load the reference table. `.csv` files are comma separated, anything else tab separated.
pub fn load_country_refs<P: AsRef<Path>>(path: P) -> Result<Vec<CountryRef>> {
    let path = path.as_ref();
    let delimiter = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => b',',
        _ => b'\t',
    };
    let file = File::open(path)?;
    read_country_refs(file, &path.display().to_string(), delimiter)
}

/// Parse reference rows. The long name column is optional.
pub fn read_country_refs<R: Read>(
    reader: R,
    source: &str,
    delimiter: u8,
) -> Result<Vec<CountryRef>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);
    let headers: Vec<String> = rdr.byte_headers()?.iter().map(decode).collect();

    let mut code_idx = None;
    let mut short_idx = None;
    let mut long_idx = None;
    for (column, field) in schema::REF_COLUMNS {
        match field {
            RefField::CountryCode => code_idx = Some(column_index(&headers, column, source)?),
            RefField::ShortName => short_idx = Some(column_index(&headers, column, source)?),
            RefField::LongName => long_idx = headers.iter().position(|h| h == column),
        }
    }
    let (Some(code_idx), Some(short_idx)) = (code_idx, short_idx) else {
        return Err(WeoError::InvalidArgument(
            "reference column mapping is incomplete".into(),
        ));
    };

    let mut out = Vec::new();
    for rec in rdr.byte_records() {
        let rec = rec?;
        let country_code = cell(&rec, code_idx);
        if country_code.is_empty() {
            continue;
        }
        out.push(CountryRef {
            country_code,
            country_name: cell(&rec, short_idx),
            long_country_name: long_idx.map(|i| cell(&rec, i)).unwrap_or_default(),
        });
    }
    Ok(out)
}
