//! CSV loading with type inference.
//!
//! The source datasets ship as CSV files; cells are sniffed into [`Value`]s
//! at load time so the rest of the pipeline never sees raw text for numeric
//! or boolean columns.

use std::io::Read;
use std::path::Path;

use super::error::TableError;
use super::table::Table;
use super::value::Value;

/// Load a table from a CSV file. The first record is the header.
pub fn read_csv_path(path: impl AsRef<Path>) -> Result<Table, TableError> {
    let file = std::fs::File::open(path.as_ref())?;
    read_csv(file)
}

/// Load a table from any CSV reader. The first record is the header.
pub fn read_csv<R: Read>(reader: R) -> Result<Table, TableError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers = rdr.headers().map_err(TableError::from)?;
    if headers.is_empty() {
        return Err(TableError::MissingHeader);
    }
    let columns: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(sniff_value).collect());
    }

    Table::new(columns, rows)
}

/// Infer a [`Value`] from a raw CSV cell.
///
/// Empty cells are missing; `true`/`false` (case-insensitive) are flags;
/// anything that parses as `f64` is numeric; the rest is text.
fn sniff_value(cell: &str) -> Value {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if let Ok(n) = trimmed.parse::<f64>() {
        return Value::Num(n);
    }
    Value::Str(trimmed.to_string())
}
