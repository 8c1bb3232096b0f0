// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV encoding of export tables.
//!
//! Output starts with a UTF-8 byte order mark so spreadsheet applications
//! detect the encoding of Arabic headers and names.

use kpi::ExportTable;
use thiserror::Error;
use time::Date;

/// UTF-8 byte order mark.
pub const UTF8_BOM: &str = "\u{feff}";

/// Errors that can occur while encoding an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The CSV writer rejected a record.
    #[error("Failed to write CSV record: {0}")]
    Csv(#[from] csv::Error),

    /// The CSV buffer could not be flushed.
    #[error("Failed to flush CSV output: {0}")]
    Flush(String),

    /// The output was not valid UTF-8.
    #[error("CSV output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Encodes a table as CSV: one header row, then one row per record.
///
/// # Errors
///
/// Returns an error if a record cannot be written.
pub fn table_to_csv(table: &ExportTable) -> Result<String, ExportError> {
    let mut writer: csv::Writer<Vec<u8>> = csv::Writer::from_writer(Vec::new());

    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }

    let bytes: Vec<u8> = writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.to_string()))?;
    let body: String = String::from_utf8(bytes)?;

    Ok(format!("{UTF8_BOM}{body}"))
}

/// Builds the download name of an export, e.g. `evaluations-report-2024-03-15.csv`.
#[must_use]
pub fn export_filename(kind: &str, generated_on: Date) -> String {
    format!("{kind}-report-{generated_on}.csv")
}
