// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Column encodings shared by queries and mutations.
//!
//! Instants are stored as RFC 3339 text in UTC. Record ids are `SQLite`
//! rowids rendered as decimal strings.

use kpi_domain::{EmployeeId, EvaluationId};
use time::{OffsetDateTime, UtcOffset};
use time::format_description::well_known::Rfc3339;

use crate::error::PersistenceError;

/// Formats an instant for storage.
///
/// # Errors
///
/// Returns an error if the instant cannot be represented in RFC 3339.
pub fn format_timestamp(instant: OffsetDateTime) -> Result<String, PersistenceError> {
    instant
        .to_offset(UtcOffset::UTC)
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(format!("Invalid timestamp: {e}")))
}

/// Parses a stored instant.
///
/// # Errors
///
/// Returns an error if the text is not RFC 3339.
pub fn parse_timestamp(
    table: &'static str,
    value: &str,
) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| PersistenceError::CorruptRecord {
        table,
        reason: format!("invalid timestamp '{value}': {e}"),
    })
}

/// Maps an employee id to its rowid, or `None` for ids this store never issued.
pub fn employee_rowid(id: &EmployeeId) -> Option<i64> {
    id.value().parse().ok()
}

/// Maps an evaluation id to its rowid, or `None` for ids this store never issued.
pub fn evaluation_rowid(id: &EvaluationId) -> Option<i64> {
    id.value().parse().ok()
}
