// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee queries.

use std::str::FromStr;

use diesel::SqliteConnection;
use diesel::prelude::*;
use kpi_domain::{AppointmentType, Employee, EmployeeCategory, EmployeeGrade, EmployeeId};
use tracing::debug;

use crate::diesel_schema::employees;
use crate::encoding::parse_timestamp;
use crate::error::PersistenceError;

const TABLE: &str = "employees";

/// Diesel Queryable struct for employee rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = employees)]
struct EmployeeRow {
    employee_id: i64,
    name: String,
    national_id: String,
    category: String,
    grade: String,
    appointment: String,
    join_date: String,
    assigned_files_json: String,
    is_active: i32,
    created_at: String,
    updated_at: String,
}

impl EmployeeRow {
    fn into_employee(self) -> Result<Employee, PersistenceError> {
        let corrupt = |reason: String| PersistenceError::CorruptRecord {
            table: TABLE,
            reason,
        };

        let category = EmployeeCategory::from_str(&self.category)
            .map_err(|e| corrupt(e.to_string()))?;
        let grade = EmployeeGrade::from_str(&self.grade).map_err(|e| corrupt(e.to_string()))?;
        let appointment =
            AppointmentType::from_str(&self.appointment).map_err(|e| corrupt(e.to_string()))?;
        let join_date =
            kpi_domain::parse_date(&self.join_date).map_err(|e| corrupt(e.to_string()))?;
        let assigned_files: Vec<String> = serde_json::from_str(&self.assigned_files_json)?;

        Ok(Employee {
            id: EmployeeId::new(self.employee_id.to_string()),
            name: self.name,
            national_id: self.national_id,
            category,
            grade,
            appointment,
            join_date,
            assigned_files,
            is_active: self.is_active != 0,
            created_at: parse_timestamp(TABLE, &self.created_at)?,
            updated_at: parse_timestamp(TABLE, &self.updated_at)?,
        })
    }
}

/// Retrieves an employee by rowid, active or not.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be decoded.
/// Returns `Ok(None)` if the employee is not found.
pub fn get_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Option<Employee>, PersistenceError> {
    debug!(employee_id, "Looking up employee");

    let row: Option<EmployeeRow> = employees::table
        .filter(employees::employee_id.eq(employee_id))
        .select(EmployeeRow::as_select())
        .first(conn)
        .optional()?;

    row.map(EmployeeRow::into_employee).transpose()
}

/// Lists employees whose active flag is set, in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_active_employees(
    conn: &mut SqliteConnection,
) -> Result<Vec<Employee>, PersistenceError> {
    let rows: Vec<EmployeeRow> = employees::table
        .filter(employees::is_active.eq(1))
        .order(employees::employee_id.asc())
        .select(EmployeeRow::as_select())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded active employees");
    rows.into_iter().map(EmployeeRow::into_employee).collect()
}

/// Returns true when an active employee has this rowid.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn is_active_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<bool, PersistenceError> {
    use diesel::dsl::count_star;

    let count: i64 = employees::table
        .filter(employees::employee_id.eq(employee_id))
        .filter(employees::is_active.eq(1))
        .select(count_star())
        .first(conn)?;

    Ok(count > 0)
}
