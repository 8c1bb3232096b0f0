// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee mutations.
//!
//! Employees are never removed. Deactivation clears `is_active` so that
//! historical evaluations still resolve.

use diesel::SqliteConnection;
use diesel::prelude::*;
use kpi_domain::EmployeeProfile;
use time::OffsetDateTime;
use tracing::info;

use crate::diesel_schema::employees;
use crate::encoding::format_timestamp;
use super::inserted_rowid;
use crate::error::PersistenceError;

/// Inserts a new active employee and returns its rowid.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_employee(
    conn: &mut SqliteConnection,
    profile: &EmployeeProfile,
    created_at: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    let timestamp: String = format_timestamp(created_at)?;
    let assigned_files_json: String = serde_json::to_string(&profile.assigned_files)?;

    diesel::insert_into(employees::table)
        .values((
            employees::name.eq(&profile.name),
            employees::national_id.eq(&profile.national_id),
            employees::category.eq(profile.category.as_str()),
            employees::grade.eq(profile.grade.as_str()),
            employees::appointment.eq(profile.appointment.as_str()),
            employees::join_date.eq(profile.join_date.to_string()),
            employees::assigned_files_json.eq(&assigned_files_json),
            employees::is_active.eq(1),
            employees::created_at.eq(&timestamp),
            employees::updated_at.eq(&timestamp),
        ))
        .execute(conn)?;

    let employee_id: i64 = inserted_rowid(conn)?;
    info!(employee_id, category = profile.category.as_str(), "Employee created");
    Ok(employee_id)
}

/// Overwrites an employee's details.
///
/// # Errors
///
/// Returns `EmployeeNotFound` if no row matches, or an error if the
/// update fails.
pub fn update_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
    profile: &EmployeeProfile,
    updated_at: OffsetDateTime,
) -> Result<(), PersistenceError> {
    let assigned_files_json: String = serde_json::to_string(&profile.assigned_files)?;

    let rows_affected: usize = diesel::update(employees::table)
        .filter(employees::employee_id.eq(employee_id))
        .set((
            employees::name.eq(&profile.name),
            employees::national_id.eq(&profile.national_id),
            employees::category.eq(profile.category.as_str()),
            employees::grade.eq(profile.grade.as_str()),
            employees::appointment.eq(profile.appointment.as_str()),
            employees::join_date.eq(profile.join_date.to_string()),
            employees::assigned_files_json.eq(&assigned_files_json),
            employees::updated_at.eq(format_timestamp(updated_at)?),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::EmployeeNotFound(employee_id.to_string()));
    }

    info!(employee_id, "Employee updated");
    Ok(())
}

/// Clears an employee's active flag.
///
/// Deactivating an already inactive employee succeeds.
///
/// # Errors
///
/// Returns `EmployeeNotFound` if no row matches, or an error if the
/// update fails.
pub fn deactivate_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
    updated_at: OffsetDateTime,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(employees::table)
        .filter(employees::employee_id.eq(employee_id))
        .set((
            employees::is_active.eq(0),
            employees::updated_at.eq(format_timestamp(updated_at)?),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::EmployeeNotFound(employee_id.to_string()));
    }

    info!(employee_id, "Employee deactivated");
    Ok(())
}
