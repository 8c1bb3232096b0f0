// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Evaluation mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use kpi_domain::{EvaluationInput, PeriodKey};
use time::OffsetDateTime;
use tracing::info;

use crate::diesel_schema::evaluations;
use crate::encoding::{employee_rowid, format_timestamp};
use super::inserted_rowid;
use crate::error::PersistenceError;
use crate::queries::employees::is_active_employee;

/// Fails unless the input references an active employee.
fn ensure_active_employee(
    conn: &mut SqliteConnection,
    input: &EvaluationInput,
) -> Result<(), PersistenceError> {
    let active: bool = match employee_rowid(&input.employee_id) {
        Some(rowid) => is_active_employee(conn, rowid)?,
        None => false,
    };
    if active {
        Ok(())
    } else {
        Err(PersistenceError::EmployeeNotFound(
            input.employee_id.to_string(),
        ))
    }
}

/// Inserts a new evaluation and returns its rowid.
///
/// # Errors
///
/// Returns `EmployeeNotFound` if the referenced employee is missing or
/// inactive, or an error if the insert fails.
pub fn insert_evaluation(
    conn: &mut SqliteConnection,
    input: &EvaluationInput,
    evaluator: &str,
    period: &PeriodKey,
    created_at: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    ensure_active_employee(conn, input)?;

    let timestamp: String = format_timestamp(created_at)?;

    diesel::insert_into(evaluations::table)
        .values((
            evaluations::employee_id.eq(input.employee_id.value()),
            evaluations::evaluator.eq(evaluator),
            evaluations::evaluated_at.eq(format_timestamp(input.date)?),
            evaluations::period_json.eq(serde_json::to_string(period)?),
            evaluations::criteria_json.eq(serde_json::to_string(&input.criteria)?),
            evaluations::comments.eq(input.comments.as_deref()),
            evaluations::strengths.eq(input.strengths.as_deref()),
            evaluations::improvements.eq(input.improvements.as_deref()),
            evaluations::created_at.eq(&timestamp),
            evaluations::updated_at.eq(&timestamp),
        ))
        .execute(conn)?;

    let evaluation_id: i64 = inserted_rowid(conn)?;
    info!(
        evaluation_id,
        employee_id = input.employee_id.value(),
        evaluator,
        "Evaluation recorded"
    );
    Ok(evaluation_id)
}

/// Overwrites an evaluation's details.
///
/// The stored period and evaluator are kept.
///
/// # Errors
///
/// Returns `EvaluationNotFound` if no row matches, `EmployeeNotFound` if
/// the new employee reference is not active, or an error if the update
/// fails.
pub fn update_evaluation(
    conn: &mut SqliteConnection,
    evaluation_id: i64,
    input: &EvaluationInput,
    updated_at: OffsetDateTime,
) -> Result<(), PersistenceError> {
    ensure_active_employee(conn, input)?;

    let rows_affected: usize = diesel::update(evaluations::table)
        .filter(evaluations::evaluation_id.eq(evaluation_id))
        .set((
            evaluations::employee_id.eq(input.employee_id.value()),
            evaluations::evaluated_at.eq(format_timestamp(input.date)?),
            evaluations::criteria_json.eq(serde_json::to_string(&input.criteria)?),
            evaluations::comments.eq(input.comments.as_deref()),
            evaluations::strengths.eq(input.strengths.as_deref()),
            evaluations::improvements.eq(input.improvements.as_deref()),
            evaluations::updated_at.eq(format_timestamp(updated_at)?),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::EvaluationNotFound(
            evaluation_id.to_string(),
        ));
    }

    info!(evaluation_id, "Evaluation updated");
    Ok(())
}

/// Permanently removes an evaluation.
///
/// # Errors
///
/// Returns `EvaluationNotFound` if no row matches, or an error if the
/// delete fails.
pub fn delete_evaluation(
    conn: &mut SqliteConnection,
    evaluation_id: i64,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(evaluations::table)
        .filter(evaluations::evaluation_id.eq(evaluation_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::EvaluationNotFound(
            evaluation_id.to_string(),
        ));
    }

    info!(evaluation_id, "Evaluation deleted");
    Ok(())
}
