// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations.
//!
//! [`persist_transition`] is the single entry point for writing the
//! outcome of a validated command. Each transition runs in its own
//! transaction.

pub mod employees;
pub mod evaluations;
pub mod operators;

use diesel::SqliteConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use kpi::{Mutation, TransitionResult};
use kpi_domain::{EmployeeId, EvaluationId};
use tracing::info;

use crate::encoding::{employee_rowid, evaluation_rowid};
use crate::error::PersistenceError;

/// Identifiers produced by persisting a transition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersistTransitionResult {
    /// The employee the transition created or touched, if any.
    pub employee_id: Option<EmployeeId>,
    /// The evaluation the transition created or touched, if any.
    pub evaluation_id: Option<EvaluationId>,
}

/// Writes a transition result.
///
/// # Errors
///
/// Returns `EmployeeNotFound` or `EvaluationNotFound` for references that
/// do not resolve, or an error if the write fails.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<PersistTransitionResult, PersistenceError> {
    let persisted: PersistTransitionResult = conn.transaction(|conn| {
        persist_mutation(conn, &result.mutation)
    })?;

    info!(actor = %result.actor, "{}", result.description);
    Ok(persisted)
}

fn persist_mutation(
    conn: &mut SqliteConnection,
    mutation: &Mutation,
) -> Result<PersistTransitionResult, PersistenceError> {
    match mutation {
        Mutation::InsertEmployee {
            profile,
            created_at,
        } => {
            let rowid: i64 = employees::insert_employee(conn, profile, *created_at)?;
            Ok(PersistTransitionResult {
                employee_id: Some(EmployeeId::new(rowid.to_string())),
                evaluation_id: None,
            })
        }
        Mutation::UpdateEmployee {
            employee_id,
            profile,
            updated_at,
        } => {
            let rowid: i64 = require_employee_rowid(employee_id)?;
            employees::update_employee(conn, rowid, profile, *updated_at)?;
            Ok(PersistTransitionResult {
                employee_id: Some(employee_id.clone()),
                evaluation_id: None,
            })
        }
        Mutation::DeactivateEmployee {
            employee_id,
            updated_at,
        } => {
            let rowid: i64 = require_employee_rowid(employee_id)?;
            employees::deactivate_employee(conn, rowid, *updated_at)?;
            Ok(PersistTransitionResult {
                employee_id: Some(employee_id.clone()),
                evaluation_id: None,
            })
        }
        Mutation::InsertEvaluation {
            input,
            evaluator,
            period,
            created_at,
        } => {
            let rowid: i64 =
                evaluations::insert_evaluation(conn, input, evaluator, period, *created_at)?;
            Ok(PersistTransitionResult {
                employee_id: Some(input.employee_id.clone()),
                evaluation_id: Some(EvaluationId::new(rowid.to_string())),
            })
        }
        Mutation::UpdateEvaluation {
            evaluation_id,
            input,
            updated_at,
        } => {
            let rowid: i64 = require_evaluation_rowid(evaluation_id)?;
            evaluations::update_evaluation(conn, rowid, input, *updated_at)?;
            Ok(PersistTransitionResult {
                employee_id: Some(input.employee_id.clone()),
                evaluation_id: Some(evaluation_id.clone()),
            })
        }
        Mutation::DeleteEvaluation { evaluation_id } => {
            let rowid: i64 = require_evaluation_rowid(evaluation_id)?;
            evaluations::delete_evaluation(conn, rowid)?;
            Ok(PersistTransitionResult {
                employee_id: None,
                evaluation_id: Some(evaluation_id.clone()),
            })
        }
    }
}

fn require_employee_rowid(id: &EmployeeId) -> Result<i64, PersistenceError> {
    employee_rowid(id).ok_or_else(|| PersistenceError::EmployeeNotFound(id.to_string()))
}

fn require_evaluation_rowid(id: &EvaluationId) -> Result<i64, PersistenceError> {
    evaluation_rowid(id).ok_or_else(|| PersistenceError::EvaluationNotFound(id.to_string()))
}

/// Rowid of the insert just executed on `conn`.
///
/// Only meaningful inside the transaction that ran the insert.
fn inserted_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}
