// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Evaluation queries.
//!
//! The stored period is the designator as it was written, in either of its
//! two shapes. It is normalized when the row becomes an [`Evaluation`].

use diesel::SqliteConnection;
use diesel::prelude::*;
use kpi_domain::{
    CriterionScores, EmployeeId, Evaluation, EvaluationId, EvaluationInput, PeriodKey,
};
use tracing::debug;

use crate::diesel_schema::evaluations;
use crate::encoding::parse_timestamp;
use crate::error::PersistenceError;

const TABLE: &str = "evaluations";

/// Diesel Queryable struct for evaluation rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = evaluations)]
struct EvaluationRow {
    evaluation_id: i64,
    employee_id: String,
    evaluator: String,
    evaluated_at: String,
    period_json: String,
    criteria_json: String,
    comments: Option<String>,
    strengths: Option<String>,
    improvements: Option<String>,
    created_at: String,
    updated_at: String,
}

impl EvaluationRow {
    fn into_evaluation(self) -> Result<Evaluation, PersistenceError> {
        let period: PeriodKey = serde_json::from_str(&self.period_json)?;
        let criteria: CriterionScores = serde_json::from_str(&self.criteria_json)?;
        let input = EvaluationInput {
            employee_id: EmployeeId::new(self.employee_id),
            date: parse_timestamp(TABLE, &self.evaluated_at)?,
            criteria,
            comments: self.comments,
            strengths: self.strengths,
            improvements: self.improvements,
        };

        Ok(Evaluation::new(
            EvaluationId::new(self.evaluation_id.to_string()),
            self.evaluator,
            input,
            period,
            parse_timestamp(TABLE, &self.created_at)?,
            parse_timestamp(TABLE, &self.updated_at)?,
        ))
    }
}

/// Retrieves an evaluation by rowid.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be decoded.
/// Returns `Ok(None)` if the evaluation is not found.
pub fn get_evaluation(
    conn: &mut SqliteConnection,
    evaluation_id: i64,
) -> Result<Option<Evaluation>, PersistenceError> {
    debug!(evaluation_id, "Looking up evaluation");

    let row: Option<EvaluationRow> = evaluations::table
        .filter(evaluations::evaluation_id.eq(evaluation_id))
        .select(EvaluationRow::as_select())
        .first(conn)
        .optional()?;

    row.map(EvaluationRow::into_evaluation).transpose()
}

/// Lists every evaluation, newest evaluation date first.
///
/// Rows with equal dates keep rowid order, newest insert first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_evaluations(conn: &mut SqliteConnection) -> Result<Vec<Evaluation>, PersistenceError> {
    let rows: Vec<EvaluationRow> = evaluations::table
        .order(evaluations::evaluation_id.desc())
        .select(EvaluationRow::as_select())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded evaluations");

    let mut result: Vec<Evaluation> = rows
        .into_iter()
        .map(EvaluationRow::into_evaluation)
        .collect::<Result<_, _>>()?;
    // Stored text varies in fractional-second width; sort on the instant.
    result.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(result)
}
