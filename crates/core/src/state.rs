// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use kpi_domain::{EmployeeId, EmployeeProfile, EvaluationId, EvaluationInput, PeriodKey};
use time::OffsetDateTime;

/// A validated change, ready to be written by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Insert a new active employee.
    InsertEmployee {
        /// The employee's details.
        profile: EmployeeProfile,
        /// Creation timestamp.
        created_at: OffsetDateTime,
    },
    /// Overwrite an employee's details.
    UpdateEmployee {
        /// The employee to edit.
        employee_id: EmployeeId,
        /// The new details.
        profile: EmployeeProfile,
        /// Modification timestamp.
        updated_at: OffsetDateTime,
    },
    /// Clear an employee's active flag.
    DeactivateEmployee {
        /// The employee to deactivate.
        employee_id: EmployeeId,
        /// Modification timestamp.
        updated_at: OffsetDateTime,
    },
    /// Insert a new evaluation.
    InsertEvaluation {
        /// The evaluation details.
        input: EvaluationInput,
        /// Login of the recording operator.
        evaluator: String,
        /// Period derived from the current date.
        period: PeriodKey,
        /// Creation timestamp.
        created_at: OffsetDateTime,
    },
    /// Overwrite an evaluation's details.
    UpdateEvaluation {
        /// The evaluation to edit.
        evaluation_id: EvaluationId,
        /// The new details.
        input: EvaluationInput,
        /// Modification timestamp.
        updated_at: OffsetDateTime,
    },
    /// Delete an evaluation.
    DeleteEvaluation {
        /// The evaluation to delete.
        evaluation_id: EvaluationId,
    },
}

/// The result of applying a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The change to write.
    pub mutation: Mutation,
    /// Login of the operator who issued the command.
    pub actor: String,
    /// Human-readable summary of the change.
    pub description: String,
}
