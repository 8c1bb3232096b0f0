// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use kpi_domain::{EmployeeId, EmployeeProfile, EvaluationId, EvaluationInput};

/// A command represents operator intent as data only.
///
/// Commands are the only way to request changes to stored records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a new employee.
    AddEmployee {
        /// The employee's details.
        profile: EmployeeProfile,
    },
    /// Replace the details of an existing employee.
    UpdateEmployee {
        /// The employee to edit.
        employee_id: EmployeeId,
        /// The new details.
        profile: EmployeeProfile,
    },
    /// Remove an employee from listings and reports.
    ///
    /// The record is kept with its active flag cleared.
    DeactivateEmployee {
        /// The employee to remove.
        employee_id: EmployeeId,
    },
    /// Record a new evaluation. The period is taken from the current date.
    RecordEvaluation {
        /// The evaluation details.
        input: EvaluationInput,
    },
    /// Replace the details of an existing evaluation. The period is kept.
    UpdateEvaluation {
        /// The evaluation to edit.
        evaluation_id: EvaluationId,
        /// The new details.
        input: EvaluationInput,
    },
    /// Permanently delete an evaluation.
    DeleteEvaluation {
        /// The evaluation to delete.
        evaluation_id: EvaluationId,
    },
}

impl Command {
    /// Returns the command name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddEmployee { .. } => "AddEmployee",
            Self::UpdateEmployee { .. } => "UpdateEmployee",
            Self::DeactivateEmployee { .. } => "DeactivateEmployee",
            Self::RecordEvaluation { .. } => "RecordEvaluation",
            Self::UpdateEvaluation { .. } => "UpdateEvaluation",
            Self::DeleteEvaluation { .. } => "DeleteEvaluation",
        }
    }
}
