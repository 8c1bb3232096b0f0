// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::clock::ReportingClock;
use crate::command::Command;
use crate::error::CoreError;
use crate::state::{Mutation, TransitionResult};
use kpi_domain::{PeriodKey, validate_criterion_scores, validate_employee_fields};

/// Applies a command, producing a validated mutation.
///
/// Nothing is written here. The store performs the mutation and reports
/// missing records.
///
/// # Arguments
///
/// * `command` - The command to apply
/// * `actor` - Login of the operator issuing the command
/// * `clock` - Supplies "now" and the reporting time zone
///
/// # Errors
///
/// Returns an error if:
/// - An employee profile has a blank name or a malformed national id
/// - An evaluation has no scores or a score outside 1 through 5
pub fn apply(
    command: Command,
    actor: &str,
    clock: &ReportingClock,
) -> Result<TransitionResult, CoreError> {
    let now = clock.now();
    let name = command.name();

    let (mutation, description) = match command {
        Command::AddEmployee { profile } => {
            validate_employee_fields(&profile)?;
            let description = format!("Added employee '{}'", profile.name);
            (
                Mutation::InsertEmployee {
                    profile,
                    created_at: now,
                },
                description,
            )
        }
        Command::UpdateEmployee {
            employee_id,
            profile,
        } => {
            validate_employee_fields(&profile)?;
            let description = format!("Updated employee {employee_id}");
            (
                Mutation::UpdateEmployee {
                    employee_id,
                    profile,
                    updated_at: now,
                },
                description,
            )
        }
        Command::DeactivateEmployee { employee_id } => {
            let description = format!("Deactivated employee {employee_id}");
            (
                Mutation::DeactivateEmployee {
                    employee_id,
                    updated_at: now,
                },
                description,
            )
        }
        Command::RecordEvaluation { input } => {
            validate_criterion_scores(&input.criteria)?;
            let period = clock.current_period();
            let description = format!(
                "Recorded evaluation of employee {} for {}",
                input.employee_id,
                period.key()
            );
            (
                Mutation::InsertEvaluation {
                    input,
                    evaluator: actor.to_string(),
                    period: PeriodKey::from(period),
                    created_at: now,
                },
                description,
            )
        }
        Command::UpdateEvaluation {
            evaluation_id,
            input,
        } => {
            validate_criterion_scores(&input.criteria)?;
            let description = format!("Updated evaluation {evaluation_id}");
            (
                Mutation::UpdateEvaluation {
                    evaluation_id,
                    input,
                    updated_at: now,
                },
                description,
            )
        }
        Command::DeleteEvaluation { evaluation_id } => {
            let description = format!("Deleted evaluation {evaluation_id}");
            (Mutation::DeleteEvaluation { evaluation_id }, description)
        }
    };

    Ok(TransitionResult {
        mutation,
        actor: actor.to_string(),
        description: format!("{name}: {description}"),
    })
}
