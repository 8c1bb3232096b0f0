// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod employee_tests;
mod evaluation_tests;

use crate::{PersistTransitionResult, Persistence};
use kpi::{Command, ReportingClock, apply};
use kpi_domain::{
    AppointmentType, CriterionScores, EmployeeCategory, EmployeeGrade, EmployeeId,
    EmployeeProfile, EvaluationInput,
};
use time::OffsetDateTime;
use time::macros::{date, datetime};

pub const TEST_ACTOR: &str = "ADMIN";

pub fn create_test_now() -> OffsetDateTime {
    datetime!(2024-03-15 12:00 UTC)
}

pub fn create_test_clock() -> ReportingClock {
    ReportingClock::utc(create_test_now())
}

pub fn create_test_profile(name: &str, category: EmployeeCategory) -> EmployeeProfile {
    EmployeeProfile {
        name: String::from(name),
        national_id: String::from("29001011234567"),
        category,
        grade: EmployeeGrade::Second,
        appointment: AppointmentType::Delegated,
        join_date: date!(2021 - 06 - 01),
        assigned_files: vec![String::from("Inpatient")],
    }
}

pub fn create_test_input(employee_id: &EmployeeId, date: OffsetDateTime) -> EvaluationInput {
    let criteria: CriterionScores = [("quality", 5), ("punctuality", 4), ("teamwork", 3)]
        .into_iter()
        .collect();
    EvaluationInput {
        employee_id: employee_id.clone(),
        date,
        criteria,
        comments: Some(String::from("Steady month")),
        strengths: Some(String::from("Patient care")),
        improvements: None,
    }
}

/// Applies a command against the test clock and persists the result.
pub fn run_command(
    persistence: &mut Persistence,
    command: Command,
) -> Result<PersistTransitionResult, crate::PersistenceError> {
    let result = apply(command, TEST_ACTOR, &create_test_clock()).unwrap();
    persistence.persist_transition(&result)
}

/// Adds an employee and returns the id assigned by the store.
pub fn add_test_employee(
    persistence: &mut Persistence,
    name: &str,
    category: EmployeeCategory,
) -> EmployeeId {
    run_command(
        persistence,
        Command::AddEmployee {
            profile: create_test_profile(name, category),
        },
    )
    .unwrap()
    .employee_id
    .unwrap()
}
