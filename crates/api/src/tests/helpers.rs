// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use kpi::ReportingClock;
use kpi_domain::CriterionScores;
use kpi_persistence::SqlitePersistence;
use time::macros::datetime;

use crate::{
    AuthenticatedActor, CreateOperatorRequest, EmployeeRequest, EvaluationRequest,
    create_employee, create_evaluation, create_first_operator,
};

pub const TEST_PASSWORD: &str = "clinic-pass-2024";

/// 2024-03-15 12:00 UTC.
pub fn create_test_clock() -> ReportingClock {
    ReportingClock::utc(datetime!(2024-03-15 12:00 UTC))
}

pub fn create_test_operator_request(login_name: &str) -> CreateOperatorRequest {
    CreateOperatorRequest {
        login_name: String::from(login_name),
        display_name: String::from("HR Office"),
        password: String::from(TEST_PASSWORD),
        password_confirmation: String::from(TEST_PASSWORD),
    }
}

/// Bootstraps the first operator and returns it as an actor.
pub fn create_test_actor(persistence: &mut SqlitePersistence) -> AuthenticatedActor {
    let response =
        create_first_operator(persistence, &create_test_operator_request("hr.admin")).unwrap();
    AuthenticatedActor::new(response.login_name, response.operator_id)
}

pub fn create_test_employee_request(name: &str, category: &str) -> EmployeeRequest {
    EmployeeRequest {
        name: String::from(name),
        national_id: String::from("29001011234567"),
        category: String::from(category),
        grade: String::from("first"),
        appointment: String::from("permanent"),
        join_date: String::from("2020-09-01"),
        assigned_files: vec![String::from("Outpatient"), String::from("Pharmacy stock")],
    }
}

pub fn create_test_evaluation_request(
    employee_id: &str,
    date: Option<&str>,
    scores: &[(&str, u8)],
) -> EvaluationRequest {
    let criteria: CriterionScores = scores.iter().copied().collect();
    EvaluationRequest {
        employee_id: String::from(employee_id),
        date: date.map(String::from),
        criteria,
        comments: Some(String::from("Reliable on night shifts")),
        strengths: Some(String::from("Teamwork")),
        improvements: None,
    }
}

/// Adds an employee through the handler and returns its id.
pub fn add_test_employee(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedActor,
    name: &str,
    category: &str,
) -> String {
    create_employee(
        persistence,
        &create_test_clock(),
        create_test_employee_request(name, category),
        actor,
    )
    .unwrap()
    .employee_id
}

/// Records an evaluation through the handler and returns its id.
pub fn add_test_evaluation(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedActor,
    employee_id: &str,
    date: &str,
    scores: &[(&str, u8)],
) -> String {
    create_evaluation(
        persistence,
        &create_test_clock(),
        create_test_evaluation_request(employee_id, Some(date), scores),
        actor,
    )
    .unwrap()
    .evaluation_id
}
