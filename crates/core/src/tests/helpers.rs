// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ReportingClock;
use kpi_domain::{
    AppointmentType, CriterionScores, Employee, EmployeeCategory, EmployeeGrade, EmployeeId,
    EmployeeProfile, Evaluation, EvaluationId, EvaluationInput, Period, PeriodKey,
};
use time::macros::{date, datetime};
use time::{Duration, OffsetDateTime};

pub fn create_test_now() -> OffsetDateTime {
    datetime!(2024-03-15 12:00 UTC)
}

pub fn create_test_clock() -> ReportingClock {
    ReportingClock::utc(create_test_now())
}

pub fn days_ago(days: i64) -> OffsetDateTime {
    create_test_now() - Duration::days(days)
}

pub fn create_test_scores(scores: &[(&str, u8)]) -> CriterionScores {
    scores.iter().map(|(k, v)| (*k, *v)).collect()
}

pub fn create_test_profile(name: &str, category: EmployeeCategory) -> EmployeeProfile {
    EmployeeProfile {
        name: String::from(name),
        national_id: String::from("29001011234567"),
        category,
        grade: EmployeeGrade::First,
        appointment: AppointmentType::Permanent,
        join_date: date!(2020 - 01 - 15),
        assigned_files: vec![String::from("Pharmacy"), String::from("Stores")],
    }
}

pub fn create_test_employee(id: &str, name: &str, category: EmployeeCategory) -> Employee {
    Employee::from_profile(
        EmployeeId::new(id),
        create_test_profile(name, category),
        datetime!(2024-01-01 00:00 UTC),
    )
}

pub fn create_test_input(
    employee_id: &str,
    date: OffsetDateTime,
    scores: &[(&str, u8)],
) -> EvaluationInput {
    EvaluationInput {
        employee_id: EmployeeId::new(employee_id),
        date,
        criteria: create_test_scores(scores),
        comments: None,
        strengths: None,
        improvements: None,
    }
}

pub fn create_test_evaluation(
    id: &str,
    employee_id: &str,
    date: OffsetDateTime,
    scores: &[(&str, u8)],
) -> Evaluation {
    create_test_evaluation_with_period(
        id,
        employee_id,
        date,
        scores,
        PeriodKey::from(Period::from_date(date.date())),
    )
}

pub fn create_test_evaluation_with_period(
    id: &str,
    employee_id: &str,
    date: OffsetDateTime,
    scores: &[(&str, u8)],
    period: PeriodKey,
) -> Evaluation {
    Evaluation::new(
        EvaluationId::new(id),
        String::from("admin"),
        create_test_input(employee_id, date, scores),
        period,
        date,
        date,
    )
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
