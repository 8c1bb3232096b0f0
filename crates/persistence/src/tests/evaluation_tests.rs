// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for evaluation persistence.

use super::{TEST_ACTOR, add_test_employee, create_test_input, create_test_now, run_command};
use crate::{PersistenceError, SqlitePersistence};
use kpi::{Command, Mutation, TransitionResult};
use kpi_domain::{EmployeeCategory, EmployeeId, EvaluationId, PeriodKey};
use time::macros::datetime;

#[test]
fn test_record_evaluation_stamps_current_period() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let employee_id = add_test_employee(&mut persistence, "Mona", EmployeeCategory::Pharmacist);

    // Dated last month, recorded today: the period follows the recording date.
    let input = create_test_input(&employee_id, datetime!(2024-02-20 09:00 UTC));
    let persisted = run_command(&mut persistence, Command::RecordEvaluation { input }).unwrap();
    let evaluation_id = persisted.evaluation_id.unwrap();

    let evaluation = persistence.get_evaluation(&evaluation_id).unwrap().unwrap();
    assert_eq!(evaluation.period_key(), "2024-03");
    assert_eq!(evaluation.evaluator, TEST_ACTOR);
    assert_eq!(evaluation.employee_id, employee_id);
    assert_eq!(evaluation.date, datetime!(2024-02-20 09:00 UTC));
    assert_eq!(evaluation.criteria.get("quality"), Some(5));
    assert_eq!(evaluation.criteria.len(), 3);
    assert_eq!(evaluation.comments.as_deref(), Some("Steady month"));
    assert_eq!(evaluation.improvements, None);
    assert_eq!(evaluation.created_at, create_test_now());
    assert!((evaluation.rating() - 4.0).abs() < f64::EPSILON);
}

#[test]
fn test_list_evaluations_is_newest_first() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let employee_id = add_test_employee(&mut persistence, "Mona", EmployeeCategory::Pharmacist);

    for date in [
        datetime!(2024-03-01 08:00 UTC),
        datetime!(2024-03-10 08:00 UTC),
        datetime!(2024-03-05 08:00 +02:00),
    ] {
        let input = create_test_input(&employee_id, date);
        run_command(&mut persistence, Command::RecordEvaluation { input }).unwrap();
    }

    let dates: Vec<_> = persistence
        .list_evaluations()
        .unwrap()
        .into_iter()
        .map(|e| e.date)
        .collect();
    assert_eq!(
        dates,
        vec![
            datetime!(2024-03-10 08:00 UTC),
            datetime!(2024-03-05 06:00 UTC),
            datetime!(2024-03-01 08:00 UTC),
        ]
    );
}

#[test]
fn test_update_evaluation_keeps_period_and_evaluator() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let employee_id = add_test_employee(&mut persistence, "Mona", EmployeeCategory::Pharmacist);
    let input = create_test_input(&employee_id, create_test_now());
    let evaluation_id = run_command(&mut persistence, Command::RecordEvaluation { input })
        .unwrap()
        .evaluation_id
        .unwrap();

    let mut edited = create_test_input(&employee_id, datetime!(2024-01-02 10:00 UTC));
    edited.criteria.set("quality", 1);
    edited.improvements = Some(String::from("Documentation"));
    run_command(
        &mut persistence,
        Command::UpdateEvaluation {
            evaluation_id: evaluation_id.clone(),
            input: edited,
        },
    )
    .unwrap();

    let evaluation = persistence.get_evaluation(&evaluation_id).unwrap().unwrap();
    assert_eq!(evaluation.period_key(), "2024-03");
    assert_eq!(evaluation.evaluator, TEST_ACTOR);
    assert_eq!(evaluation.criteria.get("quality"), Some(1));
    assert_eq!(evaluation.improvements.as_deref(), Some("Documentation"));
    assert_eq!(evaluation.date, datetime!(2024-01-02 10:00 UTC));
}

#[test]
fn test_delete_evaluation_removes_row() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let employee_id = add_test_employee(&mut persistence, "Mona", EmployeeCategory::Pharmacist);
    let input = create_test_input(&employee_id, create_test_now());
    let evaluation_id = run_command(&mut persistence, Command::RecordEvaluation { input })
        .unwrap()
        .evaluation_id
        .unwrap();

    run_command(
        &mut persistence,
        Command::DeleteEvaluation {
            evaluation_id: evaluation_id.clone(),
        },
    )
    .unwrap();

    assert!(persistence.get_evaluation(&evaluation_id).unwrap().is_none());
    assert!(persistence.list_evaluations().unwrap().is_empty());

    let again = run_command(
        &mut persistence,
        Command::DeleteEvaluation { evaluation_id },
    );
    assert!(matches!(again, Err(PersistenceError::EvaluationNotFound(_))));
}

#[test]
fn test_record_evaluation_for_unknown_employee_fails() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let input = create_test_input(&EmployeeId::new("7"), create_test_now());

    let result = run_command(&mut persistence, Command::RecordEvaluation { input });

    assert_eq!(
        result,
        Err(PersistenceError::EmployeeNotFound(String::from("7")))
    );
    assert!(persistence.list_evaluations().unwrap().is_empty());
}

#[test]
fn test_record_evaluation_for_deactivated_employee_fails() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let employee_id = add_test_employee(&mut persistence, "Mona", EmployeeCategory::Pharmacist);
    run_command(
        &mut persistence,
        Command::DeactivateEmployee {
            employee_id: employee_id.clone(),
        },
    )
    .unwrap();

    let input = create_test_input(&employee_id, create_test_now());
    let result = run_command(&mut persistence, Command::RecordEvaluation { input });

    assert!(matches!(result, Err(PersistenceError::EmployeeNotFound(_))));
}

#[test]
fn test_evaluations_survive_employee_deactivation() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let employee_id = add_test_employee(&mut persistence, "Mona", EmployeeCategory::Pharmacist);
    let input = create_test_input(&employee_id, create_test_now());
    run_command(&mut persistence, Command::RecordEvaluation { input }).unwrap();

    run_command(
        &mut persistence,
        Command::DeactivateEmployee {
            employee_id: employee_id.clone(),
        },
    )
    .unwrap();

    let evaluations = persistence.list_evaluations().unwrap();
    assert_eq!(evaluations.len(), 1);
    assert_eq!(evaluations[0].employee_id, employee_id);
}

#[test]
fn test_structured_period_is_normalized_on_read() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let employee_id = add_test_employee(&mut persistence, "Mona", EmployeeCategory::Pharmacist);

    let result = TransitionResult {
        mutation: Mutation::InsertEvaluation {
            input: create_test_input(&employee_id, create_test_now()),
            evaluator: String::from(TEST_ACTOR),
            period: PeriodKey::YearMonth {
                year: 2023,
                month: 7,
            },
            created_at: create_test_now(),
        },
        actor: String::from(TEST_ACTOR),
        description: String::from("imported"),
    };
    let evaluation_id = persistence
        .persist_transition(&result)
        .unwrap()
        .evaluation_id
        .unwrap();

    let evaluation = persistence.get_evaluation(&evaluation_id).unwrap().unwrap();
    assert_eq!(evaluation.period_key(), "2023-07");
    assert_eq!(
        evaluation.period(),
        &PeriodKey::YearMonth {
            year: 2023,
            month: 7
        }
    );
}

#[test]
fn test_unknown_evaluation_id_is_not_found() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    assert!(
        persistence
            .get_evaluation(&EvaluationId::new("99"))
            .unwrap()
            .is_none()
    );
    assert!(
        persistence
            .get_evaluation(&EvaluationId::new("abc"))
            .unwrap()
            .is_none()
    );
}
