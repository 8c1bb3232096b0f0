// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for employee persistence.

use super::{add_test_employee, create_test_now, create_test_profile, run_command};
use crate::{PersistenceError, SqlitePersistence};
use kpi::Command;
use kpi_domain::{AppointmentType, EmployeeCategory, EmployeeGrade, EmployeeId};
use time::macros::date;

#[test]
fn test_add_employee_round_trips_every_field() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let id = add_test_employee(&mut persistence, "Mona Adel", EmployeeCategory::Pharmacist);

    let employee = persistence.get_employee(&id).unwrap().unwrap();
    assert_eq!(employee.id, id);
    assert_eq!(employee.name, "Mona Adel");
    assert_eq!(employee.national_id, "29001011234567");
    assert_eq!(employee.category, EmployeeCategory::Pharmacist);
    assert_eq!(employee.grade, EmployeeGrade::Second);
    assert_eq!(employee.appointment, AppointmentType::Delegated);
    assert_eq!(employee.join_date, date!(2021 - 06 - 01));
    assert_eq!(employee.assigned_files, vec![String::from("Inpatient")]);
    assert!(employee.is_active);
    assert_eq!(employee.created_at, create_test_now());
    assert_eq!(employee.updated_at, create_test_now());
}

#[test]
fn test_each_insert_returns_its_own_rowid() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let first = add_test_employee(&mut persistence, "Zeinab", EmployeeCategory::Doctor);
    let second = add_test_employee(&mut persistence, "Ahmed", EmployeeCategory::Dentist);

    assert_eq!(first, EmployeeId::new("1"));
    assert_eq!(second, EmployeeId::new("2"));
    assert_eq!(persistence.get_employee(&second).unwrap().unwrap().name, "Ahmed");
}

#[test]
fn test_list_active_employees_keeps_creation_order() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    add_test_employee(&mut persistence, "Zeinab", EmployeeCategory::Doctor);
    add_test_employee(&mut persistence, "Ahmed", EmployeeCategory::Dentist);

    let names: Vec<String> = persistence
        .list_active_employees()
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec![String::from("Zeinab"), String::from("Ahmed")]);
}

#[test]
fn test_update_employee_overwrites_profile() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let id = add_test_employee(&mut persistence, "Mona Adel", EmployeeCategory::Pharmacist);

    let mut profile = create_test_profile("Mona Adel Hassan", EmployeeCategory::Administrative);
    profile.national_id = String::new();
    profile.assigned_files = Vec::new();
    run_command(
        &mut persistence,
        Command::UpdateEmployee {
            employee_id: id.clone(),
            profile,
        },
    )
    .unwrap();

    let employee = persistence.get_employee(&id).unwrap().unwrap();
    assert_eq!(employee.name, "Mona Adel Hassan");
    assert_eq!(employee.category, EmployeeCategory::Administrative);
    assert_eq!(employee.national_id(), None);
    assert!(employee.assigned_files.is_empty());
}

#[test]
fn test_deactivated_employee_leaves_listing_but_stays_fetchable() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let kept = add_test_employee(&mut persistence, "Kept", EmployeeCategory::Doctor);
    let removed = add_test_employee(&mut persistence, "Removed", EmployeeCategory::Doctor);

    run_command(
        &mut persistence,
        Command::DeactivateEmployee {
            employee_id: removed.clone(),
        },
    )
    .unwrap();

    let active = persistence.list_active_employees().unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, kept);

    let employee = persistence.get_employee(&removed).unwrap().unwrap();
    assert!(!employee.is_active);
}

#[test]
fn test_update_unknown_employee_fails() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let result = run_command(
        &mut persistence,
        Command::UpdateEmployee {
            employee_id: EmployeeId::new("42"),
            profile: create_test_profile("Nobody", EmployeeCategory::Other),
        },
    );

    assert_eq!(
        result,
        Err(PersistenceError::EmployeeNotFound(String::from("42")))
    );
}

#[test]
fn test_foreign_employee_id_is_not_found() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    assert!(
        persistence
            .get_employee(&EmployeeId::new("not-a-rowid"))
            .unwrap()
            .is_none()
    );

    let result = run_command(
        &mut persistence,
        Command::DeactivateEmployee {
            employee_id: EmployeeId::new("not-a-rowid"),
        },
    );
    assert!(matches!(result, Err(PersistenceError::EmployeeNotFound(_))));
}
