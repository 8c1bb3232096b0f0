// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    create_test_clock, create_test_employee, create_test_evaluation,
    create_test_evaluation_with_period, days_ago,
};
use crate::{
    Column, EMPTY_CELL, ExportLayout, employee_table, evaluation_table, report_summary,
};
use kpi_domain::{EmployeeCategory, Evaluation, Locale, PeriodKey};

#[test]
fn test_evaluation_spreadsheet_columns_are_stable() {
    let employees = vec![create_test_employee("a", "Amal", EmployeeCategory::Doctor)];
    let mut evaluation = create_test_evaluation(
        "v1",
        "a",
        days_ago(2),
        &[("quality", 5), ("teamwork", 4)],
    );
    evaluation.strengths = Some(String::from("Thorough"));
    let evaluations = [&evaluation];

    let table = evaluation_table(
        &evaluations,
        &employees,
        ExportLayout::Spreadsheet,
        Locale::English,
        &create_test_clock(),
    );

    assert_eq!(
        table.keys(),
        vec![
            "employee",
            "national_id",
            "category",
            "evaluation_date",
            "period",
            "total_rating",
            "strengths",
            "improvements",
            "comments",
            "assigned_files",
        ]
    );
    assert_eq!(table.len(), 1);
    assert_eq!(
        table.rows[0],
        vec![
            "Amal",
            "29001011234567",
            "Doctor",
            "2024-03-13",
            "2024-03",
            "4.5",
            "Thorough",
            "",
            "",
            "Pharmacy, Stores",
        ]
    );
}

#[test]
fn test_evaluation_printable_uses_placeholders_and_labels() {
    let employees = vec![create_test_employee("a", "Amal", EmployeeCategory::Doctor)];
    let evaluation = create_test_evaluation_with_period(
        "v1",
        "a",
        days_ago(2),
        &[("quality", 3)],
        PeriodKey::YearMonth {
            year: 2024,
            month: 3,
        },
    );
    let orphan = create_test_evaluation("v2", "gone", days_ago(2), &[("quality", 4)]);
    let evaluations = [&evaluation, &orphan];

    let table = evaluation_table(
        &evaluations,
        &employees,
        ExportLayout::Printable,
        Locale::Arabic,
        &create_test_clock(),
    );

    assert_eq!(table.headers[0], "الموظف");
    assert_eq!(table.columns.len(), 7);
    assert_eq!(table.rows[0][2], "مارس 2024");
    assert_eq!(table.rows[0][3], "3.0");
    assert_eq!(table.rows[0][4], EMPTY_CELL);
    assert_eq!(table.rows[1][0], "غير محدد");
}

#[test]
fn test_employee_table_includes_summaries() {
    let doctor = create_test_employee("a", "Amal", EmployeeCategory::Doctor);
    let dentist = create_test_employee("b", "Badr", EmployeeCategory::Dentist);
    let evaluations = vec![
        create_test_evaluation("v1", "a", days_ago(1), &[("quality", 5)]),
        create_test_evaluation("v2", "a", days_ago(3), &[("quality", 4)]),
    ];
    let employees = [&doctor, &dentist];

    let table = employee_table(
        &employees,
        &evaluations,
        ExportLayout::Spreadsheet,
        Locale::English,
    );

    assert_eq!(table.columns[0], Column::Name);
    assert_eq!(table.headers[6], "Evaluations");
    assert_eq!(
        table.rows[0],
        vec![
            "Amal",
            "29001011234567",
            "Doctor",
            "First",
            "Permanent",
            "2020-01-15",
            "2",
            "4.5",
            "Pharmacy, Stores",
        ]
    );
    assert_eq!(table.rows[1][6], "0");
    assert_eq!(table.rows[1][7], "0.0");
}

#[test]
fn test_employee_printable_layout() {
    let doctor = create_test_employee("a", "Amal", EmployeeCategory::Doctor);
    let employees = [&doctor];
    let evaluations: Vec<Evaluation> = Vec::new();

    let table = employee_table(
        &employees,
        &evaluations,
        ExportLayout::Printable,
        Locale::Arabic,
    );

    assert_eq!(
        table.headers,
        vec![
            "الاسم",
            "الفئة",
            "الدرجة الوظيفية",
            "تاريخ الدخول",
            "عدد التقييمات",
            "متوسط التقييمات",
        ]
    );
    assert_eq!(table.rows[0][1], "طبيب");
    assert_eq!(table.rows[0][2], "الأولى");
}

#[test]
fn test_report_summary() {
    let first = create_test_evaluation("v1", "a", days_ago(1), &[("quality", 5)]);
    let second = create_test_evaluation("v2", "a", days_ago(1), &[("quality", 4), ("teamwork", 3)]);

    let summary = report_summary(&[&first, &second]);
    assert_eq!(summary.count, 2);
    assert_eq!(summary.average_display(), "4.25");

    let empty = report_summary(&[]);
    assert_eq!(empty.count, 0);
    assert_eq!(empty.average_display(), "0.00");
}
