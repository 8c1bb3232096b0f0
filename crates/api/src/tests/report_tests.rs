// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the dashboard, statistics and report handlers.

use kpi_domain::RatingBand;
use kpi_persistence::SqlitePersistence;

use super::helpers::{
    add_test_employee, add_test_evaluation, create_test_actor, create_test_clock,
};
use crate::{
    ApiError, EmployeeFilterRequest, EvaluationFilterRequest, Snapshot, UTF8_BOM,
    export_employees, export_evaluations, get_dashboard, get_statistics, printable_employees,
    printable_evaluations,
};

/// Two pharmacists and a doctor, with four evaluations in March 2024.
fn create_test_snapshot() -> Snapshot {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let actor = create_test_actor(&mut persistence);
    let mona = add_test_employee(&mut persistence, &actor, "Mona", "pharmacist");
    let karim = add_test_employee(&mut persistence, &actor, "Karim", "doctor");
    add_test_employee(&mut persistence, &actor, "Salma", "pharmacist");

    add_test_evaluation(&mut persistence, &actor, &mona, "2024-03-14", &[("quality", 5)]);
    add_test_evaluation(&mut persistence, &actor, &mona, "2024-03-01", &[("quality", 4)]);
    add_test_evaluation(
        &mut persistence,
        &actor,
        &karim,
        "2024-03-13",
        &[("quality", 3), ("teamwork", 4), ("punctuality", 4)],
    );
    add_test_evaluation(&mut persistence, &actor, &karim, "2024-03-02", &[("quality", 1)]);

    Snapshot::load(&mut persistence).unwrap()
}

#[test]
fn test_dashboard_figures() {
    let snapshot = create_test_snapshot();

    let dashboard = get_dashboard(&snapshot, &create_test_clock(), None).unwrap();

    assert_eq!(dashboard.total_employees, 3);
    assert_eq!(dashboard.total_evaluations, 4);
    assert!((dashboard.average_rating - 41.0 / 12.0).abs() < 1e-9);
    assert_eq!(dashboard.current_period, "2024-03");
    assert_eq!(dashboard.current_period_label, "March 2024");
    assert_eq!(dashboard.completed_this_month, 4);
    assert_eq!(dashboard.pending_this_month, 0);

    let week = dashboard.employee_of_week.unwrap();
    assert_eq!(week.name, "Mona");
    assert!((week.average - 5.0).abs() < f64::EPSILON);
    assert_eq!(week.evaluation_count, 1);

    let month = dashboard.employee_of_month.unwrap();
    assert_eq!(month.name, "Mona");
    assert!((month.average - 4.5).abs() < f64::EPSILON);

    let chart: Vec<&str> = dashboard
        .category_chart
        .iter()
        .map(|entry| entry.category.as_str())
        .collect();
    assert_eq!(
        chart,
        vec![
            "doctor",
            "pharmacist",
            "dentist",
            "physiotherapist",
            "administrative"
        ]
    );
    assert!((dashboard.category_chart[2].average).abs() < f64::EPSILON);
}

#[test]
fn test_dashboard_of_empty_store() {
    let snapshot = Snapshot::default();

    let dashboard = get_dashboard(&snapshot, &create_test_clock(), Some("ar")).unwrap();

    assert_eq!(dashboard.total_employees, 0);
    assert!(dashboard.average_rating.abs() < f64::EPSILON);
    assert_eq!(dashboard.employee_of_week, None);
    assert_eq!(dashboard.employee_of_month, None);
    assert_eq!(dashboard.category_chart.len(), 5);
}

#[test]
fn test_unknown_locale_is_invalid_input() {
    let snapshot = Snapshot::default();

    let result = get_dashboard(&snapshot, &create_test_clock(), Some("fr"));

    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "locale"),
        other => panic!("Expected InvalidInput, got: {other:?}"),
    }
}

#[test]
fn test_statistics_distribution_covers_every_evaluation() {
    let snapshot = create_test_snapshot();

    let statistics = get_statistics(
        &snapshot,
        &create_test_clock(),
        &EvaluationFilterRequest::default(),
    )
    .unwrap();

    assert_eq!(statistics.total_evaluations, 4);
    let counts: Vec<(RatingBand, usize)> = statistics
        .rating_distribution
        .iter()
        .map(|entry| (entry.band, entry.count))
        .collect();
    assert_eq!(
        counts,
        vec![
            (RatingBand::Excellent, 1),
            (RatingBand::VeryGood, 2),
            (RatingBand::Good, 0),
            (RatingBand::Acceptable, 0),
            (RatingBand::Poor, 1),
        ]
    );
    assert_eq!(
        statistics
            .rating_distribution
            .iter()
            .map(|entry| entry.count)
            .sum::<usize>(),
        statistics.total_evaluations
    );

    let categories: Vec<(&str, usize)> = statistics
        .category_averages
        .iter()
        .map(|entry| (entry.category.as_str(), entry.evaluation_count))
        .collect();
    assert_eq!(categories, vec![("doctor", 2), ("pharmacist", 2)]);
}

#[test]
fn test_statistics_respect_filters() {
    let snapshot = create_test_snapshot();
    let request = EvaluationFilterRequest {
        start_date: Some(String::from("2024-03-13")),
        ..EvaluationFilterRequest::default()
    };

    let statistics = get_statistics(&snapshot, &create_test_clock(), &request).unwrap();

    assert_eq!(statistics.total_evaluations, 2);
    assert!((statistics.average_rating - 13.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_evaluation_export_has_stable_header_row() {
    let snapshot = create_test_snapshot();

    let export = export_evaluations(
        &snapshot,
        &create_test_clock(),
        &EvaluationFilterRequest::default(),
    )
    .unwrap();

    assert_eq!(export.filename, "evaluations-report-2024-03-15.csv");
    let body = export.content.strip_prefix(UTF8_BOM).unwrap();
    let mut lines = body.lines();
    assert_eq!(
        lines.next(),
        Some(
            "Employee,National ID,Category,Evaluation date,Period,Total rating,Strengths,Improvements,Comments,Assigned files"
        )
    );
    assert_eq!(lines.count(), 4);
}

#[test]
fn test_printable_evaluation_report_has_summary() {
    let snapshot = create_test_snapshot();
    let request = EvaluationFilterRequest {
        locale: Some(String::from("ar")),
        ..EvaluationFilterRequest::default()
    };

    let report = printable_evaluations(&snapshot, &create_test_clock(), &request).unwrap();

    assert_eq!(report.title, "تقرير التقييمات");
    assert_eq!(report.generated_on, "2024-03-15");
    assert_eq!(report.headers[0], "الموظف");
    assert_eq!(report.rows.len(), 4);
    // Empty improvements print as a placeholder.
    assert_eq!(report.rows[0][5], "-");

    let summary = report.summary.unwrap();
    assert_eq!(summary.count, 4);
    assert_eq!(summary.average_display, "3.42");
}

#[test]
fn test_printable_evaluation_report_without_rows_has_no_summary() {
    let snapshot = create_test_snapshot();
    let request = EvaluationFilterRequest {
        period: Some(String::from("2023-12")),
        ..EvaluationFilterRequest::default()
    };

    let report = printable_evaluations(&snapshot, &create_test_clock(), &request).unwrap();

    assert!(report.rows.is_empty());
    assert_eq!(report.summary, None);
}

#[test]
fn test_printable_evaluation_report_echoes_filters() {
    let snapshot = create_test_snapshot();
    let mona_id = snapshot
        .employees
        .iter()
        .find(|e| e.name == "Mona")
        .unwrap()
        .id
        .value()
        .to_string();
    let request = EvaluationFilterRequest {
        employee_id: Some(mona_id),
        start_date: Some(String::from("2024-03-10")),
        end_date: Some(String::new()),
        period: Some(String::from("2024-3")),
        search: Some(String::from("all")),
        ..EvaluationFilterRequest::default()
    };

    let report = printable_evaluations(&snapshot, &create_test_clock(), &request).unwrap();

    let echoed: Vec<(&str, &str, &str)> = report
        .filters
        .iter()
        .map(|f| (f.field.as_str(), f.label.as_str(), f.value.as_str()))
        .collect();
    assert_eq!(
        echoed,
        vec![
            ("employee", "Employee", "Mona"),
            ("start_date", "From", "2024-03-10"),
            ("period", "Period", "March 2024"),
            ("search", "Search", "all"),
        ]
    );
}

#[test]
fn test_printable_report_without_filters_echoes_nothing() {
    let snapshot = create_test_snapshot();
    let request = EvaluationFilterRequest {
        employee_id: Some(String::from("all")),
        period: Some(String::from("all")),
        ..EvaluationFilterRequest::default()
    };

    let report = printable_evaluations(&snapshot, &create_test_clock(), &request).unwrap();

    assert_eq!(report.rows.len(), 4);
    assert!(report.filters.is_empty());
}

#[test]
fn test_employee_report_counts_evaluations() {
    let snapshot = create_test_snapshot();
    let request = EmployeeFilterRequest {
        category: Some(String::from("pharmacist")),
        ..EmployeeFilterRequest::default()
    };

    let report = printable_employees(&snapshot, &create_test_clock(), &request).unwrap();

    assert_eq!(
        report.columns,
        vec![
            "name",
            "category",
            "grade",
            "join_date",
            "evaluation_count",
            "average_rating"
        ]
    );
    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.rows[0][0], "Mona");
    assert_eq!(report.rows[0][4], "2");
    assert_eq!(report.rows[0][5], "4.5");
    assert_eq!(report.rows[1][0], "Salma");
    assert_eq!(report.rows[1][4], "0");
    assert_eq!(report.rows[1][5], "0.0");
    assert_eq!(report.summary, None);
    assert_eq!(report.filters.len(), 1);
    assert_eq!(report.filters[0].field, "category");
    assert_eq!(report.filters[0].label, "Category");
    assert_eq!(report.filters[0].value, "Pharmacist");
}

#[test]
fn test_employee_report_echoes_arabic_filter_labels() {
    let snapshot = create_test_snapshot();
    let request = EmployeeFilterRequest {
        category: Some(String::from("pharmacist")),
        search: Some(String::from("Mona")),
        locale: Some(String::from("ar")),
    };

    let report = printable_employees(&snapshot, &create_test_clock(), &request).unwrap();

    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.filters[0].label, "الفئة");
    assert_eq!(report.filters[0].value, "صيدلي");
    assert_eq!(report.filters[1].field, "search");
    assert_eq!(report.filters[1].label, "بحث");
    assert_eq!(report.filters[1].value, "Mona");
}

#[test]
fn test_employee_export_lists_filtered_employees() {
    let snapshot = create_test_snapshot();
    let request = EmployeeFilterRequest {
        search: Some(String::from("Karim")),
        ..EmployeeFilterRequest::default()
    };

    let export = export_employees(&snapshot, &create_test_clock(), &request).unwrap();

    assert_eq!(export.filename, "employees-report-2024-03-15.csv");
    let body = export.content.strip_prefix(UTF8_BOM).unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("Karim,29001011234567,Doctor,First,Permanent,2020-09-01,2,2.3,"));
}
