// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Flat export rows.
//!
//! Tables here are plain strings in a fixed column order. Encoding them
//! (CSV, spreadsheet, PDF) is left to the caller.

use crate::aggregation::{EmployeeIndex, employee_summaries, overall_average};
use crate::clock::ReportingClock;
use kpi_domain::{Employee, Evaluation, Locale, period_display};

/// Placeholder for empty text cells in the printable layout.
pub const EMPTY_CELL: &str = "-";

/// Which export a table is shaped for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportLayout {
    /// Every column, raw values. Suited to spreadsheets and CSV.
    #[default]
    Spreadsheet,
    /// Fewer columns, display labels and placeholders. Suited to print.
    Printable,
}

/// A column of an export table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// Employee name, resolved from an evaluation.
    Employee,
    /// Employee name.
    Name,
    /// National identifier.
    NationalId,
    /// Employee category.
    Category,
    /// Employee grade.
    Grade,
    /// Appointment type.
    Appointment,
    /// Date the employee joined.
    JoinDate,
    /// Date of the evaluation.
    EvaluationDate,
    /// Evaluation period.
    Period,
    /// Composite rating of one evaluation.
    TotalRating,
    /// Mean composite rating.
    AverageRating,
    /// Number of evaluations.
    EvaluationCount,
    /// Noted strengths.
    Strengths,
    /// Suggested improvements.
    Improvements,
    /// Free-text comments.
    Comments,
    /// Assigned file labels.
    AssignedFiles,
}

impl Column {
    /// Returns the stable column key.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Name => "name",
            Self::NationalId => "national_id",
            Self::Category => "category",
            Self::Grade => "grade",
            Self::Appointment => "appointment",
            Self::JoinDate => "join_date",
            Self::EvaluationDate => "evaluation_date",
            Self::Period => "period",
            Self::TotalRating => "total_rating",
            Self::AverageRating => "average_rating",
            Self::EvaluationCount => "evaluation_count",
            Self::Strengths => "strengths",
            Self::Improvements => "improvements",
            Self::Comments => "comments",
            Self::AssignedFiles => "assigned_files",
        }
    }

    /// Returns the column header for the given locale.
    #[must_use]
    pub const fn header(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Employee, Locale::English) => "Employee",
            (Self::Name, Locale::English) => "Name",
            (Self::NationalId, Locale::English) => "National ID",
            (Self::Category, Locale::English) => "Category",
            (Self::Grade, Locale::English) => "Grade",
            (Self::Appointment, Locale::English) => "Appointment",
            (Self::JoinDate, Locale::English) => "Join date",
            (Self::EvaluationDate, Locale::English) => "Evaluation date",
            (Self::Period, Locale::English) => "Period",
            (Self::TotalRating, Locale::English) => "Total rating",
            (Self::AverageRating, Locale::English) => "Average rating",
            (Self::EvaluationCount, Locale::English) => "Evaluations",
            (Self::Strengths, Locale::English) => "Strengths",
            (Self::Improvements, Locale::English) => "Improvements",
            (Self::Comments, Locale::English) => "Comments",
            (Self::AssignedFiles, Locale::English) => "Assigned files",
            (Self::Employee, Locale::Arabic) => "الموظف",
            (Self::Name, Locale::Arabic) => "الاسم",
            (Self::NationalId, Locale::Arabic) => "الرقم القومي",
            (Self::Category, Locale::Arabic) => "الفئة",
            (Self::Grade, Locale::Arabic) => "الدرجة الوظيفية",
            (Self::Appointment, Locale::Arabic) => "نوع التعيين",
            (Self::JoinDate, Locale::Arabic) => "تاريخ الدخول",
            (Self::EvaluationDate, Locale::Arabic) => "تاريخ التقييم",
            (Self::Period, Locale::Arabic) => "الفترة",
            (Self::TotalRating, Locale::Arabic) => "إجمالي التقييم",
            (Self::AverageRating, Locale::Arabic) => "متوسط التقييمات",
            (Self::EvaluationCount, Locale::Arabic) => "عدد التقييمات",
            (Self::Strengths, Locale::Arabic) => "نقاط القوة",
            (Self::Improvements, Locale::Arabic) => "نقاط التحسين",
            (Self::Comments, Locale::Arabic) => "ملاحظات",
            (Self::AssignedFiles, Locale::Arabic) => "الملفات الموكلة",
        }
    }
}

const EVALUATION_SPREADSHEET: [Column; 10] = [
    Column::Employee,
    Column::NationalId,
    Column::Category,
    Column::EvaluationDate,
    Column::Period,
    Column::TotalRating,
    Column::Strengths,
    Column::Improvements,
    Column::Comments,
    Column::AssignedFiles,
];

const EVALUATION_PRINTABLE: [Column; 7] = [
    Column::Employee,
    Column::EvaluationDate,
    Column::Period,
    Column::AverageRating,
    Column::Strengths,
    Column::Improvements,
    Column::Comments,
];

const EMPLOYEE_SPREADSHEET: [Column; 9] = [
    Column::Name,
    Column::NationalId,
    Column::Category,
    Column::Grade,
    Column::Appointment,
    Column::JoinDate,
    Column::EvaluationCount,
    Column::AverageRating,
    Column::AssignedFiles,
];

const EMPLOYEE_PRINTABLE: [Column; 6] = [
    Column::Name,
    Column::Category,
    Column::Grade,
    Column::JoinDate,
    Column::EvaluationCount,
    Column::AverageRating,
];

/// A flat table with a fixed column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    /// The columns, in output order.
    pub columns: Vec<Column>,
    /// Localized header of each column.
    pub headers: Vec<&'static str>,
    /// One cell per column for each row.
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    fn new(columns: &[Column], locale: Locale) -> Self {
        Self {
            columns: columns.to_vec(),
            headers: columns.iter().map(|c| c.header(locale)).collect(),
            rows: Vec::new(),
        }
    }

    /// Returns the stable keys of the columns.
    #[must_use]
    pub fn keys(&self) -> Vec<&'static str> {
        self.columns.iter().map(Column::key).collect()
    }

    /// Returns the number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Mean rating and count printed under an evaluation report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportSummary {
    /// Mean composite rating, 0.0 when empty.
    pub average: f64,
    /// Number of evaluations.
    pub count: usize,
}

impl ReportSummary {
    /// Returns the mean formatted with two decimals.
    #[must_use]
    pub fn average_display(&self) -> String {
        format!("{:.2}", self.average)
    }
}

/// Computes the summary line of an evaluation report.
#[must_use]
pub fn report_summary(evaluations: &[&Evaluation]) -> ReportSummary {
    ReportSummary {
        average: overall_average(evaluations.iter().copied()),
        count: evaluations.len(),
    }
}

/// Builds the evaluation export table.
///
/// Employee columns are looked up in `employees`; unresolved employees
/// leave their cells empty (or "Unspecified" for the printable name).
#[must_use]
pub fn evaluation_table(
    evaluations: &[&Evaluation],
    employees: &[Employee],
    layout: ExportLayout,
    locale: Locale,
    clock: &ReportingClock,
) -> ExportTable {
    let index = EmployeeIndex::new(employees);
    let columns: &[Column] = match layout {
        ExportLayout::Spreadsheet => &EVALUATION_SPREADSHEET,
        ExportLayout::Printable => &EVALUATION_PRINTABLE,
    };
    let mut table = ExportTable::new(columns, locale);

    for evaluation in evaluations {
        let employee = index.get(&evaluation.employee_id);
        let row = columns
            .iter()
            .map(|column| evaluation_cell(*column, evaluation, employee, layout, locale, clock))
            .collect();
        table.rows.push(row);
    }
    table
}

fn evaluation_cell(
    column: Column,
    evaluation: &Evaluation,
    employee: Option<&Employee>,
    layout: ExportLayout,
    locale: Locale,
    clock: &ReportingClock,
) -> String {
    let printable = layout == ExportLayout::Printable;
    match column {
        Column::Employee | Column::Name => employee.map_or_else(
            || {
                if printable {
                    unspecified(locale).to_string()
                } else {
                    String::new()
                }
            },
            |e| e.name.clone(),
        ),
        Column::NationalId => employee.map(|e| e.national_id.clone()).unwrap_or_default(),
        Column::Category => employee
            .map(|e| e.category.label(locale).to_string())
            .unwrap_or_default(),
        Column::AssignedFiles => employee
            .map(|e| e.assigned_files.join(", "))
            .unwrap_or_default(),
        Column::EvaluationDate => clock.local_date(evaluation.date).to_string(),
        Column::Period => {
            if printable {
                period_display(evaluation.period_key(), locale)
            } else {
                evaluation.period_key().to_string()
            }
        }
        Column::TotalRating | Column::AverageRating => format!("{:.1}", evaluation.rating()),
        Column::Strengths => text_cell(evaluation.strengths.as_deref(), printable),
        Column::Improvements => text_cell(evaluation.improvements.as_deref(), printable),
        Column::Comments => text_cell(evaluation.comments.as_deref(), printable),
        Column::Grade
        | Column::Appointment
        | Column::JoinDate
        | Column::EvaluationCount => String::new(),
    }
}

/// Builds the employee export table.
///
/// Evaluation counts and means come from `evaluations`, which is normally
/// the full evaluation list rather than a filtered one.
#[must_use]
pub fn employee_table(
    employees: &[&Employee],
    evaluations: &[Evaluation],
    layout: ExportLayout,
    locale: Locale,
) -> ExportTable {
    let summaries = employee_summaries(evaluations);
    let columns: &[Column] = match layout {
        ExportLayout::Spreadsheet => &EMPLOYEE_SPREADSHEET,
        ExportLayout::Printable => &EMPLOYEE_PRINTABLE,
    };
    let mut table = ExportTable::new(columns, locale);

    for employee in employees {
        let summary = summaries.get(&employee.id).copied().unwrap_or_default();
        let row = columns
            .iter()
            .map(|column| match column {
                Column::Employee | Column::Name => employee.name.clone(),
                Column::NationalId => employee.national_id.clone(),
                Column::Category => employee.category.label(locale).to_string(),
                Column::Grade => employee.grade.label(locale).to_string(),
                Column::Appointment => employee.appointment.label(locale).to_string(),
                Column::JoinDate => employee.join_date.to_string(),
                Column::EvaluationCount => summary.evaluation_count.to_string(),
                Column::TotalRating | Column::AverageRating => {
                    format!("{:.1}", summary.average)
                }
                Column::AssignedFiles => employee.assigned_files.join(", "),
                Column::EvaluationDate
                | Column::Period
                | Column::Strengths
                | Column::Improvements
                | Column::Comments => String::new(),
            })
            .collect();
        table.rows.push(row);
    }
    table
}

fn text_cell(value: Option<&str>, printable: bool) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_string(),
        _ if printable => EMPTY_CELL.to_string(),
        _ => String::new(),
    }
}

const fn unspecified(locale: Locale) -> &'static str {
    match locale {
        Locale::English => "Unspecified",
        Locale::Arabic => "غير محدد",
    }
}
