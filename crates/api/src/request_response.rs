// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use kpi_domain::{CriterionScores, RatingBand};

/// API request to log in.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginRequest {
    /// The operator login name.
    pub login_name: String,
    /// The operator password.
    pub password: String,
}

/// API response for successful login.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginResponse {
    /// The session token (opaque).
    pub session_token: String,
    /// The operator's login name.
    pub login_name: String,
    /// The operator's display name.
    pub display_name: String,
    /// Session expiration timestamp (RFC 3339).
    pub expires_at: String,
}

/// API response for the "who am I" endpoint.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WhoAmIResponse {
    /// The operator's login name.
    pub login_name: String,
    /// The operator's display name.
    pub display_name: String,
    /// When the operator last logged in.
    pub last_login_at: Option<String>,
}

/// API response describing whether the first operator still has to be created.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BootstrapStatusResponse {
    /// True while no operator exists.
    pub needs_bootstrap: bool,
}

/// API request to create an operator.
///
/// Used both for the first operator and for later ones.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateOperatorRequest {
    /// The login name.
    pub login_name: String,
    /// The display name.
    pub display_name: String,
    /// The password.
    pub password: String,
    /// The password confirmation.
    pub password_confirmation: String,
}

/// API response for a created operator.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateOperatorResponse {
    /// The stored operator identifier.
    pub operator_id: i64,
    /// The normalized login name.
    pub login_name: String,
    /// The display name.
    pub display_name: String,
    /// A success message.
    pub message: String,
}

/// API request to add or edit an employee.
///
/// Enumerated fields travel as their snake-case identifiers
/// (for example `"pharmacist"`, `"first"`, `"permanent"`).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EmployeeRequest {
    /// Full name.
    pub name: String,
    /// National identifier. Empty or absent when not recorded.
    #[serde(default)]
    pub national_id: String,
    /// Category identifier.
    pub category: String,
    /// Grade identifier.
    pub grade: String,
    /// Appointment type identifier.
    pub appointment: String,
    /// Join date (`YYYY-MM-DD`).
    pub join_date: String,
    /// Assigned file labels.
    #[serde(default)]
    pub assigned_files: Vec<String>,
}

/// Query parameters for employee listings and employee reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EmployeeFilterRequest {
    /// Substring of the name or national id.
    pub search: Option<String>,
    /// Category identifier, or `"all"`.
    pub category: Option<String>,
    /// `en` or `ar`.
    pub locale: Option<String>,
}

/// One employee as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EmployeeInfo {
    /// The employee identifier.
    pub employee_id: String,
    /// Full name.
    pub name: String,
    /// National identifier, empty when not recorded.
    pub national_id: String,
    /// Category identifier.
    pub category: String,
    /// Localized category label.
    pub category_label: String,
    /// Grade identifier.
    pub grade: String,
    /// Localized grade label.
    pub grade_label: String,
    /// Appointment type identifier.
    pub appointment: String,
    /// Localized appointment label.
    pub appointment_label: String,
    /// Join date (`YYYY-MM-DD`).
    pub join_date: String,
    /// Assigned file labels.
    pub assigned_files: Vec<String>,
    /// False once removed.
    pub is_active: bool,
}

/// API response for the employee listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListEmployeesResponse {
    /// Matching active employees, in creation order.
    pub employees: Vec<EmployeeInfo>,
}

/// API response for an employee mutation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EmployeeMutationResponse {
    /// The affected employee.
    pub employee_id: String,
    /// A success message.
    pub message: String,
}

/// API request to record or edit an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EvaluationRequest {
    /// The evaluated employee.
    pub employee_id: String,
    /// Evaluation day (`YYYY-MM-DD`); today when absent.
    pub date: Option<String>,
    /// Criterion identifier to score (1 through 5).
    pub criteria: CriterionScores,
    /// Free-text comments.
    pub comments: Option<String>,
    /// Noted strengths.
    pub strengths: Option<String>,
    /// Suggested improvements.
    pub improvements: Option<String>,
}

/// Query parameters for evaluation listings, statistics and evaluation reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EvaluationFilterRequest {
    /// Exact employee identifier.
    pub employee_id: Option<String>,
    /// First local day to include (`YYYY-MM-DD`).
    pub start_date: Option<String>,
    /// Last local day to include (`YYYY-MM-DD`).
    pub end_date: Option<String>,
    /// Period key (`YYYY-MM`), or `"all"`.
    pub period: Option<String>,
    /// Substring of the employee name, comments or a free-text period.
    pub search: Option<String>,
    /// `en` or `ar`.
    pub locale: Option<String>,
}

/// One evaluation as returned by the API.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EvaluationInfo {
    /// The evaluation identifier.
    pub evaluation_id: String,
    /// The evaluated employee.
    pub employee_id: String,
    /// Employee name, absent when the employee cannot be resolved.
    pub employee_name: Option<String>,
    /// Login of the recording operator.
    pub evaluator: String,
    /// Evaluation instant (RFC 3339).
    pub date: String,
    /// Evaluation day in the reporting zone (`YYYY-MM-DD`).
    pub local_date: String,
    /// Canonical period key, empty when unknown.
    pub period: String,
    /// Localized period label, or `"-"`.
    pub period_label: String,
    /// Criterion scores.
    pub criteria: CriterionScores,
    /// Composite rating.
    pub rating: f64,
    /// Rating band.
    pub rating_band: RatingBand,
    /// Localized rating band label.
    pub rating_band_label: String,
    /// Free-text comments.
    pub comments: Option<String>,
    /// Noted strengths.
    pub strengths: Option<String>,
    /// Suggested improvements.
    pub improvements: Option<String>,
}

/// API response for the evaluation listing.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ListEvaluationsResponse {
    /// Matching evaluations, newest first.
    pub evaluations: Vec<EvaluationInfo>,
}

/// API response for an evaluation mutation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EvaluationMutationResponse {
    /// The affected evaluation.
    pub evaluation_id: String,
    /// A success message.
    pub message: String,
}

/// A selectable evaluation period.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PeriodOption {
    /// Period key (`YYYY-MM`).
    pub key: String,
    /// Localized label.
    pub label: String,
}

/// API response listing the periods that have evaluations.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PeriodsResponse {
    /// Periods, newest first.
    pub periods: Vec<PeriodOption>,
}

/// The winner of a leaderboard window.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TopPerformerInfo {
    /// The employee identifier.
    pub employee_id: String,
    /// Employee name.
    pub name: String,
    /// Localized category label.
    pub category_label: String,
    /// Mean rating inside the window.
    pub average: f64,
    /// Evaluations inside the window.
    pub evaluation_count: usize,
}

/// Mean rating of one category.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CategoryAverageInfo {
    /// Category identifier.
    pub category: String,
    /// Localized category label.
    pub label: String,
    /// Mean composite rating.
    pub average: f64,
    /// Number of evaluations behind the mean.
    pub evaluation_count: usize,
}

/// API response for the dashboard.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DashboardResponse {
    /// Number of active employees.
    pub total_employees: usize,
    /// Number of evaluations.
    pub total_evaluations: usize,
    /// Mean composite rating over all evaluations.
    pub average_rating: f64,
    /// Best employee over the last seven days.
    pub employee_of_week: Option<TopPerformerInfo>,
    /// Best employee over the last calendar month.
    pub employee_of_month: Option<TopPerformerInfo>,
    /// Current period key.
    pub current_period: String,
    /// Localized current period label.
    pub current_period_label: String,
    /// Evaluations dated in the current month.
    pub completed_this_month: usize,
    /// Employees still to evaluate this month.
    pub pending_this_month: usize,
    /// Mean rating of each charted category.
    pub category_chart: Vec<CategoryAverageInfo>,
}

/// Count of evaluations in one rating band.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RatingBandCount {
    /// The band.
    pub band: RatingBand,
    /// Localized band label.
    pub label: String,
    /// Number of evaluations in the band.
    pub count: usize,
}

/// API response for the statistics report.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StatisticsResponse {
    /// Number of evaluations considered.
    pub total_evaluations: usize,
    /// Mean composite rating of the considered evaluations.
    pub average_rating: f64,
    /// Mean rating of every category with evaluations.
    pub category_averages: Vec<CategoryAverageInfo>,
    /// Evaluation counts per band, best band first.
    pub rating_distribution: Vec<RatingBandCount>,
}

/// Mean and count printed under an evaluation report.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReportSummaryInfo {
    /// Mean composite rating.
    pub average: f64,
    /// The mean with two decimals.
    pub average_display: String,
    /// Number of evaluations.
    pub count: usize,
}

/// A report table shaped for printing.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PrintableReportResponse {
    /// Localized report title.
    pub title: String,
    /// Day the report was generated, in the reporting zone.
    pub generated_on: String,
    /// Stable column keys.
    pub columns: Vec<String>,
    /// Localized column headers.
    pub headers: Vec<String>,
    /// One cell per column for each row.
    pub rows: Vec<Vec<String>>,
    /// Summary line; only present for non-empty evaluation reports.
    pub summary: Option<ReportSummaryInfo>,
    /// The filter criteria the rows were selected with, in print order.
    pub filters: Vec<AppliedFilter>,
}

/// One filter criterion echoed on a printed report.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AppliedFilter {
    /// Stable criterion key (`employee`, `start_date`, `end_date`,
    /// `period`, `category` or `search`).
    pub field: String,
    /// Localized criterion name.
    pub label: String,
    /// Display value.
    pub value: String,
}

/// A CSV document ready to be served as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    /// Suggested file name.
    pub filename: String,
    /// The document body.
    pub content: String,
}
