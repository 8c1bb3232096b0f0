// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the KPI evaluation system.
//!
//! Request DTOs are translated into domain values and core commands here;
//! domain, core and persistence errors never cross this boundary untranslated.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod export;
mod handlers;
mod password_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use export::{ExportError, UTF8_BOM, export_filename, table_to_csv};
pub use handlers::{
    Snapshot, check_bootstrap_status, create_employee, create_evaluation, create_first_operator,
    create_operator, deactivate_employee, delete_evaluation, export_employees,
    export_evaluations, get_dashboard, get_employee, get_statistics, list_employees,
    list_evaluations, list_periods, login, logout, parse_locale, printable_employees,
    printable_evaluations, update_employee, update_evaluation, whoami,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    AppliedFilter, BootstrapStatusResponse, CategoryAverageInfo, CreateOperatorRequest,
    CreateOperatorResponse, CsvExport, DashboardResponse, EmployeeFilterRequest, EmployeeInfo, EmployeeMutationResponse,
    EmployeeRequest, EvaluationFilterRequest, EvaluationInfo, EvaluationMutationResponse,
    EvaluationRequest, ListEmployeesResponse, ListEvaluationsResponse, LoginRequest,
    LoginResponse, PeriodOption, PeriodsResponse, PrintableReportResponse, RatingBandCount,
    ReportSummaryInfo, StatisticsResponse, TopPerformerInfo, WhoAmIResponse,
};
