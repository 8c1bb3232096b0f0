// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request handlers.
//!
//! Mutating handlers translate a request into a core [`Command`], apply it
//! against the reporting clock and persist the result. Read handlers work
//! on a [`Snapshot`] so the store can be released before any aggregation
//! runs.

use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};
use tracing::{debug, error, info};

use kpi::{
    Command, EmployeeIndex, EmployeeQuery, EvaluationQuery, ExportLayout, ExportTable,
    ReportingClock, TopPerformer, TransitionResult, active_term, apply, available_periods,
    average_by_category, dashboard_summary, employee_table, evaluation_table, filter_employees,
    filter_evaluations, overall_average, rating_distribution, report_summary,
};
use kpi_domain::{
    AppointmentType, Employee, EmployeeCategory, EmployeeGrade, EmployeeId, EmployeeProfile,
    Evaluation, EvaluationId, EvaluationInput, Locale, PeriodKey, RatingBand, parse_date,
    period_display,
};
use kpi_persistence::{OperatorData, PersistTransitionResult, SqlitePersistence};

use crate::auth::{AuthenticatedActor, AuthenticationService};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::export::{export_filename, table_to_csv};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    AppliedFilter, BootstrapStatusResponse, CategoryAverageInfo, CreateOperatorRequest,
    CreateOperatorResponse, CsvExport, DashboardResponse, EmployeeFilterRequest, EmployeeInfo, EmployeeMutationResponse,
    EmployeeRequest, EvaluationFilterRequest, EvaluationInfo, EvaluationMutationResponse,
    EvaluationRequest, ListEmployeesResponse, ListEvaluationsResponse, LoginRequest,
    LoginResponse, PeriodOption, PeriodsResponse, PrintableReportResponse, RatingBandCount,
    ReportSummaryInfo, StatisticsResponse, TopPerformerInfo, WhoAmIResponse,
};

/// Records loaded from the store for one read request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Active employees, in creation order.
    pub employees: Vec<Employee>,
    /// Every evaluation, newest first.
    pub evaluations: Vec<Evaluation>,
}

impl Snapshot {
    /// Loads active employees and all evaluations.
    ///
    /// # Errors
    ///
    /// Returns an error if either fetch fails. Nothing is aggregated from
    /// a partial load.
    pub fn load(persistence: &mut SqlitePersistence) -> Result<Self, ApiError> {
        let employees: Vec<Employee> = persistence.list_active_employees().map_err(|e| {
            error!(error = %e, "Failed to load employees");
            translate_persistence_error(e)
        })?;
        let evaluations: Vec<Evaluation> = persistence.list_evaluations().map_err(|e| {
            error!(error = %e, "Failed to load evaluations");
            translate_persistence_error(e)
        })?;
        debug!(
            employees = employees.len(),
            evaluations = evaluations.len(),
            "Loaded snapshot"
        );
        Ok(Self {
            employees,
            evaluations,
        })
    }
}

/// Parses an optional locale parameter; absent or empty means English.
///
/// # Errors
///
/// Returns an error if the locale is not `en` or `ar`.
pub fn parse_locale(value: Option<&str>) -> Result<Locale, ApiError> {
    value
        .unwrap_or_default()
        .parse()
        .map_err(translate_domain_error)
}

// ============================================================================
// Authentication and operators
// ============================================================================

/// Reports whether the first operator still has to be created.
///
/// # Errors
///
/// Returns an error if the operators cannot be counted.
pub fn check_bootstrap_status(
    persistence: &mut SqlitePersistence,
) -> Result<BootstrapStatusResponse, ApiError> {
    let count: usize = persistence
        .count_operators()
        .map_err(translate_persistence_error)?;
    Ok(BootstrapStatusResponse {
        needs_bootstrap: count == 0,
    })
}

/// Creates the first operator.
///
/// Only allowed while no operator exists.
///
/// # Errors
///
/// Returns an error if:
/// - An operator already exists
/// - The password violates the policy
/// - The operator cannot be stored
pub fn create_first_operator(
    persistence: &mut SqlitePersistence,
    request: &CreateOperatorRequest,
) -> Result<CreateOperatorResponse, ApiError> {
    let count: usize = persistence
        .count_operators()
        .map_err(translate_persistence_error)?;
    if count > 0 {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("bootstrap_once"),
            message: String::from("An operator already exists; log in instead"),
        });
    }

    let response: CreateOperatorResponse = store_operator(persistence, request)?;
    info!(login_name = %response.login_name, "Created first operator");
    Ok(response)
}

/// Creates an additional operator on behalf of an authenticated one.
///
/// # Errors
///
/// Returns an error if the password violates the policy or the login is taken.
pub fn create_operator(
    persistence: &mut SqlitePersistence,
    request: &CreateOperatorRequest,
    actor: &AuthenticatedActor,
) -> Result<CreateOperatorResponse, ApiError> {
    let response: CreateOperatorResponse = store_operator(persistence, request)?;
    info!(
        actor = %actor.id,
        login_name = %response.login_name,
        "Created operator"
    );
    Ok(response)
}

fn store_operator(
    persistence: &mut SqlitePersistence,
    request: &CreateOperatorRequest,
) -> Result<CreateOperatorResponse, ApiError> {
    let login_name: &str = request.login_name.trim();
    let display_name: &str = request.display_name.trim();
    if login_name.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("login_name"),
            message: String::from("Login name must not be empty"),
        });
    }
    if display_name.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("display_name"),
            message: String::from("Display name must not be empty"),
        });
    }

    PasswordPolicy::default().validate(
        &request.password,
        &request.password_confirmation,
        login_name,
        display_name,
    )?;

    let operator_id: i64 = persistence
        .create_operator(login_name, display_name, &request.password)
        .map_err(translate_persistence_error)?;
    let operator: OperatorData = persistence
        .get_operator_by_id(operator_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Operator not found after creation"),
        })?;

    Ok(CreateOperatorResponse {
        operator_id,
        message: format!("Created operator '{}'", operator.login_name),
        login_name: operator.login_name,
        display_name: operator.display_name,
    })
}

/// Logs in with a password and returns a new session.
///
/// # Errors
///
/// Returns an error if the credentials are rejected.
pub fn login(
    persistence: &mut SqlitePersistence,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let (session_token, _authenticated_actor, operator): (
        String,
        AuthenticatedActor,
        OperatorData,
    ) = AuthenticationService::login(persistence, &request.login_name, &request.password)?;

    let expires_at: String = persistence
        .get_session_by_token(&session_token)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to retrieve session: {e}"),
        })?
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Session not found after creation"),
        })?
        .expires_at;

    Ok(LoginResponse {
        session_token,
        login_name: operator.login_name,
        display_name: operator.display_name,
        expires_at,
    })
}

/// Logs out by deleting the session.
///
/// # Errors
///
/// Returns an error if the logout fails.
pub fn logout(persistence: &mut SqlitePersistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(())
}

/// Returns the current operator's information.
#[must_use]
pub fn whoami(operator: &OperatorData) -> WhoAmIResponse {
    WhoAmIResponse {
        login_name: operator.login_name.clone(),
        display_name: operator.display_name.clone(),
        last_login_at: operator.last_login_at.clone(),
    }
}

// ============================================================================
// Employees
// ============================================================================

/// Lists active employees matching the filter, in creation order.
///
/// # Errors
///
/// Returns an error if the filter is malformed or the fetch fails.
pub fn list_employees(
    persistence: &mut SqlitePersistence,
    request: &EmployeeFilterRequest,
) -> Result<ListEmployeesResponse, ApiError> {
    let locale: Locale = parse_locale(request.locale.as_deref())?;
    let query: EmployeeQuery = employee_query(request)?;
    let employees: Vec<Employee> = persistence
        .list_active_employees()
        .map_err(translate_persistence_error)?;

    Ok(ListEmployeesResponse {
        employees: filter_employees(&employees, &query)
            .into_iter()
            .map(|employee| employee_info(employee, locale))
            .collect(),
    })
}

/// Returns one employee, active or not.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no employee has this id.
pub fn get_employee(
    persistence: &mut SqlitePersistence,
    employee_id: &str,
    locale: Option<&str>,
) -> Result<EmployeeInfo, ApiError> {
    let locale: Locale = parse_locale(locale)?;
    let employee: Employee = persistence
        .get_employee(&EmployeeId::new(employee_id))
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message: format!("Employee '{employee_id}' does not exist"),
        })?;
    Ok(employee_info(&employee, locale))
}

/// Adds an employee.
///
/// # Errors
///
/// Returns an error if the request fails validation or cannot be stored.
pub fn create_employee(
    persistence: &mut SqlitePersistence,
    clock: &ReportingClock,
    request: EmployeeRequest,
    actor: &AuthenticatedActor,
) -> Result<EmployeeMutationResponse, ApiError> {
    let profile: EmployeeProfile = employee_profile(request)?;
    let name: String = profile.name.clone();

    let persisted: PersistTransitionResult =
        execute(persistence, clock, Command::AddEmployee { profile }, actor)?;
    let employee_id: EmployeeId = persisted.employee_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Store did not assign an employee id"),
    })?;

    Ok(EmployeeMutationResponse {
        employee_id: employee_id.to_string(),
        message: format!("Added employee '{name}'"),
    })
}

/// Replaces an employee's details.
///
/// # Errors
///
/// Returns an error if the request fails validation or the employee does not exist.
pub fn update_employee(
    persistence: &mut SqlitePersistence,
    clock: &ReportingClock,
    employee_id: &str,
    request: EmployeeRequest,
    actor: &AuthenticatedActor,
) -> Result<EmployeeMutationResponse, ApiError> {
    let profile: EmployeeProfile = employee_profile(request)?;
    execute(
        persistence,
        clock,
        Command::UpdateEmployee {
            employee_id: EmployeeId::new(employee_id),
            profile,
        },
        actor,
    )?;

    Ok(EmployeeMutationResponse {
        employee_id: employee_id.to_string(),
        message: format!("Updated employee {employee_id}"),
    })
}

/// Removes an employee from listings and reports.
///
/// The record and its evaluations are kept.
///
/// # Errors
///
/// Returns an error if the employee does not exist.
pub fn deactivate_employee(
    persistence: &mut SqlitePersistence,
    clock: &ReportingClock,
    employee_id: &str,
    actor: &AuthenticatedActor,
) -> Result<EmployeeMutationResponse, ApiError> {
    execute(
        persistence,
        clock,
        Command::DeactivateEmployee {
            employee_id: EmployeeId::new(employee_id),
        },
        actor,
    )?;

    Ok(EmployeeMutationResponse {
        employee_id: employee_id.to_string(),
        message: format!("Removed employee {employee_id}"),
    })
}

fn employee_profile(request: EmployeeRequest) -> Result<EmployeeProfile, ApiError> {
    let category: EmployeeCategory = request
        .category
        .trim()
        .parse()
        .map_err(translate_domain_error)?;
    let grade: EmployeeGrade = request
        .grade
        .trim()
        .parse()
        .map_err(translate_domain_error)?;
    let appointment: AppointmentType = request
        .appointment
        .trim()
        .parse()
        .map_err(translate_domain_error)?;
    let join_date: Date = parse_date(&request.join_date).map_err(translate_domain_error)?;

    Ok(EmployeeProfile {
        name: request.name.trim().to_string(),
        national_id: request.national_id.trim().to_string(),
        category,
        grade,
        appointment,
        join_date,
        assigned_files: request
            .assigned_files
            .into_iter()
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty())
            .collect(),
    })
}

fn employee_query(request: &EmployeeFilterRequest) -> Result<EmployeeQuery, ApiError> {
    let category: Option<EmployeeCategory> = active_term(request.category.as_deref())
        .map(str::parse::<EmployeeCategory>)
        .transpose()
        .map_err(translate_domain_error)?;
    Ok(EmployeeQuery {
        search: request.search.clone(),
        category,
    })
}

fn employee_info(employee: &Employee, locale: Locale) -> EmployeeInfo {
    EmployeeInfo {
        employee_id: employee.id.to_string(),
        name: employee.name.clone(),
        national_id: employee.national_id.clone(),
        category: employee.category.as_str().to_string(),
        category_label: employee.category.label(locale).to_string(),
        grade: employee.grade.as_str().to_string(),
        grade_label: employee.grade.label(locale).to_string(),
        appointment: employee.appointment.as_str().to_string(),
        appointment_label: employee.appointment.label(locale).to_string(),
        join_date: employee.join_date.to_string(),
        assigned_files: employee.assigned_files.clone(),
        is_active: employee.is_active,
    }
}

// ============================================================================
// Evaluations
// ============================================================================

/// Lists evaluations matching the filter, newest first.
///
/// # Errors
///
/// Returns an error if the filter is malformed.
pub fn list_evaluations(
    snapshot: &Snapshot,
    clock: &ReportingClock,
    request: &EvaluationFilterRequest,
) -> Result<ListEvaluationsResponse, ApiError> {
    let locale: Locale = parse_locale(request.locale.as_deref())?;
    let query: EvaluationQuery = evaluation_query(request, clock)?;
    let index: EmployeeIndex<'_> = EmployeeIndex::new(&snapshot.employees);

    let evaluations: Vec<EvaluationInfo> =
        filter_evaluations(&snapshot.evaluations, &snapshot.employees, &query)
            .into_iter()
            .map(|evaluation| evaluation_info(evaluation, &index, clock, locale))
            .collect::<Result<_, _>>()?;

    Ok(ListEvaluationsResponse { evaluations })
}

/// Records an evaluation for an active employee.
///
/// The period is the current month in the reporting zone and the evaluator
/// is the authenticated operator.
///
/// # Errors
///
/// Returns an error if the scores are invalid or the employee is not active.
pub fn create_evaluation(
    persistence: &mut SqlitePersistence,
    clock: &ReportingClock,
    request: EvaluationRequest,
    actor: &AuthenticatedActor,
) -> Result<EvaluationMutationResponse, ApiError> {
    let input: EvaluationInput = evaluation_input(request, clock)?;
    let employee_id: EmployeeId = input.employee_id.clone();

    let persisted: PersistTransitionResult =
        execute(persistence, clock, Command::RecordEvaluation { input }, actor)?;
    let evaluation_id: EvaluationId =
        persisted.evaluation_id.ok_or_else(|| ApiError::Internal {
            message: String::from("Store did not assign an evaluation id"),
        })?;

    Ok(EvaluationMutationResponse {
        evaluation_id: evaluation_id.to_string(),
        message: format!("Recorded evaluation of employee {employee_id}"),
    })
}

/// Replaces an evaluation's details, keeping its period and evaluator.
///
/// # Errors
///
/// Returns an error if the scores are invalid or the evaluation does not exist.
pub fn update_evaluation(
    persistence: &mut SqlitePersistence,
    clock: &ReportingClock,
    evaluation_id: &str,
    request: EvaluationRequest,
    actor: &AuthenticatedActor,
) -> Result<EvaluationMutationResponse, ApiError> {
    let input: EvaluationInput = evaluation_input(request, clock)?;
    execute(
        persistence,
        clock,
        Command::UpdateEvaluation {
            evaluation_id: EvaluationId::new(evaluation_id),
            input,
        },
        actor,
    )?;

    Ok(EvaluationMutationResponse {
        evaluation_id: evaluation_id.to_string(),
        message: format!("Updated evaluation {evaluation_id}"),
    })
}

/// Permanently deletes an evaluation.
///
/// # Errors
///
/// Returns an error if the evaluation does not exist.
pub fn delete_evaluation(
    persistence: &mut SqlitePersistence,
    clock: &ReportingClock,
    evaluation_id: &str,
    actor: &AuthenticatedActor,
) -> Result<EvaluationMutationResponse, ApiError> {
    execute(
        persistence,
        clock,
        Command::DeleteEvaluation {
            evaluation_id: EvaluationId::new(evaluation_id),
        },
        actor,
    )?;

    Ok(EvaluationMutationResponse {
        evaluation_id: evaluation_id.to_string(),
        message: format!("Deleted evaluation {evaluation_id}"),
    })
}

/// Lists the periods that have at least one evaluation, newest first.
///
/// # Errors
///
/// Returns an error if the locale is not recognized.
pub fn list_periods(snapshot: &Snapshot, locale: Option<&str>) -> Result<PeriodsResponse, ApiError> {
    let locale: Locale = parse_locale(locale)?;
    Ok(PeriodsResponse {
        periods: available_periods(&snapshot.evaluations)
            .into_iter()
            .map(|key| PeriodOption {
                label: period_display(&key, locale),
                key,
            })
            .collect(),
    })
}

fn evaluation_input(
    request: EvaluationRequest,
    clock: &ReportingClock,
) -> Result<EvaluationInput, ApiError> {
    let employee_id: &str = request.employee_id.trim();
    if employee_id.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("employee_id"),
            message: String::from("An employee must be selected"),
        });
    }

    let date: OffsetDateTime = match non_blank(request.date.as_deref()) {
        Some(value) => day_start(clock, value)?,
        None => clock.now(),
    };

    Ok(EvaluationInput {
        employee_id: EmployeeId::new(employee_id),
        date,
        criteria: request.criteria,
        comments: non_empty_text(request.comments),
        strengths: non_empty_text(request.strengths),
        improvements: non_empty_text(request.improvements),
    })
}

fn evaluation_query(
    request: &EvaluationFilterRequest,
    clock: &ReportingClock,
) -> Result<EvaluationQuery, ApiError> {
    let start: Option<OffsetDateTime> = non_blank(request.start_date.as_deref())
        .map(|value| day_start(clock, value))
        .transpose()?;
    let end: Option<OffsetDateTime> = non_blank(request.end_date.as_deref())
        .map(|value| day_end(clock, value))
        .transpose()?;

    Ok(EvaluationQuery {
        employee_id: active_term(request.employee_id.as_deref()).map(EmployeeId::new),
        start,
        end,
        period: request.period.clone(),
        search: request.search.clone(),
    })
}

fn evaluation_info(
    evaluation: &Evaluation,
    employees: &EmployeeIndex<'_>,
    clock: &ReportingClock,
    locale: Locale,
) -> Result<EvaluationInfo, ApiError> {
    let rating: f64 = evaluation.rating();
    let band: RatingBand = RatingBand::from_rating(rating);
    let date: String = evaluation
        .date
        .format(&Rfc3339)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to format evaluation date: {e}"),
        })?;

    Ok(EvaluationInfo {
        evaluation_id: evaluation.id.to_string(),
        employee_id: evaluation.employee_id.to_string(),
        employee_name: employees
            .get(&evaluation.employee_id)
            .map(|employee| employee.name.clone()),
        evaluator: evaluation.evaluator.clone(),
        date,
        local_date: clock.local_date(evaluation.date).to_string(),
        period: evaluation.period_key().to_string(),
        period_label: period_display(evaluation.period_key(), locale),
        criteria: evaluation.criteria.clone(),
        rating,
        rating_band: band,
        rating_band_label: band.label(locale).to_string(),
        comments: evaluation.comments.clone(),
        strengths: evaluation.strengths.clone(),
        improvements: evaluation.improvements.clone(),
    })
}

// ============================================================================
// Dashboard and reports
// ============================================================================

/// Computes the dashboard figures.
///
/// # Errors
///
/// Returns an error if the locale is not recognized.
pub fn get_dashboard(
    snapshot: &Snapshot,
    clock: &ReportingClock,
    locale: Option<&str>,
) -> Result<DashboardResponse, ApiError> {
    let locale: Locale = parse_locale(locale)?;
    let summary = dashboard_summary(&snapshot.employees, &snapshot.evaluations, clock);
    let current = clock.current_period();

    Ok(DashboardResponse {
        total_employees: summary.total_employees,
        total_evaluations: summary.total_evaluations,
        average_rating: summary.average_rating,
        employee_of_week: summary
            .employee_of_week
            .map(|winner| top_performer_info(&winner, locale)),
        employee_of_month: summary
            .employee_of_month
            .map(|winner| top_performer_info(&winner, locale)),
        current_period: current.key(),
        current_period_label: current.label(locale),
        completed_this_month: summary.completed_this_month,
        pending_this_month: summary.pending_this_month,
        category_chart: summary
            .category_chart
            .iter()
            .map(|entry| CategoryAverageInfo {
                category: entry.category.as_str().to_string(),
                label: entry.category.label(locale).to_string(),
                average: entry.average,
                evaluation_count: entry.evaluation_count,
            })
            .collect(),
    })
}

/// Computes category means and the rating distribution of the filtered evaluations.
///
/// # Errors
///
/// Returns an error if the filter is malformed.
pub fn get_statistics(
    snapshot: &Snapshot,
    clock: &ReportingClock,
    request: &EvaluationFilterRequest,
) -> Result<StatisticsResponse, ApiError> {
    let locale: Locale = parse_locale(request.locale.as_deref())?;
    let query: EvaluationQuery = evaluation_query(request, clock)?;
    let filtered: Vec<&Evaluation> =
        filter_evaluations(&snapshot.evaluations, &snapshot.employees, &query);

    let category_averages: Vec<CategoryAverageInfo> =
        average_by_category(&snapshot.employees, filtered.iter().copied())
            .entries()
            .into_iter()
            .map(|entry| CategoryAverageInfo {
                category: entry.category.as_str().to_string(),
                label: entry.category.label(locale).to_string(),
                average: entry.average,
                evaluation_count: entry.evaluation_count,
            })
            .collect();

    let rating_distribution: Vec<RatingBandCount> = rating_distribution(filtered.iter().copied())
        .bands()
        .map(|(band, count)| RatingBandCount {
            band,
            label: band.label(locale).to_string(),
            count,
        })
        .collect();

    Ok(StatisticsResponse {
        total_evaluations: filtered.len(),
        average_rating: overall_average(filtered.iter().copied()),
        category_averages,
        rating_distribution,
    })
}

/// Exports the filtered evaluations as CSV.
///
/// # Errors
///
/// Returns an error if the filter is malformed or encoding fails.
pub fn export_evaluations(
    snapshot: &Snapshot,
    clock: &ReportingClock,
    request: &EvaluationFilterRequest,
) -> Result<CsvExport, ApiError> {
    let locale: Locale = parse_locale(request.locale.as_deref())?;
    let query: EvaluationQuery = evaluation_query(request, clock)?;
    let filtered: Vec<&Evaluation> =
        filter_evaluations(&snapshot.evaluations, &snapshot.employees, &query);

    let table: ExportTable = evaluation_table(
        &filtered,
        &snapshot.employees,
        ExportLayout::Spreadsheet,
        locale,
        clock,
    );
    debug!(rows = table.len(), "Exporting evaluations");

    Ok(CsvExport {
        filename: export_filename("evaluations", clock.local_date(clock.now())),
        content: table_to_csv(&table)?,
    })
}

/// Builds the printable evaluation report with its summary line.
///
/// # Errors
///
/// Returns an error if the filter is malformed.
pub fn printable_evaluations(
    snapshot: &Snapshot,
    clock: &ReportingClock,
    request: &EvaluationFilterRequest,
) -> Result<PrintableReportResponse, ApiError> {
    let locale: Locale = parse_locale(request.locale.as_deref())?;
    let query: EvaluationQuery = evaluation_query(request, clock)?;
    let filtered: Vec<&Evaluation> =
        filter_evaluations(&snapshot.evaluations, &snapshot.employees, &query);

    let table: ExportTable = evaluation_table(
        &filtered,
        &snapshot.employees,
        ExportLayout::Printable,
        locale,
        clock,
    );
    let summary: Option<ReportSummaryInfo> = if filtered.is_empty() {
        None
    } else {
        let summary = report_summary(&filtered);
        Some(ReportSummaryInfo {
            average: summary.average,
            average_display: summary.average_display(),
            count: summary.count,
        })
    };

    Ok(printable_report(
        report_title(ReportKind::Evaluations, locale),
        clock,
        table,
        summary,
        evaluation_filters(request, snapshot, locale),
    ))
}

/// Exports the filtered active employees as CSV.
///
/// # Errors
///
/// Returns an error if the filter is malformed or encoding fails.
pub fn export_employees(
    snapshot: &Snapshot,
    clock: &ReportingClock,
    request: &EmployeeFilterRequest,
) -> Result<CsvExport, ApiError> {
    let locale: Locale = parse_locale(request.locale.as_deref())?;
    let query: EmployeeQuery = employee_query(request)?;
    let filtered: Vec<&Employee> = filter_employees(&snapshot.employees, &query);

    let table: ExportTable = employee_table(
        &filtered,
        &snapshot.evaluations,
        ExportLayout::Spreadsheet,
        locale,
    );
    debug!(rows = table.len(), "Exporting employees");

    Ok(CsvExport {
        filename: export_filename("employees", clock.local_date(clock.now())),
        content: table_to_csv(&table)?,
    })
}

/// Builds the printable employee report.
///
/// # Errors
///
/// Returns an error if the filter is malformed.
pub fn printable_employees(
    snapshot: &Snapshot,
    clock: &ReportingClock,
    request: &EmployeeFilterRequest,
) -> Result<PrintableReportResponse, ApiError> {
    let locale: Locale = parse_locale(request.locale.as_deref())?;
    let query: EmployeeQuery = employee_query(request)?;
    let filtered: Vec<&Employee> = filter_employees(&snapshot.employees, &query);

    let table: ExportTable = employee_table(
        &filtered,
        &snapshot.evaluations,
        ExportLayout::Printable,
        locale,
    );

    Ok(printable_report(
        report_title(ReportKind::Employees, locale),
        clock,
        table,
        None,
        employee_filters(&query, locale),
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportKind {
    Evaluations,
    Employees,
}

const fn report_title(kind: ReportKind, locale: Locale) -> &'static str {
    match (kind, locale) {
        (ReportKind::Evaluations, Locale::English) => "Evaluations report",
        (ReportKind::Evaluations, Locale::Arabic) => "تقرير التقييمات",
        (ReportKind::Employees, Locale::English) => "Employees report",
        (ReportKind::Employees, Locale::Arabic) => "تقرير الموظفين",
    }
}

fn printable_report(
    title: &str,
    clock: &ReportingClock,
    table: ExportTable,
    summary: Option<ReportSummaryInfo>,
    filters: Vec<AppliedFilter>,
) -> PrintableReportResponse {
    PrintableReportResponse {
        title: title.to_string(),
        generated_on: clock.local_date(clock.now()).to_string(),
        columns: table.keys().into_iter().map(String::from).collect(),
        headers: table.headers.iter().map(|h| (*h).to_string()).collect(),
        rows: table.rows,
        summary,
        filters,
    }
}

fn filter_label(field: &str, locale: Locale) -> &'static str {
    match (field, locale) {
        ("employee", Locale::English) => "Employee",
        ("employee", Locale::Arabic) => "الموظف",
        ("start_date", Locale::English) => "From",
        ("start_date", Locale::Arabic) => "من",
        ("end_date", Locale::English) => "To",
        ("end_date", Locale::Arabic) => "إلى",
        ("period", Locale::English) => "Period",
        ("period", Locale::Arabic) => "الفترة",
        ("category", Locale::English) => "Category",
        ("category", Locale::Arabic) => "الفئة",
        (_, Locale::English) => "Search",
        (_, Locale::Arabic) => "بحث",
    }
}

fn applied_filter(field: &str, value: String, locale: Locale) -> AppliedFilter {
    AppliedFilter {
        field: field.to_string(),
        label: filter_label(field, locale).to_string(),
        value,
    }
}

/// Echoes the active evaluation filters for printing.
///
/// The employee prints by name when it is still active.
fn evaluation_filters(
    request: &EvaluationFilterRequest,
    snapshot: &Snapshot,
    locale: Locale,
) -> Vec<AppliedFilter> {
    let index: EmployeeIndex<'_> = EmployeeIndex::new(&snapshot.employees);
    let mut filters: Vec<AppliedFilter> = Vec::new();

    if let Some(employee_id) = active_term(request.employee_id.as_deref()) {
        let name: String = index
            .get(&EmployeeId::new(employee_id))
            .map_or_else(|| employee_id.to_string(), |employee| employee.name.clone());
        filters.push(applied_filter("employee", name, locale));
    }
    if let Some(start) = non_blank(request.start_date.as_deref()) {
        filters.push(applied_filter("start_date", start.to_string(), locale));
    }
    if let Some(end) = non_blank(request.end_date.as_deref()) {
        filters.push(applied_filter("end_date", end.to_string(), locale));
    }
    if let Some(period) = active_term(request.period.as_deref()) {
        let key: String = PeriodKey::Canonical(period.to_string()).canonical_key();
        filters.push(applied_filter("period", period_display(&key, locale), locale));
    }
    if let Some(search) = request.search.as_deref().filter(|s| !s.is_empty()) {
        filters.push(applied_filter("search", search.to_string(), locale));
    }
    filters
}

fn employee_filters(query: &EmployeeQuery, locale: Locale) -> Vec<AppliedFilter> {
    let mut filters: Vec<AppliedFilter> = Vec::new();
    if let Some(category) = query.category {
        filters.push(applied_filter(
            "category",
            category.label(locale).to_string(),
            locale,
        ));
    }
    if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
        filters.push(applied_filter("search", search.to_string(), locale));
    }
    filters
}

fn top_performer_info(winner: &TopPerformer<'_>, locale: Locale) -> TopPerformerInfo {
    TopPerformerInfo {
        employee_id: winner.employee.id.to_string(),
        name: winner.employee.name.clone(),
        category_label: winner.employee.category.label(locale).to_string(),
        average: winner.average,
        evaluation_count: winner.evaluation_count,
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

fn execute(
    persistence: &mut SqlitePersistence,
    clock: &ReportingClock,
    command: Command,
    actor: &AuthenticatedActor,
) -> Result<PersistTransitionResult, ApiError> {
    let transition_result: TransitionResult =
        apply(command, &actor.id, clock).map_err(translate_core_error)?;
    persistence
        .persist_transition(&transition_result)
        .map_err(translate_persistence_error)
}

fn day_start(clock: &ReportingClock, value: &str) -> Result<OffsetDateTime, ApiError> {
    let day: Date = parse_date(value).map_err(translate_domain_error)?;
    clock.start_of_day(day).map_err(translate_core_error)
}

fn day_end(clock: &ReportingClock, value: &str) -> Result<OffsetDateTime, ApiError> {
    let day: Date = parse_date(value).map_err(translate_domain_error)?;
    clock.end_of_day(day).map_err(translate_core_error)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn non_empty_text(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
