// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod session;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono_tz::Tz;
use clap::Parser;
use kpi::ReportingClock;
use kpi_api::{
    ApiError, BootstrapStatusResponse, CreateOperatorRequest, CreateOperatorResponse, CsvExport,
    DashboardResponse, EmployeeFilterRequest, EmployeeInfo, EmployeeMutationResponse,
    EmployeeRequest, EvaluationFilterRequest, EvaluationMutationResponse, EvaluationRequest,
    ListEmployeesResponse, ListEvaluationsResponse, LoginRequest, LoginResponse, PeriodsResponse,
    PrintableReportResponse, Snapshot, StatisticsResponse, WhoAmIResponse,
};
use kpi_persistence::SqlitePersistence;
use serde::{Deserialize, Serialize};
use session::{SessionOperator, SessionToken};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info};

/// KPI evaluation server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. Uses an in-memory database if omitted.
    #[arg(short, long)]
    database: Option<String>,

    /// Address to bind to.
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// IANA time zone used for calendar boundaries.
    #[arg(short, long, default_value = "Africa/Cairo")]
    timezone: String,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer, protected by a mutex for thread-safe access.
    persistence: Arc<Mutex<SqlitePersistence>>,
    /// Zone used for calendar boundaries.
    timezone: Tz,
    /// Source of the current instant.
    now: fn() -> OffsetDateTime,
}

impl AppState {
    fn new(persistence: SqlitePersistence, timezone: Tz) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            timezone,
            now: OffsetDateTime::now_utc,
        }
    }

    /// Builds the clock for one request.
    fn clock(&self) -> ReportingClock {
        ReportingClock::new((self.now)(), self.timezone)
    }

    /// Loads the records a read request aggregates over.
    ///
    /// The lock is released before any aggregation runs.
    async fn snapshot(&self) -> Result<Snapshot, HttpError> {
        let mut persistence = self.persistence.lock().await;
        Ok(Snapshot::load(&mut persistence)?)
    }
}

// ============================================================================
// Response plumbing
// ============================================================================

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::InvalidInput { .. } | ApiError::PasswordPolicyViolation { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Serves a CSV document as a download.
fn csv_response(export: CsvExport) -> Response {
    (
        [
            (header::CONTENT_TYPE, String::from("text/csv; charset=utf-8")),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.filename),
            ),
        ],
        export.content,
    )
        .into_response()
}

/// Query parameters for endpoints that only localize labels.
#[derive(Debug, Default, Deserialize)]
struct LocaleQuery {
    /// `en` or `ar`.
    locale: Option<String>,
}

/// Liveness response.
#[derive(Debug, Serialize, Deserialize)]
struct HealthResponse {
    /// Always `"ok"`.
    status: String,
}

/// Logout response.
#[derive(Debug, Serialize, Deserialize)]
struct LogoutResponse {
    /// A confirmation message.
    message: String,
}

// ============================================================================
// Authentication and operators
// ============================================================================

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

async fn handle_bootstrap_status(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<BootstrapStatusResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(kpi_api::check_bootstrap_status(&mut persistence)?))
}

async fn handle_bootstrap(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateOperatorRequest>,
) -> Result<Json<CreateOperatorResponse>, HttpError> {
    info!(login_name = %req.login_name, "Handling bootstrap request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(kpi_api::create_first_operator(&mut persistence, &req)?))
}

async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(kpi_api::login(&mut persistence, &req)?))
}

async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _operator): SessionOperator,
    SessionToken(token): SessionToken,
) -> Result<Json<LogoutResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    kpi_api::logout(&mut persistence, &token)?;
    Ok(Json(LogoutResponse {
        message: format!("Logged out {}", actor.id),
    }))
}

async fn handle_whoami(SessionOperator(_actor, operator): SessionOperator) -> Json<WhoAmIResponse> {
    Json(kpi_api::whoami(&operator))
}

async fn handle_create_operator(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _operator): SessionOperator,
    Json(req): Json<CreateOperatorRequest>,
) -> Result<Json<CreateOperatorResponse>, HttpError> {
    info!(actor = %actor.id, login_name = %req.login_name, "Handling create_operator request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(kpi_api::create_operator(
        &mut persistence,
        &req,
        &actor,
    )?))
}

// ============================================================================
// Employees
// ============================================================================

async fn handle_list_employees(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
    Query(query): Query<EmployeeFilterRequest>,
) -> Result<Json<ListEmployeesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(kpi_api::list_employees(&mut persistence, &query)?))
}

async fn handle_create_employee(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _operator): SessionOperator,
    Json(req): Json<EmployeeRequest>,
) -> Result<Json<EmployeeMutationResponse>, HttpError> {
    info!(actor = %actor.id, "Handling create_employee request");
    let clock: ReportingClock = app_state.clock();
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(kpi_api::create_employee(
        &mut persistence,
        &clock,
        req,
        &actor,
    )?))
}

async fn handle_get_employee(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
    Path(employee_id): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<EmployeeInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(kpi_api::get_employee(
        &mut persistence,
        &employee_id,
        query.locale.as_deref(),
    )?))
}

async fn handle_update_employee(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _operator): SessionOperator,
    Path(employee_id): Path<String>,
    Json(req): Json<EmployeeRequest>,
) -> Result<Json<EmployeeMutationResponse>, HttpError> {
    info!(actor = %actor.id, employee_id = %employee_id, "Handling update_employee request");
    let clock: ReportingClock = app_state.clock();
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(kpi_api::update_employee(
        &mut persistence,
        &clock,
        &employee_id,
        req,
        &actor,
    )?))
}

async fn handle_delete_employee(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _operator): SessionOperator,
    Path(employee_id): Path<String>,
) -> Result<Json<EmployeeMutationResponse>, HttpError> {
    info!(actor = %actor.id, employee_id = %employee_id, "Handling delete_employee request");
    let clock: ReportingClock = app_state.clock();
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(kpi_api::deactivate_employee(
        &mut persistence,
        &clock,
        &employee_id,
        &actor,
    )?))
}

// ============================================================================
// Evaluations
// ============================================================================

async fn handle_list_evaluations(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
    Query(query): Query<EvaluationFilterRequest>,
) -> Result<Json<ListEvaluationsResponse>, HttpError> {
    let snapshot: Snapshot = app_state.snapshot().await?;
    Ok(Json(kpi_api::list_evaluations(
        &snapshot,
        &app_state.clock(),
        &query,
    )?))
}

async fn handle_create_evaluation(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _operator): SessionOperator,
    Json(req): Json<EvaluationRequest>,
) -> Result<Json<EvaluationMutationResponse>, HttpError> {
    info!(actor = %actor.id, employee_id = %req.employee_id, "Handling create_evaluation request");
    let clock: ReportingClock = app_state.clock();
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(kpi_api::create_evaluation(
        &mut persistence,
        &clock,
        req,
        &actor,
    )?))
}

async fn handle_update_evaluation(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _operator): SessionOperator,
    Path(evaluation_id): Path<String>,
    Json(req): Json<EvaluationRequest>,
) -> Result<Json<EvaluationMutationResponse>, HttpError> {
    info!(actor = %actor.id, evaluation_id = %evaluation_id, "Handling update_evaluation request");
    let clock: ReportingClock = app_state.clock();
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(kpi_api::update_evaluation(
        &mut persistence,
        &clock,
        &evaluation_id,
        req,
        &actor,
    )?))
}

async fn handle_delete_evaluation(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _operator): SessionOperator,
    Path(evaluation_id): Path<String>,
) -> Result<Json<EvaluationMutationResponse>, HttpError> {
    info!(actor = %actor.id, evaluation_id = %evaluation_id, "Handling delete_evaluation request");
    let clock: ReportingClock = app_state.clock();
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(kpi_api::delete_evaluation(
        &mut persistence,
        &clock,
        &evaluation_id,
        &actor,
    )?))
}

async fn handle_list_periods(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<PeriodsResponse>, HttpError> {
    let snapshot: Snapshot = app_state.snapshot().await?;
    Ok(Json(kpi_api::list_periods(
        &snapshot,
        query.locale.as_deref(),
    )?))
}

// ============================================================================
// Dashboard and reports
// ============================================================================

async fn handle_dashboard(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<DashboardResponse>, HttpError> {
    let snapshot: Snapshot = app_state.snapshot().await?;
    Ok(Json(kpi_api::get_dashboard(
        &snapshot,
        &app_state.clock(),
        query.locale.as_deref(),
    )?))
}

async fn handle_statistics(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
    Query(query): Query<EvaluationFilterRequest>,
) -> Result<Json<StatisticsResponse>, HttpError> {
    let snapshot: Snapshot = app_state.snapshot().await?;
    Ok(Json(kpi_api::get_statistics(
        &snapshot,
        &app_state.clock(),
        &query,
    )?))
}

async fn handle_export_evaluations(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
    Query(query): Query<EvaluationFilterRequest>,
) -> Result<Response, HttpError> {
    let snapshot: Snapshot = app_state.snapshot().await?;
    let export: CsvExport =
        kpi_api::export_evaluations(&snapshot, &app_state.clock(), &query)?;
    Ok(csv_response(export))
}

async fn handle_printable_evaluations(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
    Query(query): Query<EvaluationFilterRequest>,
) -> Result<Json<PrintableReportResponse>, HttpError> {
    let snapshot: Snapshot = app_state.snapshot().await?;
    Ok(Json(kpi_api::printable_evaluations(
        &snapshot,
        &app_state.clock(),
        &query,
    )?))
}

async fn handle_export_employees(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
    Query(query): Query<EmployeeFilterRequest>,
) -> Result<Response, HttpError> {
    let snapshot: Snapshot = app_state.snapshot().await?;
    let export: CsvExport = kpi_api::export_employees(&snapshot, &app_state.clock(), &query)?;
    Ok(csv_response(export))
}

async fn handle_printable_employees(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
    Query(query): Query<EmployeeFilterRequest>,
) -> Result<Json<PrintableReportResponse>, HttpError> {
    let snapshot: Snapshot = app_state.snapshot().await?;
    Ok(Json(kpi_api::printable_employees(
        &snapshot,
        &app_state.clock(),
        &query,
    )?))
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route(
            "/auth/bootstrap",
            get(handle_bootstrap_status).post(handle_bootstrap),
        )
        .route("/auth/login", post(handle_login))
        .route("/auth/logout", post(handle_logout))
        .route("/auth/whoami", get(handle_whoami))
        .route("/operators", post(handle_create_operator))
        .route(
            "/employees",
            get(handle_list_employees).post(handle_create_employee),
        )
        .route(
            "/employees/{employee_id}",
            get(handle_get_employee)
                .put(handle_update_employee)
                .delete(handle_delete_employee),
        )
        .route(
            "/evaluations",
            get(handle_list_evaluations).post(handle_create_evaluation),
        )
        .route("/evaluations/periods", get(handle_list_periods))
        .route(
            "/evaluations/{evaluation_id}",
            put(handle_update_evaluation).delete(handle_delete_evaluation),
        )
        .route("/dashboard", get(handle_dashboard))
        .route("/reports/statistics", get(handle_statistics))
        .route(
            "/reports/evaluations/export",
            get(handle_export_evaluations),
        )
        .route(
            "/reports/evaluations/printable",
            get(handle_printable_evaluations),
        )
        .route("/reports/employees/export", get(handle_export_employees))
        .route(
            "/reports/employees/printable",
            get(handle_printable_employees),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
        )
        .init();

    info!("Initializing KPI Server");

    let timezone: Tz = ReportingClock::parse_timezone(&args.timezone)?;
    info!(timezone = %timezone, "Reporting time zone");

    let persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {db_path}");
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    let app: Router = build_router(AppState::new(persistence, timezone));

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
