// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{
    Router,
    body::Body,
    http::Request,
    response::Response,
};
use chrono_tz::Tz;
use kpi_persistence::SqlitePersistence;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;
use time::{OffsetDateTime, macros::datetime};
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::{AppState, build_router};

pub const TEST_PASSWORD: &str = "clinic-pass-2024";

/// Friday 2024-03-15, noon UTC.
fn fixed_now() -> OffsetDateTime {
    datetime!(2024-03-15 12:00 UTC)
}

/// Router over a fresh in-memory store with a pinned clock.
pub fn create_test_app() -> Router {
    let persistence: SqlitePersistence =
        SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence");
    build_router(AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        timezone: Tz::UTC,
        now: fixed_now,
    })
}

pub fn create_test_operator_body(login_name: &str) -> Value {
    json!({
        "login_name": login_name,
        "display_name": "HR Office",
        "password": TEST_PASSWORD,
        "password_confirmation": TEST_PASSWORD,
    })
}

pub fn create_test_employee_body(name: &str, category: &str) -> Value {
    json!({
        "name": name,
        "national_id": "29001011234567",
        "category": category,
        "grade": "first",
        "appointment": "permanent",
        "join_date": "2020-09-01",
        "assigned_files": ["Outpatient"],
    })
}

pub fn create_test_evaluation_body(employee_id: &str, date: &str, quality: u8) -> Value {
    json!({
        "employee_id": employee_id,
        "date": date,
        "criteria": { "quality": quality, "teamwork": 4 },
        "comments": "Reliable on night shifts",
    })
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<&Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn read_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Bootstraps the first operator and returns a session token for it.
pub async fn create_test_session(app: &Router) -> String {
    let body = create_test_operator_body("hr.admin");
    send(app, request("POST", "/auth/bootstrap", None, Some(&body))).await;

    let login = json!({ "login_name": "hr.admin", "password": TEST_PASSWORD });
    let response = send(app, request("POST", "/auth/login", None, Some(&login))).await;
    let login: kpi_api::LoginResponse = read_json(response).await;
    login.session_token
}

/// Adds an employee and returns its id.
pub async fn add_test_employee(app: &Router, token: &str, name: &str, category: &str) -> String {
    let body = create_test_employee_body(name, category);
    let response = send(app, request("POST", "/employees", Some(token), Some(&body))).await;
    let created: kpi_api::EmployeeMutationResponse = read_json(response).await;
    created.employee_id
}

/// Records an evaluation and returns its id.
pub async fn add_test_evaluation(
    app: &Router,
    token: &str,
    employee_id: &str,
    date: &str,
    quality: u8,
) -> String {
    let body = create_test_evaluation_body(employee_id, date, quality);
    let response = send(app, request("POST", "/evaluations", Some(token), Some(&body))).await;
    let created: kpi_api::EvaluationMutationResponse = read_json(response).await;
    created.evaluation_id
}
