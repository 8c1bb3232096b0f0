// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for bootstrap, login, sessions and operator creation.

use kpi_persistence::SqlitePersistence;

use super::helpers::{TEST_PASSWORD, create_test_actor, create_test_operator_request};
use crate::{
    ApiError, AuthError, AuthenticationService, LoginRequest, check_bootstrap_status,
    create_first_operator, create_operator, login, logout, whoami,
};

fn login_request(login_name: &str, password: &str) -> LoginRequest {
    LoginRequest {
        login_name: String::from(login_name),
        password: String::from(password),
    }
}

#[test]
fn test_bootstrap_status_tracks_operator_count() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    assert!(check_bootstrap_status(&mut persistence).unwrap().needs_bootstrap);

    create_test_actor(&mut persistence);

    assert!(!check_bootstrap_status(&mut persistence).unwrap().needs_bootstrap);
}

#[test]
fn test_first_operator_can_only_be_created_once() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let response =
        create_first_operator(&mut persistence, &create_test_operator_request("hr.admin"))
            .unwrap();
    assert_eq!(response.login_name, "HR.ADMIN");
    assert_eq!(response.display_name, "HR Office");

    let again = create_first_operator(&mut persistence, &create_test_operator_request("second"));

    match again {
        Err(ApiError::DomainRuleViolation { rule, .. }) => assert_eq!(rule, "bootstrap_once"),
        other => panic!("Expected DomainRuleViolation, got: {other:?}"),
    }
    assert_eq!(persistence.count_operators().unwrap(), 1);
}

#[test]
fn test_first_operator_enforces_password_policy() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let mut request = create_test_operator_request("hr.admin");
    request.password = String::from("short");
    request.password_confirmation = String::from("short");

    let result = create_first_operator(&mut persistence, &request);

    assert!(matches!(
        result,
        Err(ApiError::PasswordPolicyViolation { .. })
    ));
    assert!(check_bootstrap_status(&mut persistence).unwrap().needs_bootstrap);
}

#[test]
fn test_blank_login_name_is_rejected() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let request = create_test_operator_request("   ");

    let result = create_first_operator(&mut persistence, &request);

    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "login_name"),
        other => panic!("Expected InvalidInput, got: {other:?}"),
    }
}

#[test]
fn test_login_returns_session_for_valid_credentials() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    create_test_actor(&mut persistence);

    let response = login(&mut persistence, &login_request("hr.admin", TEST_PASSWORD)).unwrap();

    assert!(response.session_token.starts_with("session_"));
    assert_eq!(response.login_name, "HR.ADMIN");
    assert_eq!(response.display_name, "HR Office");

    let (actor, operator) =
        AuthenticationService::validate_session(&mut persistence, &response.session_token)
            .unwrap();
    assert_eq!(actor.id, "HR.ADMIN");
    assert_eq!(actor.operator_id, operator.operator_id);
    assert!(operator.last_login_at.is_some());
}

#[test]
fn test_login_rejects_wrong_password_and_unknown_login_alike() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    create_test_actor(&mut persistence);

    let wrong_password = login(&mut persistence, &login_request("hr.admin", "not-the-password"));
    let unknown_login = login(&mut persistence, &login_request("nobody", TEST_PASSWORD));

    assert_eq!(wrong_password, unknown_login);
    assert!(matches!(
        wrong_password,
        Err(ApiError::AuthenticationFailed { .. })
    ));
}

#[test]
fn test_unknown_session_token_is_rejected() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let result = AuthenticationService::validate_session(&mut persistence, "session_missing");

    assert_eq!(
        result,
        Err(AuthError::AuthenticationFailed {
            reason: String::from("Invalid session token")
        })
    );
}

#[test]
fn test_expired_session_is_rejected() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let actor = create_test_actor(&mut persistence);
    persistence
        .create_session("session_old", actor.operator_id, "2020-01-01T00:00:00Z")
        .unwrap();

    let result = AuthenticationService::validate_session(&mut persistence, "session_old");

    assert_eq!(
        result,
        Err(AuthError::AuthenticationFailed {
            reason: String::from("Session expired")
        })
    );
}

#[test]
fn test_logout_invalidates_session() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    create_test_actor(&mut persistence);
    let token = login(&mut persistence, &login_request("hr.admin", TEST_PASSWORD))
        .unwrap()
        .session_token;

    logout(&mut persistence, &token).unwrap();

    assert!(AuthenticationService::validate_session(&mut persistence, &token).is_err());
}

#[test]
fn test_whoami_reports_operator() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let actor = create_test_actor(&mut persistence);
    let operator = persistence
        .get_operator_by_id(actor.operator_id)
        .unwrap()
        .unwrap();

    let response = whoami(&operator);

    assert_eq!(response.login_name, "HR.ADMIN");
    assert_eq!(response.display_name, "HR Office");
    assert_eq!(response.last_login_at, None);
}

#[test]
fn test_create_operator_rejects_duplicate_login() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let actor = create_test_actor(&mut persistence);

    let created =
        create_operator(&mut persistence, &create_test_operator_request("nurse"), &actor).unwrap();
    assert_eq!(created.login_name, "NURSE");

    let duplicate = create_operator(&mut persistence, &create_test_operator_request("Nurse"), &actor);

    match duplicate {
        Err(ApiError::DomainRuleViolation { rule, .. }) => assert_eq!(rule, "unique_login"),
        other => panic!("Expected DomainRuleViolation, got: {other:?}"),
    }
    assert_eq!(persistence.count_operators().unwrap(), 2);
}

#[test]
fn test_new_operator_can_log_in() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let actor = create_test_actor(&mut persistence);
    create_operator(&mut persistence, &create_test_operator_request("nurse"), &actor).unwrap();

    let response = login(&mut persistence, &login_request("NURSE", TEST_PASSWORD)).unwrap();

    assert_eq!(response.login_name, "NURSE");
}
