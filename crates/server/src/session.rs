// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction for the server.
//!
//! Every route except health, bootstrap and login requires an
//! `Authorization: Bearer <token>` header naming a live session.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use kpi_api::{AuthenticatedActor, AuthenticationService};
use kpi_persistence::OperatorData;
use tracing::{debug, warn};

use crate::AppState;

/// Extractor for authenticated operators.
///
/// Validates the bearer token and yields the operator behind it.
/// Validation also refreshes the session's last activity.
///
/// # Errors
///
/// Rejects with HTTP 401 if the header is missing or malformed, or if the
/// session is unknown or expired.
pub struct SessionOperator(pub AuthenticatedActor, pub OperatorData);

impl FromRequestParts<AppState> for SessionOperator {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token: &str = bearer_token(parts)?;

        let (actor, operator) = {
            let mut persistence = state.persistence.lock().await;
            AuthenticationService::validate_session(&mut persistence, token).map_err(|e| {
                warn!(error = %e, "Session validation failed");
                SessionError::InvalidSession(e.to_string())
            })?
        };

        debug!(login_name = %operator.login_name, "Session validated");

        Ok(Self(actor, operator))
    }
}

/// The raw bearer token of the request.
///
/// Only checks the header shape; pair with [`SessionOperator`] when the
/// session must also be live.
pub struct SessionToken(pub String);

impl FromRequestParts<AppState> for SessionToken {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        bearer_token(parts).map(|token| Self(token.to_string()))
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, SessionError> {
    let auth_header: &str = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| {
            debug!("Missing Authorization header");
            SessionError::MissingAuthorizationHeader
        })?
        .to_str()
        .map_err(|_| {
            warn!("Invalid Authorization header encoding");
            SessionError::InvalidAuthorizationHeader
        })?;

    auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("Authorization header does not start with 'Bearer '");
        SessionError::InvalidAuthorizationHeader
    })
}

/// Session extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// Authorization header is missing.
    MissingAuthorizationHeader,
    /// Authorization header format is invalid.
    InvalidAuthorizationHeader,
    /// Session validation failed.
    InvalidSession(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingAuthorizationHeader => String::from("Missing Authorization header"),
            Self::InvalidAuthorizationHeader => String::from(
                "Invalid Authorization header format. Expected: 'Bearer <token>'",
            ),
            Self::InvalidSession(reason) => format!("Session validation failed: {reason}"),
        };

        crate::HttpError {
            status: StatusCode::UNAUTHORIZED,
            message,
        }
        .into_response()
    }
}
