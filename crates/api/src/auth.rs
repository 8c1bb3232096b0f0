// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session-based authentication for operators.

use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info};

use kpi_persistence::{OperatorData, PersistenceError, SessionData, SqlitePersistence};

use crate::error::AuthError;

/// An authenticated operator.
///
/// Every authenticated operator may perform every action; there are no roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The operator login name, recorded as the evaluator of new evaluations.
    pub id: String,
    /// The stored operator identifier.
    pub operator_id: i64,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(id: String, operator_id: i64) -> Self {
        Self { id, operator_id }
    }

    /// Builds the actor for a stored operator.
    #[must_use]
    pub fn from_operator(operator: &OperatorData) -> Self {
        Self::new(operator.login_name.clone(), operator.operator_id)
    }
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session expiration duration (30 days).
    const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Verifies operator credentials and creates a session.
    ///
    /// Unknown logins and wrong passwords fail with the same reason.
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_actor`, `operator_data`)
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected or the session
    /// cannot be stored.
    pub fn login(
        persistence: &mut SqlitePersistence,
        login_name: &str,
        password: &str,
    ) -> Result<(String, AuthenticatedActor, OperatorData), AuthError> {
        let operator: Option<OperatorData> = persistence
            .get_operator_by_login(login_name)
            .map_err(Self::map_persistence_error)?;

        let Some(operator) = operator else {
            debug!(login_name, "Login rejected: unknown operator");
            return Err(Self::invalid_credentials());
        };

        let verified: bool = persistence
            .verify_password(password, &operator.password_hash)
            .map_err(Self::map_persistence_error)?;
        if !verified {
            debug!(login_name, "Login rejected: wrong password");
            return Err(Self::invalid_credentials());
        }

        let session_token: String = Self::generate_session_token();

        let expires_at: OffsetDateTime =
            OffsetDateTime::now_utc() + Self::DEFAULT_SESSION_EXPIRATION;
        let expires_at_str: String =
            expires_at
                .format(&Rfc3339)
                .map_err(|e| AuthError::AuthenticationFailed {
                    reason: format!("Failed to format expiration time: {e}"),
                })?;

        persistence
            .create_session(&session_token, operator.operator_id, &expires_at_str)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        persistence
            .update_last_login(operator.operator_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to update last login: {e}"),
            })?;

        info!(login_name = %operator.login_name, "Operator logged in");

        let authenticated_actor: AuthenticatedActor = AuthenticatedActor::from_operator(&operator);
        Ok((session_token, authenticated_actor, operator))
    }

    /// Validates a session token and returns the authenticated actor.
    ///
    /// A valid session has its activity timestamp refreshed.
    ///
    /// # Returns
    ///
    /// A tuple of (`authenticated_actor`, `operator_data`)
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unknown or expired, or if its
    /// operator no longer exists.
    pub fn validate_session(
        persistence: &mut SqlitePersistence,
        session_token: &str,
    ) -> Result<(AuthenticatedActor, OperatorData), AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(&session.expires_at, &Rfc3339)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to parse session expiration: {e}"),
            })?;

        if OffsetDateTime::now_utc() > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let operator: OperatorData = persistence
            .get_operator_by_id(session.operator_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Operator not found"),
            })?;

        persistence
            .update_session_activity(session.session_id)
            .map_err(Self::map_persistence_error)?;

        let authenticated_actor: AuthenticatedActor = AuthenticatedActor::from_operator(&operator);
        Ok((authenticated_actor, operator))
    }

    /// Logs out by deleting the session.
    ///
    /// Unknown tokens are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the logout fails.
    pub fn logout(
        persistence: &mut SqlitePersistence,
        session_token: &str,
    ) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;

        Ok(())
    }

    /// Generates an opaque session token.
    fn generate_session_token() -> String {
        format!("session_{:032x}", rand::random::<u128>())
    }

    fn invalid_credentials() -> AuthError {
        AuthError::AuthenticationFailed {
            reason: String::from("Invalid login name or password"),
        }
    }

    /// Maps persistence errors to authentication errors.
    fn map_persistence_error(err: PersistenceError) -> AuthError {
        match err {
            PersistenceError::OperatorNotFound(msg) | PersistenceError::NotFound(msg) => {
                AuthError::AuthenticationFailed { reason: msg }
            }
            _ => AuthError::AuthenticationFailed {
                reason: format!("Database error: {err}"),
            },
        }
    }
}
