// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::export::ExportError;
use crate::password_policy::PasswordPolicyError;
use kpi::CoreError;
use kpi_domain::DomainError;
use kpi_persistence::PersistenceError;

/// Authentication errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
    /// Password policy violation.
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    let field: &str = match err {
        DomainError::InvalidName(_) => "name",
        DomainError::InvalidNationalId { .. } => "national_id",
        DomainError::InvalidCategory(_) => "category",
        DomainError::InvalidGrade(_) => "grade",
        DomainError::InvalidAppointment(_) => "appointment",
        DomainError::InvalidLocale(_) => "locale",
        DomainError::ScoreOutOfRange { .. }
        | DomainError::InvalidCriterion(_)
        | DomainError::EmptyCriteria => "criteria",
        DomainError::InvalidPeriod { .. } => "period",
        DomainError::DateParseError { .. } => "date",
    };
    ApiError::InvalidInput {
        field: String::from(field),
        message,
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::InvalidTimezone(name) => ApiError::InvalidInput {
            field: String::from("timezone"),
            message: format!("Unknown time zone '{name}'"),
        },
        CoreError::TimeConversion { operation } => ApiError::Internal {
            message: format!("Time conversion failed: {operation}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Missing records become `ResourceNotFound`, a taken login becomes a
/// rule violation, and everything else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::EmployeeNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message: format!("Employee '{id}' does not exist"),
        },
        PersistenceError::EvaluationNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Evaluation"),
            message: format!("Evaluation '{id}' does not exist"),
        },
        PersistenceError::OperatorNotFound(login) => ApiError::ResourceNotFound {
            resource_type: String::from("Operator"),
            message: format!("Operator '{login}' does not exist"),
        },
        PersistenceError::NotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message: msg,
        },
        PersistenceError::DuplicateLogin(login) => ApiError::DomainRuleViolation {
            rule: String::from("unique_login"),
            message: format!("Operator with login '{login}' already exists"),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
