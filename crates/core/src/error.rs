// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use kpi_domain::DomainError;

/// Errors that can occur while validating commands or resolving time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The reporting time zone is not a known IANA zone.
    InvalidTimezone(String),
    /// A local date could not be mapped onto an instant.
    TimeConversion {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::InvalidTimezone(name) => write!(f, "Invalid timezone: {name}"),
            Self::TimeConversion { operation } => {
                write!(f, "Time conversion failed: {operation}")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
