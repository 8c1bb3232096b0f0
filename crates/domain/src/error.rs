// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Employee name is empty or invalid.
    InvalidName(String),
    /// National identifier is not exactly 14 digits.
    InvalidNationalId {
        /// The rejected value.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },
    /// Employee category is not recognized.
    InvalidCategory(String),
    /// Employee grade is not recognized.
    InvalidGrade(String),
    /// Appointment type is not recognized.
    InvalidAppointment(String),
    /// Locale is not recognized.
    InvalidLocale(String),
    /// A criterion score lies outside 1 through 5.
    ScoreOutOfRange {
        /// The criterion identifier.
        criterion: String,
        /// The submitted score.
        score: u8,
    },
    /// A criterion identifier is empty.
    InvalidCriterion(String),
    /// An evaluation must carry at least one criterion score.
    EmptyCriteria,
    /// Period year or month is out of range.
    InvalidPeriod {
        /// The year.
        year: i32,
        /// The month.
        month: u8,
    },
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidNationalId { value, reason } => {
                write!(f, "Invalid national id '{value}': {reason}")
            }
            Self::InvalidCategory(value) => write!(f, "Invalid employee category: {value}"),
            Self::InvalidGrade(value) => write!(f, "Invalid employee grade: {value}"),
            Self::InvalidAppointment(value) => write!(f, "Invalid appointment type: {value}"),
            Self::InvalidLocale(value) => write!(f, "Invalid locale: {value}"),
            Self::ScoreOutOfRange { criterion, score } => {
                write!(
                    f,
                    "Score {score} for criterion '{criterion}' must be between 1 and 5"
                )
            }
            Self::InvalidCriterion(msg) => write!(f, "Invalid criterion: {msg}"),
            Self::EmptyCriteria => write!(f, "Evaluation must score at least one criterion"),
            Self::InvalidPeriod { year, month } => {
                write!(f, "Invalid period: year {year}, month {month}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
