// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::evaluation::CriterionScores;
use crate::types::EmployeeProfile;

/// Required length of a national identifier.
pub const NATIONAL_ID_LENGTH: usize = 14;

/// Lowest accepted criterion score.
pub const MIN_SCORE: u8 = 1;

/// Highest accepted criterion score.
pub const MAX_SCORE: u8 = 5;

/// Validates the field constraints of an employee profile.
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty or whitespace
/// - The national identifier is present but not exactly 14 digits
pub fn validate_employee_fields(profile: &EmployeeProfile) -> Result<(), DomainError> {
    if profile.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    validate_national_id(&profile.national_id)?;

    Ok(())
}

/// Validates a national identifier.
///
/// An empty identifier means "not recorded" and is accepted.
///
/// # Errors
///
/// Returns an error if the identifier is non-empty and is not exactly
/// 14 ASCII digits.
pub fn validate_national_id(national_id: &str) -> Result<(), DomainError> {
    if national_id.is_empty() {
        return Ok(());
    }
    if national_id.chars().count() != NATIONAL_ID_LENGTH {
        return Err(DomainError::InvalidNationalId {
            value: national_id.to_string(),
            reason: "must be exactly 14 digits",
        });
    }
    if !national_id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::InvalidNationalId {
            value: national_id.to_string(),
            reason: "must contain digits only",
        });
    }
    Ok(())
}

/// Validates a criterion score map before it is written.
///
/// # Errors
///
/// Returns an error if:
/// - The map is empty
/// - A criterion identifier is blank
/// - Any score lies outside 1 through 5
pub fn validate_criterion_scores(scores: &CriterionScores) -> Result<(), DomainError> {
    if scores.is_empty() {
        return Err(DomainError::EmptyCriteria);
    }
    for (criterion, score) in scores.entries() {
        if criterion.trim().is_empty() {
            return Err(DomainError::InvalidCriterion(String::from(
                "Criterion identifier cannot be empty",
            )));
        }
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(DomainError::ScoreOutOfRange {
                criterion: criterion.to_string(),
                score,
            });
        }
    }
    Ok(())
}

/// Parses a `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns an error if the string is not a valid calendar date.
pub fn parse_date(value: &str) -> Result<time::Date, DomainError> {
    let format = time::macros::format_description!("[year]-[month]-[day]");
    time::Date::parse(value.trim(), &format).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}
