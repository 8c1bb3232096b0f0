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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod evaluation;
mod period;
mod rating;
mod types;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types
pub use error::DomainError;
pub use evaluation::{Criterion, CriterionScores, Evaluation, EvaluationInput};
pub use period::{PERIOD_PLACEHOLDER, Period, PeriodKey, period_display};
pub use rating::{RatingBand, composite_rating, mean};
pub use types::{
    AppointmentType, Employee, EmployeeCategory, EmployeeGrade, EmployeeId, EmployeeProfile,
    EvaluationId, Locale,
};
pub use validation::{
    MAX_SCORE, MIN_SCORE, NATIONAL_ID_LENGTH, parse_date, validate_criterion_scores,
    validate_employee_fields, validate_national_id,
};
