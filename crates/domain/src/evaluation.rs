// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::period::PeriodKey;
use crate::types::{EmployeeId, EvaluationId, Locale};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// The criteria offered when recording an evaluation.
///
/// Stored score maps are not restricted to this catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    /// Quality of work.
    Quality,
    /// Efficiency.
    Efficiency,
    /// Teamwork.
    Teamwork,
    /// Communication.
    Communication,
    /// Initiative.
    Initiative,
    /// Punctuality.
    Punctuality,
    /// Adherence to infection-control procedures.
    InfectionControl,
}

impl Criterion {
    /// The full catalog, in form order.
    pub const ALL: [Self; 7] = [
        Self::Quality,
        Self::Efficiency,
        Self::Teamwork,
        Self::Communication,
        Self::Initiative,
        Self::Punctuality,
        Self::InfectionControl,
    ];

    /// Returns the identifier used as the score map key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Efficiency => "efficiency",
            Self::Teamwork => "teamwork",
            Self::Communication => "communication",
            Self::Initiative => "initiative",
            Self::Punctuality => "punctuality",
            Self::InfectionControl => "infection_control",
        }
    }

    /// Returns the display label for the given locale.
    #[must_use]
    pub const fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Quality, Locale::English) => "Quality of work",
            (Self::Efficiency, Locale::English) => "Efficiency",
            (Self::Teamwork, Locale::English) => "Teamwork",
            (Self::Communication, Locale::English) => "Communication",
            (Self::Initiative, Locale::English) => "Initiative",
            (Self::Punctuality, Locale::English) => "Punctuality",
            (Self::InfectionControl, Locale::English) => "Infection control",
            (Self::Quality, Locale::Arabic) => "جودة العمل",
            (Self::Efficiency, Locale::Arabic) => "الكفاءة",
            (Self::Teamwork, Locale::Arabic) => "العمل الجماعي",
            (Self::Communication, Locale::Arabic) => "التواصل",
            (Self::Initiative, Locale::Arabic) => "المبادرة",
            (Self::Punctuality, Locale::Arabic) => "الالتزام بالمواعيد",
            (Self::InfectionControl, Locale::Arabic) => "الالتزام بإجراءات مكافحة العدوى",
        }
    }
}

/// Criterion identifier to integer score.
///
/// Scores are expected to lie in 1 through 5. The range is checked on
/// write by [`crate::validate_criterion_scores`], not here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriterionScores(BTreeMap<String, u8>);

impl CriterionScores {
    /// Creates an empty score map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Sets the score of one criterion, replacing any previous score.
    pub fn set(&mut self, criterion: impl Into<String>, score: u8) {
        self.0.insert(criterion.into(), score);
    }

    /// Returns the score of one criterion.
    #[must_use]
    pub fn get(&self, criterion: &str) -> Option<u8> {
        self.0.get(criterion).copied()
    }

    /// Iterates over `(criterion, score)` pairs in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, u8)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Iterates over the scores.
    pub fn values(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.values().copied()
    }

    /// Returns the number of scored criteria.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when no criterion is scored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, u8)> for CriterionScores {
    fn from_iter<I: IntoIterator<Item = (K, u8)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// The editable part of an evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationInput {
    /// The evaluated employee.
    pub employee_id: EmployeeId,
    /// When the evaluation took place.
    pub date: OffsetDateTime,
    /// Criterion scores.
    pub criteria: CriterionScores,
    /// Free-text comments.
    pub comments: Option<String>,
    /// Noted strengths.
    pub strengths: Option<String>,
    /// Suggested improvements.
    pub improvements: Option<String>,
}

/// An evaluation record.
///
/// The period is normalized once on construction; [`Self::period_key`]
/// always returns the canonical form.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Store-assigned identifier.
    pub id: EvaluationId,
    /// The evaluated employee. May reference an employee that no longer exists.
    pub employee_id: EmployeeId,
    /// Login of the operator who recorded the evaluation.
    pub evaluator: String,
    /// When the evaluation took place.
    pub date: OffsetDateTime,
    /// Criterion scores.
    pub criteria: CriterionScores,
    /// Free-text comments.
    pub comments: Option<String>,
    /// Noted strengths.
    pub strengths: Option<String>,
    /// Suggested improvements.
    pub improvements: Option<String>,
    /// When the record was created.
    pub created_at: OffsetDateTime,
    /// When the record was last changed.
    pub updated_at: OffsetDateTime,
    period: PeriodKey,
    period_key: String,
}

impl Evaluation {
    /// Builds an evaluation, canonicalizing its period.
    #[must_use]
    pub fn new(
        id: EvaluationId,
        evaluator: String,
        input: EvaluationInput,
        period: PeriodKey,
        created_at: OffsetDateTime,
        updated_at: OffsetDateTime,
    ) -> Self {
        let period_key = period.canonical_key();
        Self {
            id,
            employee_id: input.employee_id,
            evaluator,
            date: input.date,
            criteria: input.criteria,
            comments: input.comments,
            strengths: input.strengths,
            improvements: input.improvements,
            created_at,
            updated_at,
            period,
            period_key,
        }
    }

    /// Returns the period as it was stored.
    #[must_use]
    pub const fn period(&self) -> &PeriodKey {
        &self.period
    }

    /// Returns the canonical `"YYYY-MM"` key, or an empty string.
    #[must_use]
    pub fn period_key(&self) -> &str {
        &self.period_key
    }

    /// Returns the composite rating of this evaluation.
    #[must_use]
    pub fn rating(&self) -> f64 {
        crate::rating::composite_rating(&self.criteria)
    }

    /// Returns the editable part of this record.
    #[must_use]
    pub fn input(&self) -> EvaluationInput {
        EvaluationInput {
            employee_id: self.employee_id.clone(),
            date: self.date,
            criteria: self.criteria.clone(),
            comments: self.comments.clone(),
            strengths: self.strengths.clone(),
            improvements: self.improvements.clone(),
        }
    }
}
