// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::evaluation::CriterionScores;
use crate::types::Locale;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Returns the composite rating of a score map.
///
/// The composite is the arithmetic mean of the scores. An empty map rates
/// 0.0. Scores are averaged as given; out-of-range values are not rejected
/// here.
#[must_use]
pub fn composite_rating(scores: &CriterionScores) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let total: f64 = scores.values().map(f64::from).sum();
    mean(total, scores.len())
}

/// Divides `total` by `count`, yielding 0.0 for an empty set.
#[must_use]
pub fn mean(total: f64, count: usize) -> f64 {
    match count.to_f64() {
        Some(n) if count > 0 => total / n,
        _ => 0.0,
    }
}

/// One of the five fixed rating bands.
///
/// Bands are inclusive at their lower bound; a rating sitting on a
/// boundary belongs to the higher band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingBand {
    /// 4.5 and above.
    Excellent,
    /// 3.5 up to 4.5.
    VeryGood,
    /// 2.5 up to 3.5.
    Good,
    /// 1.5 up to 2.5.
    Acceptable,
    /// Below 1.5, including anything below 1.
    Poor,
}

impl RatingBand {
    /// Every band, best first.
    pub const ALL: [Self; 5] = [
        Self::Excellent,
        Self::VeryGood,
        Self::Good,
        Self::Acceptable,
        Self::Poor,
    ];

    /// Classifies a composite rating.
    #[must_use]
    pub fn from_rating(rating: f64) -> Self {
        if rating >= 4.5 {
            Self::Excellent
        } else if rating >= 3.5 {
            Self::VeryGood
        } else if rating >= 2.5 {
            Self::Good
        } else if rating >= 1.5 {
            Self::Acceptable
        } else {
            Self::Poor
        }
    }

    /// Returns the position of this band in [`Self::ALL`].
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Excellent => 0,
            Self::VeryGood => 1,
            Self::Good => 2,
            Self::Acceptable => 3,
            Self::Poor => 4,
        }
    }

    /// Returns the stable identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::VeryGood => "very_good",
            Self::Good => "good",
            Self::Acceptable => "acceptable",
            Self::Poor => "poor",
        }
    }

    /// Returns the display label for the given locale.
    #[must_use]
    pub const fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Excellent, Locale::English) => "Excellent",
            (Self::VeryGood, Locale::English) => "Very good",
            (Self::Good, Locale::English) => "Good",
            (Self::Acceptable, Locale::English) => "Acceptable",
            (Self::Poor, Locale::English) => "Poor",
            (Self::Excellent, Locale::Arabic) => "ممتاز (4.5-5)",
            (Self::VeryGood, Locale::Arabic) => "جيد جدًا (3.5-4.5)",
            (Self::Good, Locale::Arabic) => "جيد (2.5-3.5)",
            (Self::Acceptable, Locale::Arabic) => "مقبول (1.5-2.5)",
            (Self::Poor, Locale::Arabic) => "ضعيف (1-1.5)",
        }
    }
}
