// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use kpi_domain::{Evaluation, Locale, RatingBand};

/// Evaluation counts per rating band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RatingDistribution {
    counts: [usize; 5],
}

impl RatingDistribution {
    /// Returns the count of one band.
    #[must_use]
    pub const fn count(&self, band: RatingBand) -> usize {
        self.counts[band.index()]
    }

    /// Returns the counts in [`RatingBand::ALL`] order.
    #[must_use]
    pub const fn counts(&self) -> [usize; 5] {
        self.counts
    }

    /// Returns the band labels in [`RatingBand::ALL`] order.
    #[must_use]
    pub fn labels(&self, locale: Locale) -> Vec<&'static str> {
        RatingBand::ALL.iter().map(|band| band.label(locale)).collect()
    }

    /// Iterates over `(band, count)` pairs, best band first.
    pub fn bands(&self) -> impl Iterator<Item = (RatingBand, usize)> + '_ {
        RatingBand::ALL.iter().map(|band| (*band, self.count(*band)))
    }

    /// Returns the number of classified evaluations.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Classifies every evaluation into exactly one rating band.
#[must_use]
pub fn rating_distribution<'e>(
    evaluations: impl IntoIterator<Item = &'e Evaluation>,
) -> RatingDistribution {
    let mut distribution = RatingDistribution::default();
    for evaluation in evaluations {
        let band = RatingBand::from_rating(evaluation.rating());
        distribution.counts[band.index()] += 1;
    }
    distribution
}
