// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::clock::{ReportingClock, chrono_to_offset};
use chrono::Months;
use time::{Duration, OffsetDateTime};

/// A trailing window ending at "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeWindow {
    /// The last seven days.
    Week,
    /// The last calendar month.
    Month,
}

impl TimeWindow {
    /// Returns the earliest instant inside the window.
    ///
    /// `Month` steps back one calendar month in the reporting zone. When
    /// the target month is shorter, the day is clamped to its last day, so
    /// March 31 reaches back to February 28 (or 29). It never rolls the
    /// overflow forward into early March the way a plain month decrement
    /// of a calendar date does.
    #[must_use]
    pub fn boundary(&self, clock: &ReportingClock) -> OffsetDateTime {
        let now = clock.now();
        match self {
            Self::Week => now.saturating_sub(Duration::days(7)),
            Self::Month => clock
                .to_local(now)
                .and_then(|local| local.checked_sub_months(Months::new(1)))
                .and_then(|local| chrono_to_offset(&local).ok())
                .unwrap_or_else(|| now.saturating_sub(Duration::days(30))),
        }
    }

    /// Returns the stable identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}
