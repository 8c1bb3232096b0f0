// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Evaluation periods.
//!
//! Stored evaluations carry their period either as a `"YYYY-MM"` token or
//! as a `{year, month}` pair. Both shapes are accepted through
//! [`PeriodKey`] and reduced to one canonical `"YYYY-MM"` key when an
//! evaluation is built, so reporting code only ever compares strings of
//! that shape.
//!
//! Nothing in this module fails on malformed input: unusable periods
//! canonicalize to an empty key and display as `"-"`.

use crate::error::DomainError;
use crate::types::Locale;
use serde::{Deserialize, Serialize};
use time::Date;

/// Display placeholder for a missing or malformed period.
pub const PERIOD_PLACEHOLDER: &str = "-";

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS_AR: [&str; 12] = [
    "يناير",
    "فبراير",
    "مارس",
    "أبريل",
    "مايو",
    "يونيو",
    "يوليو",
    "أغسطس",
    "سبتمبر",
    "أكتوبر",
    "نوفمبر",
    "ديسمبر",
];

/// A period designator as it arrives from storage or from a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PeriodKey {
    /// A `"YYYY-MM"` token, or whatever free text was stored in its place.
    Canonical(String),
    /// A structured year and month.
    YearMonth {
        /// Calendar year.
        year: i32,
        /// Calendar month, 1 through 12 when well formed.
        month: u32,
    },
}

impl Default for PeriodKey {
    fn default() -> Self {
        Self::Canonical(String::new())
    }
}

impl PeriodKey {
    /// Returns the canonical `"YYYY-MM"` key.
    ///
    /// A structured pair with a zero year or month yields an empty key.
    /// A token of the form `<digits>-<digits>` is re-padded to two month
    /// digits; any other token is returned trimmed and unchanged.
    #[must_use]
    pub fn canonical_key(&self) -> String {
        match self {
            Self::YearMonth { year, month } => {
                if *year == 0 || *month == 0 {
                    String::new()
                } else {
                    format!("{year}-{month:02}")
                }
            }
            Self::Canonical(token) => {
                let token = token.trim();
                split_year_month(token).map_or_else(
                    || token.to_string(),
                    |(year, month)| format!("{year}-{month:02}"),
                )
            }
        }
    }

    /// Returns the stored text when the period was stored as a string.
    ///
    /// Free-text search matches against this raw value.
    #[must_use]
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            Self::Canonical(token) => Some(token),
            Self::YearMonth { .. } => None,
        }
    }
}

impl From<Period> for PeriodKey {
    fn from(period: Period) -> Self {
        Self::Canonical(period.key())
    }
}

/// A validated calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    year: i32,
    month: u8,
}

impl Period {
    /// Creates a period.
    ///
    /// # Errors
    ///
    /// Returns an error if the month is outside 1 through 12 or the year
    /// is outside 1 through 9999.
    pub fn new(year: i32, month: u8) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) || !(1..=9999).contains(&year) {
            return Err(DomainError::InvalidPeriod { year, month });
        }
        Ok(Self { year, month })
    }

    /// Returns the period containing a calendar date.
    #[must_use]
    pub fn from_date(date: Date) -> Self {
        Self {
            year: date.year(),
            month: u8::from(date.month()),
        }
    }

    /// Parses a canonical key. Returns `None` for anything malformed.
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        let (year, month) = split_year_month(key.trim())?;
        let month = u8::try_from(month).ok()?;
        Self::new(year, month).ok()
    }

    /// Returns the calendar year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the calendar month (1 through 12).
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the canonical `"YYYY-MM"` key.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }

    /// Returns the display label, e.g. `"March 2024"`.
    #[must_use]
    pub fn label(&self, locale: Locale) -> String {
        format!("{} {}", month_name(u32::from(self.month), locale), self.year)
    }
}

/// Returns the display label for a canonical period key.
///
/// Yields [`PERIOD_PLACEHOLDER`] when the key is empty, lacks a year or a
/// month, or names a month outside 1 through 12.
#[must_use]
pub fn period_display(key: &str, locale: Locale) -> String {
    let Some((year, month)) = split_year_month(key.trim()) else {
        return PERIOD_PLACEHOLDER.to_string();
    };
    if !(1..=12).contains(&month) {
        return PERIOD_PLACEHOLDER.to_string();
    }
    format!("{} {year}", month_name(month, locale))
}

fn month_name(month: u32, locale: Locale) -> &'static str {
    let table = match locale {
        Locale::English => &MONTHS_EN,
        Locale::Arabic => &MONTHS_AR,
    };
    usize::try_from(month)
        .ok()
        .and_then(|m| m.checked_sub(1))
        .and_then(|index| table.get(index))
        .copied()
        .unwrap_or(PERIOD_PLACEHOLDER)
}

fn split_year_month(token: &str) -> Option<(i32, u32)> {
    let (year, month) = token.split_once('-')?;
    if year.is_empty()
        || month.is_empty()
        || !year.bytes().all(|b| b.is_ascii_digit())
        || !month.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    Some((year.parse().ok()?, month.parse().ok()?))
}
