// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wall-clock context for reporting.
//!
//! "Now" and the reporting time zone are always passed in explicitly as a
//! [`ReportingClock`]. Calendar questions (which month is current, where a
//! local day starts and ends) are answered in that zone; instants are
//! stored and compared in UTC.

use crate::error::CoreError;
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use kpi_domain::Period;
use time::{Date, Month, OffsetDateTime};

/// "Now" together with the zone used for calendar boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingClock {
    now: OffsetDateTime,
    timezone: Tz,
}

impl ReportingClock {
    /// Creates a clock fixed at `now` in the given zone.
    #[must_use]
    pub const fn new(now: OffsetDateTime, timezone: Tz) -> Self {
        Self { now, timezone }
    }

    /// Creates a clock fixed at `now` in UTC.
    #[must_use]
    pub const fn utc(now: OffsetDateTime) -> Self {
        Self::new(now, Tz::UTC)
    }

    /// Parses an IANA time zone name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a known zone.
    pub fn parse_timezone(name: &str) -> Result<Tz, CoreError> {
        name.trim()
            .parse()
            .map_err(|_| CoreError::InvalidTimezone(name.to_string()))
    }

    /// Returns the current instant.
    #[must_use]
    pub const fn now(&self) -> OffsetDateTime {
        self.now
    }

    /// Returns the reporting time zone.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Returns the calendar date of an instant in the reporting zone.
    ///
    /// Falls back to the instant's own offset if it cannot be represented
    /// in chrono.
    #[must_use]
    pub fn local_date(&self, instant: OffsetDateTime) -> Date {
        self.to_local(instant)
            .and_then(|local| chrono_date_to_time(local.date_naive()))
            .unwrap_or_else(|| instant.date())
    }

    /// Returns the period containing an instant in the reporting zone.
    #[must_use]
    pub fn period_of(&self, instant: OffsetDateTime) -> Period {
        Period::from_date(self.local_date(instant))
    }

    /// Returns the current period in the reporting zone.
    #[must_use]
    pub fn current_period(&self) -> Period {
        self.period_of(self.now)
    }

    /// Returns the first instant of a local calendar day.
    ///
    /// # Errors
    ///
    /// Returns an error if the day has no representable start in the zone.
    pub fn start_of_day(&self, date: Date) -> Result<OffsetDateTime, CoreError> {
        let naive = time_date_to_chrono(date)?.and_time(NaiveTime::MIN);
        // A DST jump at midnight leaves no 00:00; the day then starts an hour later.
        let local = self
            .timezone
            .from_local_datetime(&naive)
            .earliest()
            .or_else(|| {
                self.timezone
                    .from_local_datetime(&(naive + chrono::Duration::hours(1)))
                    .earliest()
            })
            .ok_or_else(|| CoreError::TimeConversion {
                operation: format!("start of {date} in {}", self.timezone),
            })?;
        chrono_to_offset(&local)
    }

    /// Returns the last instant of a local calendar day.
    ///
    /// # Errors
    ///
    /// Returns an error if the day has no representable end in the zone.
    pub fn end_of_day(&self, date: Date) -> Result<OffsetDateTime, CoreError> {
        let last = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).ok_or_else(|| {
            CoreError::TimeConversion {
                operation: String::from("end of day time"),
            }
        })?;
        let naive = time_date_to_chrono(date)?.and_time(last);
        let local = self
            .timezone
            .from_local_datetime(&naive)
            .latest()
            .ok_or_else(|| CoreError::TimeConversion {
                operation: format!("end of {date} in {}", self.timezone),
            })?;
        chrono_to_offset(&local)
    }

    pub(crate) fn to_local(&self, instant: OffsetDateTime) -> Option<DateTime<Tz>> {
        let utc = DateTime::from_timestamp(instant.unix_timestamp(), instant.nanosecond())?;
        Some(utc.with_timezone(&self.timezone))
    }
}

pub(crate) fn chrono_to_offset<Z: TimeZone>(
    value: &DateTime<Z>,
) -> Result<OffsetDateTime, CoreError> {
    let nanos = value
        .timestamp_nanos_opt()
        .ok_or_else(|| CoreError::TimeConversion {
            operation: String::from("instant out of range"),
        })?;
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(nanos)).map_err(|e| {
        CoreError::TimeConversion {
            operation: e.to_string(),
        }
    })
}

fn time_date_to_chrono(date: Date) -> Result<NaiveDate, CoreError> {
    NaiveDate::from_ymd_opt(
        date.year(),
        u32::from(u8::from(date.month())),
        u32::from(date.day()),
    )
    .ok_or_else(|| CoreError::TimeConversion {
        operation: format!("convert date {date}"),
    })
}

fn chrono_date_to_time(date: NaiveDate) -> Option<Date> {
    let month = Month::try_from(u8::try_from(date.month()).ok()?).ok()?;
    let day = u8::try_from(date.day()).ok()?;
    Date::from_calendar_date(date.year(), month, day).ok()
}
