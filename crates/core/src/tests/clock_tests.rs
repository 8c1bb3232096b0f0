// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::create_test_clock;
use crate::{CoreError, ReportingClock, TimeWindow};
use time::macros::{date, datetime};
use time::{Duration, UtcOffset};

#[test]
fn test_week_boundary_is_seven_days_back() {
    let clock = create_test_clock();
    assert_eq!(
        TimeWindow::Week.boundary(&clock),
        clock.now() - Duration::days(7)
    );
}

#[test]
fn test_month_boundary_is_one_calendar_month_back() {
    let clock = create_test_clock();
    assert_eq!(
        TimeWindow::Month.boundary(&clock),
        datetime!(2024-02-15 12:00 UTC)
    );
}

#[test]
fn test_month_boundary_clamps_to_month_end() {
    let clock = ReportingClock::utc(datetime!(2024-03-31 08:00 UTC));
    assert_eq!(
        TimeWindow::Month.boundary(&clock),
        datetime!(2024-02-29 08:00 UTC)
    );
}

#[test]
fn test_current_period_in_zone() {
    let now = datetime!(2024-12-31 22:30 UTC);
    assert_eq!(ReportingClock::utc(now).current_period().key(), "2024-12");

    let cairo = ReportingClock::new(now, chrono_tz::Africa::Cairo);
    assert_eq!(cairo.current_period().key(), "2025-01");
}

#[test]
fn test_day_bounds_in_zone() {
    let clock = ReportingClock::new(
        datetime!(2024-03-15 12:00 UTC),
        chrono_tz::Africa::Cairo,
    );
    let start = clock.start_of_day(date!(2024 - 03 - 10)).unwrap();
    let end = clock.end_of_day(date!(2024 - 03 - 10)).unwrap();

    assert_eq!(start, datetime!(2024-03-10 00:00 +2).to_offset(UtcOffset::UTC));
    assert_eq!(end - start, Duration::days(1) - Duration::nanoseconds(1));
}

#[test]
fn test_parse_timezone() {
    assert!(ReportingClock::parse_timezone("Africa/Cairo").is_ok());
    assert_eq!(
        ReportingClock::parse_timezone("Mars/Olympus"),
        Err(CoreError::InvalidTimezone(String::from("Mars/Olympus")))
    );
}
