// SPDX-License-Identifier: MIT

//! Shared helpers for civil date/time arithmetic.
//!
//! Slots store a calendar day and wall-clock times separately; bookings
//! and memberships are compared in naive local civil time throughout.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

/// Absolute start instant of a slot: the calendar day at local midnight
/// plus the wall-clock time-of-day.
pub fn slot_start_instant(date: NaiveDate, start_time: NaiveTime) -> NaiveDateTime {
    date.and_time(start_time)
}

/// Calendar-month window containing `now`: first-of-month 00:00
/// (inclusive) to first-of-next-month 00:00 (exclusive).
pub fn month_window(now: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let start = NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
        .unwrap_or_else(|| now.date())
        .and_time(NaiveTime::MIN);

    let (next_year, next_month) = if now.month() == 12 {
        (now.year() + 1, 1)
    } else {
        (now.year(), now.month() + 1)
    };
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| now.date())
        .and_time(NaiveTime::MIN);

    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_month_window_mid_month() {
        let (start, end) = month_window(dt("2026-04-15 13:45:00"));
        assert_eq!(start, dt("2026-04-01 00:00:00"));
        assert_eq!(end, dt("2026-05-01 00:00:00"));
    }

    #[test]
    fn test_month_window_december_rolls_over() {
        let (start, end) = month_window(dt("2026-12-31 23:59:59"));
        assert_eq!(start, dt("2026-12-01 00:00:00"));
        assert_eq!(end, dt("2027-01-01 00:00:00"));
    }

    #[test]
    fn test_month_window_first_instant_is_inclusive() {
        let (start, _) = month_window(dt("2026-02-01 00:00:00"));
        assert_eq!(start, dt("2026-02-01 00:00:00"));
    }

    #[test]
    fn test_slot_start_instant() {
        let date = NaiveDate::from_ymd_opt(2026, 4, 15).unwrap();
        let time = NaiveTime::from_hms_opt(18, 30, 0).unwrap();
        assert_eq!(slot_start_instant(date, time), dt("2026-04-15 18:30:00"));
    }
}
