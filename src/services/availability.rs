// SPDX-License-Identifier: MIT

//! Slot availability: is a slot bookable right now?

use crate::models::TimeSlot;
use crate::time_utils::slot_start_instant;
use chrono::NaiveDateTime;

/// Verdict on whether a slot admits new bookings.
///
/// Only `Available` does. A member already holding a confirmed booking
/// on a `Full` slot can still view and cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    Cancelled,
    Past,
    Full,
}

/// Evaluate a slot against the current time and its confirmed-booking
/// count. Precedence: Cancelled > Past > Full.
pub fn availability(slot: &TimeSlot, booked_count: i64, now: NaiveDateTime) -> Availability {
    if slot.is_cancelled {
        return Availability::Cancelled;
    }

    if slot_start_instant(slot.date, slot.start_time) < now {
        return Availability::Past;
    }

    if booked_count >= slot.capacity {
        return Availability::Full;
    }

    Availability::Available
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn slot(date: &str, start: &str, capacity: i64, cancelled: bool) -> TimeSlot {
        TimeSlot {
            id: 1,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            start_time: NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
            end_time: NaiveTime::parse_from_str("23:00", "%H:%M").unwrap(),
            capacity,
            slot_type: None,
            description: None,
            is_cancelled: cancelled,
        }
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn test_future_slot_with_room_is_available() {
        let s = slot("2026-04-16", "18:00", 5, false);
        assert_eq!(
            availability(&s, 4, at("2026-04-15 12:00")),
            Availability::Available
        );
    }

    #[test]
    fn test_cancelled_wins_over_everything() {
        // Cancelled, in the past, and over capacity: cancelled reported
        let s = slot("2026-04-10", "18:00", 1, true);
        assert_eq!(
            availability(&s, 5, at("2026-04-15 12:00")),
            Availability::Cancelled
        );
    }

    #[test]
    fn test_past_wins_over_full() {
        let s = slot("2026-04-10", "18:00", 1, false);
        assert_eq!(
            availability(&s, 1, at("2026-04-15 12:00")),
            Availability::Past
        );
    }

    #[test]
    fn test_today_earlier_start_time_is_past() {
        let s = slot("2026-04-15", "09:00", 5, false);
        assert_eq!(
            availability(&s, 0, at("2026-04-15 12:00")),
            Availability::Past
        );
    }

    #[test]
    fn test_today_later_start_time_is_not_past() {
        let s = slot("2026-04-15", "18:00", 5, false);
        assert_eq!(
            availability(&s, 0, at("2026-04-15 12:00")),
            Availability::Available
        );
    }

    #[test]
    fn test_at_capacity_is_full() {
        let s = slot("2026-04-16", "18:00", 2, false);
        assert_eq!(
            availability(&s, 2, at("2026-04-15 12:00")),
            Availability::Full
        );
    }
}
