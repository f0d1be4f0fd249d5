// SPDX-License-Identifier: MIT

//! Schedulable sauna sessions.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A schedulable session. `date` is a calendar day and the times are
/// wall-clock time-of-day values stored independently of the date.
///
/// The confirmed-booking count for a slot is derived, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TimeSlot {
    pub id: i64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub capacity: i64,
    /// Optional label, e.g. "Women only".
    pub slot_type: Option<String>,
    pub description: Option<String>,
    pub is_cancelled: bool,
}
