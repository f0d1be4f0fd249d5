// SPDX-License-Identifier: MIT

//! Booking rows: the entitlement claim of a member on a slot.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// At most one booking row exists per `(user_id, timeslot_id)` pair,
/// ever. Cancelling flips the row to `cancelled` (preserving history);
/// a later rebook of the same pair reuses the row rather than inserting
/// a duplicate, re-charging a freshly evaluated membership.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub timeslot_id: i64,
    /// Membership charged at (re-)confirmation time.
    pub membership_id: i64,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
    pub cancelled_at: Option<NaiveDateTime>,
    pub cancellation_reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}
