// SPDX-License-Identifier: MIT

//! Membership instances owned by users.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An instance of a plan owned by exactly one user.
///
/// A user may hold several memberships over time; only the most recently
/// created membership that is active and within its validity window is
/// eligible for new bookings. Status transitions happen externally
/// (payment events, expiry); the booking engine never mutates a
/// membership, credit usage is counted from confirmed bookings.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Membership {
    pub id: i64,
    pub user_id: i64,
    pub plan_id: i64,
    pub status: MembershipStatus,
    pub starts_at: NaiveDateTime,
    /// `None` = never expires.
    pub expires_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    Active,
    Expired,
    PaymentPending,
    Suspended,
    Cancelled,
}
