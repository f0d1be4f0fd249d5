// SPDX-License-Identifier: MIT

//! Typed query functions.
//!
//! All functions take `&mut SqliteConnection` so callers choose the
//! execution context: a plain pool connection for reads, or a
//! transaction for the booking write paths.

use crate::models::{
    Booking, Membership, MembershipPlan, MembershipStatus, PlanType, TimeSlot, User, UserRole,
};
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::SqliteConnection;

// ─── Slots ───────────────────────────────────────────────────

pub async fn get_slot(
    conn: &mut SqliteConnection,
    slot_id: i64,
) -> Result<Option<TimeSlot>, sqlx::Error> {
    sqlx::query_as::<_, TimeSlot>("SELECT * FROM time_slots WHERE id = ?")
        .bind(slot_id)
        .fetch_optional(conn)
        .await
}

/// Slots in an optional date range, ordered for the schedule view.
pub async fn list_slots(
    conn: &mut SqliteConnection,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Vec<TimeSlot>, sqlx::Error> {
    sqlx::query_as::<_, TimeSlot>(
        "SELECT * FROM time_slots \
         WHERE (?1 IS NULL OR date >= ?1) AND (?2 IS NULL OR date <= ?2) \
         ORDER BY date ASC, start_time ASC",
    )
    .bind(from)
    .bind(to)
    .fetch_all(conn)
    .await
}

/// Number of confirmed bookings holding a seat in the slot.
pub async fn count_confirmed_for_slot(
    conn: &mut SqliteConnection,
    slot_id: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM bookings WHERE timeslot_id = ? AND status = 'confirmed'",
    )
    .bind(slot_id)
    .fetch_one(conn)
    .await
}

/// Confirmed-booking counts grouped by slot (for the schedule view).
pub async fn confirmed_counts_by_slot(
    conn: &mut SqliteConnection,
) -> Result<Vec<(i64, i64)>, sqlx::Error> {
    sqlx::query_as::<_, (i64, i64)>(
        "SELECT timeslot_id, COUNT(*) FROM bookings \
         WHERE status = 'confirmed' GROUP BY timeslot_id",
    )
    .fetch_all(conn)
    .await
}

// ─── Memberships ─────────────────────────────────────────────

/// The single membership eligible for new bookings: active, within its
/// validity window at `now`, most recent `created_at` wins.
pub async fn current_membership(
    conn: &mut SqliteConnection,
    user_id: i64,
    now: NaiveDateTime,
) -> Result<Option<Membership>, sqlx::Error> {
    sqlx::query_as::<_, Membership>(
        "SELECT * FROM memberships \
         WHERE user_id = ?1 AND status = 'active' AND starts_at <= ?2 \
           AND (expires_at IS NULL OR expires_at >= ?2) \
         ORDER BY created_at DESC LIMIT 1",
    )
    .bind(user_id)
    .bind(now)
    .fetch_optional(conn)
    .await
}

pub async fn get_plan(
    conn: &mut SqliteConnection,
    plan_id: i64,
) -> Result<Option<MembershipPlan>, sqlx::Error> {
    sqlx::query_as::<_, MembershipPlan>("SELECT * FROM membership_plans WHERE id = ?")
        .bind(plan_id)
        .fetch_optional(conn)
        .await
}

pub async fn count_plans(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM membership_plans")
        .fetch_one(conn)
        .await
}

/// All-time confirmed bookings charged to a membership (punch cards).
pub async fn count_confirmed_for_membership(
    conn: &mut SqliteConnection,
    membership_id: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM bookings WHERE membership_id = ? AND status = 'confirmed'",
    )
    .bind(membership_id)
    .fetch_one(conn)
    .await
}

/// Confirmed bookings charged to a membership created in
/// `[start, end)` (monthly subscription credits).
pub async fn count_confirmed_for_membership_between(
    conn: &mut SqliteConnection,
    membership_id: i64,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM bookings \
         WHERE membership_id = ? AND status = 'confirmed' \
           AND created_at >= ? AND created_at < ?",
    )
    .bind(membership_id)
    .bind(start)
    .bind(end)
    .fetch_one(conn)
    .await
}

// ─── Bookings ────────────────────────────────────────────────

pub async fn get_booking(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<Option<Booking>, sqlx::Error> {
    sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?")
        .bind(booking_id)
        .fetch_optional(conn)
        .await
}

pub async fn get_booking_for_user_slot(
    conn: &mut SqliteConnection,
    user_id: i64,
    slot_id: i64,
) -> Result<Option<Booking>, sqlx::Error> {
    sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE user_id = ? AND timeslot_id = ?")
        .bind(user_id)
        .bind(slot_id)
        .fetch_optional(conn)
        .await
}

/// The requesting user's confirmed bookings as `(timeslot_id, booking_id)`
/// pairs, for the schedule view.
pub async fn user_confirmed_bookings(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<(i64, i64)>, sqlx::Error> {
    sqlx::query_as::<_, (i64, i64)>(
        "SELECT timeslot_id, id FROM bookings WHERE user_id = ? AND status = 'confirmed'",
    )
    .bind(user_id)
    .fetch_all(conn)
    .await
}

pub async fn insert_booking(
    conn: &mut SqliteConnection,
    user_id: i64,
    slot_id: i64,
    membership_id: i64,
    now: NaiveDateTime,
) -> Result<Booking, sqlx::Error> {
    sqlx::query_as::<_, Booking>(
        "INSERT INTO bookings (user_id, timeslot_id, membership_id, status, created_at) \
         VALUES (?, ?, ?, 'confirmed', ?) \
         RETURNING *",
    )
    .bind(user_id)
    .bind(slot_id)
    .bind(membership_id)
    .bind(now)
    .fetch_one(conn)
    .await
}

/// Flip an existing (cancelled) row back to confirmed, charging a
/// freshly evaluated membership. `created_at` is left untouched.
pub async fn reconfirm_booking(
    conn: &mut SqliteConnection,
    booking_id: i64,
    membership_id: i64,
) -> Result<Booking, sqlx::Error> {
    sqlx::query_as::<_, Booking>(
        "UPDATE bookings \
         SET status = 'confirmed', membership_id = ?, cancelled_at = NULL, \
             cancellation_reason = NULL \
         WHERE id = ? \
         RETURNING *",
    )
    .bind(membership_id)
    .bind(booking_id)
    .fetch_one(conn)
    .await
}

pub async fn cancel_booking(
    conn: &mut SqliteConnection,
    booking_id: i64,
    now: NaiveDateTime,
    reason: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE bookings \
         SET status = 'cancelled', cancelled_at = ?, cancellation_reason = ? \
         WHERE id = ?",
    )
    .bind(now)
    .bind(reason)
    .bind(booking_id)
    .execute(conn)
    .await?;
    Ok(())
}

// ─── Fixtures (seeding and tests) ────────────────────────────

pub async fn get_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(conn)
        .await
}

pub async fn insert_user(
    conn: &mut SqliteConnection,
    email: &str,
    first_name: &str,
    role: UserRole,
    now: NaiveDateTime,
) -> Result<i64, sqlx::Error> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (email, first_name, role, created_at) \
         VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(email)
    .bind(first_name)
    .bind(role)
    .bind(now)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

/// Parameters for a new catalog plan.
pub struct NewPlan {
    pub name: &'static str,
    pub description: &'static str,
    pub plan_type: PlanType,
    pub price_cents: i64,
    pub credits_per_month: Option<i64>,
    pub total_credits: Option<i64>,
    pub validity_months: Option<i64>,
    pub minimum_commitment_months: Option<i64>,
    pub auto_renew: bool,
}

pub async fn insert_plan(
    conn: &mut SqliteConnection,
    plan: &NewPlan,
) -> Result<i64, sqlx::Error> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO membership_plans \
         (name, description, plan_type, price_cents, credits_per_month, total_credits, \
          validity_months, minimum_commitment_months, auto_renew, is_active) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 1) RETURNING id",
    )
    .bind(plan.name)
    .bind(plan.description)
    .bind(plan.plan_type)
    .bind(plan.price_cents)
    .bind(plan.credits_per_month)
    .bind(plan.total_credits)
    .bind(plan.validity_months)
    .bind(plan.minimum_commitment_months)
    .bind(plan.auto_renew)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

pub async fn insert_membership(
    conn: &mut SqliteConnection,
    user_id: i64,
    plan_id: i64,
    status: MembershipStatus,
    starts_at: NaiveDateTime,
    expires_at: Option<NaiveDateTime>,
    created_at: NaiveDateTime,
) -> Result<i64, sqlx::Error> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO memberships (user_id, plan_id, status, starts_at, expires_at, created_at) \
         VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(user_id)
    .bind(plan_id)
    .bind(status)
    .bind(starts_at)
    .bind(expires_at)
    .bind(created_at)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

pub async fn insert_slot(
    conn: &mut SqliteConnection,
    slot: &TimeSlot,
) -> Result<i64, sqlx::Error> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO time_slots \
         (date, start_time, end_time, capacity, slot_type, description, is_cancelled) \
         VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(slot.date)
    .bind(slot.start_time)
    .bind(slot.end_time)
    .bind(slot.capacity)
    .bind(&slot.slot_type)
    .bind(&slot.description)
    .bind(slot.is_cancelled)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

/// Backdate a booking's `created_at` (test fixture for credit-window
/// scenarios; `created_at` is otherwise only written at insert).
pub async fn set_booking_created_at(
    conn: &mut SqliteConnection,
    booking_id: i64,
    created_at: NaiveDateTime,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE bookings SET created_at = ? WHERE id = ?")
        .bind(created_at)
        .bind(booking_id)
        .execute(conn)
        .await?;
    Ok(())
}
