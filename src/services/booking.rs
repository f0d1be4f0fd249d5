// SPDX-License-Identifier: MIT

//! Booking state machine: create, re-confirm, cancel.
//!
//! Each operation runs inside a single transaction. Capacity and prior
//! booking state are re-read inside the transaction, and the unique
//! `(user_id, timeslot_id)` constraint is the final arbiter: a
//! concurrent duplicate insert surfaces as `AlreadyBooked` instead of a
//! second row. A failed transaction leaves no partial state.

use crate::db::{queries, Db};
use crate::error::AppError;
use crate::models::{Booking, BookingStatus};
use crate::services::availability::{availability, Availability};
use crate::services::entitlement::check_credits;
use chrono::NaiveDateTime;

/// Book a slot for a member.
///
/// Denial order: missing slot, cancelled slot, past slot, an existing
/// confirmed booking (before capacity, so a holder on a full slot sees
/// `AlreadyBooked` rather than `SlotFull`), capacity, then credits.
pub async fn book(
    db: &Db,
    user_id: i64,
    timeslot_id: i64,
    now: NaiveDateTime,
) -> Result<Booking, AppError> {
    let mut tx = db.begin().await?;

    let slot = queries::get_slot(&mut *tx, timeslot_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Time slot not found".to_string()))?;

    let existing = queries::get_booking_for_user_slot(&mut *tx, user_id, timeslot_id).await?;
    let already_confirmed = matches!(&existing, Some(b) if b.status == BookingStatus::Confirmed);

    let booked_count = queries::count_confirmed_for_slot(&mut *tx, timeslot_id).await?;
    match availability(&slot, booked_count, now) {
        Availability::Cancelled => return Err(AppError::SlotCancelled),
        Availability::Past => return Err(AppError::SlotInPast),
        // A holder re-booking a full slot gets AlreadyBooked, not Full
        Availability::Full if !already_confirmed => return Err(AppError::SlotFull),
        _ => {}
    }

    if already_confirmed {
        return Err(AppError::AlreadyBooked);
    }

    let credit = check_credits(&mut *tx, user_id, now).await?;
    let membership_id = match (credit.denial, credit.membership_id) {
        (Some(denial), _) => return Err(denial.into()),
        (None, Some(id)) => id,
        (None, None) => {
            return Err(AppError::Internal(anyhow::anyhow!(
                "credit check allowed without a membership"
            )))
        }
    };

    // Create, or reuse a previously cancelled row for this (user, slot)
    let booking = match existing {
        Some(cancelled) => queries::reconfirm_booking(&mut *tx, cancelled.id, membership_id).await,
        None => queries::insert_booking(&mut *tx, user_id, timeslot_id, membership_id, now).await,
    }
    .map_err(|e| {
        if matches!(&e, sqlx::Error::Database(db_err) if db_err.is_unique_violation()) {
            AppError::AlreadyBooked
        } else {
            AppError::Database(e)
        }
    })?;

    tx.commit().await?;

    tracing::info!(
        user_id,
        timeslot_id,
        booking_id = booking.id,
        membership_id,
        "Booking confirmed"
    );

    Ok(booking)
}

/// Cancel a confirmed booking owned by `user_id`.
///
/// No credit bookkeeping happens here: credits are recomputed from
/// confirmed-row counts, so the cancelled row simply stops counting.
pub async fn cancel(
    db: &Db,
    booking_id: i64,
    user_id: i64,
    reason: Option<String>,
    now: NaiveDateTime,
) -> Result<(), AppError> {
    let mut tx = db.begin().await?;

    let booking = queries::get_booking(&mut *tx, booking_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    if booking.user_id != user_id {
        return Err(AppError::Forbidden);
    }

    if booking.status != BookingStatus::Confirmed {
        return Err(AppError::BookingNotActive);
    }

    queries::cancel_booking(&mut *tx, booking_id, now, reason.as_deref()).await?;

    tx.commit().await?;

    tracing::info!(user_id, booking_id, "Booking cancelled");

    Ok(())
}
