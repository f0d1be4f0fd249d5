// SPDX-License-Identifier: MIT

//! Booking endpoints: claim a slot, cancel a claim.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::services;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{delete, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/bookings", post(create_booking))
        .route("/api/bookings/{id}", delete(cancel_booking))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub success: bool,
    pub booking: BookingSummary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub id: i64,
    pub timeslot_id: i64,
    pub status: crate::models::BookingStatus,
}

/// Book a slot for the authenticated member.
///
/// The body is parsed by hand so a missing or non-numeric `timeslotId`
/// yields a field-level 400 rather than a generic rejection.
async fn create_booking(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<BookingResponse>> {
    let timeslot_id = body
        .get("timeslotId")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| AppError::Validation("Valid time slot is required".to_string()))?;

    let now = chrono::Local::now().naive_local();
    let booking = services::book(&state.db, user.user_id, timeslot_id, now).await?;

    Ok(Json(BookingResponse {
        success: true,
        booking: BookingSummary {
            id: booking.id,
            timeslot_id: booking.timeslot_id,
            status: booking.status,
        },
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelBookingRequest {
    pub reason: Option<String>,
}

#[derive(Serialize)]
pub struct CancelBookingResponse {
    pub success: bool,
}

/// Cancel one of the authenticated member's bookings. The body with an
/// optional free-text reason may be omitted entirely.
async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(booking_id): Path<i64>,
    body: Option<Json<CancelBookingRequest>>,
) -> Result<Json<CancelBookingResponse>> {
    let reason = body.and_then(|Json(b)| b.reason).filter(|r| !r.is_empty());

    let now = chrono::Local::now().naive_local();
    services::cancel(&state.db, booking_id, user.user_id, reason, now).await?;

    Ok(Json(CancelBookingResponse { success: true }))
}
