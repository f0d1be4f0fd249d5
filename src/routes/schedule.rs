// SPDX-License-Identifier: MIT

//! Schedule endpoint: the availability view for the booking UI.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::services;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/schedule", get(get_schedule))
}

#[derive(Deserialize)]
struct ScheduleQuery {
    /// Inclusive start date (YYYY-MM-DD)
    from: Option<NaiveDate>,
    /// Inclusive end date (YYYY-MM-DD)
    to: Option<NaiveDate>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub time_slots: Vec<TimeSlotView>,
    /// timeslotId -> bookingId for the requesting user's confirmed bookings
    pub user_bookings: HashMap<i64, i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotView {
    pub id: i64,
    pub date: NaiveDate,
    pub start_time: chrono::NaiveTime,
    pub end_time: chrono::NaiveTime,
    pub capacity: i64,
    pub booked_count: i64,
    #[serde(rename = "type")]
    pub slot_type: Option<String>,
    pub description: Option<String>,
    pub is_cancelled: bool,
}

/// Slots with derived occupancy, plus which ones the user holds.
async fn get_schedule(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ScheduleQuery>,
) -> Result<Json<ScheduleResponse>> {
    let view = services::schedule_view(&state.db, user.user_id, params.from, params.to).await?;

    let time_slots = view
        .slots
        .into_iter()
        .map(|p| TimeSlotView {
            id: p.slot.id,
            date: p.slot.date,
            start_time: p.slot.start_time,
            end_time: p.slot.end_time,
            capacity: p.slot.capacity,
            booked_count: p.booked_count,
            slot_type: p.slot.slot_type,
            description: p.slot.description,
            is_cancelled: p.slot.is_cancelled,
        })
        .collect();

    Ok(Json(ScheduleResponse {
        time_slots,
        user_bookings: view.my_bookings,
    }))
}
