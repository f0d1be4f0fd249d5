// SPDX-License-Identifier: MIT

//! Schedule projection: the client-facing availability view.
//!
//! Pure read-side aggregation, no business decisions: slots in a date
//! range with their derived confirmed-booking counts, plus the
//! requesting user's own confirmed bookings so the client can tell
//! "my booking" from "someone else's seat".

use crate::db::{queries, Db};
use crate::error::AppError;
use crate::models::TimeSlot;
use chrono::NaiveDate;
use std::collections::HashMap;

/// A slot together with its derived occupancy.
#[derive(Debug, Clone)]
pub struct ProjectedSlot {
    pub slot: TimeSlot,
    pub booked_count: i64,
}

/// The full schedule view for one requesting user.
#[derive(Debug, Clone)]
pub struct ScheduleView {
    /// Slots sorted by (date asc, start_time asc).
    pub slots: Vec<ProjectedSlot>,
    /// timeslot_id -> booking_id for the user's confirmed bookings.
    pub my_bookings: HashMap<i64, i64>,
}

/// Build the schedule view for `user_id`, optionally bounded by date.
pub async fn schedule_view(
    db: &Db,
    user_id: i64,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<ScheduleView, AppError> {
    let mut conn = db.pool().acquire().await?;

    let slots = queries::list_slots(&mut conn, from, to).await?;

    let counts: HashMap<i64, i64> = queries::confirmed_counts_by_slot(&mut conn)
        .await?
        .into_iter()
        .collect();

    let my_bookings: HashMap<i64, i64> = queries::user_confirmed_bookings(&mut conn, user_id)
        .await?
        .into_iter()
        .collect();

    let slots = slots
        .into_iter()
        .map(|slot| {
            let booked_count = counts.get(&slot.id).copied().unwrap_or(0);
            ProjectedSlot { slot, booked_count }
        })
        .collect();

    Ok(ScheduleView { slots, my_bookings })
}
