// SPDX-License-Identifier: MIT

//! Current-user profile endpoint with membership summary.

use crate::db::queries;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{MembershipStatus, PlanType, UserRole};
use crate::time_utils::month_window;
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/me", get(get_me))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub role: UserRole,
    pub membership: Option<MembershipSummary>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipSummary {
    pub plan_name: String,
    pub plan_type: PlanType,
    pub status: MembershipStatus,
    pub expires_at: Option<NaiveDateTime>,
    /// Confirmed bookings charged against the current allowance window
    /// (this calendar month for subscriptions, all-time for punch cards).
    pub credits_used: i64,
    /// `None` = unlimited.
    pub credits_remaining: Option<i64>,
}

/// Get the current user's profile and membership summary.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MeResponse>> {
    let mut conn = state.db.pool().acquire().await?;

    let profile = queries::get_user(&mut conn, user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?;

    let now = chrono::Local::now().naive_local();

    let membership = match queries::current_membership(&mut conn, user.user_id, now).await? {
        Some(membership) => {
            let plan = queries::get_plan(&mut conn, membership.plan_id)
                .await?
                .ok_or_else(|| {
                    AppError::Internal(anyhow::anyhow!(
                        "membership {} references missing plan {}",
                        membership.id,
                        membership.plan_id
                    ))
                })?;

            let (credits_used, allowance) = match plan.plan_type {
                PlanType::Subscription => {
                    let (start, end) = month_window(now);
                    let used = queries::count_confirmed_for_membership_between(
                        &mut conn,
                        membership.id,
                        start,
                        end,
                    )
                    .await?;
                    (used, plan.credits_per_month)
                }
                PlanType::PunchCard => {
                    let used =
                        queries::count_confirmed_for_membership(&mut conn, membership.id).await?;
                    (used, plan.total_credits)
                }
            };

            Some(MembershipSummary {
                plan_name: plan.name,
                plan_type: plan.plan_type,
                status: membership.status,
                expires_at: membership.expires_at,
                credits_used,
                credits_remaining: allowance.map(|total| (total - credits_used).max(0)),
            })
        }
        None => None,
    };

    Ok(Json(MeResponse {
        id: profile.id,
        email: profile.email,
        first_name: profile.first_name,
        last_name: profile.last_name,
        role: profile.role,
        membership,
    }))
}
