// SPDX-License-Identifier: MIT

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use sauna_booking::config::Config;
use sauna_booking::db::{queries, Db};
use sauna_booking::middleware::auth::create_jwt;
use sauna_booking::models::{MembershipStatus, PlanType, TimeSlot, UserRole};
use sauna_booking::routes::create_router;
use sauna_booking::AppState;
use std::sync::Arc;
use tower::ServiceExt;

/// Create a test app backed by an in-memory database.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = Db::connect_in_memory()
        .await
        .expect("Failed to create in-memory database");

    let state = Arc::new(AppState { config, db });
    (create_router(state.clone()), state)
}

/// Mint a session token for a member.
#[allow(dead_code)]
pub fn session_token(state: &AppState, user_id: i64) -> String {
    create_jwt(user_id, UserRole::Member, &state.config.jwt_signing_key)
        .expect("Failed to create test JWT")
}

#[allow(dead_code)]
pub fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

// ─── Fixtures ────────────────────────────────────────────────

#[allow(dead_code)]
pub async fn create_user(db: &Db, email: &str) -> i64 {
    let mut conn = db.pool().acquire().await.unwrap();
    queries::insert_user(&mut conn, email, "Test", UserRole::Member, local_now())
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn create_subscription_plan(db: &Db, credits_per_month: Option<i64>) -> i64 {
    let mut conn = db.pool().acquire().await.unwrap();
    queries::insert_plan(
        &mut conn,
        &queries::NewPlan {
            name: "Test Subscription",
            description: "Test plan",
            plan_type: PlanType::Subscription,
            price_cents: 2500,
            credits_per_month,
            total_credits: None,
            validity_months: None,
            minimum_commitment_months: Some(1),
            auto_renew: true,
        },
    )
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_punch_card_plan(db: &Db, total_credits: Option<i64>) -> i64 {
    let mut conn = db.pool().acquire().await.unwrap();
    queries::insert_plan(
        &mut conn,
        &queries::NewPlan {
            name: "Test Punch Card",
            description: "Test plan",
            plan_type: PlanType::PunchCard,
            price_cents: 7500,
            credits_per_month: None,
            total_credits,
            validity_months: Some(3),
            minimum_commitment_months: None,
            auto_renew: false,
        },
    )
    .await
    .unwrap()
}

/// Active membership started an hour ago, never expiring.
#[allow(dead_code)]
pub async fn create_membership(db: &Db, user_id: i64, plan_id: i64) -> i64 {
    create_membership_with(
        db,
        user_id,
        plan_id,
        MembershipStatus::Active,
        local_now() - Duration::hours(1),
        None,
        local_now(),
    )
    .await
}

#[allow(dead_code)]
pub async fn create_membership_with(
    db: &Db,
    user_id: i64,
    plan_id: i64,
    status: MembershipStatus,
    starts_at: NaiveDateTime,
    expires_at: Option<NaiveDateTime>,
    created_at: NaiveDateTime,
) -> i64 {
    let mut conn = db.pool().acquire().await.unwrap();
    queries::insert_membership(
        &mut conn,
        user_id,
        plan_id,
        status,
        starts_at,
        expires_at,
        created_at,
    )
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_slot(db: &Db, date: NaiveDate, start: &str, capacity: i64) -> i64 {
    create_slot_with(db, date, start, capacity, false).await
}

#[allow(dead_code)]
pub async fn create_slot_with(
    db: &Db,
    date: NaiveDate,
    start: &str,
    capacity: i64,
    is_cancelled: bool,
) -> i64 {
    let start_time = NaiveTime::parse_from_str(start, "%H:%M").unwrap();
    let mut conn = db.pool().acquire().await.unwrap();
    queries::insert_slot(
        &mut conn,
        &TimeSlot {
            id: 0,
            date,
            start_time,
            end_time: start_time + Duration::hours(1),
            capacity,
            slot_type: None,
            description: None,
            is_cancelled,
        },
    )
    .await
    .unwrap()
}

#[allow(dead_code)]
pub fn tomorrow() -> NaiveDate {
    chrono::Local::now().date_naive() + Duration::days(1)
}

#[allow(dead_code)]
pub fn yesterday() -> NaiveDate {
    chrono::Local::now().date_naive() - Duration::days(1)
}

// ─── Request helpers ─────────────────────────────────────────

/// POST /api/bookings with a bearer token, returning status + JSON body.
#[allow(dead_code)]
pub async fn post_booking(
    app: &axum::Router,
    token: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/bookings")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    (status, body_json(response).await)
}

/// DELETE /api/bookings/{id}, with an optional reason body.
#[allow(dead_code)]
pub async fn delete_booking(
    app: &axum::Router,
    token: &str,
    booking_id: i64,
    reason: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder()
        .method("DELETE")
        .uri(format!("/api/bookings/{booking_id}"))
        .header(header::AUTHORIZATION, format!("Bearer {token}"));

    let body = match reason {
        Some(r) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::json!({ "reason": r }).to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();

    let status = response.status();
    (status, body_json(response).await)
}

#[allow(dead_code)]
pub async fn get_authed(
    app: &axum::Router,
    token: &str,
    uri: &str,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    (status, body_json(response).await)
}

#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    }
}
