// SPDX-License-Identifier: MIT

//! Membership plan catalog entries.
//!
//! Plans are immutable once referenced by a membership; pricing and
//! terms are snapshotted at purchase (purchase flow lives elsewhere).

use serde::{Deserialize, Serialize};

/// A catalog entry describing what a membership grants.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MembershipPlan {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub plan_type: PlanType,
    pub price_cents: i64,
    /// Monthly credit allowance (subscription only). `None` = unlimited.
    pub credits_per_month: Option<i64>,
    /// Total credit allowance (punch card only).
    pub total_credits: Option<i64>,
    pub validity_months: Option<i64>,
    pub minimum_commitment_months: Option<i64>,
    pub auto_renew: bool,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PlanType {
    Subscription,
    PunchCard,
}
