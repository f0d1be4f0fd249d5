// SPDX-License-Identifier: MIT

//! Entitlement evaluation: does a membership grant a credit right now?
//!
//! Credit consumption is computed on demand from the booking ledger
//! rather than kept as a mutable counter, so a cancellation simply
//! drops out of future counts. The cost is one count query per booking
//! attempt.

use crate::db::queries;
use crate::error::AppError;
use crate::models::PlanType;
use crate::time_utils::month_window;
use chrono::NaiveDateTime;
use sqlx::SqliteConnection;

/// Why a credit was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditDenial {
    NoActiveMembership,
    MonthlyCreditsExhausted,
    PunchCardExhausted,
    InvalidPlanConfiguration,
}

impl From<CreditDenial> for AppError {
    fn from(denial: CreditDenial) -> Self {
        match denial {
            CreditDenial::NoActiveMembership => AppError::NoActiveMembership,
            CreditDenial::MonthlyCreditsExhausted => AppError::MonthlyCreditsExhausted,
            CreditDenial::PunchCardExhausted => AppError::PunchCardExhausted,
            CreditDenial::InvalidPlanConfiguration => AppError::InvalidPlanConfiguration,
        }
    }
}

/// Outcome of a credit check. `membership_id` is set whenever an
/// eligible membership was found, even on denial, so callers can report
/// which membership was checked.
#[derive(Debug, Clone, Copy)]
pub struct CreditCheck {
    pub membership_id: Option<i64>,
    pub denial: Option<CreditDenial>,
}

impl CreditCheck {
    pub fn allowed(&self) -> bool {
        self.denial.is_none()
    }

    fn denied(membership_id: Option<i64>, denial: CreditDenial) -> Self {
        Self {
            membership_id,
            denial: Some(denial),
        }
    }

    fn granted(membership_id: i64) -> Self {
        Self {
            membership_id: Some(membership_id),
            denial: None,
        }
    }
}

/// Check whether the user's current membership grants a credit at `now`.
pub async fn check_credits(
    conn: &mut SqliteConnection,
    user_id: i64,
    now: NaiveDateTime,
) -> Result<CreditCheck, AppError> {
    let Some(membership) = queries::current_membership(conn, user_id, now).await? else {
        return Ok(CreditCheck::denied(None, CreditDenial::NoActiveMembership));
    };

    let plan = queries::get_plan(conn, membership.plan_id)
        .await?
        .ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "membership {} references missing plan {}",
                membership.id,
                membership.plan_id
            ))
        })?;

    match (plan.plan_type, plan.credits_per_month, plan.total_credits) {
        // Subscription with unlimited credits
        (PlanType::Subscription, None, _) => Ok(CreditCheck::granted(membership.id)),

        // Subscription with limited monthly credits: count confirmed
        // bookings charged to this membership in the calendar month
        (PlanType::Subscription, Some(per_month), _) => {
            let (month_start, month_end) = month_window(now);
            let used = queries::count_confirmed_for_membership_between(
                conn,
                membership.id,
                month_start,
                month_end,
            )
            .await?;

            if used >= per_month {
                Ok(CreditCheck::denied(
                    Some(membership.id),
                    CreditDenial::MonthlyCreditsExhausted,
                ))
            } else {
                Ok(CreditCheck::granted(membership.id))
            }
        }

        // Punch card: all-time count against the card's total
        (PlanType::PunchCard, _, Some(total)) => {
            let used = queries::count_confirmed_for_membership(conn, membership.id).await?;

            if used >= total {
                Ok(CreditCheck::denied(
                    Some(membership.id),
                    CreditDenial::PunchCardExhausted,
                ))
            } else {
                Ok(CreditCheck::granted(membership.id))
            }
        }

        // Should not occur given catalog invariants
        (PlanType::PunchCard, _, None) => Ok(CreditCheck::denied(
            Some(membership.id),
            CreditDenial::InvalidPlanConfiguration,
        )),
    }
}
