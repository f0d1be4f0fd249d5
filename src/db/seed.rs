// SPDX-License-Identifier: MIT

//! Plan catalog seeding.

use crate::db::{queries, Db};
use crate::error::AppError;
use crate::models::PlanType;

/// The standard plan catalog, inserted when the plans table is empty.
fn catalog() -> Vec<queries::NewPlan> {
    use PlanType::*;
    vec![
        queries::NewPlan {
            name: "Trial",
            description: "Free trial membership for new members. Unlimited sessions for 1 month.",
            plan_type: Subscription,
            price_cents: 0,
            credits_per_month: None, // unlimited
            total_credits: None,
            validity_months: Some(1),
            minimum_commitment_months: Some(1),
            auto_renew: false,
        },
        queries::NewPlan {
            name: "2 Credits Monthly",
            description: "Monthly subscription with 2 sauna sessions per month.",
            plan_type: Subscription,
            price_cents: 2500,
            credits_per_month: Some(2),
            total_credits: None,
            validity_months: None,
            minimum_commitment_months: Some(3),
            auto_renew: true,
        },
        queries::NewPlan {
            name: "4 Credits Monthly",
            description: "Monthly subscription with 4 sauna sessions per month.",
            plan_type: Subscription,
            price_cents: 4000,
            credits_per_month: Some(4),
            total_credits: None,
            validity_months: None,
            minimum_commitment_months: Some(2),
            auto_renew: true,
        },
        queries::NewPlan {
            name: "8 Credits Monthly",
            description: "Monthly subscription with 8 sauna sessions per month.",
            plan_type: Subscription,
            price_cents: 6400,
            credits_per_month: Some(8),
            total_credits: None,
            validity_months: None,
            minimum_commitment_months: Some(1),
            auto_renew: true,
        },
        queries::NewPlan {
            name: "Unlimited Monthly",
            description: "Monthly subscription with unlimited sauna sessions.",
            plan_type: Subscription,
            price_cents: 8000,
            credits_per_month: None, // unlimited
            total_credits: None,
            validity_months: None,
            minimum_commitment_months: Some(1),
            auto_renew: true,
        },
        queries::NewPlan {
            name: "Punch Card 5",
            description: "Punch card with 5 sessions. Valid for 3 months.",
            plan_type: PunchCard,
            price_cents: 7500,
            credits_per_month: None,
            total_credits: Some(5),
            validity_months: Some(3),
            minimum_commitment_months: None,
            auto_renew: false,
        },
        queries::NewPlan {
            name: "Punch Card 10",
            description: "Punch card with 10 sessions. Valid for 6 months.",
            plan_type: PunchCard,
            price_cents: 14000,
            credits_per_month: None,
            total_credits: Some(10),
            validity_months: Some(6),
            minimum_commitment_months: None,
            auto_renew: false,
        },
    ]
}

/// Insert the plan catalog if no plans exist yet.
pub async fn seed_plans(db: &Db) -> Result<(), AppError> {
    let mut conn = db.pool().acquire().await?;

    if queries::count_plans(&mut conn).await? > 0 {
        return Ok(());
    }

    let plans = catalog();
    for plan in &plans {
        queries::insert_plan(&mut conn, plan).await?;
    }

    tracing::info!(count = plans.len(), "Seeded membership plan catalog");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let db = Db::connect_in_memory().await.unwrap();

        seed_plans(&db).await.unwrap();
        seed_plans(&db).await.unwrap();

        let mut conn = db.pool().acquire().await.unwrap();
        let count = queries::count_plans(&mut conn).await.unwrap();
        assert_eq!(count, catalog().len() as i64);
    }
}
