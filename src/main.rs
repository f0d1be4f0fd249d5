// SPDX-License-Identifier: MIT

//! Sauna Booking API Server
//!
//! Members reserve capacity-constrained sauna sessions against a
//! membership entitlement (subscription or punch-card credits).

use sauna_booking::{config::Config, db, db::Db, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Sauna Booking API");

    // Connect to the database and run migrations
    let database = Db::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // Insert the plan catalog on first run
    db::seed::seed_plans(&database)
        .await
        .expect("Failed to seed plan catalog");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db: database,
    });

    // Build router
    let app = sauna_booking::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sauna_booking=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
