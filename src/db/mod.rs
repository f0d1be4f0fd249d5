// SPDX-License-Identifier: MIT

//! Database layer (SQLite via sqlx).
//!
//! Query functions in [`queries`] take `&mut SqliteConnection` so the
//! write paths can compose several reads and a write into one
//! transaction. The booking engine relies on that: capacity and prior
//! booking state are re-checked inside the same transaction as the
//! write, with the unique `(user_id, timeslot_id)` constraint as the
//! final arbiter under concurrency.
//!
//! Writes go through a dedicated single-connection pool. A deferred
//! SQLite transaction that reads before writing cannot upgrade to a
//! write lock while another writer holds one, so concurrent bookings
//! on a shared pool would fail with `SQLITE_BUSY` instead of being
//! re-checked against committed state. One writer connection makes
//! each booking transaction observe the previous one's commit; WAL
//! mode keeps readers unblocked meanwhile.

pub mod queries;
pub mod seed;

use crate::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use std::str::FromStr;
use std::time::Duration;

/// Database handle: a read pool plus a single-connection write pool.
#[derive(Clone)]
pub struct Db {
    read_pool: SqlitePool,
    write_pool: SqlitePool,
}

impl Db {
    /// Connect to the database at `url`, creating the file if missing,
    /// and run pending migrations.
    pub async fn connect(url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(AppError::Database)?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let write_pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options.clone())
            .await?;

        let read_pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await?;

        sqlx::migrate!()
            .run(&write_pool)
            .await
            .map_err(|e| AppError::Internal(e.into()))?;

        tracing::info!(url, "Connected to database");

        Ok(Self {
            read_pool,
            write_pool,
        })
    }

    /// In-memory database for tests. A single pooled connection keeps
    /// the database alive and shared across the whole test app.
    pub async fn connect_in_memory() -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(AppError::Database)?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        sqlx::migrate!()
            .run(&pool)
            .await
            .map_err(|e| AppError::Internal(e.into()))?;

        // One connection serves both roles; the in-memory database
        // only exists on that connection.
        Ok(Self {
            read_pool: pool.clone(),
            write_pool: pool,
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.read_pool
    }

    /// Begin a transaction for a read-modify-write booking operation.
    /// Serialized on the writer connection.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, AppError> {
        Ok(self.write_pool.begin().await?)
    }
}
