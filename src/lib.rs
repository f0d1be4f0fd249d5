// SPDX-License-Identifier: MIT

//! Sauna booking API server.
//!
//! Members reserve capacity-constrained sauna sessions against a
//! membership entitlement (subscription credits or punch-card credits).
//! This crate provides the booking engine and the HTTP API around it.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Db;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Db,
}
