// SPDX-License-Identifier: MIT

//! Application error types with consistent API responses.
//!
//! Business-rule denials are terminal for the request: the client must
//! take a different action (pick another slot, purchase a plan, wait for
//! the next cycle). Nothing here is retried by the server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("{0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("You can only manage your own bookings")]
    Forbidden,

    // Booking denials
    #[error("This session has been cancelled")]
    SlotCancelled,

    #[error("Cannot book a past session")]
    SlotInPast,

    #[error("This session is full")]
    SlotFull,

    #[error("You already have a booking for this session")]
    AlreadyBooked,

    #[error("Booking is not active")]
    BookingNotActive,

    // Entitlement denials
    #[error("No active membership")]
    NoActiveMembership,

    #[error("No credits remaining this month")]
    MonthlyCreditsExhausted,

    #[error("No credits remaining on punch card")]
    PunchCardExhausted,

    #[error("Invalid membership configuration")]
    InvalidPlanConfiguration,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Validation(_)
            | AppError::SlotCancelled
            | AppError::SlotInPast
            | AppError::SlotFull
            | AppError::AlreadyBooked
            | AppError::BookingNotActive
            | AppError::NoActiveMembership
            | AppError::MonthlyCreditsExhausted
            | AppError::PunchCardExhausted
            | AppError::InvalidPlanConfiguration => StatusCode::BAD_REQUEST,
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Never leak internals in 500 responses
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Something went wrong".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
