//! Health check endpoint for service monitoring.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{error::AppError, state::AppState};

/// Health check response.
///
/// Returns service status and store connectivity.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status
    pub status: String,

    /// `connected` for PostgreSQL, `in-memory` without a database
    pub database: String,

    /// Current server timestamp
    pub timestamp: DateTime<Utc>,
}

/// Health check handler.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "status": "healthy",
///   "database": "connected",
///   "timestamp": "2025-12-21T19:00:00Z"
/// }
/// ```
///
/// # Response (500 Internal Server Error)
///
/// If database is unreachable, returns standard error response.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    let database = match &state.pool {
        Some(pool) => {
            // Verify database connectivity with simple query
            sqlx::query("SELECT 1").execute(pool).await?;
            "connected"
        }
        None => "in-memory",
    };

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        database: database.to_string(),
        timestamp: Utc::now(),
    }))
}
