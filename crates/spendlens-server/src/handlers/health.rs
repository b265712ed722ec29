//! Liveness handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{AppError, AppState};

/// GET /api/health - Confirm the store answers queries
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    state.db.ping().map_err(|e| {
        tracing::error!(error = %e, "Health check failed");
        AppError::internal("Failed to connect to database")
    })?;
    Ok(Json(json!({ "status": "ok" })))
}
