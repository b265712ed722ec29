//! Sign-in handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState};

/// Sign-in request body. Fields are optional so a missing one is a 400, not a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Public view of a user
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub email: String,
    pub full_name: String,
}

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub user: UserInfo,
}

/// POST /api/auth/signin - Check email and password
pub async fn signin(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SignInRequest>,
) -> Result<Json<SignInResponse>, AppError> {
    let email = body.email.as_deref().map(str::trim).unwrap_or_default();
    let password = body.password.as_deref().unwrap_or_default();
    if email.is_empty() || password.is_empty() {
        return Err(AppError::bad_request("Email and password are required"));
    }

    let Some(user) = state.db.authenticate(email, password)? else {
        tracing::info!("Rejected sign-in attempt");
        return Err(AppError::unauthorized("Invalid credentials"));
    };

    state
        .db
        .log_audit(&user.email, "signin", Some("user"), Some(user.id), None)?;

    Ok(Json(SignInResponse {
        user: UserInfo {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
        },
    }))
}
