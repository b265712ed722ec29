//! Category registry handlers

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;

use crate::{get_user_email, AppError, AppState};
use spendlens_core::models::Category;

/// Request body for creating a category
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
}

/// GET /api/categories - List the category registry
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Vec<Category>>, AppError> {
    let user_email = get_user_email(&state.config, request.headers());
    let categories = state.db.list_categories()?;

    state
        .db
        .log_audit(&user_email, "list", Some("category"), None, None)?;

    Ok(Json(categories))
}

/// POST /api/categories - Add a category
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateCategoryRequest>,
) -> Result<Json<Category>, AppError> {
    let user_email = get_user_email(&state.config, &headers);

    let category = state
        .db
        .create_category(&body.name, &body.color)
        .map_err(AppError::from_core)?;

    state.db.log_audit(
        &user_email,
        "create",
        Some("category"),
        Some(category.id),
        Some(&category.name),
    )?;

    Ok(Json(category))
}
