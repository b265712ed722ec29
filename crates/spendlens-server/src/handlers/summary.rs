//! Spending summary handler

use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    Json,
};
use serde::Deserialize;

use crate::{get_user_email, AppError, AppState};
use spendlens_core::aggregate::summarize;
use spendlens_core::{ExpenseQuery, SpendingSummary};

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// Year for the monthly series; defaults to the current year
    pub year: Option<i32>,
}

/// GET /api/summary - Totals, category shares and the monthly series
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SummaryQuery>,
    request: Request,
) -> Result<Json<SpendingSummary>, AppError> {
    let user_email = get_user_email(&state.config, request.headers());
    let year = params.year.unwrap_or_else(|| state.clock.current_year());

    let expenses = state.db.list_expenses(&ExpenseQuery::default())?;
    let categories = state.db.list_categories()?;
    let summary = summarize(&expenses, &categories, year);

    state.db.log_audit(
        &user_email,
        "view",
        Some("summary"),
        None,
        Some(&format!("year={}", year)),
    )?;

    Ok(Json(summary))
}
