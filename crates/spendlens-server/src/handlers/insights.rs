//! Insight handlers

use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    Json,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use crate::{get_user_email, AppError, AppState};
use spendlens_core::{ExpenseQuery, InsightReport};

#[derive(Debug, Deserialize)]
pub struct InsightsQuery {
    /// Pins the random choices for a reproducible report
    pub seed: Option<u64>,
}

/// POST /api/insights - Generate a fresh insight report over all expenses
pub async fn generate_insights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<InsightsQuery>,
    request: Request,
) -> Result<Json<InsightReport>, AppError> {
    let user_email = get_user_email(&state.config, request.headers());

    let expenses = state.db.list_expenses(&ExpenseQuery::default())?;
    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let report = spendlens_core::generate_insights(&expenses, &mut rng);

    state.db.log_audit(
        &user_email,
        "generate",
        Some("insights"),
        None,
        Some(&format!(
            "expenses={}, anomalies={}",
            expenses.len(),
            report.anomalies.len()
        )),
    )?;

    Ok(Json(report))
}
