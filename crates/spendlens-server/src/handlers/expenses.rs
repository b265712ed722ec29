//! Expense handlers

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, Query, Request, State},
    http::{header, HeaderMap, Response, StatusCode},
    Json,
};
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::{get_user_email, AppError, AppState, SuccessResponse};
use spendlens_core::export::{expenses_to_csv_string, EXPORT_FILENAME};
use spendlens_core::models::{Expense, NewExpense};
use spendlens_core::{ExpenseQuery, SortOrder};

/// Query parameters for listing expenses
#[derive(Debug, Deserialize)]
pub struct ExpenseListQuery {
    /// Exact category match
    pub category: Option<String>,
    /// Date order: asc or desc (default desc)
    pub order: Option<String>,
}

/// Request body for recording an expense.
///
/// Everything is optional at the wire level so that missing fields produce
/// the API's own 400 message. `amount` may be a JSON number or a numeric
/// string, as HTML forms send it.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    pub amount: Option<Value>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
}

fn is_blank(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn parse_amount(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp
fn parse_expense_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

impl CreateExpenseRequest {
    fn into_new_expense(self) -> Result<NewExpense, AppError> {
        let category = self.category.unwrap_or_default();
        let date = self.date.unwrap_or_default();
        if is_blank(&self.amount) || category.trim().is_empty() || date.trim().is_empty() {
            return Err(AppError::bad_request("Missing required fields"));
        }

        let amount = self
            .amount
            .as_ref()
            .and_then(parse_amount)
            .filter(|a| a.is_finite() && *a > 0.0)
            .ok_or_else(|| AppError::bad_request("Amount must be a positive number"))?;

        let date = parse_expense_date(&date)
            .ok_or_else(|| AppError::bad_request("Invalid date format (use YYYY-MM-DD)"))?;

        Ok(NewExpense::new(
            amount,
            category.trim(),
            self.description.as_deref(),
            date,
        ))
    }
}

/// GET /api/expenses - List expenses, newest first by default
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExpenseListQuery>,
    request: Request,
) -> Result<Json<Vec<Expense>>, AppError> {
    let user_email = get_user_email(&state.config, request.headers());

    let order = match params.order.as_deref() {
        Some(o) => o.parse::<SortOrder>().map_err(AppError::from_core)?,
        None => SortOrder::default(),
    };
    let mut query = ExpenseQuery::default().with_order(order);
    if let Some(category) = params.category.as_deref() {
        query = query.with_category(category);
    }

    let expenses = state.db.list_expenses(&query)?;

    state.db.log_audit(
        &user_email,
        "list",
        Some("expense"),
        None,
        Some(&format!(
            "category={:?}, order={:?}, returned={}",
            params.category,
            order,
            expenses.len()
        )),
    )?;

    Ok(Json(expenses))
}

/// POST /api/expenses - Record an expense
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateExpenseRequest>,
) -> Result<Json<Expense>, AppError> {
    let user_email = get_user_email(&state.config, &headers);
    let new_expense = body.into_new_expense()?;

    let expense = state
        .db
        .create_expense(&new_expense)
        .map_err(AppError::from_core)?;

    state.db.log_audit(
        &user_email,
        "create",
        Some("expense"),
        Some(expense.id),
        Some(&format!("amount={}, category={}", expense.amount, expense.category)),
    )?;

    Ok(Json(expense))
}

/// DELETE /api/expenses/:id - Delete an expense
pub async fn delete_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<SuccessResponse>, AppError> {
    let user_email = get_user_email(&state.config, &headers);

    if !state.db.delete_expense(id)? {
        return Err(AppError::not_found("Expense not found"));
    }

    state
        .db
        .log_audit(&user_email, "delete", Some("expense"), Some(id), None)?;

    Ok(Json(SuccessResponse {
        message: "Expense deleted successfully".to_string(),
    }))
}

/// GET /api/expenses/export - Download all expenses as CSV
pub async fn export_expenses(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response<Body>, AppError> {
    let user_email = get_user_email(&state.config, &headers);

    let expenses = state.db.list_expenses(&ExpenseQuery::default())?;
    let csv = expenses_to_csv_string(&expenses)?;
    info!("Exported {} expenses to CSV", expenses.len());

    state.db.log_audit(
        &user_email,
        "export",
        Some("expense"),
        None,
        Some(&format!("rows={}", expenses.len())),
    )?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/csv; charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
        )
        .body(Body::from(csv))
        .map_err(|e| AppError::internal(&e.to_string()))
}
