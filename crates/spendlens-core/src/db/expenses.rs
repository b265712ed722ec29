//! Expense operations

use std::str::FromStr;

use rusqlite::{params, OptionalExtension, Row};
use serde::Deserialize;

use super::{parse_date, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Expense, NewExpense};

const EXPENSE_COLUMNS: &str =
    "id, amount, category, description, date, created_at, updated_at";

/// Date ordering for expense listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(Error::InvalidData(format!(
                "Invalid sort order '{}', expected asc or desc",
                other
            ))),
        }
    }
}

/// Filters for [`Database::list_expenses`]
#[derive(Debug, Clone, Default)]
pub struct ExpenseQuery {
    /// Exact category match
    pub category: Option<String>,
    pub order: SortOrder,
    pub limit: Option<i64>,
}

impl ExpenseQuery {
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

fn row_to_expense(row: &Row<'_>) -> rusqlite::Result<Expense> {
    let date_str: String = row.get(4)?;
    let created_at: String = row.get(5)?;
    let updated_at: String = row.get(6)?;
    Ok(Expense {
        id: row.get(0)?,
        amount: row.get(1)?,
        category: row.get(2)?,
        description: row.get(3)?,
        date: parse_date(&date_str)?,
        created_at: parse_datetime(&created_at),
        updated_at: parse_datetime(&updated_at),
    })
}

impl Database {
    /// Record a new expense after validating it
    pub fn create_expense(&self, expense: &NewExpense) -> Result<Expense> {
        expense.validate()?;

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO expenses (amount, category, description, date)
            VALUES (?, ?, ?, ?)
            "#,
            params![
                expense.amount,
                expense.category.trim(),
                expense.normalized_description(),
                expense.date.format("%Y-%m-%d").to_string(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        drop(conn);

        tracing::debug!(id, amount = expense.amount, category = %expense.category, "Created expense");

        self.get_expense(id)?
            .ok_or_else(|| Error::NotFound(format!("Expense {} vanished after insert", id)))
    }

    /// Get a single expense by ID
    pub fn get_expense(&self, id: i64) -> Result<Option<Expense>> {
        let conn = self.conn()?;
        let expense = conn
            .query_row(
                &format!("SELECT {} FROM expenses WHERE id = ?", EXPENSE_COLUMNS),
                params![id],
                row_to_expense,
            )
            .optional()?;
        Ok(expense)
    }

    /// List expenses, newest date first unless the query says otherwise.
    ///
    /// Expenses on the same date keep insertion order relative to the sort
    /// direction.
    pub fn list_expenses(&self, query: &ExpenseQuery) -> Result<Vec<Expense>> {
        let conn = self.conn()?;

        let mut conditions = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(category) = query.category.as_deref() {
            if !category.trim().is_empty() {
                conditions.push("category = ?");
                params.push(Box::new(category.trim().to_string()));
            }
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let direction = query.order.as_sql();
        let mut sql = format!(
            "SELECT {} FROM expenses {} ORDER BY date {}, id {}",
            EXPENSE_COLUMNS, where_clause, direction, direction
        );
        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            params.push(Box::new(limit));
        }

        let mut stmt = conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let expenses = stmt
            .query_map(param_refs.as_slice(), row_to_expense)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(expenses)
    }

    /// Delete an expense. Returns false if no expense had that ID.
    pub fn delete_expense(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM expenses WHERE id = ?", params![id])?;
        if deleted > 0 {
            tracing::debug!(id, "Deleted expense");
        }
        Ok(deleted > 0)
    }

    /// Count all stored expenses
    pub fn count_expenses(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?;
        Ok(count)
    }
}
