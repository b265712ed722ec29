//! Expense command implementations

use anyhow::{Context, Result};
use chrono::NaiveDate;
use spendlens_core::db::Database;
use spendlens_core::models::NewExpense;
use spendlens_core::{Clock, ExpenseQuery, SortOrder, SystemClock};

use super::truncate;

pub fn cmd_expenses_list(
    db: &Database,
    category: Option<&str>,
    oldest_first: bool,
    limit: i64,
) -> Result<()> {
    let order = if oldest_first {
        SortOrder::Asc
    } else {
        SortOrder::Desc
    };
    let mut query = ExpenseQuery::default()
        .with_order(order)
        .with_limit(limit.max(1));
    if let Some(c) = category {
        query = query.with_category(c);
    }

    let expenses = db.list_expenses(&query)?;

    if expenses.is_empty() {
        println!("No expenses found. Record one with:");
        println!("  spendlens expenses add -a 12.50 -c Food");
        return Ok(());
    }

    println!();
    println!("📝 Expenses");
    println!("   ─────────────────────────────────────────────────────────────");

    for e in expenses {
        println!(
            "   {:>5} │ {} │ {:>10} │ {:<15} │ {}",
            e.id,
            e.date,
            format!("${:.2}", e.amount),
            truncate(&e.category, 15),
            truncate(&e.description, 30)
        );
    }

    Ok(())
}

pub fn cmd_expenses_add(
    db: &Database,
    amount: f64,
    category: &str,
    date: Option<&str>,
    description: Option<&str>,
) -> Result<()> {
    let date = match date {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .context("Invalid --date format (use YYYY-MM-DD)")?,
        None => SystemClock.today(),
    };

    let expense = db
        .create_expense(&NewExpense::new(amount, category, description, date))
        .context("Failed to record expense")?;
    db.log_audit(
        "cli",
        "create",
        Some("expense"),
        Some(expense.id),
        Some(&format!("amount={}, category={}", expense.amount, expense.category)),
    )?;

    println!(
        "✅ Recorded expense #{}: ${:.2} on {} ({})",
        expense.id, expense.amount, expense.category, expense.date
    );
    Ok(())
}

pub fn cmd_expenses_delete(db: &Database, id: i64) -> Result<()> {
    if !db.delete_expense(id)? {
        anyhow::bail!("Expense not found: {}", id);
    }
    db.log_audit("cli", "delete", Some("expense"), Some(id), None)?;

    println!("🗑️  Deleted expense #{}", id);
    Ok(())
}
