//! Expense aggregation for the summary and chart views
//!
//! Every function here is total: empty or degenerate input produces zeros or
//! empty output, never an error. The views are read-only, so a bad record must
//! not take the dashboard down with it.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::Datelike;
use serde::Serialize;

use crate::models::{Category, Expense};

/// Short month labels, indexed by zero-based month
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Chart color used when a category has no usable registry entry
pub const DEFAULT_CHART_COLOR: &str = "#6b7280";

/// Display tokens understood by the web UI, mapped to chart colors
const CHART_PALETTE: [(&str, &str); 18] = [
    ("bg-red-500", "#ef4444"),
    ("bg-blue-500", "#3b82f6"),
    ("bg-yellow-500", "#eab308"),
    ("bg-green-500", "#22c55e"),
    ("bg-purple-500", "#a855f7"),
    ("bg-gray-500", "#6b7280"),
    ("bg-orange-500", "#f97316"),
    ("bg-amber-500", "#f59e0b"),
    ("bg-lime-500", "#84cc16"),
    ("bg-emerald-500", "#10b981"),
    ("bg-teal-500", "#14b8a6"),
    ("bg-cyan-500", "#06b6d4"),
    ("bg-sky-500", "#0ea5e9"),
    ("bg-indigo-500", "#6366f1"),
    ("bg-violet-500", "#8b5cf6"),
    ("bg-fuchsia-500", "#d946ef"),
    ("bg-pink-500", "#ec4899"),
    ("bg-rose-500", "#f43f5e"),
];

/// Spending attributed to one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub name: String,
    pub amount: f64,
    /// Number of expenses that contributed
    pub count: usize,
    /// Chart color resolved from the category registry
    pub color: String,
}

impl CategoryTotal {
    /// Mean amount per contributing expense
    pub fn mean(&self) -> f64 {
        self.amount / self.count.max(1) as f64
    }
}

/// Spending in one calendar month of the reported year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotal {
    pub month: &'static str,
    pub amount: f64,
}

/// A category total together with its share of overall spending
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    #[serde(flatten)]
    pub category: CategoryTotal,
    /// Percentage of total spending, in [0, 100]
    pub percentage: f64,
}

/// Everything the summary and chart views display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingSummary {
    pub year: i32,
    pub total: f64,
    pub average: f64,
    pub count: usize,
    pub categories: Vec<CategoryShare>,
    pub months: Vec<MonthlyTotal>,
}

/// Sum of all expense amounts
pub fn total_amount(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

/// Mean expense amount; zero for an empty list
pub fn average_amount(expenses: &[Expense]) -> f64 {
    total_amount(expenses) / expenses.len().max(1) as f64
}

/// Resolve the chart color for a category name.
///
/// Registry tokens already in `#rrggbb` form are used as-is; known palette
/// tokens are translated; anything else falls back to [`DEFAULT_CHART_COLOR`].
pub fn chart_color(categories: &[Category], name: &str) -> String {
    let token = categories
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.color.trim());

    let color = match token {
        Some(t) if t.starts_with('#') => t,
        Some(t) => CHART_PALETTE
            .iter()
            .find(|(class, _)| *class == t)
            .map(|(_, hex)| *hex)
            .unwrap_or(DEFAULT_CHART_COLOR),
        None => DEFAULT_CHART_COLOR,
    };
    color.to_string()
}

/// Group expenses by category, largest total first.
///
/// Only categories that actually occur in `expenses` get a row. Ties keep the
/// order in which the categories first appear in the input. Expenses with an
/// empty category are skipped.
pub fn by_category(expenses: &[Expense], categories: &[Category]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for expense in expenses {
        if expense.category.is_empty() {
            continue;
        }
        match index.get(expense.category.as_str()) {
            Some(&i) => {
                totals[i].amount += expense.amount;
                totals[i].count += 1;
            }
            None => {
                index.insert(expense.category.as_str(), totals.len());
                totals.push(CategoryTotal {
                    name: expense.category.clone(),
                    amount: expense.amount,
                    count: 1,
                    color: chart_color(categories, &expense.category),
                });
            }
        }
    }

    // sort_by is stable, which gives the first-appearance tie-break
    totals.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(Ordering::Equal));
    totals
}

/// Twelve monthly buckets (Jan..Dec) for `year`.
///
/// All months are present even when zero. Expenses from other years are
/// dropped.
pub fn by_month(expenses: &[Expense], year: i32) -> Vec<MonthlyTotal> {
    let mut amounts = [0.0_f64; 12];
    for expense in expenses.iter().filter(|e| e.date.year() == year) {
        amounts[expense.date.month0() as usize] += expense.amount;
    }

    MONTH_LABELS
        .into_iter()
        .zip(amounts)
        .map(|(month, amount)| MonthlyTotal { month, amount })
        .collect()
}

/// Share of `total` taken by `category_total`, as a percentage in [0, 100].
///
/// A zero (or otherwise unusable) total yields 0.
pub fn percentage_share(category_total: f64, total: f64) -> f64 {
    if !total.is_finite() || total <= 0.0 {
        return 0.0;
    }
    let share = category_total / total * 100.0;
    if share.is_finite() {
        share.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Build the full summary payload for `year`
pub fn summarize(expenses: &[Expense], categories: &[Category], year: i32) -> SpendingSummary {
    let total = total_amount(expenses);
    let categories = by_category(expenses, categories)
        .into_iter()
        .map(|category| {
            let percentage = percentage_share(category.amount, total);
            CategoryShare {
                category,
                percentage,
            }
        })
        .collect();

    SpendingSummary {
        year,
        total,
        average: average_amount(expenses),
        count: expenses.len(),
        categories,
        months: by_month(expenses, year),
    }
}
