//! Insight generation rules

use rand::seq::SliceRandom;
use rand::Rng;

use crate::aggregate::{average_amount, by_category, total_amount};
use crate::models::Expense;

use super::types::{Anomaly, ForecastItem, InsightReport};

/// Label used when no category is available to name
const UNKNOWN_CATEGORY: &str = "unknown";

/// Trend anomaly label when the category set is empty
const FALLBACK_TREND_CATEGORY: &str = "Entertainment";

/// Savings target when there is no top category
const FALLBACK_SAVINGS_TARGET: &str = "discretionary spending";

const HIGH_SPENDING_REASON: &str = "Unusually high spending detected";

/// Illustrative copy; no month-over-month comparison backs it
const TREND_REASON: &str = "30% increase compared to last month";

/// Tunable thresholds for the insight rules
#[derive(Debug, Clone)]
pub struct InsightConfig {
    /// Top category total above which it is flagged as unusually high
    pub high_spending_threshold: f64,
    /// Distinct categories above which spending counts as diversified
    pub diversification_threshold: usize,
    /// Transactions above which the trend flag is raised
    pub trend_min_transactions: usize,
    /// How many of the top categories get a forecast
    pub forecast_categories: usize,
    /// Relative jitter applied to forecasts (0.1 = +/-10%)
    pub forecast_jitter: f64,
    /// Fraction of total spend proposed as savings
    pub savings_rate: f64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            high_spending_threshold: 1000.0,
            diversification_threshold: 3,
            trend_min_transactions: 3,
            forecast_categories: 3,
            forecast_jitter: 0.1,
            savings_rate: 0.15,
        }
    }
}

/// Applies [`InsightConfig`] rules to an expense list
#[derive(Debug, Clone, Default)]
pub struct InsightGenerator {
    config: InsightConfig,
}

impl InsightGenerator {
    pub fn new(config: InsightConfig) -> Self {
        Self { config }
    }

    /// Produce a full report. Never fails; empty input yields fallback copy.
    pub fn generate<R: Rng + ?Sized>(&self, expenses: &[Expense], rng: &mut R) -> InsightReport {
        let totals = by_category(expenses, &[]);
        let total = total_amount(expenses);
        let top = totals.first();

        let headline_insights = vec![
            match top {
                Some(t) => format!(
                    "Your top spending category is {} at {:.2}$.",
                    t.name, t.amount
                ),
                None => format!("Your top spending category is {} at 0$.", UNKNOWN_CATEGORY),
            },
            format!(
                "You have {} transactions across {} categories.",
                expenses.len(),
                totals.len()
            ),
            if totals.len() > self.config.diversification_threshold {
                "You have a well-diversified spending pattern.".to_string()
            } else {
                "Consider tracking more expense categories for better insights.".to_string()
            },
            format!(
                "Your average transaction amount is {:.2}$.",
                average_amount(expenses)
            ),
        ];

        let mut anomalies = Vec::new();
        if let Some(t) = top.filter(|t| t.amount > self.config.high_spending_threshold) {
            anomalies.push(Anomaly {
                category: t.name.clone(),
                reason: HIGH_SPENDING_REASON.to_string(),
            });
        }
        if expenses.len() > self.config.trend_min_transactions {
            let category = totals
                .choose(rng)
                .map(|t| t.name.clone())
                .unwrap_or_else(|| FALLBACK_TREND_CATEGORY.to_string());
            anomalies.push(Anomaly {
                category,
                reason: TREND_REASON.to_string(),
            });
        }

        // gen_range needs finite bounds
        let jitter = if self.config.forecast_jitter.is_finite() {
            self.config.forecast_jitter.abs().min(1.0)
        } else {
            0.0
        };
        let forecast = totals
            .iter()
            .take(self.config.forecast_categories)
            .map(|t| {
                let factor = rng.gen_range((1.0 - jitter)..=(1.0 + jitter));
                ForecastItem {
                    category: t.name.clone(),
                    amount: (t.mean() * factor).round(),
                }
            })
            .collect();

        let savings_target = (total * self.config.savings_rate).round();
        let savings_suggestion = format!(
            "Based on your spending patterns, you could save approximately ${:.0} by reducing {} by {:.0}%.",
            savings_target,
            top.map(|t| t.name.as_str()).unwrap_or(FALLBACK_SAVINGS_TARGET),
            self.config.savings_rate * 100.0
        );

        tracing::debug!(
            expenses = expenses.len(),
            categories = totals.len(),
            anomalies = anomalies.len(),
            "Generated insight report"
        );

        InsightReport {
            headline_insights,
            anomalies,
            forecast,
            savings_suggestion,
        }
    }
}

/// Generate a report with the default rules
pub fn generate_insights<R: Rng + ?Sized>(expenses: &[Expense], rng: &mut R) -> InsightReport {
    InsightGenerator::default().generate(expenses, rng)
}
