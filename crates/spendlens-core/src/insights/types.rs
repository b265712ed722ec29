//! Report types produced by the insight generator

use serde::{Deserialize, Serialize};

/// A category flagged for attention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub category: String,
    pub reason: String,
}

/// Expected next-period spend for one category, in whole currency units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastItem {
    pub category: String,
    pub amount: f64,
}

/// Output of one insight run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    /// Always four entries, in a fixed order
    pub headline_insights: Vec<String>,
    pub anomalies: Vec<Anomaly>,
    pub forecast: Vec<ForecastItem>,
    pub savings_suggestion: String,
}
