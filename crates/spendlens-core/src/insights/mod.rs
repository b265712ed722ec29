//! Insight Generator - scripted observations over the expense list
//!
//! The generator ranks categories with [`crate::aggregate::by_category`] and
//! derives a fixed set of human-readable observations from the ranking:
//!
//! - **Headlines** - top category, transaction count, diversification, average
//! - **Anomalies** - high top-category spend plus one illustrative flag
//! - **Forecast** - jittered per-category mean for the top three categories
//! - **Savings** - a flat percentage of total spend
//!
//! Randomness is always supplied by the caller, so a seeded generator makes
//! the whole report reproducible.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rand::{rngs::StdRng, SeedableRng};
//! use spendlens_core::insights::generate_insights;
//!
//! let expenses = db.list_expenses(&Default::default())?;
//! let report = generate_insights(&expenses, &mut StdRng::from_entropy());
//! ```

pub mod generator;
pub mod types;

pub use generator::{generate_insights, InsightConfig, InsightGenerator};
pub use types::{Anomaly, ForecastItem, InsightReport};
