//! Spendlens Core Library
//!
//! Shared functionality for the Spendlens expense tracker:
//! - Database access and migrations (expenses, categories, users, audit log)
//! - Aggregation of expenses by category and month
//! - Scripted insight generation over the expense list
//! - CSV export
//! - Password hashing for the sign-in flow

pub mod aggregate;
pub mod auth;
pub mod clock;
pub mod db;
pub mod error;
pub mod export;
pub mod insights;
pub mod models;

pub use aggregate::{CategoryTotal, MonthlyTotal, SpendingSummary};
pub use clock::{Clock, FixedClock, SystemClock};
pub use db::{AuditEntry, Database, ExpenseQuery, SortOrder};
pub use error::{Error, Result};
pub use insights::{generate_insights, InsightConfig, InsightGenerator, InsightReport};
