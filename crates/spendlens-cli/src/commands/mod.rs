//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Database init and shared utilities (open_db)
//! - `categories` - Category registry commands
//! - `expenses` - Expense commands (list, add, delete)
//! - `export` - CSV export
//! - `reports` - Summary and insight reports
//! - `serve` - Web server command
//! - `users` - Sign-in user management

pub mod categories;
pub mod core;
pub mod expenses;
pub mod export;
pub mod reports;
pub mod serve;
pub mod users;

// Re-export command functions for main.rs
pub use categories::*;
pub use core::*;
pub use expenses::*;
pub use export::*;
pub use reports::*;
pub use serve::*;
pub use users::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
