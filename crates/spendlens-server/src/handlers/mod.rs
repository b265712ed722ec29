//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod audit;
pub mod auth;
pub mod categories;
pub mod expenses;
pub mod health;
pub mod insights;
pub mod summary;

// Re-export all handlers for use in router
pub use audit::*;
pub use auth::*;
pub use categories::*;
pub use expenses::*;
pub use health::*;
pub use insights::*;
pub use summary::*;
