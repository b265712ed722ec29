//! Domain models for Spendlens

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Minimum accepted password length for new users
pub const MIN_PASSWORD_LEN: usize = 8;

/// Categories seeded into a fresh database, with their display color tokens
pub const DEFAULT_CATEGORIES: [(&str, &str); 6] = [
    ("Food", "bg-red-500"),
    ("Transportation", "bg-blue-500"),
    ("Entertainment", "bg-yellow-500"),
    ("Utilities", "bg-green-500"),
    ("Shopping", "bg-purple-500"),
    ("Other", "bg-gray-500"),
];

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    /// Always positive
    pub amount: f64,
    pub category: String,
    /// Empty when the user left it blank
    pub description: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A new expense to be recorded (before DB insertion)
#[derive(Debug, Clone, Deserialize)]
pub struct NewExpense {
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: NaiveDate,
}

impl NewExpense {
    pub fn new(amount: f64, category: &str, description: Option<&str>, date: NaiveDate) -> Self {
        Self {
            amount,
            category: category.to_string(),
            description: description.map(str::to_string),
            date,
        }
    }

    /// Check the invariants the store relies on.
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(Error::InvalidData(
                "Amount must be a positive number".to_string(),
            ));
        }
        if self.category.trim().is_empty() {
            return Err(Error::InvalidData("Category is required".to_string()));
        }
        Ok(())
    }

    /// Description as stored: trimmed, empty when absent
    pub fn normalized_description(&self) -> String {
        self.description
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string()
    }
}

/// An expense category with an opaque display token (e.g. "bg-red-500" or "#ef4444")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub color: String,
}

/// A registered user. The password hash never leaves the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Sign-up input
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"))
}

/// Canonical form used for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl NewUser {
    pub fn new(full_name: &str, email: &str, password: &str) -> Self {
        Self {
            full_name: full_name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    /// Validate the sign-up fields. Runs before hashing, never as a save hook.
    pub fn validate(&self) -> Result<()> {
        if self.full_name.trim().is_empty() {
            return Err(Error::InvalidData("Full name is required".to_string()));
        }
        let email = normalize_email(&self.email);
        if email.is_empty() {
            return Err(Error::InvalidData("Email is required".to_string()));
        }
        if !email_regex().is_match(&email) {
            return Err(Error::InvalidData("Please enter a valid email".to_string()));
        }
        if self.password.is_empty() {
            return Err(Error::InvalidData("Password is required".to_string()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::InvalidData(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    #[test]
    fn test_new_expense_validation() {
        assert!(NewExpense::new(12.5, "Food", None, date()).validate().is_ok());
        assert!(NewExpense::new(0.0, "Food", None, date()).validate().is_err());
        assert!(NewExpense::new(-3.0, "Food", None, date()).validate().is_err());
        assert!(NewExpense::new(f64::NAN, "Food", None, date()).validate().is_err());
        assert!(NewExpense::new(5.0, "   ", None, date()).validate().is_err());
    }

    #[test]
    fn test_normalized_description() {
        let with = NewExpense::new(1.0, "Food", Some("  lunch "), date());
        assert_eq!(with.normalized_description(), "lunch");

        let without = NewExpense::new(1.0, "Food", None, date());
        assert_eq!(without.normalized_description(), "");
    }

    #[test]
    fn test_new_user_validation() {
        assert!(NewUser::new("Jane Doe", "Jane@Example.com", "Password123!")
            .validate()
            .is_ok());

        let err = NewUser::new("", "jane@example.com", "Password123!")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("Full name"));

        let err = NewUser::new("Jane", "not-an-email", "Password123!")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("valid email"));

        let err = NewUser::new("Jane", "jane@example.com", "short")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("at least 8"));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  John@Example.COM "), "john@example.com");
    }

    #[test]
    fn test_user_serialization_skips_hash() {
        let user = User {
            id: 1,
            full_name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "john@example.com");
    }
}
