//! User account operations

use rusqlite::{params, OptionalExtension};

use super::{parse_datetime, Database};
use crate::auth::{hash_password, verify_dummy_password, verify_password};
use crate::error::{Error, Result};
use crate::models::{normalize_email, NewUser, User};

impl Database {
    /// Register a user. The email is stored lowercased and must be unique.
    pub fn create_user(&self, user: &NewUser) -> Result<User> {
        user.validate()?;

        let email = normalize_email(&user.email);
        let password_hash = hash_password(&user.password)?;

        // The UNIQUE email column decides, so concurrent sign-ups can't both win
        let conn = self.conn()?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO users (full_name, email, password_hash) VALUES (?, ?, ?)",
            params![user.full_name.trim(), email, password_hash],
        )?;
        if inserted == 0 {
            return Err(Error::Conflict("User already exists".to_string()));
        }
        let id = conn.last_insert_rowid();
        drop(conn);

        tracing::info!(id, "Created user");

        self.find_user_by_email(&email)?
            .ok_or_else(|| Error::NotFound(format!("User {} vanished after insert", id)))
    }

    /// Look up a user by email (case-insensitive)
    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                r#"
                SELECT id, full_name, email, password_hash, created_at
                FROM users WHERE email = ?
                "#,
                params![normalize_email(email)],
                |row| {
                    let created_at: String = row.get(4)?;
                    Ok(User {
                        id: row.get(0)?,
                        full_name: row.get(1)?,
                        email: row.get(2)?,
                        password_hash: row.get(3)?,
                        created_at: parse_datetime(&created_at),
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    /// Check credentials. Unknown email and wrong password look the same,
    /// both in the result and in the time spent hashing.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>> {
        let Some(user) = self.find_user_by_email(email)? else {
            verify_dummy_password(password);
            return Ok(None);
        };
        if verify_password(password, &user.password_hash) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }
}
