//! User command implementations

use anyhow::{Context, Result};
use spendlens_core::db::Database;
use spendlens_core::models::NewUser;

pub fn cmd_users_add(db: &Database, name: &str, email: &str, password: &str) -> Result<()> {
    let user = db
        .create_user(&NewUser::new(name, email, password))
        .context("Failed to create user")?;
    db.log_audit("cli", "create", Some("user"), Some(user.id), None)?;

    println!("✅ Created user {} <{}>", user.full_name, user.email);
    Ok(())
}
