//! Category command implementations

use anyhow::{Context, Result};
use spendlens_core::db::Database;

pub fn cmd_categories_list(db: &Database) -> Result<()> {
    let categories = db.list_categories()?;

    if categories.is_empty() {
        println!("No categories yet. Seed the defaults with:");
        println!("  spendlens init");
        return Ok(());
    }

    println!();
    println!("🏷️  Categories");
    println!("   ─────────────────────────────────────");
    for c in categories {
        println!("   {:>3} │ {:<20} │ {}", c.id, c.name, c.color);
    }

    Ok(())
}

pub fn cmd_categories_add(db: &Database, name: &str, color: &str) -> Result<()> {
    let category = db
        .create_category(name, color)
        .context("Failed to add category")?;
    db.log_audit(
        "cli",
        "create",
        Some("category"),
        Some(category.id),
        Some(&category.name),
    )?;

    println!("✅ Added category: {} ({})", category.name, category.color);
    Ok(())
}
