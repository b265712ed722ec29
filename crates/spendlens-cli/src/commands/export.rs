//! Export command implementation

use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use spendlens_core::db::Database;
use spendlens_core::export::write_expenses_csv;
use spendlens_core::ExpenseQuery;

/// Write all expenses as CSV to `output`, or stdout when absent
pub fn cmd_export(db: &Database, output: Option<&Path>) -> Result<()> {
    let expenses = db.list_expenses(&ExpenseQuery::default())?;

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let rows = write_expenses_csv(&expenses, file)?;
            // Status goes to stderr so stdout stays clean when piping
            eprintln!("✅ Exported {} expenses to {}", rows, path.display());
        }
        None => {
            write_expenses_csv(&expenses, io::stdout().lock())?;
        }
    }

    db.log_audit(
        "cli",
        "export",
        Some("expense"),
        None,
        Some(&format!("rows={}", expenses.len())),
    )?;
    Ok(())
}
