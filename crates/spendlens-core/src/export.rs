//! CSV export of expenses
//!
//! The file layout matches what spreadsheet imports expect:
//! `Date,Amount,Category,Description`, one expense per row, dates as
//! `YYYY-MM-DD`.

use std::io::Write;

use crate::error::{Error, Result};
use crate::models::Expense;

/// Column header row
pub const CSV_HEADER: [&str; 4] = ["Date", "Amount", "Category", "Description"];

/// Suggested download name
pub const EXPORT_FILENAME: &str = "expense_data.csv";

/// Write expenses as CSV. Returns the number of data rows written.
pub fn write_expenses_csv<W: Write>(expenses: &[Expense], writer: W) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;

    for expense in expenses {
        wtr.write_record([
            expense.date.format("%Y-%m-%d").to_string(),
            expense.amount.to_string(),
            expense.category.clone(),
            expense.description.clone(),
        ])?;
    }

    wtr.flush()?;
    Ok(expenses.len())
}

/// Render expenses to an in-memory CSV string
pub fn expenses_to_csv_string(expenses: &[Expense]) -> Result<String> {
    let mut buf = Vec::new();
    write_expenses_csv(expenses, &mut buf)?;
    String::from_utf8(buf).map_err(|e| Error::InvalidData(format!("CSV is not UTF-8: {}", e)))
}
