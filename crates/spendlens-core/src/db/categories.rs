//! Category registry operations

use rusqlite::params;

use super::Database;
use crate::error::{Error, Result};
use crate::models::{Category, DEFAULT_CATEGORIES};

impl Database {
    /// Insert the default categories that are not already present.
    ///
    /// Returns how many were added; running it twice adds nothing.
    pub fn seed_default_categories(&self) -> Result<usize> {
        let conn = self.conn()?;

        let mut added = 0;
        for (name, color) in DEFAULT_CATEGORIES {
            added += conn.execute(
                "INSERT OR IGNORE INTO categories (name, color) VALUES (?, ?)",
                params![name, color],
            )?;
        }

        if added > 0 {
            tracing::info!(added, "Seeded default categories");
        }
        Ok(added)
    }

    /// List categories in registration order
    pub fn list_categories(&self) -> Result<Vec<Category>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, name, color FROM categories ORDER BY id")?;

        let categories = stmt
            .query_map([], |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    color: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    /// Append a category to the registry
    pub fn create_category(&self, name: &str, color: &str) -> Result<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidData("Category name is required".to_string()));
        }
        let color = match color.trim() {
            "" => "bg-gray-500",
            c => c,
        };

        let conn = self.conn()?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO categories (name, color) VALUES (?, ?)",
            params![name, color],
        )?;
        if inserted == 0 {
            return Err(Error::Conflict(format!("Category '{}' already exists", name)));
        }

        Ok(Category {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
            color: color.to_string(),
        })
    }
}
