//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Spendlens - See where your money goes
#[derive(Parser)]
#[command(name = "spendlens")]
#[command(about = "Self-hosted expense tracker with spending insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "spendlens.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set SPENDLENS_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and seed default categories
    Init,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a network.
        /// By default, the server requires a bearer API key from SPENDLENS_API_KEYS.
        #[arg(long)]
        no_auth: bool,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Manage expenses (list, add, delete)
    Expenses {
        #[command(subcommand)]
        action: Option<ExpensesAction>,
    },

    /// Manage the category registry
    Categories {
        #[command(subcommand)]
        action: Option<CategoriesAction>,
    },

    /// Manage sign-in users
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },

    /// Show totals, category breakdown and monthly spending
    Summary {
        /// Year for the monthly breakdown (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate spending insights
    Insights {
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export expenses to CSV
    Export {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ExpensesAction {
    /// List expenses, newest first
    List {
        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,

        /// Oldest first
        #[arg(long)]
        asc: bool,

        /// Maximum number of expenses to show
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },

    /// Record an expense
    Add {
        /// Amount spent (must be positive)
        #[arg(short, long)]
        amount: f64,

        /// Category name (e.g., Food)
        #[arg(short, long)]
        category: String,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete an expense by ID
    Delete {
        /// Expense ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum CategoriesAction {
    /// Add a category
    Add {
        /// Category name
        name: String,

        /// Display color token (e.g., bg-teal-500 or #14b8a6)
        #[arg(short, long, default_value = "bg-gray-500")]
        color: String,
    },
}

#[derive(Subcommand)]
pub enum UsersAction {
    /// Create a user who can sign in to the web UI
    Add {
        /// Full name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (at least 8 characters)
        #[arg(short, long)]
        password: String,
    },
}
