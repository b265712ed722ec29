//! Spendlens CLI - Self-hosted expense tracker
//!
//! Usage:
//!   spendlens init                                  Initialize database
//!   spendlens expenses add -a 12.50 -c Food         Record an expense
//!   spendlens summary --year 2026                   Spending breakdown
//!   spendlens insights                              Spending insights
//!   spendlens serve --port 3000                     Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Serve {
            port,
            host,
            no_auth,
            static_dir,
        } => {
            commands::cmd_serve(
                &cli.db,
                &host,
                port,
                no_auth,
                cli.no_encrypt,
                static_dir.as_deref(),
            )
            .await
        }
        Commands::Expenses { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None => commands::cmd_expenses_list(&db, None, false, 20),
                Some(ExpensesAction::List {
                    category,
                    asc,
                    limit,
                }) => commands::cmd_expenses_list(&db, category.as_deref(), asc, limit),
                Some(ExpensesAction::Add {
                    amount,
                    category,
                    date,
                    description,
                }) => commands::cmd_expenses_add(
                    &db,
                    amount,
                    &category,
                    date.as_deref(),
                    description.as_deref(),
                ),
                Some(ExpensesAction::Delete { id }) => commands::cmd_expenses_delete(&db, id),
            }
        }
        Commands::Categories { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None => commands::cmd_categories_list(&db),
                Some(CategoriesAction::Add { name, color }) => {
                    commands::cmd_categories_add(&db, &name, &color)
                }
            }
        }
        Commands::Users { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                UsersAction::Add {
                    name,
                    email,
                    password,
                } => commands::cmd_users_add(&db, &name, &email, &password),
            }
        }
        Commands::Summary { year, json } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_summary(&db, year, json)
        }
        Commands::Insights { seed, json } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_insights(&db, seed, json)
        }
        Commands::Export { output } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_export(&db, output.as_deref())
        }
    }
}
