//! Report command implementations

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use spendlens_core::aggregate::summarize;
use spendlens_core::db::Database;
use spendlens_core::{generate_insights, Clock, ExpenseQuery, SystemClock};

use super::truncate;

/// Width of the longest bar in the text charts
const BAR_WIDTH: f64 = 30.0;

fn bar(amount: f64, max: f64) -> String {
    if max <= 0.0 {
        return String::new();
    }
    let len = ((amount / max) * BAR_WIDTH).round() as usize;
    "█".repeat(len)
}

pub fn cmd_summary(db: &Database, year: Option<i32>, json: bool) -> Result<()> {
    let year = year.unwrap_or_else(|| SystemClock.current_year());
    let expenses = db.list_expenses(&ExpenseQuery::default())?;
    let categories = db.list_categories()?;
    let summary = summarize(&expenses, &categories, year);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!();
    println!("📊 Spending Summary");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Total:        ${:.2}", summary.total);
    println!("   Expenses:     {}", summary.count);
    println!("   Average:      ${:.2}", summary.average);

    if !summary.categories.is_empty() {
        println!();
        println!("   By category");
        let max = summary
            .categories
            .first()
            .map(|c| c.category.amount)
            .unwrap_or(0.0);
        for share in &summary.categories {
            println!(
                "   {:<15} {:>10} {:>5.1}%  {}",
                truncate(&share.category.name, 15),
                format!("${:.2}", share.category.amount),
                share.percentage,
                bar(share.category.amount, max)
            );
        }
    }

    println!();
    println!("   Monthly spending in {}", summary.year);
    let max = summary.months.iter().map(|m| m.amount).fold(0.0, f64::max);
    for month in &summary.months {
        println!(
            "   {}  {:>10}  {}",
            month.month,
            format!("${:.2}", month.amount),
            bar(month.amount, max)
        );
    }

    Ok(())
}

pub fn cmd_insights(db: &Database, seed: Option<u64>, json: bool) -> Result<()> {
    let expenses = db.list_expenses(&ExpenseQuery::default())?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let report = generate_insights(&expenses, &mut rng);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!("💡 Spending Insights");
    println!("   ─────────────────────────────────────────────────────────────");
    for line in &report.headline_insights {
        println!("   • {}", line);
    }

    if !report.anomalies.is_empty() {
        println!();
        println!("   ⚠️  Anomalies");
        for anomaly in &report.anomalies {
            println!("   {:<15} {}", anomaly.category, anomaly.reason);
        }
    }

    if !report.forecast.is_empty() {
        println!();
        println!("   🔮 Next month forecast");
        for item in &report.forecast {
            println!("   {:<15} ${:.0}", item.category, item.amount);
        }
    }

    println!();
    println!("   💰 {}", report.savings_suggestion);

    Ok(())
}
