use chrono::{Datelike, Utc};
use clap::Args;

use crate::cli::config::authenticated_client;
use crate::cli::utils::{money, output_value, percent};
use crate::cli::OutputFormat;
use crate::client::{load_dashboard, DashboardSummary};
use crate::database::models::Month;

#[derive(Args)]
pub struct DashboardArgs {
    #[arg(long, help = "Budget month (defaults to the current month)")]
    pub month: Option<Month>,

    #[arg(long, help = "Budget year (defaults to the current year)")]
    pub year: Option<i32>,

    #[arg(long, help = "Print the summary after every arrival")]
    pub watch: bool,
}

pub async fn handle(args: DashboardArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = authenticated_client()?;
    let month = args.month.unwrap_or_else(Month::current);
    let year = args.year.unwrap_or_else(|| Utc::now().year());

    let dashboard = load_dashboard(&client, month, year, |partial| {
        if args.watch && output_format == OutputFormat::Text && !partial.is_complete() {
            let summary = partial.summary();
            println!(
                "... balance {} (spending {})",
                money(summary.financial.balance),
                percent(summary.financial.spending_rate)
            );
        }
    })
    .await;

    let summary = dashboard.summary();
    output_value(output_format, &summary, |s| print_summary(s, month, year))
}

fn print_summary(summary: &DashboardSummary, month: Month, year: i32) {
    let f = &summary.financial;
    println!("Total income:     {:>12}", money(f.total_income));
    println!("Total expenses:   {:>12}", money(f.total_expense));
    println!("Balance:          {:>12}", money(f.balance));
    println!("Spending rate:    {:>12}", percent(f.spending_rate));
    println!("Savings rate:     {:>12}", percent(f.savings_rate));
    println!();
    println!("Budget {} {}:  {:>12}", month, year, money(f.current_budget));
    println!("Budget remaining: {:>12}", money(f.budget_remaining));
    println!("Budget status:    {:>12}", f.budget_status);

    if let Some(top) = &summary.top_category {
        println!();
        println!("Top expense category: {} ({})", top.category, money(top.amount));
    }

    if !summary.goals.is_empty() {
        println!();
        println!("Goals:");
        for goal in &summary.goals {
            println!(
                "  {:<20} {:>7}  {} to go",
                goal.name,
                percent(goal.percent),
                money(goal.remaining)
            );
        }
    }

    for error in &summary.errors {
        eprintln!("warning: {}", error);
    }
}
