use serde::Serialize;

use crate::cli::config::authenticated_client;
use crate::cli::utils::{money, output_value};
use crate::cli::OutputFormat;
use crate::client::stats::{category_summaries, monthly_summaries, CategorySummary, MonthlySummary};

#[derive(Debug, Serialize)]
struct Report {
    categories: Vec<CategorySummary>,
    months: Vec<MonthlySummary>,
}

pub async fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let client = authenticated_client()?;
    let transactions = client.transactions().get_all().await?;

    let report = Report {
        categories: category_summaries(&transactions),
        months: monthly_summaries(&transactions),
    };

    output_value(output_format, &report, |report| {
        if transactions.is_empty() {
            println!("No transactions to report");
            return;
        }

        println!("{:<16} {:>12} {:>12} {:>12}", "Category", "Income", "Expense", "Net");
        for c in &report.categories {
            println!(
                "{:<16} {:>12} {:>12} {:>12}",
                c.category,
                money(c.income),
                money(c.expense),
                money(c.net)
            );
        }

        println!();
        println!("{:<16} {:>12} {:>12} {:>12}", "Month", "Income", "Expense", "Net");
        for m in &report.months {
            println!(
                "{:<16} {:>12} {:>12} {:>12}",
                m.month,
                money(m.income),
                money(m.expense),
                money(m.net)
            );
        }
    })
}
