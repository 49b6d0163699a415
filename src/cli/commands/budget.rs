use chrono::{Datelike, Utc};
use clap::Subcommand;
use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

use crate::cli::config::authenticated_client;
use crate::cli::utils::{money, output_records, output_success, output_value};
use crate::cli::OutputFormat;
use crate::client::BudgetRecord;
use crate::database::models::{BudgetCategoryInput, BudgetInput, Month};

#[derive(Subcommand)]
pub enum BudgetCommands {
    #[command(about = "List budgets")]
    List,

    #[command(about = "Show one budget")]
    Show {
        #[arg(help = "Budget id")]
        id: Uuid,
    },

    #[command(about = "Show the budget for a month (defaults to the current month)")]
    Month {
        #[arg(help = "Month name, e.g. January")]
        month: Option<Month>,
        #[arg(help = "Year")]
        year: Option<i32>,
    },

    #[command(about = "Create the budget for a month")]
    Set {
        #[arg(help = "Month name, e.g. January")]
        month: Month,
        #[arg(help = "Year")]
        year: i32,
        #[arg(long = "category", value_parser = parse_category, help = "Category limit as NAME=AMOUNT (repeatable)")]
        categories: Vec<BudgetCategoryInput>,
        #[arg(long, help = "Total amount (defaults to the sum of category limits)")]
        total: Option<Decimal>,
    },

    #[command(about = "Change a budget")]
    Update {
        #[arg(help = "Budget id")]
        id: Uuid,
        #[arg(long = "category", value_parser = parse_category, help = "Replace category limits, NAME=AMOUNT (repeatable)")]
        categories: Vec<BudgetCategoryInput>,
        #[arg(long)]
        total: Option<Decimal>,
    },

    #[command(about = "Delete a budget")]
    Delete {
        #[arg(help = "Budget id")]
        id: Uuid,
    },
}

pub async fn handle(cmd: BudgetCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = authenticated_client()?;
    let budgets = client.budgets();

    match cmd {
        BudgetCommands::List => {
            let list = budgets.list().await?;
            output_records(output_format, &list, "No budgets set", row)
        }
        BudgetCommands::Show { id } => {
            let budget = budgets.get(id).await?;
            output_value(output_format, &budget, print_budget)
        }
        BudgetCommands::Month { month, year } => {
            let month = month.unwrap_or_else(Month::current);
            let year = year.unwrap_or_else(|| Utc::now().year());
            match budgets.by_month(month, year).await? {
                Some(budget) => output_value(output_format, &budget, print_budget),
                None => output_value(output_format, &json!(null), |_| {
                    println!("No budget set for {} {}", month, year)
                }),
            }
        }
        BudgetCommands::Set {
            month,
            year,
            categories,
            total,
        } => {
            let total = total.unwrap_or_else(|| categories.iter().filter_map(|c| c.limit).sum());
            let input = BudgetInput {
                user_id: None,
                month: Some(month.to_string()),
                year: Some(year),
                categories: Some(categories),
                total_amount: Some(total),
            };
            let budget = budgets.create(&input).await?;
            output_success(
                output_format,
                &format!("Budget for {} {} created successfully", month, year),
                Some(json!(budget)),
            )
        }
        BudgetCommands::Update {
            id,
            categories,
            total,
        } => {
            let patch = BudgetInput {
                categories: (!categories.is_empty()).then_some(categories),
                total_amount: total,
                ..Default::default()
            };
            let budget = budgets.update(id, &patch).await?;
            output_success(output_format, "Budget updated", Some(json!(budget)))
        }
        BudgetCommands::Delete { id } => {
            let budget = budgets.delete(id).await?;
            output_success(
                output_format,
                &format!("Budget for {} {} deleted", budget.month, budget.year),
                Some(json!(budget)),
            )
        }
    }
}

fn parse_category(raw: &str) -> Result<BudgetCategoryInput, String> {
    let (name, amount) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=AMOUNT, got `{}`", raw))?;
    let limit = amount
        .trim()
        .parse::<Decimal>()
        .map_err(|_| format!("`{}` is not a number", amount))?;
    Ok(BudgetCategoryInput {
        name: Some(name.trim().to_string()),
        limit: Some(limit),
    })
}

fn row(budget: &BudgetRecord) -> String {
    format!(
        "{}  {:<9} {}  {:>12}  ({} categories)",
        budget.id,
        budget.month,
        budget.year,
        money(budget.total_amount),
        budget.categories.len()
    )
}

fn print_budget(budget: &BudgetRecord) {
    println!("{} {}: {}", budget.month, budget.year, money(budget.total_amount));
    for category in &budget.categories {
        println!("  {:<16} {:>12}", category.name, money(category.limit));
    }
}
