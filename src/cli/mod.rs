pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::database::models::EntryKind;

#[derive(Parser)]
#[command(name = "wallet")]
#[command(about = "Wallet CLI - track incomes, expenses, budgets and savings goals")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, conflicts_with = "yaml", help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Output in YAML format")]
    pub yaml: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Register, login and session management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Manage incomes")]
    Income {
        #[command(subcommand)]
        cmd: commands::entries::EntryCommands,
    },

    #[command(about = "Manage expenses")]
    Expense {
        #[command(subcommand)]
        cmd: commands::entries::EntryCommands,
    },

    #[command(about = "Manage monthly budgets")]
    Budget {
        #[command(subcommand)]
        cmd: commands::budget::BudgetCommands,
    },

    #[command(about = "Manage savings goals")]
    Goal {
        #[command(subcommand)]
        cmd: commands::goal::GoalCommands,
    },

    #[command(about = "List incomes and expenses together, newest first")]
    Transactions(commands::transactions::TransactionArgs),

    #[command(about = "Balance, rates, budget status and goal progress")]
    Dashboard(commands::dashboard::DashboardArgs),

    #[command(about = "Per-category and per-month summaries")]
    Report,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else if cli.yaml {
            OutputFormat::Yaml
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, output_format).await,
        Commands::Income { cmd } => {
            commands::entries::handle(EntryKind::Income, cmd, output_format).await
        }
        Commands::Expense { cmd } => {
            commands::entries::handle(EntryKind::Expense, cmd, output_format).await
        }
        Commands::Budget { cmd } => commands::budget::handle(cmd, output_format).await,
        Commands::Goal { cmd } => commands::goal::handle(cmd, output_format).await,
        Commands::Transactions(args) => commands::transactions::handle(args, output_format).await,
        Commands::Dashboard(args) => commands::dashboard::handle(args, output_format).await,
        Commands::Report => commands::report::handle(output_format).await,
    }
}
