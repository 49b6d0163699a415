use clap::Subcommand;
use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

use crate::cli::config::authenticated_client;
use crate::cli::utils::{day, money, output_records, output_success, percent};
use crate::cli::OutputFormat;
use crate::client::stats::GoalProgress;
use crate::client::GoalRecord;
use crate::database::models::GoalInput;

#[derive(Subcommand)]
pub enum GoalCommands {
    #[command(about = "List goals with progress")]
    List,

    #[command(about = "Add a savings goal")]
    Add {
        #[arg(help = "Goal name")]
        name: String,
        #[arg(help = "Target amount")]
        target: Decimal,
        #[arg(long, help = "Deadline, YYYY-MM-DD or RFC 3339")]
        deadline: String,
        #[arg(long, default_value = "0", help = "Amount already saved")]
        saved: Decimal,
    },

    #[command(about = "Change a goal")]
    Update {
        #[arg(help = "Goal id")]
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        target: Option<Decimal>,
        #[arg(long)]
        saved: Option<Decimal>,
        #[arg(long)]
        deadline: Option<String>,
    },

    #[command(about = "Delete a goal")]
    Delete {
        #[arg(help = "Goal id")]
        id: Uuid,
    },
}

pub async fn handle(cmd: GoalCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = authenticated_client()?;
    let goals = client.goals();

    match cmd {
        GoalCommands::List => {
            let list = goals.list().await?;
            output_records(output_format, &list, "No goals yet", row)
        }
        GoalCommands::Add {
            name,
            target,
            deadline,
            saved,
        } => {
            let input = GoalInput {
                name: Some(name),
                target_amount: Some(target),
                saved_amount: Some(saved),
                deadline: Some(deadline),
                ..Default::default()
            };
            let goal = goals.create(&input).await?;
            output_success(
                output_format,
                &format!("Goal created successfully ({})", goal.id),
                Some(json!(goal)),
            )
        }
        GoalCommands::Update {
            id,
            name,
            target,
            saved,
            deadline,
        } => {
            let patch = GoalInput {
                name,
                target_amount: target,
                saved_amount: saved,
                deadline,
                ..Default::default()
            };
            let goal = goals.update(id, &patch).await?;
            output_success(output_format, "Goal updated", Some(json!(goal)))
        }
        GoalCommands::Delete { id } => {
            let goal = goals.delete(id).await?;
            output_success(
                output_format,
                &format!("Goal deleted ({})", goal.name),
                Some(json!(goal)),
            )
        }
    }
}

fn row(goal: &GoalRecord) -> String {
    let progress = GoalProgress::from(goal);
    format!(
        "{}  {:<20} {:>10} / {:<10} {:>7}  due {}{}",
        goal.id,
        goal.name,
        money(goal.saved_amount),
        money(goal.target_amount),
        percent(progress.percent),
        day(&goal.deadline),
        if progress.completed { "  ✓" } else { "" }
    )
}
