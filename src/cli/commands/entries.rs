use clap::Subcommand;
use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

use crate::cli::config::authenticated_client;
use crate::cli::utils::{day, money, output_records, output_success, output_value};
use crate::cli::OutputFormat;
use crate::client::EntryRecord;
use crate::database::models::{EntryInput, EntryKind};

/// Shared by `wallet income` and `wallet expense`.
#[derive(Subcommand)]
pub enum EntryCommands {
    #[command(about = "List entries, newest first")]
    List,

    #[command(about = "Show one entry")]
    Show {
        #[arg(help = "Entry id")]
        id: Uuid,
    },

    #[command(about = "Record a new entry")]
    Add {
        #[arg(help = "Name, e.g. Salary")]
        name: String,
        #[arg(help = "Amount (zero or more)")]
        amount: Decimal,
        #[arg(long, default_value = "other", help = "Category")]
        category: String,
    },

    #[command(about = "Change fields of an entry")]
    Update {
        #[arg(help = "Entry id")]
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        amount: Option<Decimal>,
    },

    #[command(about = "Delete an entry")]
    Delete {
        #[arg(help = "Entry id")]
        id: Uuid,
    },

    #[command(about = "Sum of all entries")]
    Total,
}

pub async fn handle(
    kind: EntryKind,
    cmd: EntryCommands,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let client = authenticated_client()?;
    let service = client.entries(kind);
    let label = kind.label();

    match cmd {
        EntryCommands::List => {
            let entries = service.list().await?;
            output_records(
                output_format,
                &entries,
                &format!("No {} recorded", kind.table()),
                row,
            )
        }
        EntryCommands::Show { id } => {
            let entry = service.get(id).await?;
            output_value(output_format, &entry, |e| println!("{}", row(e)))
        }
        EntryCommands::Add {
            name,
            amount,
            category,
        } => {
            let entry = service.create(&name, &category, amount).await?;
            output_success(
                output_format,
                &format!("{} created successfully ({})", label, entry.id),
                Some(json!(entry)),
            )
        }
        EntryCommands::Update {
            id,
            name,
            category,
            amount,
        } => {
            let patch = EntryInput {
                user_id: None,
                name,
                category,
                amount,
            };
            let entry = service.update(id, &patch).await?;
            output_success(
                output_format,
                &format!("{} updated", label),
                Some(json!(entry)),
            )
        }
        EntryCommands::Delete { id } => {
            let entry = service.delete(id).await?;
            output_success(
                output_format,
                &format!("{} deleted ({})", label, entry.name),
                Some(json!(entry)),
            )
        }
        EntryCommands::Total => {
            let total = service.total().await?;
            let data = json!({ kind.total_key(): total });
            output_value(output_format, &data, |_| {
                println!("Total {}: {}", kind.table(), money(total))
            })
        }
    }
}

fn row(entry: &EntryRecord) -> String {
    format!(
        "{}  {}  {:<20} {:<12} {:>12}",
        entry.id,
        day(&entry.created_at),
        entry.name,
        entry.category,
        money(entry.amount)
    )
}
