use chrono::Utc;
use clap::{Args, ValueEnum};

use crate::cli::config::authenticated_client;
use crate::cli::utils::{day, money, output_records};
use crate::cli::OutputFormat;
use crate::client::stats::{filter_transactions, Period, TypeFilter};
use crate::client::Transaction;
use crate::database::models::EntryKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TypeArg {
    All,
    Income,
    Expense,
}

impl From<TypeArg> for TypeFilter {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::All => TypeFilter::All,
            TypeArg::Income => TypeFilter::Income,
            TypeArg::Expense => TypeFilter::Expense,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PeriodArg {
    All,
    /// Since the first day of this month
    Month,
    /// Since January 1st of this year
    Year,
}

impl From<PeriodArg> for Period {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::All => Period::All,
            PeriodArg::Month => Period::Month,
            PeriodArg::Year => Period::Year,
        }
    }
}

#[derive(Args)]
pub struct TransactionArgs {
    #[arg(long = "type", value_enum, default_value_t = TypeArg::All)]
    pub kind: TypeArg,

    #[arg(long, value_enum, default_value_t = PeriodArg::All)]
    pub period: PeriodArg,
}

pub async fn handle(args: TransactionArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = authenticated_client()?;
    let all = client.transactions().get_all().await?;
    let filtered = filter_transactions(&all, args.kind.into(), args.period.into(), Utc::now());

    output_records(output_format, &filtered, "No transactions", row)
}

fn row(tx: &Transaction) -> String {
    let signed = match tx.kind {
        EntryKind::Income => format!("+{}", money(tx.amount)),
        EntryKind::Expense => format!("-{}", money(tx.amount)),
    };
    format!(
        "{}  {:<7} {:<20} {:<12} {:>12}",
        day(&tx.created_at),
        tx.kind,
        tx.name,
        tx.category,
        signed
    )
}
