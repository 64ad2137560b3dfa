use std::{error::Error, str::FromStr};

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use engine::{CurrencyCode, Engine, NewTransaction, UserId};
use migration::MigratorTrait;
use rust_decimal::Decimal;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "ledger_admin")]
#[command(about = "Admin utilities for the ledger (seed rates/transactions, inspect summaries)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./ledger.db?mode=rwc"
    )]
    database_url: String,

    /// Default primary currency for `summary`.
    #[arg(long, env = "PRIMARY_CURRENCY", default_value = engine::DEFAULT_PRIMARY_CURRENCY)]
    default_primary_currency: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Rate(Rate),
    Transaction(Transaction),
    /// Print the ledger summary of a user as JSON.
    Summary(SummaryArgs),
    Audit(Audit),
}

#[derive(Args, Debug)]
struct Rate {
    #[command(subcommand)]
    command: RateCommand,
}

#[derive(Subcommand, Debug)]
enum RateCommand {
    Set(RateSetArgs),
    List,
}

#[derive(Args, Debug)]
struct RateSetArgs {
    #[arg(long)]
    currency: String,
    #[arg(long, value_parser = parse_decimal)]
    rate: Decimal,
}

#[derive(Args, Debug)]
struct Transaction {
    #[command(subcommand)]
    command: TransactionCommand,
}

#[derive(Subcommand, Debug)]
enum TransactionCommand {
    Add(TransactionAddArgs),
    Show(TransactionShowArgs),
}

#[derive(Args, Debug)]
struct TransactionAddArgs {
    #[arg(long, value_parser = parse_user_id)]
    user_id: UserId,
    /// DEPOSIT, WITHDRAWAL, TRANSFER_IN, ...
    #[arg(long = "type")]
    kind: String,
    #[arg(long, value_parser = parse_decimal)]
    amount: Decimal,
    #[arg(long)]
    currency: String,
    #[arg(long)]
    source_transaction_id: Option<i64>,
    #[arg(long)]
    metadata: Option<String>,
    /// RFC 3339 timestamp, defaults to now.
    #[arg(long, value_parser = parse_timestamp)]
    created_at: Option<DateTime<Utc>>,
}

#[derive(Args, Debug)]
struct TransactionShowArgs {
    #[arg(long)]
    id: i64,
}

#[derive(Args, Debug)]
struct SummaryArgs {
    #[arg(long, value_parser = parse_user_id)]
    user_id: UserId,
    #[arg(long)]
    primary_currency: Option<String>,
}

#[derive(Args, Debug)]
struct Audit {
    #[command(subcommand)]
    command: AuditCommand,
}

#[derive(Subcommand, Debug)]
enum AuditCommand {
    Record(AuditRecordArgs),
    List(AuditListArgs),
}

#[derive(Args, Debug)]
struct AuditRecordArgs {
    #[arg(long)]
    user_id: String,
    #[arg(long)]
    action: String,
}

#[derive(Args, Debug)]
struct AuditListArgs {
    #[arg(long)]
    user_id: String,
}

fn parse_decimal(raw: &str) -> Result<Decimal, String> {
    Decimal::from_str(raw.trim()).map_err(|err| format!("invalid decimal {raw:?}: {err}"))
}

fn parse_user_id(raw: &str) -> Result<UserId, String> {
    UserId::parse(raw).map_err(|err| err.to_string())
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| format!("invalid timestamp {raw:?}: {err}"))
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder()
        .database(db)
        .primary_currency(CurrencyCode::parse(&cli.default_primary_currency)?)
        .build()
        .await?;

    match cli.command {
        Command::Rate(Rate {
            command: RateCommand::Set(args),
        }) => {
            let currency = CurrencyCode::parse(&args.currency)?;
            engine.set_rate(&currency, args.rate).await?;
            println!("rate set: 1 {currency} = {} primary", args.rate);
        }
        Command::Rate(Rate {
            command: RateCommand::List,
        }) => {
            for (currency, rate) in engine.rates().await? {
                println!("{currency}\t{rate}");
            }
        }
        Command::Transaction(Transaction {
            command: TransactionCommand::Add(args),
        }) => {
            let tx = engine
                .new_transaction(NewTransaction {
                    user_id: args.user_id,
                    kind: args.kind,
                    amount: args.amount,
                    currency_code: CurrencyCode::parse(&args.currency)?,
                    source_transaction_id: args.source_transaction_id,
                    metadata: args.metadata,
                    created_at: args.created_at.unwrap_or_else(Utc::now),
                })
                .await?;
            println!("created transaction: {}", tx.id);
        }
        Command::Transaction(Transaction {
            command: TransactionCommand::Show(args),
        }) => {
            let tx = engine.transaction(args.id).await?;
            println!("{}", serde_json::to_string_pretty(&tx)?);
        }
        Command::Summary(args) => {
            let summary = engine
                .transaction_summary(args.user_id, args.primary_currency.as_deref())
                .await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Audit(Audit {
            command: AuditCommand::Record(args),
        }) => {
            let entry = engine.record_audit(&args.user_id, &args.action).await?;
            println!("recorded audit entry: {}", entry.id);
        }
        Command::Audit(Audit {
            command: AuditCommand::List(args),
        }) => {
            for entry in engine.audit_entries(&args.user_id).await? {
                println!(
                    "{}\t{}\t{}",
                    entry.timestamp.to_rfc3339(),
                    entry.action,
                    entry.id
                );
            }
        }
    }

    Ok(())
}
