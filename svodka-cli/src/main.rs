use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use reqwest::Client;
use serde_json::{Value, json};
use tracing::error;
use tracing_subscriber::EnvFilter;

use svodka_core::{
    FileNaming, Table, build_report, cashback_by_card, person_transfers_json, report_to_json,
    save_report, spending_by_category, top_transactions,
};
use svodka_ingest::{load_operations_csv, load_operations_xlsx};
use svodka_market::{
    CURRENCY_KEY_VAR, STOCKS_KEY_VAR, env_key, fetch_currency_rates, fetch_stock_prices,
    load_settings,
};

#[derive(Parser, Debug)]
#[command(name = "svodka", version, about = "Bank statement analytics and event reports")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Month-to-date event report with market data, as JSON
    Report {
        /// Operations export (.xlsx or .csv)
        #[arg(long)]
        input: PathBuf,

        /// Report moment, "YYYY-MM-DD HH:MM:SS"
        #[arg(long)]
        date: String,

        /// Settings file listing tracked currencies and stocks
        #[arg(long, default_value = "user_settings.json")]
        settings: PathBuf,

        /// Also write the report to this file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Also write the report to a generated file name
        #[arg(long)]
        save: bool,
    },

    /// Spending in one category over the last three months
    Spending {
        #[arg(long)]
        input: PathBuf,

        category: String,

        /// Window end date, "YYYY-MM-DD" (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        output: Option<PathBuf>,

        #[arg(long)]
        save: bool,
    },

    /// Cashback totals per card
    Cashback {
        #[arg(long)]
        input: PathBuf,
    },

    /// Top transactions by amount
    Top {
        #[arg(long)]
        input: PathBuf,

        #[arg(short, long, default_value_t = svodka_core::DEFAULT_TOP_N)]
        n: usize,
    },

    /// Transfers to private persons, as JSON
    Transfers {
        #[arg(long)]
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Report {
            input,
            date,
            settings,
            output,
            save,
        } => {
            let value = match run_report(&input, &date, &settings).await {
                Ok(value) => value,
                Err(err) => {
                    error!("report failed: {err:#}");
                    json!({"error": err.to_string()})
                }
            };
            if let Some(naming) = naming_for(output, save, "event") {
                save_report(&naming, || Ok(value.clone()))?;
            }
            println!("{}", serde_json::to_string_pretty(&value)?);
        }

        Command::Spending {
            input,
            category,
            date,
            output,
            save,
        } => {
            let table = load_table(&input)?;
            let summaries = match naming_for(output, save, "spending_by_category") {
                Some(naming) => {
                    save_report(&naming, || spending_by_category(&table, &category, date))?
                }
                None => spending_by_category(&table, &category, date)?,
            };
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }

        Command::Cashback { input } => {
            let table = load_table(&input)?;
            let summaries = cashback_by_card(&table)?;
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }

        Command::Top { input, n } => {
            let table = load_table(&input)?;
            let top = top_transactions(&table, n)?;
            println!("{}", serde_json::to_string_pretty(&top)?);
        }

        Command::Transfers { input } => {
            let table = load_table(&input)?;
            println!("{}", person_transfers_json(&table.records())?);
        }
    }

    Ok(())
}

async fn run_report(input: &Path, date: &str, settings_path: &Path) -> Result<Value> {
    let as_of = NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S")
        .with_context(|| format!("invalid report date '{date}', expected YYYY-MM-DD HH:MM:SS"))?;

    let table = load_table(input)?;
    let settings = load_settings(settings_path)?;
    let currency_key = env_key(CURRENCY_KEY_VAR)?;
    let stocks_key = env_key(STOCKS_KEY_VAR)?;

    let client = Client::new();
    let rates = fetch_currency_rates(&client, &currency_key, &settings.user_currencies).await?;
    let stocks =
        fetch_stock_prices(&client, &stocks_key, &currency_key, &settings.user_stocks).await?;

    let outcome = build_report(
        &table,
        as_of,
        serde_json::to_value(&rates)?,
        serde_json::to_value(&stocks)?,
    );
    Ok(report_to_json(outcome))
}

fn load_table(path: &Path) -> Result<Table> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("xlsx") | Some("xls") => load_operations_xlsx(path),
        Some("csv") => load_operations_csv(path),
        _ => bail!("unsupported input format: {}", path.display()),
    }
}

fn naming_for(output: Option<PathBuf>, save: bool, label: &str) -> Option<FileNaming> {
    if let Some(path) = output {
        Some(FileNaming::Explicit(path))
    } else if save {
        Some(FileNaming::Generated {
            label: label.to_string(),
        })
    } else {
        None
    }
}
