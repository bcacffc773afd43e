//! # Shopdesk
//!
//! Command-script shop management: clients, stocked products, orders with
//! bills and under-stock notices, and tabular reports.
//!
//! ```text
//! shopdesk script.txt --db shop.db --reports out/
//! ```

mod command;
mod error;
mod executor;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use shopdesk_db::{Database, DbConfig};

use crate::executor::Executor;
use crate::report::TextReports;

/// Runs a shop command script against a SQLite store.
#[derive(Debug, Parser)]
#[command(name = "shopdesk", version, about)]
struct Cli {
    /// Command script to execute, one command per line.
    script: PathBuf,

    /// SQLite database file (created if missing).
    #[arg(long, default_value = "shopdesk.db")]
    db: PathBuf,

    /// Directory report and bill documents are written into.
    #[arg(long, default_value = ".")]
    reports: PathBuf,

    /// Verbose logging (debug level).
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "Run failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), error::AppError> {
    let db = Database::new(DbConfig::new(&cli.db)).await?;
    let renderer = Box::new(TextReports::new(&cli.reports)?);

    let mut executor = Executor::new(&db, renderer)?;
    let summary = executor.run_script(&cli.script).await?;

    info!(
        script = %cli.script.display(),
        executed = summary.executed,
        skipped = summary.skipped,
        "Done"
    );

    db.close().await;
    Ok(())
}
