//! # truncate-data
//!
//! Delete all API data, without touching users or social accounts.
//!
//! The command takes no operational arguments; the flags below only select
//! configuration and log verbosity.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process;

use metecho_core::config::MetechoConfig;
use metecho_core::database::DatabaseConnection;
use metecho_core::logging::{init_structured_logging_with, log_error};
use metecho_core::purge::{truncate_data, PgPurgeStore};

#[derive(Parser)]
#[command(name = "truncate-data")]
#[command(about = "Delete all API data, without touching users or social apps")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Configuration directory
    #[arg(long, env = "METECHO_CONFIG_DIR", default_value = "config")]
    config_dir: PathBuf,

    /// Environment to load configuration for (development, test, production)
    #[arg(short, long, env = "METECHO_ENV", default_value = "development")]
    environment: String,

    /// Verbose output level (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    };
    init_structured_logging_with(Some(&cli.environment), level);

    if let Err(e) = run(&cli).await {
        log_error("truncate-data", "truncate_data", &format!("{e:#}"), None);
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = MetechoConfig::load_from_directory(&cli.config_dir, &cli.environment)
        .context("failed to load configuration")?;
    let db = DatabaseConnection::new(&config)
        .await
        .context("failed to connect to database")?;

    let store = PgPurgeStore::new(db.pool().clone());
    let report = truncate_data(&store).await.context("data purge failed")?;

    for outcome in &report.outcomes {
        println!(
            "{:<18} {:>8} rows ({} delete)",
            outcome.entity.to_string(),
            outcome.rows_removed,
            outcome.strategy.as_str()
        );
    }
    println!("Removed {} rows in total", report.total_rows_removed());

    db.close().await;
    Ok(())
}
