//! Budgetwise CLI - Purchase advisor
//!
//! Usage:
//!   budgetwise summary                               Show balances and budgets
//!   budgetwise decide --amount 2500 --category Food  Evaluate a purchase
//!   budgetwise wellness                              Financial wellness score
//!   budgetwise serve --port 3000                     Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;
use commands::OutputFormat;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_config(cli.config.as_deref())?;
    let output = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    match cli.command {
        Commands::Summary => {
            let ctx = commands::open(&cli.snapshot, config, output)?;
            commands::cmd_summary(&ctx)
        }
        Commands::Decide {
            amount,
            category,
            description,
        } => {
            let ctx = commands::open(&cli.snapshot, config, output)?;
            commands::cmd_decide(&ctx, amount, &category, description)
        }
        Commands::Wellness => {
            let ctx = commands::open(&cli.snapshot, config, output)?;
            commands::cmd_wellness(&ctx)
        }
        Commands::Trends => {
            let ctx = commands::open(&cli.snapshot, config, output)?;
            commands::cmd_trends(&ctx)
        }
        Commands::Invest => {
            let ctx = commands::open(&cli.snapshot, config, output)?;
            commands::cmd_invest(&ctx)
        }
        Commands::Serve { port, host } => {
            commands::cmd_serve(&cli.snapshot, config, &host, port).await
        }
    }
}
