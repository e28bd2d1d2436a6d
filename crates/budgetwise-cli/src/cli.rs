//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

/// Budgetwise - Should you buy it?
#[derive(Parser)]
#[command(name = "budgetwise")]
#[command(about = "Purchase advisor and financial wellness checker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Financial snapshot (JSON)
    #[arg(long, default_value = "snapshot.json", global = true)]
    pub snapshot: PathBuf,

    /// Config file (defaults to ~/.local/share/budgetwise/config.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show balances and category budgets
    Summary,

    /// Ask whether a purchase is a good idea
    Decide {
        /// Purchase amount
        #[arg(short, long)]
        amount: Decimal,

        /// Budget category the purchase belongs to
        #[arg(short, long)]
        category: String,

        /// What you're buying
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Show the financial wellness score
    Wellness,

    /// Show month-over-month spending changes
    Trends,

    /// Suggest investment options
    Invest,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}
