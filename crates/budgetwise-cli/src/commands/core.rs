//! Shared command utilities
//!
//! This module contains:
//! - `load_config` - Resolve configuration (explicit file, data dir override, defaults)
//! - `load_snapshot` - Read and validate the financial snapshot
//! - `Context` - Everything a reporting command needs

use std::path::Path;

use anyhow::{Context as _, Result};
use budgetwise_core::{Config, FinancialSnapshot};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Loaded inputs for a reporting command
pub struct Context {
    pub snapshot: FinancialSnapshot,
    pub config: Config,
    pub output: OutputFormat,
}

impl Context {
    pub fn currency(&self) -> &str {
        self.config.currency()
    }

    /// Print `value` as pretty JSON, or `text` otherwise
    pub fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> Result<()> {
        match self.output {
            OutputFormat::Json => {
                let json =
                    serde_json::to_string_pretty(value).context("Failed to serialize output")?;
                println!("{}", json);
            }
            OutputFormat::Text => print!("{}", text()),
        }
        Ok(())
    }
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(p) => Config::load(Some(p))
            .with_context(|| format!("Failed to load config from {}", p.display()))?,
        None => Config::load(None).context("Failed to load config")?,
    };
    tracing::debug!(currency = config.currency(), "Config loaded");
    Ok(config)
}

pub fn load_snapshot(path: &Path) -> Result<FinancialSnapshot> {
    if !path.exists() {
        anyhow::bail!(
            "Snapshot file not found: {}\n   Pass --snapshot with the path to your financial data",
            path.display()
        );
    }
    FinancialSnapshot::from_file(path)
        .with_context(|| format!("Failed to load snapshot from {}", path.display()))
}

/// Load the snapshot and bundle it with config for a reporting command
pub fn open(snapshot_path: &Path, config: Config, output: OutputFormat) -> Result<Context> {
    Ok(Context {
        snapshot: load_snapshot(snapshot_path)?,
        config,
        output,
    })
}
