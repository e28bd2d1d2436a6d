//! Configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. Embedded defaults (`config/budgetwise.toml`, compiled into the binary)
//! 2. An override file applied on top: the path given explicitly, or
//!    `~/.local/share/budgetwise/config.toml` when it exists
//!
//! Override files only need the keys they change. Unknown keys are ignored.

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::categories::FallbackBudget;
use crate::decision::EvaluatorConfig;
use crate::error::{Error, Result};
use crate::investments::InvestmentConfig;
use crate::trends::TrendConfig;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/budgetwise.toml");

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub evaluator: EvaluatorConfig,
    pub trends: TrendConfig,
    pub investments: InvestmentConfig,
}

impl Config {
    /// Load the embedded defaults, then apply `override_path` if given or the
    /// default override location if it exists
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::embedded()?;

        match override_path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::NotFound(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                let content = fs::read_to_string(path)?;
                config.apply_toml(&content)?;
                tracing::debug!(path = %path.display(), "Loaded config override");
            }
            None => {
                if let Some(path) = default_config_path().filter(|p| p.exists()) {
                    // A broken file in the default location shouldn't stop the app
                    match fs::read_to_string(&path)
                        .map_err(Error::from)
                        .and_then(|content| config.apply_toml(&content))
                    {
                        Ok(()) => {
                            tracing::debug!(path = %path.display(), "Loaded config override")
                        }
                        Err(e) => {
                            tracing::warn!(path = %path.display(), "Ignoring config override: {}", e);
                            config = Self::embedded()?;
                        }
                    }
                }
            }
        }

        Ok(config)
    }

    /// Embedded defaults only
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(DEFAULT_CONFIG)
    }

    /// Parse a config, using built-in defaults for anything it leaves out
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config = Self::default();
        config.apply_toml(content)?;
        Ok(config)
    }

    pub fn currency(&self) -> &str {
        &self.evaluator.currency
    }

    fn apply_toml(&mut self, content: &str) -> Result<()> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        if let Some(display) = raw.display {
            if let Some(currency) = display.currency {
                self.evaluator.currency = currency;
            }
        }

        if let Some(fallback) = raw.fallback_budget {
            let FallbackBudget { spent, limit } = self.evaluator.fallback_budget;
            self.evaluator.fallback_budget = FallbackBudget {
                spent: fallback.spent.unwrap_or(spent),
                limit: fallback.limit.unwrap_or(limit),
            };
        }

        if let Some(decision) = raw.decision {
            let thresholds = &mut self.evaluator.thresholds;
            if let Some(v) = decision.overrun_tolerance {
                thresholds.overrun_tolerance = v;
            }
            if let Some(v) = decision.near_limit_percent {
                thresholds.near_limit_percent = v;
            }
            if let Some(v) = decision.large_purchase_percent {
                thresholds.large_purchase_percent = v;
            }
            if let Some(v) = decision.minimal_impact_percent {
                thresholds.minimal_impact_percent = v;
            }
            if let Some(v) = decision.moderate_impact_percent {
                thresholds.moderate_impact_percent = v;
            }
        }

        if let Some(trends) = raw.trends {
            if let Some(v) = trends.min_percent_change {
                self.trends.min_percent_change = v;
            }
            if let Some(v) = trends.chart_categories {
                self.trends.chart_categories = v;
            }
        }

        if let Some(investments) = raw.investments {
            if let Some(v) = investments.investable_fraction {
                self.investments.investable_fraction = v;
            }
            if let Some(v) = investments.low_savings_rate {
                self.investments.low_savings_rate = v;
            }
            if let Some(v) = investments.max_risk_when_saving_little {
                self.investments.max_risk_when_saving_little = v;
            }
        }

        self.validate()
    }

    fn validate(&self) -> Result<()> {
        let fallback = &self.evaluator.fallback_budget;
        if fallback.spent < Decimal::ZERO || fallback.limit < Decimal::ZERO {
            return Err(Error::Config(
                "fallback_budget values must not be negative".to_string(),
            ));
        }
        let fraction = self.investments.investable_fraction;
        if fraction < Decimal::ZERO || fraction > Decimal::ONE {
            return Err(Error::Config(
                "investments.investable_fraction must be between 0 and 1".to_string(),
            ));
        }
        if self.evaluator.currency.trim().is_empty() {
            return Err(Error::Config("display.currency must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("budgetwise").join("config.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    display: Option<RawDisplay>,
    fallback_budget: Option<RawFallbackBudget>,
    decision: Option<RawDecision>,
    trends: Option<RawTrends>,
    investments: Option<RawInvestments>,
}

#[derive(Debug, Deserialize)]
struct RawDisplay {
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawFallbackBudget {
    spent: Option<Decimal>,
    limit: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct RawDecision {
    overrun_tolerance: Option<Decimal>,
    near_limit_percent: Option<Decimal>,
    large_purchase_percent: Option<Decimal>,
    minimal_impact_percent: Option<Decimal>,
    moderate_impact_percent: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct RawTrends {
    min_percent_change: Option<Decimal>,
    chart_categories: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawInvestments {
    investable_fraction: Option<Decimal>,
    low_savings_rate: Option<Decimal>,
    max_risk_when_saving_little: Option<u8>,
}
