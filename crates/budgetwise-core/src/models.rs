//! Domain models for Budgetwise
//!
//! A [`FinancialSnapshot`] is the fully materialized view of a user's finances
//! that every analyzer in this crate reads. It is produced by whatever ingests
//! the user's spreadsheet and is never mutated by the analyzers.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Current financial state handed to the analyzers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    /// Label of the period the totals cover (e.g. "February 2023")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    /// Liquid funds available right now
    pub current_balance: Decimal,
    /// Income for the current period
    pub total_income: Decimal,
    /// Expenses for the current period
    pub total_expenses: Decimal,
    #[serde(default)]
    pub categories: Vec<CategoryBudget>,
    #[serde(default)]
    pub assets: Vec<AssetHolding>,
    /// Month-by-month spending per category, used for trend analysis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<SpendingHistory>,
}

impl FinancialSnapshot {
    /// Parse and validate a snapshot from JSON
    pub fn from_json_str(content: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(content)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Load and validate a snapshot from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            categories = snapshot.categories.len(),
            assets = snapshot.assets.len(),
            "Loaded financial snapshot"
        );
        Ok(snapshot)
    }

    /// Check the invariants the analyzers rely on.
    ///
    /// Category names must be unique ignoring case, and spent amounts,
    /// limits and asset values must not be negative. Over-budget categories
    /// are valid.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for category in &self.categories {
            let key = category.name.trim().to_lowercase();
            if key.is_empty() {
                return Err(Error::InvalidData("category name is empty".to_string()));
            }
            if !seen.insert(key) {
                return Err(Error::InvalidData(format!(
                    "duplicate category: {}",
                    category.name
                )));
            }
            if category.spent < Decimal::ZERO {
                return Err(Error::InvalidData(format!(
                    "category {} has negative spent amount",
                    category.name
                )));
            }
            if category.limit < Decimal::ZERO {
                return Err(Error::InvalidData(format!(
                    "category {} has negative limit",
                    category.name
                )));
            }
        }

        for asset in &self.assets {
            if asset.value < Decimal::ZERO {
                return Err(Error::InvalidData(format!(
                    "asset {} has negative value",
                    asset.asset_type
                )));
            }
        }

        Ok(())
    }

    /// Find a category by name, ignoring case
    pub fn category(&self, name: &str) -> Option<&CategoryBudget> {
        let needle = name.to_lowercase();
        self.categories
            .iter()
            .find(|c| c.name.to_lowercase() == needle)
    }

    /// Categories whose spending exceeds their limit
    pub fn over_budget_categories(&self) -> impl Iterator<Item = &CategoryBudget> {
        self.categories.iter().filter(|c| c.is_over_budget())
    }
}

/// A named spending bucket with a limit for the current period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBudget {
    pub name: String,
    pub spent: Decimal,
    pub limit: Decimal,
}

impl CategoryBudget {
    pub fn new(name: impl Into<String>, spent: Decimal, limit: Decimal) -> Self {
        Self {
            name: name.into(),
            spent,
            limit,
        }
    }

    /// Budget left in this category; negative when over budget
    pub fn remaining(&self) -> Decimal {
        self.limit.saturating_sub(self.spent)
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining() < Decimal::ZERO
    }
}

/// An investment or savings holding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetHolding {
    #[serde(rename = "type")]
    pub asset_type: String,
    pub value: Decimal,
    /// Annual growth as a fraction (0.05 = 5%), may be negative
    pub annual_growth_rate: Decimal,
}

impl AssetHolding {
    pub fn new(asset_type: impl Into<String>, value: Decimal, annual_growth_rate: Decimal) -> Self {
        Self {
            asset_type: asset_type.into(),
            value,
            annual_growth_rate,
        }
    }
}

/// Spending per category across previous months
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpendingHistory {
    /// Month labels, oldest first
    pub months: Vec<String>,
    /// category -> month -> amount spent
    #[serde(default)]
    pub spending: BTreeMap<String, BTreeMap<String, Decimal>>,
}

impl SpendingHistory {
    /// Monthly amounts for a category, ignoring case of the category name
    pub fn category(&self, name: &str) -> Option<&BTreeMap<String, Decimal>> {
        self.spending.get(name).or_else(|| {
            let needle = name.to_lowercase();
            self.spending
                .iter()
                .find(|(k, _)| k.to_lowercase() == needle)
                .map(|(_, v)| v)
        })
    }

    /// Amount spent in a category during a month (zero when not recorded)
    pub fn amount(&self, category: &str, month: &str) -> Decimal {
        self.category(category)
            .and_then(|months| months.get(month))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

/// A hypothetical purchase to evaluate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    pub amount: Decimal,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PurchaseRequest {
    pub fn new(amount: Decimal, category: impl Into<String>) -> Self {
        Self {
            amount,
            category: category.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Reject requests the evaluator should never see
    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(Error::InvalidData(
                "purchase amount must be greater than zero".to_string(),
            ));
        }
        if self.category.trim().is_empty() {
            return Err(Error::InvalidData("category is required".to_string()));
        }
        Ok(())
    }
}
