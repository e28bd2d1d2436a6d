//! Category resolution
//!
//! Purchases name their category as free text. Names that don't match any
//! budget in the snapshot resolve to a fallback budget so evaluation never
//! blocks on unmapped input.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::{CategoryBudget, FinancialSnapshot};

/// Budget assumed for categories missing from the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallbackBudget {
    pub spent: Decimal,
    pub limit: Decimal,
}

impl Default for FallbackBudget {
    fn default() -> Self {
        Self {
            spent: Decimal::ZERO,
            limit: dec!(1000),
        }
    }
}

/// A category budget looked up by name
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedCategory<'a> {
    /// Matched a budget in the snapshot
    Known(&'a CategoryBudget),
    /// No match; carries the requested name and the fallback figures
    Fallback { name: String, budget: FallbackBudget },
}

impl ResolvedCategory<'_> {
    pub fn name(&self) -> &str {
        match self {
            Self::Known(c) => &c.name,
            Self::Fallback { name, .. } => name,
        }
    }

    pub fn spent(&self) -> Decimal {
        match self {
            Self::Known(c) => c.spent,
            Self::Fallback { budget, .. } => budget.spent,
        }
    }

    pub fn limit(&self) -> Decimal {
        match self {
            Self::Known(c) => c.limit,
            Self::Fallback { budget, .. } => budget.limit,
        }
    }

    pub fn remaining(&self) -> Decimal {
        self.limit().saturating_sub(self.spent())
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Resolve a category by case-insensitive name, substituting `fallback` when
/// the snapshot has no such category
pub fn resolve_category<'a>(
    snapshot: &'a FinancialSnapshot,
    name: &str,
    fallback: &FallbackBudget,
) -> ResolvedCategory<'a> {
    match snapshot.category(name) {
        Some(category) => ResolvedCategory::Known(category),
        None => {
            tracing::debug!(category = name, "Unknown category, using fallback budget");
            ResolvedCategory::Fallback {
                name: name.to_string(),
                budget: *fallback,
            }
        }
    }
}
