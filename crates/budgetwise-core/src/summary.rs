//! Headline figures for a snapshot

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::FinancialSnapshot;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    /// Income minus expenses
    pub net: Decimal,
    pub current_balance: Decimal,
    /// Sum of all category limits
    pub total_budget: Decimal,
    /// Sum of all category spending
    pub total_spent: Decimal,
    pub categories_over_budget: Vec<String>,
}

impl SnapshotSummary {
    pub fn from_snapshot(snapshot: &FinancialSnapshot) -> Self {
        let (total_budget, total_spent) = snapshot
            .categories
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(budget, spent), c| {
                (budget.saturating_add(c.limit), spent.saturating_add(c.spent))
            });

        Self {
            period: snapshot.period.clone(),
            total_income: snapshot.total_income,
            total_expenses: snapshot.total_expenses,
            net: snapshot.total_income.saturating_sub(snapshot.total_expenses),
            current_balance: snapshot.current_balance,
            total_budget,
            total_spent,
            categories_over_budget: snapshot
                .over_budget_categories()
                .map(|c| c.name.clone())
                .collect(),
        }
    }
}
