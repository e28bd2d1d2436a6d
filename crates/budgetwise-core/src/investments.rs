//! Investment suggestions
//!
//! A fixed share of the current balance is treated as investable. Options
//! are filtered by what that amount can buy and, when the savings rate is
//! low, by risk.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::FinancialSnapshot;
use crate::wellness::savings_rate;

/// Coarse risk bucket for a 1-5 risk rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_rating(rating: u8) -> Self {
        match rating {
            0..=2 => Self::Low,
            3 => Self::Medium,
            _ => Self::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentOption {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// 1 (safest) to 5
    pub risk: u8,
    pub risk_level: RiskLevel,
    /// Expected annual return, in percent
    pub expected_return: Decimal,
    pub min_investment: Decimal,
    pub description: String,
}

impl InvestmentOption {
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        risk: u8,
        expected_return: Decimal,
        min_investment: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            risk,
            risk_level: RiskLevel::from_rating(risk),
            expected_return,
            min_investment,
            description: description.into(),
        }
    }
}

/// Built-in investment options
pub fn catalog() -> Vec<InvestmentOption> {
    vec![
        InvestmentOption::new(
            "National Savings",
            "Fixed Income",
            1,
            dec!(13.5),
            dec!(100000),
            "Government-backed savings certificates with guaranteed returns, suited to risk-averse investors.",
        ),
        InvestmentOption::new(
            "Mutual Funds",
            "Mixed",
            3,
            dec!(16.0),
            dec!(50000),
            "Professionally managed funds pooling money from many investors into diversified assets.",
        ),
        InvestmentOption::new(
            "Pakistan Stock Exchange",
            "Equity",
            4,
            dec!(20.0),
            dec!(100000),
            "Direct ownership of shares in companies listed on the Pakistan Stock Exchange.",
        ),
        InvestmentOption::new(
            "Real Estate Investment",
            "Property",
            3,
            dec!(15.0),
            dec!(500000),
            "Residential or commercial property held for rental income and appreciation.",
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentConfig {
    /// Share of the current balance considered investable
    pub investable_fraction: Decimal,
    /// Savings rates below this restrict options to low risk
    pub low_savings_rate: Decimal,
    /// Highest risk rating allowed while the savings rate is low
    pub max_risk_when_saving_little: u8,
}

impl Default for InvestmentConfig {
    fn default() -> Self {
        Self {
            investable_fraction: dec!(0.2),
            low_savings_rate: dec!(0.1),
            max_risk_when_saving_little: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentAdvice {
    pub available_for_investment: Decimal,
    pub savings_rate: Decimal,
    pub recommended: Vec<InvestmentOption>,
}

#[derive(Debug, Clone)]
pub struct InvestmentAdvisor {
    config: InvestmentConfig,
    options: Vec<InvestmentOption>,
}

impl Default for InvestmentAdvisor {
    fn default() -> Self {
        Self::new(InvestmentConfig::default())
    }
}

impl InvestmentAdvisor {
    /// Advisor over the built-in [`catalog`]
    pub fn new(config: InvestmentConfig) -> Self {
        Self::with_options(config, catalog())
    }

    pub fn with_options(config: InvestmentConfig, options: Vec<InvestmentOption>) -> Self {
        Self { config, options }
    }

    pub fn options(&self) -> &[InvestmentOption] {
        &self.options
    }

    pub fn advise(&self, snapshot: &FinancialSnapshot) -> InvestmentAdvice {
        let available_for_investment = snapshot
            .current_balance
            .saturating_mul(self.config.investable_fraction)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .max(Decimal::ZERO);
        let savings_rate = savings_rate(snapshot.total_income, snapshot.total_expenses);
        let saving_little = savings_rate < self.config.low_savings_rate;

        let recommended: Vec<InvestmentOption> = self
            .options
            .iter()
            .filter(|option| !(saving_little && option.risk > self.config.max_risk_when_saving_little))
            .filter(|option| option.min_investment <= available_for_investment)
            .cloned()
            .collect();

        tracing::debug!(
            available = %available_for_investment,
            savings_rate = %savings_rate,
            recommended = recommended.len(),
            "Investment options filtered"
        );

        InvestmentAdvice {
            available_for_investment,
            savings_rate,
            recommended,
        }
    }
}
