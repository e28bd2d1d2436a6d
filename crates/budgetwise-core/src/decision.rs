//! Purchase decision evaluator
//!
//! Classifies a hypothetical purchase as yes / no / caution by running the
//! figures through an ordered rule cascade. The first rule that applies
//! decides the verdict:
//!
//! 1. Insufficient balance - the purchase would leave nothing in the account
//! 2. Category overrun - the category would go over budget by more than the
//!    tolerance (10% of its limit by default)
//! 3. Slight category overrun - over budget, within the tolerance
//! 4. Near category limit - more than 85% of the category budget used
//! 5. Large share of balance - more than 10% of the current balance
//! 6. Within budget
//!
//! Evaluation is pure: the same snapshot and request always produce the same
//! decision, and metrics are filled in the same way whichever rule fires.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::categories::{resolve_category, FallbackBudget};
use crate::format::{format_money, format_percent};
use crate::models::{FinancialSnapshot, PurchaseRequest};

/// Purchase recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Yes,
    No,
    Caution,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Caution => "caution",
        }
    }

    /// Ordering by how strongly the verdict advises against buying
    pub fn severity(&self) -> u8 {
        match self {
            Self::Yes => 0,
            Self::Caution => 1,
            Self::No => 2,
        }
    }
}

impl std::str::FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            "caution" => Ok(Self::Caution),
            _ => Err(format!("Unknown verdict: {}", s)),
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How much a purchase dents the overall balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetImpact {
    Minimal,
    Moderate,
    Significant,
}

impl BudgetImpact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Moderate => "moderate",
            Self::Significant => "significant",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Minimal => "Minimal impact on overall budget",
            Self::Moderate => "Moderate impact on overall budget",
            Self::Significant => "Significant impact on overall budget",
        }
    }
}

impl std::fmt::Display for BudgetImpact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Summary figures reported with every decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionMetrics {
    pub category_budget: Decimal,
    pub category_spent: Decimal,
    pub balance_after_purchase: Decimal,
    pub overall_budget_impact: BudgetImpact,
}

/// Outcome of evaluating a purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub verdict: Verdict,
    /// The cascade rule that produced the verdict
    pub rule: Rule,
    pub reasoning: Vec<String>,
    pub metrics: DecisionMetrics,
}

/// Thresholds used by the rule cascade, all expressed as the source figures
/// use them (fractions for tolerance, percentages for the rest)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionThresholds {
    /// Overrun beyond this fraction of the limit is a hard no
    pub overrun_tolerance: Decimal,
    /// Category usage above this percentage warrants caution
    pub near_limit_percent: Decimal,
    /// Purchases above this percentage of the balance warrant caution
    pub large_purchase_percent: Decimal,
    /// Below this percentage of the balance the impact is minimal
    pub minimal_impact_percent: Decimal,
    /// Below this percentage of the balance the impact is moderate
    pub moderate_impact_percent: Decimal,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            overrun_tolerance: dec!(0.1),
            near_limit_percent: dec!(85),
            large_purchase_percent: dec!(10),
            minimal_impact_percent: dec!(1),
            moderate_impact_percent: dec!(5),
        }
    }
}

/// Evaluator configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatorConfig {
    /// Currency label used in reasoning text
    pub currency: String,
    /// Budget assumed for categories the snapshot doesn't know
    pub fallback_budget: FallbackBudget,
    pub thresholds: DecisionThresholds,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            currency: "PKR".to_string(),
            fallback_budget: FallbackBudget::default(),
            thresholds: DecisionThresholds::default(),
        }
    }
}

/// Everything the rules look at, derived once before branching
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseFigures {
    pub category: String,
    pub amount: Decimal,
    pub balance: Decimal,
    pub category_spent: Decimal,
    pub category_limit: Decimal,
    pub balance_after_purchase: Decimal,
    pub new_category_spent: Decimal,
    pub category_remaining_after_purchase: Decimal,
    /// `None` when the category limit is zero or the ratio overflows
    pub category_usage_percent: Option<Decimal>,
    /// `None` when the current balance is zero or negative, or the ratio
    /// overflows
    pub purchase_to_balance_percent: Option<Decimal>,
}

impl PurchaseFigures {
    pub fn compute(
        snapshot: &FinancialSnapshot,
        request: &PurchaseRequest,
        fallback: &FallbackBudget,
    ) -> Self {
        let resolved = resolve_category(snapshot, &request.category, fallback);
        let amount = request.amount;
        let balance = snapshot.current_balance;
        let category_spent = resolved.spent();
        let category_limit = resolved.limit();
        let new_category_spent = category_spent.saturating_add(amount);

        let category_usage_percent = if category_limit.is_zero() {
            None
        } else {
            percent_of(new_category_spent, category_limit)
        };
        let purchase_to_balance_percent = if balance > Decimal::ZERO {
            percent_of(amount, balance)
        } else {
            None
        };

        Self {
            category: request.category.clone(),
            amount,
            balance,
            category_spent,
            category_limit,
            balance_after_purchase: balance.saturating_sub(amount),
            new_category_spent,
            category_remaining_after_purchase: category_limit.saturating_sub(new_category_spent),
            category_usage_percent,
            purchase_to_balance_percent,
        }
    }

    /// Category budget left before the purchase
    pub fn category_remaining(&self) -> Decimal {
        self.category_limit.saturating_sub(self.category_spent)
    }

    /// A zero limit counts any spend as exceeding it
    pub fn exceeds_category_budget(&self) -> bool {
        self.new_category_spent > self.category_limit
    }

    pub fn overage(&self) -> Decimal {
        -self.category_remaining_after_purchase
    }

    pub fn budget_impact(&self, thresholds: &DecisionThresholds) -> BudgetImpact {
        match self.purchase_to_balance_percent {
            Some(ratio) if ratio < thresholds.minimal_impact_percent => BudgetImpact::Minimal,
            Some(ratio) if ratio < thresholds.moderate_impact_percent => BudgetImpact::Moderate,
            _ => BudgetImpact::Significant,
        }
    }

    pub fn metrics(&self, thresholds: &DecisionThresholds) -> DecisionMetrics {
        DecisionMetrics {
            category_budget: self.category_limit,
            category_spent: self.category_spent,
            balance_after_purchase: self.balance_after_purchase,
            overall_budget_impact: self.budget_impact(thresholds),
        }
    }
}

/// `part / whole` as a percentage; `None` when it doesn't fit a `Decimal`
fn percent_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    part.checked_div(whole)?.checked_mul(dec!(100))
}

/// Rules of the decision cascade, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    InsufficientBalance,
    CategoryOverrun,
    CategorySlightOverrun,
    CategoryNearLimit,
    LargeShareOfBalance,
    WithinBudget,
}

impl Rule {
    /// Evaluation order; the last rule always applies
    pub const CASCADE: [Rule; 6] = [
        Rule::InsufficientBalance,
        Rule::CategoryOverrun,
        Rule::CategorySlightOverrun,
        Rule::CategoryNearLimit,
        Rule::LargeShareOfBalance,
        Rule::WithinBudget,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InsufficientBalance => "insufficient_balance",
            Self::CategoryOverrun => "category_overrun",
            Self::CategorySlightOverrun => "category_slight_overrun",
            Self::CategoryNearLimit => "category_near_limit",
            Self::LargeShareOfBalance => "large_share_of_balance",
            Self::WithinBudget => "within_budget",
        }
    }

    pub fn verdict(&self) -> Verdict {
        match self {
            Self::InsufficientBalance | Self::CategoryOverrun => Verdict::No,
            Self::CategorySlightOverrun | Self::CategoryNearLimit | Self::LargeShareOfBalance => {
                Verdict::Caution
            }
            Self::WithinBudget => Verdict::Yes,
        }
    }

    /// Whether this rule's condition holds, ignoring earlier rules
    pub fn applies(&self, figures: &PurchaseFigures, thresholds: &DecisionThresholds) -> bool {
        match self {
            Self::InsufficientBalance => figures.balance_after_purchase <= Decimal::ZERO,
            Self::CategoryOverrun => {
                figures.exceeds_category_budget()
                    && figures.category_remaining_after_purchase
                        < -thresholds
                            .overrun_tolerance
                            .saturating_mul(figures.category_limit)
            }
            Self::CategorySlightOverrun => figures.exceeds_category_budget(),
            Self::CategoryNearLimit => figures
                .category_usage_percent
                .is_some_and(|usage| usage > thresholds.near_limit_percent),
            Self::LargeShareOfBalance => figures
                .purchase_to_balance_percent
                .is_some_and(|ratio| ratio > thresholds.large_purchase_percent),
            Self::WithinBudget => true,
        }
    }

    /// Explanation lines for this rule with the computed values filled in
    pub fn reasoning(&self, figures: &PurchaseFigures, currency: &str) -> Vec<String> {
        let money = |value: Decimal| format_money(currency, value);
        let category = &figures.category;

        match self {
            Self::InsufficientBalance => vec![
                format!(
                    "This purchase would put your account in the negative with a balance of {}.",
                    money(figures.balance_after_purchase)
                ),
                format!("You currently have {} available.", money(figures.balance)),
            ],
            Self::CategoryOverrun => vec![
                format!(
                    "This would exceed your {} budget by {}.",
                    category,
                    money(figures.overage())
                ),
                format!(
                    "You've already spent {} of your {} {} budget.",
                    money(figures.category_spent),
                    money(figures.category_limit),
                    category
                ),
                "Consider postponing this purchase to next month or adjusting your budget."
                    .to_string(),
            ],
            Self::CategorySlightOverrun => vec![
                format!(
                    "This would slightly exceed your {} budget by {}.",
                    category,
                    money(figures.overage())
                ),
                format!(
                    "You have {} remaining in your {} budget.",
                    money(figures.category_remaining()),
                    category
                ),
                "You might need to reduce spending in this category for the rest of the month."
                    .to_string(),
            ],
            Self::CategoryNearLimit => vec![
                format!(
                    "This purchase would use {}% of your {} budget.",
                    format_percent(figures.category_usage_percent.unwrap_or_default()),
                    category
                ),
                format!(
                    "You'll have only {} remaining in your {} budget after this purchase.",
                    money(figures.category_remaining_after_purchase),
                    category
                ),
                format!(
                    "Be mindful of additional {} expenses for the rest of the month.",
                    category
                ),
            ],
            Self::LargeShareOfBalance => vec![
                format!(
                    "This purchase represents {}% of your current balance.",
                    format_percent(figures.purchase_to_balance_percent.unwrap_or_default())
                ),
                "While you can afford it, it's a significant expense relative to your total funds."
                    .to_string(),
                "Consider if this purchase is a priority right now.".to_string(),
            ],
            Self::WithinBudget => vec![
                format!(
                    "You have sufficient funds for this purchase ({} available).",
                    money(figures.balance)
                ),
                format!(
                    "You'll still have {} remaining in your {} budget after this purchase.",
                    money(figures.category_remaining_after_purchase),
                    category
                ),
                "This purchase fits well within your budget plan.".to_string(),
            ],
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Evaluates purchases against a snapshot
#[derive(Debug, Clone, Default)]
pub struct PurchaseEvaluator {
    config: EvaluatorConfig,
}

impl PurchaseEvaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// First rule in the cascade whose condition holds
    pub fn select_rule(&self, figures: &PurchaseFigures) -> Rule {
        Rule::CASCADE
            .into_iter()
            .find(|rule| rule.applies(figures, &self.config.thresholds))
            .unwrap_or(Rule::WithinBudget)
    }

    pub fn evaluate(&self, snapshot: &FinancialSnapshot, request: &PurchaseRequest) -> Decision {
        let figures = PurchaseFigures::compute(snapshot, request, &self.config.fallback_budget);
        let rule = self.select_rule(&figures);

        let decision = Decision {
            verdict: rule.verdict(),
            rule,
            reasoning: rule.reasoning(&figures, &self.config.currency),
            metrics: figures.metrics(&self.config.thresholds),
        };

        tracing::debug!(
            category = %request.category,
            amount = %request.amount,
            verdict = %decision.verdict,
            rule = %rule,
            "Purchase evaluated"
        );

        decision
    }
}

/// Evaluate a purchase with the default configuration
pub fn evaluate(snapshot: &FinancialSnapshot, request: &PurchaseRequest) -> Decision {
    PurchaseEvaluator::default().evaluate(snapshot, request)
}
