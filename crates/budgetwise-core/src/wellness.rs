//! Financial wellness score
//!
//! A 0-100 composite of three components, each clamped to its own range
//! before summing:
//!
//! - **Savings** (0-40) - savings rate as whole percentage points, so a 40%
//!   savings rate earns the maximum
//! - **Budget** (0-30) - 30 minus 5 for every category over budget
//! - **Assets** (0-30) - value-weighted annual growth times 300, so 10%
//!   weighted growth earns the maximum

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::{AssetHolding, FinancialSnapshot};

pub const MAX_SAVINGS_POINTS: u32 = 40;
pub const MAX_BUDGET_POINTS: u32 = 30;
pub const MAX_ASSET_POINTS: u32 = 30;
/// Points lost per over-budget category
pub const OVER_BUDGET_PENALTY: u32 = 5;

/// Score band shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpretation {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl Interpretation {
    /// Bands are inclusive at their lower bound
    pub fn from_score(score: u32) -> Self {
        match score {
            80.. => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::Fair,
            _ => Self::NeedsImprovement,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::NeedsImprovement => "needs_improvement",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl std::fmt::Display for Interpretation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Points earned by each component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub savings: u32,
    pub budget: u32,
    pub assets: u32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        self.savings + self.budget + self.assets
    }
}

/// Composite financial health score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellnessScore {
    pub score: u32,
    /// Fraction of income kept this period
    pub savings_rate: Decimal,
    pub categories_over_budget: u32,
    /// Value-weighted annual growth across holdings, as a fraction
    pub asset_growth: Decimal,
    pub breakdown: ScoreBreakdown,
    pub interpretation: Interpretation,
}

/// Computes [`WellnessScore`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct WellnessScorer;

impl WellnessScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, snapshot: &FinancialSnapshot) -> WellnessScore {
        let savings_rate = savings_rate(snapshot.total_income, snapshot.total_expenses);
        let categories_over_budget = snapshot.over_budget_categories().count() as u32;
        let asset_growth = weighted_asset_growth(&snapshot.assets);

        let breakdown = ScoreBreakdown {
            savings: scaled_points(savings_rate.saturating_mul(dec!(100)), MAX_SAVINGS_POINTS),
            budget: MAX_BUDGET_POINTS
                .saturating_sub(categories_over_budget.saturating_mul(OVER_BUDGET_PENALTY)),
            assets: scaled_points(asset_growth.saturating_mul(dec!(300)), MAX_ASSET_POINTS),
        };
        let score = breakdown.total();

        tracing::debug!(
            score,
            savings = breakdown.savings,
            budget = breakdown.budget,
            assets = breakdown.assets,
            "Wellness score computed"
        );

        WellnessScore {
            score,
            savings_rate,
            categories_over_budget,
            asset_growth,
            breakdown,
            interpretation: Interpretation::from_score(score),
        }
    }
}

/// Fraction of income not spent; zero when there is no income.
/// Saturates when the ratio is too large for a `Decimal`.
pub fn savings_rate(income: Decimal, expenses: Decimal) -> Decimal {
    if income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    saturating_div(income.saturating_sub(expenses), income)
}

/// Growth rate averaged over holdings, weighted by value; zero when the
/// holdings are worth nothing
pub fn weighted_asset_growth(assets: &[AssetHolding]) -> Decimal {
    let (weighted_sum, total_value) = assets.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(weighted_sum, total_value), asset| {
            (
                weighted_sum.saturating_add(asset.annual_growth_rate.saturating_mul(asset.value)),
                total_value.saturating_add(asset.value),
            )
        },
    );

    if total_value <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    saturating_div(weighted_sum, total_value)
}

/// Division that clamps to `Decimal::MAX`/`Decimal::MIN` instead of overflowing
pub(crate) fn saturating_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(
        if numerator.is_sign_negative() != denominator.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        },
    )
}

/// Round to whole points and clamp into `0..=max`
fn scaled_points(raw: Decimal, max: u32) -> u32 {
    let rounded = raw.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    if rounded <= Decimal::ZERO {
        return 0;
    }
    rounded.to_u32().map_or(max, |points| points.min(max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryBudget;

    fn snapshot(
        income: Decimal,
        expenses: Decimal,
        categories: Vec<CategoryBudget>,
        assets: Vec<AssetHolding>,
    ) -> FinancialSnapshot {
        FinancialSnapshot {
            period: None,
            current_balance: dec!(100000),
            total_income: income,
            total_expenses: expenses,
            categories,
            assets,
            history: None,
        }
    }

    fn over_budget(name: &str) -> CategoryBudget {
        CategoryBudget::new(name, dec!(200), dec!(100))
    }

    #[test]
    fn test_reference_scenario() {
        let categories = vec![
            over_budget("Shipping"),
            over_budget("Dining"),
            over_budget("Travel"),
            CategoryBudget::new("Food", dec!(5000), dec!(20000)),
        ];
        // (0.06 * 400,000 + 0.042 * 600,000) / 1,000,000 = 0.0492 -> 14.76 -> 15
        let assets = vec![
            AssetHolding::new("Stocks", dec!(400000), dec!(0.06)),
            AssetHolding::new("Savings", dec!(600000), dec!(0.042)),
        ];
        let score = WellnessScorer::new().score(&snapshot(
            dec!(378000),
            dec!(350604),
            categories,
            assets,
        ));

        assert_eq!(score.breakdown.savings, 7);
        assert_eq!(score.categories_over_budget, 3);
        assert_eq!(score.breakdown.budget, 15);
        assert_eq!(score.asset_growth, dec!(0.0492));
        assert_eq!(score.breakdown.assets, 15);
        assert_eq!(score.score, 37);
        assert_eq!(score.interpretation, Interpretation::NeedsImprovement);
        assert!((score.savings_rate - dec!(0.0725)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_savings_capped_at_forty() {
        let score = WellnessScorer::new().score(&snapshot(dec!(1000), dec!(100), vec![], vec![]));
        assert_eq!(score.savings_rate, dec!(0.9));
        assert_eq!(score.breakdown.savings, 40);
    }

    #[test]
    fn test_negative_savings_scores_zero() {
        let score = WellnessScorer::new().score(&snapshot(dec!(1000), dec!(1500), vec![], vec![]));
        assert_eq!(score.savings_rate, dec!(-0.5));
        assert_eq!(score.breakdown.savings, 0);
    }

    #[test]
    fn test_zero_income_scores_zero_savings() {
        let score = WellnessScorer::new().score(&snapshot(dec!(0), dec!(500), vec![], vec![]));
        assert_eq!(score.savings_rate, Decimal::ZERO);
        assert_eq!(score.breakdown.savings, 0);
    }

    #[test]
    fn test_budget_points_floor_at_zero() {
        let categories: Vec<_> = (0..8).map(|i| over_budget(&format!("C{}", i))).collect();
        let score =
            WellnessScorer::new().score(&snapshot(dec!(1000), dec!(1000), categories, vec![]));
        assert_eq!(score.categories_over_budget, 8);
        assert_eq!(score.breakdown.budget, 0);
    }

    #[test]
    fn test_category_exactly_at_limit_is_not_over() {
        let categories = vec![CategoryBudget::new("Grocery", dec!(10000), dec!(10000))];
        let score =
            WellnessScorer::new().score(&snapshot(dec!(1000), dec!(1000), categories, vec![]));
        assert_eq!(score.categories_over_budget, 0);
        assert_eq!(score.breakdown.budget, 30);
    }

    #[test]
    fn test_asset_points_capped_and_floored() {
        let strong = vec![AssetHolding::new("Equity", dec!(1000), dec!(0.25))];
        let score = WellnessScorer::new().score(&snapshot(dec!(0), dec!(0), vec![], strong));
        assert_eq!(score.breakdown.assets, 30);

        let shrinking = vec![AssetHolding::new("Crypto", dec!(1000), dec!(-0.4))];
        let score = WellnessScorer::new().score(&snapshot(dec!(0), dec!(0), vec![], shrinking));
        assert_eq!(score.asset_growth, dec!(-0.4));
        assert_eq!(score.breakdown.assets, 0);
    }

    #[test]
    fn test_no_assets_scores_zero_growth() {
        assert_eq!(weighted_asset_growth(&[]), Decimal::ZERO);

        let worthless = vec![AssetHolding::new("Bond", Decimal::ZERO, dec!(0.1))];
        assert_eq!(weighted_asset_growth(&worthless), Decimal::ZERO);
    }

    #[test]
    fn test_growth_weighted_by_value() {
        let assets = vec![
            AssetHolding::new("Small", dec!(100), dec!(0.5)),
            AssetHolding::new("Large", dec!(900), dec!(0)),
        ];
        assert_eq!(weighted_asset_growth(&assets), dec!(0.05));
    }

    #[test]
    fn test_interpretation_bands() {
        assert_eq!(Interpretation::from_score(100), Interpretation::Excellent);
        assert_eq!(Interpretation::from_score(80), Interpretation::Excellent);
        assert_eq!(Interpretation::from_score(79), Interpretation::Good);
        assert_eq!(Interpretation::from_score(60), Interpretation::Good);
        assert_eq!(Interpretation::from_score(59), Interpretation::Fair);
        assert_eq!(Interpretation::from_score(40), Interpretation::Fair);
        assert_eq!(Interpretation::from_score(39), Interpretation::NeedsImprovement);
        assert_eq!(Interpretation::from_score(0), Interpretation::NeedsImprovement);
    }

    #[test]
    fn test_perfect_score() {
        let assets = vec![AssetHolding::new("Index", dec!(5000), dec!(0.12))];
        let score = WellnessScorer::new().score(&snapshot(dec!(1000), dec!(500), vec![], assets));
        assert_eq!(score.score, 100);
        assert_eq!(score.interpretation, Interpretation::Excellent);
    }

    #[test]
    fn test_score_is_sum_of_bounded_parts() {
        let incomes = [dec!(0), dec!(1000), dec!(5000)];
        let expenses = [dec!(0), dec!(900), dec!(7000)];
        let growths = [dec!(-0.2), dec!(0.01), dec!(0.3)];

        for income in incomes {
            for expense in expenses {
                for growth in growths {
                    for over in 0..8 {
                        let categories = (0..over).map(|i| over_budget(&format!("C{}", i))).collect();
                        let assets = vec![AssetHolding::new("A", dec!(1000), growth)];
                        let score = WellnessScorer::new()
                            .score(&snapshot(income, expense, categories, assets));

                        assert!(score.score <= 100);
                        assert!(score.breakdown.savings <= MAX_SAVINGS_POINTS);
                        assert!(score.breakdown.budget <= MAX_BUDGET_POINTS);
                        assert!(score.breakdown.assets <= MAX_ASSET_POINTS);
                        assert_eq!(score.score, score.breakdown.total());
                    }
                }
            }
        }
    }

    #[test]
    fn test_serialized_interpretation() {
        let score = WellnessScorer::new().score(&snapshot(dec!(0), dec!(0), vec![], vec![]));
        let json = serde_json::to_value(&score).unwrap();
        assert_eq!(json["interpretation"], "needs_improvement");
        assert_eq!(json["breakdown"]["budget"], 30);
    }

    #[test]
    fn test_extreme_values_saturate() {
        let huge = Decimal::from_i128_with_scale(10_i128.pow(27), 0);

        assert_eq!(savings_rate(dec!(0.001), huge), Decimal::MIN);

        let assets = vec![AssetHolding::new("Venture", huge, dec!(100))];
        let score = WellnessScorer::new().score(&snapshot(dec!(0.001), huge, vec![], assets));

        assert_eq!(score.breakdown.savings, 0);
        assert_eq!(score.breakdown.assets, MAX_ASSET_POINTS);
        assert_eq!(score.score, MAX_BUDGET_POINTS + MAX_ASSET_POINTS);
    }
}
