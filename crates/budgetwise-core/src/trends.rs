//! Month-over-month spending trends
//!
//! Compares the last two months of [`SpendingHistory`] for each budgeted
//! category and reports the ones that moved by at least the configured
//! percentage. Also shapes history into per-month chart points for the
//! heaviest-spending categories.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::format::{format_money, format_percent};
use crate::models::{CategoryBudget, FinancialSnapshot, SpendingHistory};
use crate::wellness::saturating_div;

/// Trend detection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendConfig {
    /// Smallest absolute percentage change worth reporting
    pub min_percent_change: Decimal,
    /// Number of categories plotted by [`TrendAnalyzer::chart_series`]
    pub chart_categories: usize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            min_percent_change: dec!(10),
            chart_categories: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increase,
    Decrease,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increase => "increase",
            Self::Decrease => "decrease",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Increase => "Increase",
            Self::Decrease => "Decrease",
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A notable change in one category between the last two months
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingTrend {
    pub category: String,
    pub previous: Decimal,
    pub latest: Decimal,
    pub change_percent: Decimal,
    pub direction: TrendDirection,
    pub message: String,
}

/// One month of spending for the charted categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub month: String,
    pub values: BTreeMap<String, Decimal>,
}

/// Trends plus chart data, as served to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub trends: Vec<SpendingTrend>,
    pub chart_categories: Vec<String>,
    pub chart: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Default)]
pub struct TrendAnalyzer {
    config: TrendConfig,
    currency: String,
}

impl TrendAnalyzer {
    pub fn new(config: TrendConfig, currency: impl Into<String>) -> Self {
        Self {
            config,
            currency: currency.into(),
        }
    }

    pub fn config(&self) -> &TrendConfig {
        &self.config
    }

    /// Categories whose spending moved by at least `min_percent_change`,
    /// largest absolute change first
    pub fn analyze(&self, snapshot: &FinancialSnapshot) -> Vec<SpendingTrend> {
        let Some(history) = &snapshot.history else {
            return Vec::new();
        };
        let [.., previous_month, latest_month] = history.months.as_slice() else {
            return Vec::new();
        };

        let mut trends: Vec<SpendingTrend> = snapshot
            .categories
            .iter()
            .filter(|category| history.category(&category.name).is_some())
            .filter_map(|category| {
                let previous = history.amount(&category.name, previous_month);
                let latest = history.amount(&category.name, latest_month);
                self.compare(&category.name, previous, latest)
            })
            .collect();

        trends.sort_by(|a, b| b.change_percent.abs().cmp(&a.change_percent.abs()));

        tracing::debug!(
            count = trends.len(),
            previous = %previous_month,
            latest = %latest_month,
            "Spending trends analyzed"
        );
        trends
    }

    fn compare(&self, category: &str, previous: Decimal, latest: Decimal) -> Option<SpendingTrend> {
        if previous <= Decimal::ZERO {
            return None;
        }
        let change_percent =
            saturating_div(latest.saturating_sub(previous), previous).saturating_mul(dec!(100));
        if change_percent.abs() < self.config.min_percent_change {
            return None;
        }

        let direction = if change_percent > Decimal::ZERO {
            TrendDirection::Increase
        } else {
            TrendDirection::Decrease
        };
        let message = format!(
            "{} spending {} by {}% ({} to {})",
            category,
            match direction {
                TrendDirection::Increase => "increased",
                TrendDirection::Decrease => "decreased",
            },
            format_percent(change_percent.abs()),
            format_money(&self.currency, previous),
            format_money(&self.currency, latest),
        );

        Some(SpendingTrend {
            category: category.to_string(),
            previous,
            latest,
            change_percent,
            direction,
            message,
        })
    }

    /// Per-month spending for the `top_n` categories with the most spent.
    /// Months without an entry plot as zero.
    pub fn chart_series(
        history: &SpendingHistory,
        categories: &[CategoryBudget],
        top_n: usize,
    ) -> (Vec<String>, Vec<ChartPoint>) {
        let mut ranked: Vec<&CategoryBudget> = categories.iter().collect();
        // Stable sort keeps snapshot order among equal spends
        ranked.sort_by(|a, b| b.spent.cmp(&a.spent));

        let names: Vec<String> = ranked
            .into_iter()
            .take(top_n)
            .filter(|category| history.category(&category.name).is_some())
            .map(|category| category.name.clone())
            .collect();

        let points = history
            .months
            .iter()
            .map(|month| ChartPoint {
                month: month.clone(),
                values: names
                    .iter()
                    .map(|name| (name.clone(), history.amount(name, month)))
                    .collect(),
            })
            .collect();

        (names, points)
    }

    /// Trends and chart series together
    pub fn report(&self, snapshot: &FinancialSnapshot) -> TrendReport {
        let trends = self.analyze(snapshot);
        let (chart_categories, chart) = match &snapshot.history {
            Some(history) => {
                Self::chart_series(history, &snapshot.categories, self.config.chart_categories)
            }
            None => (Vec::new(), Vec::new()),
        };

        TrendReport {
            trends,
            chart_categories,
            chart,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(rows: &[(&str, &[(&str, Decimal)])]) -> SpendingHistory {
        let mut spending = BTreeMap::new();
        for (category, months) in rows {
            spending.insert(
                category.to_string(),
                months
                    .iter()
                    .map(|(month, amount)| (month.to_string(), *amount))
                    .collect(),
            );
        }
        SpendingHistory {
            months: vec!["Dec".to_string(), "Jan".to_string(), "Feb".to_string()],
            spending,
        }
    }

    fn snapshot(categories: Vec<CategoryBudget>, history: Option<SpendingHistory>) -> FinancialSnapshot {
        FinancialSnapshot {
            period: Some("February 2023".to_string()),
            current_balance: dec!(100000),
            total_income: dec!(50000),
            total_expenses: dec!(40000),
            categories,
            assets: vec![],
            history,
        }
    }

    fn analyzer() -> TrendAnalyzer {
        TrendAnalyzer::new(TrendConfig::default(), "PKR")
    }

    #[test]
    fn test_reports_changes_over_threshold() {
        let history = history(&[
            ("Food", &[("Jan", dec!(4000)), ("Feb", dec!(5000))]),
            ("Car", &[("Jan", dec!(3000)), ("Feb", dec!(2800))]),
            ("Shipping", &[("Jan", dec!(10000)), ("Feb", dec!(35000))]),
        ]);
        let snapshot = snapshot(
            vec![
                CategoryBudget::new("Food", dec!(5000), dec!(20000)),
                CategoryBudget::new("Car", dec!(2800), dec!(5000)),
                CategoryBudget::new("Shipping", dec!(35000), dec!(6000)),
            ],
            Some(history),
        );

        let trends = analyzer().analyze(&snapshot);

        // Car moved 6.7%, under the threshold
        assert_eq!(trends.len(), 2);
        assert_eq!(trends[0].category, "Shipping");
        assert_eq!(trends[0].change_percent, dec!(250));
        assert_eq!(trends[0].direction, TrendDirection::Increase);
        assert_eq!(
            trends[0].message,
            "Shipping spending increased by 250.0% (PKR 10,000 to PKR 35,000)"
        );
        assert_eq!(trends[1].category, "Food");
        assert_eq!(trends[1].change_percent, dec!(25));
    }

    #[test]
    fn test_decrease_direction() {
        let history = history(&[("Dining", &[("Jan", dec!(8000)), ("Feb", dec!(2000))])]);
        let snapshot = snapshot(
            vec![CategoryBudget::new("Dining", dec!(2000), dec!(5000))],
            Some(history),
        );

        let trends = analyzer().analyze(&snapshot);
        assert_eq!(trends.len(), 1);
        assert_eq!(trends[0].direction, TrendDirection::Decrease);
        assert_eq!(trends[0].change_percent, dec!(-75));
        assert!(trends[0].message.contains("decreased by 75.0%"));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let history = history(&[("Food", &[("Jan", dec!(1000)), ("Feb", dec!(1100))])]);
        let snapshot = snapshot(
            vec![CategoryBudget::new("Food", dec!(1100), dec!(2000))],
            Some(history),
        );
        assert_eq!(analyzer().analyze(&snapshot).len(), 1);
    }

    #[test]
    fn test_skips_zero_previous_month() {
        let history = history(&[("Gifts", &[("Feb", dec!(3000))])]);
        let snapshot = snapshot(
            vec![CategoryBudget::new("Gifts", dec!(3000), dec!(5000))],
            Some(history),
        );
        assert!(analyzer().analyze(&snapshot).is_empty());
    }

    #[test]
    fn test_ignores_categories_without_history() {
        let history = history(&[("Food", &[("Jan", dec!(1000)), ("Feb", dec!(3000))])]);
        let snapshot = snapshot(
            vec![
                CategoryBudget::new("Food", dec!(3000), dec!(5000)),
                CategoryBudget::new("Travel", dec!(9000), dec!(5000)),
            ],
            Some(history),
        );

        let trends = analyzer().analyze(&snapshot);
        assert_eq!(trends.len(), 1);
        assert_eq!(trends[0].category, "Food");
    }

    #[test]
    fn test_needs_two_months() {
        let mut single = history(&[("Food", &[("Feb", dec!(1000))])]);
        single.months = vec!["Feb".to_string()];
        let snapshot_one = snapshot(
            vec![CategoryBudget::new("Food", dec!(1000), dec!(5000))],
            Some(single),
        );
        assert!(analyzer().analyze(&snapshot_one).is_empty());

        let no_history = snapshot(vec![CategoryBudget::new("Food", dec!(1000), dec!(5000))], None);
        assert!(analyzer().analyze(&no_history).is_empty());
    }

    #[test]
    fn test_custom_threshold() {
        let history = history(&[("Food", &[("Jan", dec!(1000)), ("Feb", dec!(1050))])]);
        let snapshot = snapshot(
            vec![CategoryBudget::new("Food", dec!(1050), dec!(5000))],
            Some(history),
        );
        let config = TrendConfig {
            min_percent_change: dec!(5),
            ..TrendConfig::default()
        };
        assert_eq!(TrendAnalyzer::new(config, "PKR").analyze(&snapshot).len(), 1);
    }

    #[test]
    fn test_chart_series_top_categories() {
        let history = history(&[
            ("Food", &[("Dec", dec!(100)), ("Feb", dec!(300))]),
            ("Car", &[("Jan", dec!(50))]),
            ("Shipping", &[("Feb", dec!(900))]),
        ]);
        let categories = vec![
            CategoryBudget::new("Car", dec!(50), dec!(500)),
            CategoryBudget::new("Shipping", dec!(900), dec!(600)),
            CategoryBudget::new("Food", dec!(300), dec!(2000)),
        ];

        let (names, points) = TrendAnalyzer::chart_series(&history, &categories, 2);

        assert_eq!(names, vec!["Shipping".to_string(), "Food".to_string()]);
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].month, "Dec");
        assert_eq!(points[0].values["Food"], dec!(100));
        assert_eq!(points[0].values["Shipping"], Decimal::ZERO);
        assert_eq!(points[2].values["Shipping"], dec!(900));
        assert!(!points[1].values.contains_key("Car"));
    }

    #[test]
    fn test_report_without_history_is_empty() {
        let report = analyzer().report(&snapshot(vec![], None));
        assert!(report.trends.is_empty());
        assert!(report.chart.is_empty());
        assert!(report.chart_categories.is_empty());
    }

    #[test]
    fn test_extreme_change_saturates() {
        let huge = Decimal::from_i128_with_scale(10_i128.pow(27), 0);
        let history = history(&[("Food", &[("Jan", dec!(0.001)), ("Feb", huge)])]);
        let snapshot = snapshot(
            vec![CategoryBudget::new("Food", huge, dec!(20000))],
            Some(history),
        );

        let trends = analyzer().analyze(&snapshot);
        assert_eq!(trends.len(), 1);
        assert_eq!(trends[0].direction, TrendDirection::Increase);
        assert_eq!(trends[0].change_percent, Decimal::MAX);
    }
}
