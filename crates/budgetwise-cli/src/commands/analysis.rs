//! Analysis commands: wellness, trends, investments

use anyhow::Result;
use budgetwise_core::format::{format_money, format_percent};
use budgetwise_core::{
    InvestmentAdvice, InvestmentAdvisor, TrendAnalyzer, TrendDirection, TrendReport,
    WellnessScore, WellnessScorer,
};
use rust_decimal_macros::dec;

use super::Context;

pub fn cmd_wellness(ctx: &Context) -> Result<()> {
    let score = WellnessScorer::new().score(&ctx.snapshot);
    ctx.emit(&score, || render_wellness(&score))
}

pub fn render_wellness(score: &WellnessScore) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!(
        "💚 Financial Wellness: {}/100 ({})\n",
        score.score, score.interpretation
    ));
    out.push_str("   ─────────────────────────────────────────────────────────────\n");
    out.push_str(&format!(
        "   Savings  {:>2}/40   savings rate {}%\n",
        score.breakdown.savings,
        format_percent(score.savings_rate * dec!(100))
    ));
    out.push_str(&format!(
        "   Budget   {:>2}/30   {} categor{} over budget\n",
        score.breakdown.budget,
        score.categories_over_budget,
        if score.categories_over_budget == 1 { "y" } else { "ies" }
    ));
    out.push_str(&format!(
        "   Assets   {:>2}/30   weighted growth {}%\n",
        score.breakdown.assets,
        format_percent(score.asset_growth * dec!(100))
    ));
    out
}

pub fn cmd_trends(ctx: &Context) -> Result<()> {
    let analyzer = TrendAnalyzer::new(ctx.config.trends.clone(), ctx.currency());
    let report = analyzer.report(&ctx.snapshot);
    ctx.emit(&report, || render_trends(&report))
}

pub fn render_trends(report: &TrendReport) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str("📈 Spending Trends\n");
    out.push_str("   ─────────────────────────────────────────────────────────────\n");

    if report.trends.is_empty() {
        out.push_str("   No significant changes since last month.\n");
        return out;
    }

    for trend in &report.trends {
        let arrow = match trend.direction {
            TrendDirection::Increase => "↑",
            TrendDirection::Decrease => "↓",
        };
        out.push_str(&format!("   {} {}\n", arrow, trend.message));
    }
    out
}

pub fn cmd_invest(ctx: &Context) -> Result<()> {
    let advice = InvestmentAdvisor::new(ctx.config.investments.clone()).advise(&ctx.snapshot);
    ctx.emit(&advice, || render_investments(&advice, ctx.currency()))
}

pub fn render_investments(advice: &InvestmentAdvice, currency: &str) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str("💰 Investment Opportunities\n");
    out.push_str(&format!(
        "   Available to invest: {}\n",
        format_money(currency, advice.available_for_investment)
    ));
    out.push_str("   ─────────────────────────────────────────────────────────────\n");

    if advice.recommended.is_empty() {
        out.push_str("   No options fit your current balance and savings rate.\n");
        return out;
    }

    for option in &advice.recommended {
        out.push_str(&format!(
            "   {} ({}) - {}% expected, {} risk, min {}\n",
            option.name,
            option.kind,
            format_percent(option.expected_return),
            option.risk_level,
            format_money(currency, option.min_investment)
        ));
    }
    out
}
