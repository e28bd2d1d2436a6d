//! Snapshot summary command

use anyhow::Result;
use budgetwise_core::format::{format_amount, format_money};
use budgetwise_core::{CategoryBudget, FinancialSnapshot, SnapshotSummary};
use serde::Serialize;

use super::{truncate, Context};

/// Summary plus the category table, as printed with --json
#[derive(Serialize)]
struct SummaryOutput<'a> {
    #[serde(flatten)]
    summary: &'a SnapshotSummary,
    categories: &'a [CategoryBudget],
}

pub fn cmd_summary(ctx: &Context) -> Result<()> {
    let summary = SnapshotSummary::from_snapshot(&ctx.snapshot);
    let output = SummaryOutput {
        summary: &summary,
        categories: &ctx.snapshot.categories,
    };
    ctx.emit(&output, || {
        render_summary(&summary, &ctx.snapshot, ctx.currency())
    })
}

pub fn render_summary(
    summary: &SnapshotSummary,
    snapshot: &FinancialSnapshot,
    currency: &str,
) -> String {
    let mut out = String::new();
    out.push('\n');
    match &summary.period {
        Some(period) => out.push_str(&format!("📊 Financial Summary ({})\n", period)),
        None => out.push_str("📊 Financial Summary\n"),
    }
    out.push_str("   ─────────────────────────────────────────────────────────────\n");
    out.push_str(&format!(
        "   Balance:   {}\n",
        format_money(currency, summary.current_balance)
    ));
    out.push_str(&format!(
        "   Income:    {}\n",
        format_money(currency, summary.total_income)
    ));
    out.push_str(&format!(
        "   Expenses:  {}\n",
        format_money(currency, summary.total_expenses)
    ));
    out.push_str(&format!("   Net:       {}\n", format_money(currency, summary.net)));

    if snapshot.categories.is_empty() {
        out.push_str("\n   No category budgets.\n");
        return out;
    }

    out.push('\n');
    out.push_str(&format!(
        "   {:20} │ {:>12} │ {:>12} │ {:>12}\n",
        "Category", "Spent", "Limit", "Remaining"
    ));
    out.push_str("   ─────────────────────┼──────────────┼──────────────┼──────────────\n");
    for category in &snapshot.categories {
        let marker = if category.is_over_budget() { " ⚠️" } else { "" };
        out.push_str(&format!(
            "   {:20} │ {:>12} │ {:>12} │ {:>12}{}\n",
            truncate(&category.name, 20),
            format_amount(category.spent),
            format_amount(category.limit),
            format_amount(category.remaining()),
            marker
        ));
    }
    out.push_str(&format!(
        "   {:20} │ {:>12} │ {:>12} │\n",
        "Total",
        format_amount(summary.total_spent),
        format_amount(summary.total_budget),
    ));

    if !summary.categories_over_budget.is_empty() {
        out.push('\n');
        out.push_str(&format!(
            "   Over budget: {}\n",
            summary.categories_over_budget.join(", ")
        ));
    }
    out
}
