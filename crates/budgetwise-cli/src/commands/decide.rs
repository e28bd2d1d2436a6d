//! Purchase decision command

use anyhow::Result;
use budgetwise_core::format::format_money;
use budgetwise_core::{Decision, PurchaseEvaluator, PurchaseRequest, Verdict};
use rust_decimal::Decimal;

use super::Context;

pub fn cmd_decide(
    ctx: &Context,
    amount: Decimal,
    category: &str,
    description: Option<String>,
) -> Result<()> {
    let mut request = PurchaseRequest::new(amount, category);
    if let Some(description) = description {
        request = request.with_description(description);
    }
    request.validate()?;

    let evaluator = PurchaseEvaluator::new(ctx.config.evaluator.clone());
    let decision = evaluator.evaluate(&ctx.snapshot, &request);

    ctx.emit(&decision, || {
        render_decision(&request, &decision, ctx.currency())
    })
}

pub fn render_decision(request: &PurchaseRequest, decision: &Decision, currency: &str) -> String {
    let headline = match decision.verdict {
        Verdict::Yes => "✅ Yes, go ahead",
        Verdict::Caution => "⚠️  Proceed with caution",
        Verdict::No => "❌ No, hold off",
    };
    let item = request
        .description
        .as_deref()
        .map(|d| format!("{} ", d))
        .unwrap_or_default();

    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!(
        "🛒 {}{} in {}\n",
        item,
        format_money(currency, request.amount),
        request.category
    ));
    out.push_str(&format!("   {}\n", headline));
    out.push_str("   ─────────────────────────────────────────────────────────────\n");
    for line in &decision.reasoning {
        out.push_str(&format!("   • {}\n", line));
    }
    out.push('\n');

    let metrics = &decision.metrics;
    out.push_str(&format!(
        "   Category budget:  {}\n",
        format_money(currency, metrics.category_budget)
    ));
    out.push_str(&format!(
        "   Already spent:    {}\n",
        format_money(currency, metrics.category_spent)
    ));
    out.push_str(&format!(
        "   Balance after:    {}\n",
        format_money(currency, metrics.balance_after_purchase)
    ));
    out.push_str(&format!(
        "   Impact:           {}\n",
        metrics.overall_budget_impact.description()
    ));
    out
}
