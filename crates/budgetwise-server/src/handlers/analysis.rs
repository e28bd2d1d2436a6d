//! Decision and analysis handlers

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    Json,
};
use budgetwise_core::{
    Decision, InvestmentAdvice, InvestmentAdvisor, PurchaseEvaluator, PurchaseRequest,
    TrendAnalyzer, TrendReport, WellnessScore, WellnessScorer,
};

use super::read_json;
use crate::{AppError, AppState};

/// POST /api/decision - Evaluate a hypothetical purchase
pub async fn evaluate_purchase(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Decision>, AppError> {
    let snapshot = state.current_snapshot().await?;
    let purchase: PurchaseRequest = read_json(request.into_body()).await?;
    purchase.validate()?;

    let decision =
        PurchaseEvaluator::new(state.config.evaluator.clone()).evaluate(&snapshot, &purchase);

    Ok(Json(decision))
}

/// GET /api/wellness - Financial wellness score
pub async fn get_wellness(
    State(state): State<Arc<AppState>>,
) -> Result<Json<WellnessScore>, AppError> {
    let snapshot = state.current_snapshot().await?;
    Ok(Json(WellnessScorer::new().score(&snapshot)))
}

/// GET /api/trends - Month-over-month changes and chart series
pub async fn get_trends(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TrendReport>, AppError> {
    let snapshot = state.current_snapshot().await?;
    let analyzer = TrendAnalyzer::new(state.config.trends.clone(), state.config.currency());
    Ok(Json(analyzer.report(&snapshot)))
}

/// GET /api/investments - Investment options the user can afford
pub async fn get_investments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<InvestmentAdvice>, AppError> {
    let snapshot = state.current_snapshot().await?;
    let advisor = InvestmentAdvisor::new(state.config.investments.clone());
    Ok(Json(advisor.advise(&snapshot)))
}
