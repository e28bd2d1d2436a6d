//! Budgetwise Core Library
//!
//! Shared functionality for the Budgetwise purchase advisor:
//! - Financial snapshot model and validation
//! - Purchase decision evaluator (rule cascade producing yes / no / caution)
//! - Financial wellness score
//! - Month-over-month spending trends
//! - Investment suggestions
//! - TOML configuration with embedded defaults
//!
//! Everything except snapshot and config loading is pure and synchronous.

pub mod categories;
pub mod config;
pub mod decision;
pub mod error;
pub mod format;
pub mod investments;
pub mod models;
pub mod summary;
pub mod trends;
pub mod wellness;

pub use categories::{resolve_category, FallbackBudget, ResolvedCategory};
pub use config::Config;
pub use decision::{
    evaluate, BudgetImpact, Decision, DecisionMetrics, DecisionThresholds, EvaluatorConfig,
    PurchaseEvaluator, PurchaseFigures, Rule, Verdict,
};
pub use error::{Error, Result};
pub use investments::{
    InvestmentAdvice, InvestmentAdvisor, InvestmentConfig, InvestmentOption, RiskLevel,
};
pub use models::{AssetHolding, CategoryBudget, FinancialSnapshot, PurchaseRequest, SpendingHistory};
pub use summary::SnapshotSummary;
pub use trends::{ChartPoint, SpendingTrend, TrendAnalyzer, TrendConfig, TrendDirection, TrendReport};
pub use wellness::{Interpretation, ScoreBreakdown, WellnessScore, WellnessScorer};
