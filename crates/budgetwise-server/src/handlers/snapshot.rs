//! Snapshot handlers

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    Json,
};
use budgetwise_core::{FinancialSnapshot, SnapshotSummary};

use super::read_json;
use crate::{AppError, AppState};

/// GET /api/snapshot - The loaded snapshot
pub async fn get_snapshot(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FinancialSnapshot>, AppError> {
    Ok(Json(state.current_snapshot().await?))
}

/// PUT /api/snapshot - Replace the loaded snapshot
pub async fn put_snapshot(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<SnapshotSummary>, AppError> {
    let snapshot: FinancialSnapshot = read_json(request.into_body()).await?;
    snapshot.validate()?;

    let summary = SnapshotSummary::from_snapshot(&snapshot);
    tracing::info!(
        categories = snapshot.categories.len(),
        assets = snapshot.assets.len(),
        "Snapshot replaced"
    );
    *state.snapshot.write().await = Some(snapshot);

    Ok(Json(summary))
}

/// GET /api/summary - Headline figures for the loaded snapshot
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SnapshotSummary>, AppError> {
    let snapshot = state.current_snapshot().await?;
    Ok(Json(SnapshotSummary::from_snapshot(&snapshot)))
}
