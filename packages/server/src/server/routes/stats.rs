use axum::{extract::Extension, Json};
use verification::VerificationStats;

use crate::server::app::AppState;
use crate::server::error::ApiError;

/// Totals and verdict distribution
pub async fn stats_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<VerificationStats>, ApiError> {
    let stats = state.deps.store.stats().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch stats");
        ApiError::internal("Failed to fetch statistics")
    })?;
    Ok(Json(stats))
}
