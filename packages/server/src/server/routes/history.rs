use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    Json,
};
use serde::{Deserialize, Serialize};
use verification::Article;

use crate::server::app::AppState;
use crate::server::error::ApiError;

const DEFAULT_HISTORY_LIMIT: usize = 20;

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    limit: Option<usize>,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    history: Vec<Article>,
    count: usize,
}

/// Most recent articles first
pub async fn history_handler(
    Extension(state): Extension<AppState>,
    params: Result<Query<HistoryParams>, QueryRejection>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let Query(params) = params?;
    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);

    let history = state
        .deps
        .store
        .recent_articles(limit)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch history");
            ApiError::internal("Failed to fetch history")
        })?;

    Ok(Json(HistoryResponse {
        count: history.len(),
        history,
    }))
}
