use axum::{
    extract::{rejection::JsonRejection, Extension},
    Json,
};

use crate::domains::verification::{verify_article, VerifyRequest, VerifyResponse};
use crate::server::app::AppState;
use crate::server::error::ApiError;

/// Verify a submitted article
pub async fn verify_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let Json(request) = payload?;
    let response = verify_article(&state.deps, request).await?;
    Ok(Json(response))
}
