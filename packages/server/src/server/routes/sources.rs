use axum::{extract::Extension, Json};
use serde::Serialize;
use verification::TrustedDomain;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct SourcesResponse {
    sources: Vec<TrustedDomain>,
    count: usize,
}

/// Trusted domains, highest credibility first
pub async fn sources_handler(Extension(state): Extension<AppState>) -> Json<SourcesResponse> {
    let sources = state.deps.credibility.trusted_sources();
    Json(SourcesResponse {
        count: sources.len(),
        sources,
    })
}
