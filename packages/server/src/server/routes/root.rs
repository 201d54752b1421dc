use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct BannerResponse {
    message: &'static str,
    version: &'static str,
    description: &'static str,
}

/// API banner
pub async fn root_handler() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "SATYA-VERIFY API",
        version: "1.0.0",
        description: "AI-powered misinformation fact-checking for Indian regional news",
    })
}
