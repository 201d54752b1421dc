//! Article verification workflow
//!
//! Takes a raw submission through OCR, language detection and translation,
//! extracts its factual claims, verifies them concurrently and stores
//! everything for history and stats.

use chrono::Utc;
use futures::future::join_all;
use thiserror::Error;
use tracing::{info, warn};
use verification::{
    overall_assessment, preprocess::is_valid_image_base64, Article, Claim, ExtractedClaim,
    InputType, Verdict, VerificationRecord, VerifyError,
};

use crate::domains::verification::models::{VerifiedClaim, VerifyRequest, VerifyResponse};
use crate::kernel::ServerDeps;

/// Non-blank characters required before an article is analyzed
pub const MIN_CONTENT_CHARS: usize = 10;

/// Characters of the original text echoed back in the response
pub const ORIGINAL_TEXT_PREVIEW_CHARS: usize = 500;

/// Characters of the article used as its only claim when none were extracted
pub const WHOLE_TEXT_CLAIM_CHARS: usize = 500;

#[derive(Debug, Error)]
pub enum VerifyArticleError {
    /// The submission itself is unusable
    #[error("{0}")]
    BadRequest(String),

    #[error("Verification failed: {0}")]
    Internal(VerifyError),
}

impl From<VerifyError> for VerifyArticleError {
    fn from(error: VerifyError) -> Self {
        match error {
            VerifyError::InvalidInput { reason } => Self::BadRequest(reason),
            other => Self::Internal(other),
        }
    }
}

/// Verify every factual claim of a submitted article.
pub async fn verify_article(
    deps: &ServerDeps,
    request: VerifyRequest,
) -> Result<VerifyResponse, VerifyArticleError> {
    info!(input_type = ?request.input_type, "Received verification request");

    let text = submission_text(deps, &request).await?;

    let detected_language = deps.processor.detect_language(&text).await;
    info!(language = %detected_language, "Detected language");

    let original_text = text;
    let english_text = deps
        .processor
        .translate_to_english(&original_text, &detected_language)
        .await;

    let article = Article::new(request.input_type, request.content)
        .with_language(detected_language.clone())
        .with_original_text(original_text.clone());
    deps.store.store_article(&article).await?;
    info!(article_id = %article.id, "Saved article");

    let mut extracted = deps.processor.extract_claims(&english_text).await;
    info!(count = extracted.len(), "Extracted claims");
    if extracted.is_empty() {
        extracted.push(ExtractedClaim::factual(preview(
            &english_text,
            WHOLE_TEXT_CLAIM_CHARS,
        )));
    }

    let mut claims = Vec::new();
    for extracted_claim in extracted.into_iter().take(deps.max_claims_per_article) {
        let claim = Claim::new(&article.id, extracted_claim.claim_text.clone())
            .with_english(extracted_claim.claim_text)
            .with_entities(extracted_claim.entities)
            .with_type(extracted_claim.claim_type);
        deps.store.store_claim(&claim).await?;
        claims.push(claim);
    }

    let results = join_all(claims.iter().map(|claim| deps.verifier.verify_claim(claim))).await;

    let mut verified_claims = Vec::with_capacity(results.len());
    for (claim, mut result) in claims.iter().zip(results) {
        for item in result
            .supporting_sources
            .iter_mut()
            .chain(result.contradicting_sources.iter_mut())
        {
            deps.credibility.apply_reputation(item);
        }

        deps.store
            .store_result(&VerificationRecord::new(result.clone()))
            .await?;
        verified_claims.push(VerifiedClaim::new(claim.claim_text.clone(), result));
    }

    let verdicts: Vec<Verdict> = verified_claims.iter().map(|c| c.verdict).collect();
    let overall = overall_assessment(&verdicts);
    info!(article_id = %article.id, overall = %overall, "Verification complete");

    Ok(VerifyResponse {
        article_id: article.id,
        detected_language,
        original_text: truncated_preview(&original_text, ORIGINAL_TEXT_PREVIEW_CHARS),
        claims: verified_claims,
        overall_assessment: overall.to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Text to analyze for a submission; images go through OCR, URLs are taken as text.
async fn submission_text(
    deps: &ServerDeps,
    request: &VerifyRequest,
) -> Result<String, VerifyError> {
    let text = match request.input_type {
        InputType::Image => {
            if !is_valid_image_base64(&request.content) {
                return Err(invalid_input("Invalid image data"));
            }
            deps.processor
                .extract_text_from_image(&request.content)
                .await
                .ok_or_else(|| invalid_input("Could not extract text from image"))?
        }
        InputType::Url => {
            warn!("URL input is analyzed as text; the page is not fetched");
            request.content.clone()
        }
        InputType::Text => request.content.clone(),
    };

    if text.trim().chars().count() < MIN_CONTENT_CHARS {
        return Err(invalid_input("Content too short to analyze"));
    }
    Ok(text)
}

fn invalid_input(reason: &str) -> VerifyError {
    VerifyError::InvalidInput {
        reason: reason.to_string(),
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn truncated_preview(text: &str, max_chars: usize) -> String {
    let mut shown = preview(text, max_chars);
    if text.chars().count() > max_chars {
        shown.push_str("...");
    }
    shown
}
