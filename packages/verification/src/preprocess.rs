//! Article preprocessing: OCR, language detection, translation, claim extraction.
//!
//! Every step degrades instead of failing, so a submission always reaches
//! claim verification with some text.

use std::sync::Arc;

use base64::Engine;

use crate::pipeline::{parse, prompts};
use crate::traits::reasoner::Reasoner;
use crate::traits::vision::ImageReader;
use crate::types::article::ExtractedClaim;
use crate::types::verdict::Verdict;

/// Language assumed when detection fails.
pub const DEFAULT_LANGUAGE: &str = "English";

/// Characters of article text kept when claim extraction is unreadable.
pub const FALLBACK_CLAIM_CHARS: usize = 500;

/// Turns a submission into English text and candidate claims.
pub struct ArticleProcessor {
    reasoner: Arc<dyn Reasoner>,
    image_reader: Arc<dyn ImageReader>,
}

impl ArticleProcessor {
    pub fn new(reasoner: Arc<dyn Reasoner>, image_reader: Arc<dyn ImageReader>) -> Self {
        Self {
            reasoner,
            image_reader,
        }
    }

    /// OCR an image. `None` when the image holds no text or OCR failed.
    pub async fn extract_text_from_image(&self, image_base64: &str) -> Option<String> {
        match self.image_reader.read_text(image_base64).await {
            Ok(Some(text)) if !text.trim().is_empty() => {
                tracing::info!(length = text.len(), "OCR extracted text");
                Some(text.trim().to_string())
            }
            Ok(_) => {
                tracing::warn!("No text extracted from image");
                None
            }
            Err(e) => {
                tracing::error!(error = %e, "OCR extraction failed");
                None
            }
        }
    }

    /// Name of the text's primary language, `English` on failure.
    pub async fn detect_language(&self, text: &str) -> String {
        let prompt = prompts::format_language_prompt(text);
        match self.reasoner.invoke(prompts::LANGUAGE_SYSTEM, &prompt).await {
            Ok(response) if !response.trim().is_empty() => {
                let detected = response.trim().to_string();
                tracing::info!(language = %detected, "Detected language");
                detected
            }
            Ok(_) => DEFAULT_LANGUAGE.to_string(),
            Err(e) => {
                tracing::error!(error = %e, "Language detection failed");
                DEFAULT_LANGUAGE.to_string()
            }
        }
    }

    /// Translate into English. English input and failures return `text` unchanged.
    pub async fn translate_to_english(&self, text: &str, source_language: &str) -> String {
        if is_english(source_language) {
            return text.to_string();
        }

        let prompt = prompts::format_translate_prompt(text, source_language);
        match self.reasoner.invoke(prompts::TRANSLATE_SYSTEM, &prompt).await {
            Ok(response) if !response.trim().is_empty() => {
                tracing::info!(language = %source_language, "Translated text to English");
                response.trim().to_string()
            }
            Ok(_) => text.to_string(),
            Err(e) => {
                tracing::error!(error = %e, "Translation failed");
                text.to_string()
            }
        }
    }

    /// Extract factual claims.
    ///
    /// An unreadable response yields one claim holding the start of the
    /// text; a reasoner failure yields none.
    pub async fn extract_claims(&self, text: &str) -> Vec<ExtractedClaim> {
        let prompt = prompts::format_claims_prompt(text);
        let response = match self.reasoner.invoke(prompts::CLAIMS_SYSTEM, &prompt).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Claim extraction failed");
                return Vec::new();
            }
        };

        match parse::parse_claims_response(&response) {
            Ok(claims) => {
                tracing::info!(count = claims.len(), "Extracted factual claims");
                claims
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to parse claims");
                let head: String = text.chars().take(FALLBACK_CLAIM_CHARS).collect();
                vec![ExtractedClaim::factual(head)]
            }
        }
    }
}

pub fn is_english(language: &str) -> bool {
    language.trim().eq_ignore_ascii_case("english")
}

/// Accepts `data:image/...` URLs and anything that decodes as standard base64.
pub fn is_valid_image_base64(data: &str) -> bool {
    if data.starts_with("data:image/") {
        return true;
    }
    base64::engine::general_purpose::STANDARD
        .decode(data.trim())
        .is_ok()
}

/// One-sentence summary of an article's verdicts.
pub fn overall_assessment(verdicts: &[Verdict]) -> &'static str {
    let total = verdicts.len();
    let count = |v: Verdict| verdicts.iter().filter(|x| **x == v).count();
    let false_count = count(Verdict::False);
    let misleading_count = count(Verdict::Misleading);
    let true_count = count(Verdict::True);

    // Strict majority, compared without integer division
    if false_count * 2 > total {
        "This content contains multiple false claims and is likely misinformation."
    } else if (false_count + misleading_count) * 2 > total {
        "This content contains misleading or false information."
    } else if true_count * 2 > total {
        "This content appears to be largely factual based on available evidence."
    } else {
        "Unable to fully verify this content. Some claims lack sufficient evidence."
    }
}
