use serde::{Deserialize, Serialize};
use verification::{EvidenceItem, InputType, Verdict, VerdictResult};

/// Body of `POST /api/verify`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerifyRequest {
    pub input_type: InputType,
    /// Text, URL, or base64 image
    pub content: String,
}

/// One claim of an article with its verdict
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedClaim {
    pub claim_id: String,
    pub claim_text: String,
    pub verdict: Verdict,
    pub confidence: f64,
    pub explanation: String,
    pub supporting_sources: Vec<EvidenceItem>,
    pub contradicting_sources: Vec<EvidenceItem>,
}

impl VerifiedClaim {
    pub fn new(claim_text: impl Into<String>, result: VerdictResult) -> Self {
        Self {
            claim_id: result.claim_id,
            claim_text: claim_text.into(),
            verdict: result.verdict,
            confidence: result.confidence,
            explanation: result.explanation,
            supporting_sources: result.supporting_sources,
            contradicting_sources: result.contradicting_sources,
        }
    }
}

/// Response of `POST /api/verify`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub article_id: String,
    pub detected_language: String,
    /// First 500 characters of the pre-translation text, `...` appended when cut
    pub original_text: String,
    pub claims: Vec<VerifiedClaim>,
    pub overall_assessment: String,
    /// RFC 3339
    pub timestamp: String,
}
