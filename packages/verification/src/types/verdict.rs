//! Verdicts and the per-claim verification result.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::evidence::EvidenceItem;

/// Final categorical judgment about a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    True,
    False,
    Misleading,
    Unverified,
}

impl Verdict {
    pub const ALL: [Verdict; 4] = [
        Verdict::True,
        Verdict::False,
        Verdict::Misleading,
        Verdict::Unverified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Misleading => "MISLEADING",
            Self::Unverified => "UNVERIFIED",
        }
    }

    /// Parse a verdict label, case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "TRUE" => Some(Self::True),
            "FALSE" => Some(Self::False),
            "MISLEADING" => Some(Self::Misleading),
            "UNVERIFIED" => Some(Self::Unverified),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clamp a confidence into [0, 100]. NaN becomes 0.
pub fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 100.0)
    }
}

/// Output of the verdict synthesizer: verdict, confidence, explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub verdict: Verdict,
    pub confidence: f64,
    pub explanation: String,
}

impl Assessment {
    /// Build an assessment; confidence is clamped to [0, 100].
    pub fn new(verdict: Verdict, confidence: f64, explanation: impl Into<String>) -> Self {
        Self {
            verdict,
            confidence: clamp_confidence(confidence),
            explanation: explanation.into(),
        }
    }
}

/// The pipeline's output for one claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictResult {
    pub claim_id: String,
    pub verdict: Verdict,
    pub confidence: f64,
    pub explanation: String,
    pub supporting_sources: Vec<EvidenceItem>,
    pub contradicting_sources: Vec<EvidenceItem>,
}

impl VerdictResult {
    pub fn new(
        claim_id: impl Into<String>,
        assessment: Assessment,
        supporting_sources: Vec<EvidenceItem>,
        contradicting_sources: Vec<EvidenceItem>,
    ) -> Self {
        Self {
            claim_id: claim_id.into(),
            verdict: assessment.verdict,
            confidence: clamp_confidence(assessment.confidence),
            explanation: assessment.explanation,
            supporting_sources,
            contradicting_sources,
        }
    }

    /// Result used when verification as a whole failed.
    pub fn failed(claim_id: impl Into<String>, error: impl fmt::Display) -> Self {
        Self {
            claim_id: claim_id.into(),
            verdict: Verdict::Unverified,
            confidence: 0.0,
            explanation: format!("Verification failed due to technical error: {}", error),
            supporting_sources: Vec::new(),
            contradicting_sources: Vec::new(),
        }
    }
}

/// A persisted verification result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub id: String,
    #[serde(flatten)]
    pub result: VerdictResult,
    pub timestamp: DateTime<Utc>,
}

impl VerificationRecord {
    pub fn new(result: VerdictResult) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            result,
            timestamp: Utc::now(),
        }
    }
}
