//! Verdict synthesis from the retained evidence.

use std::sync::Arc;

use crate::pipeline::{parse, prompts};
use crate::traits::reasoner::Reasoner;
use crate::types::evidence::EvidenceItem;
use crate::types::verdict::{Assessment, Verdict};

/// Asks the reasoner for a verdict, with a count-based fallback.
pub struct VerdictSynthesizer {
    reasoner: Arc<dyn Reasoner>,
}

impl VerdictSynthesizer {
    pub fn new(reasoner: Arc<dyn Reasoner>) -> Self {
        Self { reasoner }
    }

    /// Always produces an assessment.
    pub async fn synthesize(
        &self,
        claim: &str,
        supporting: &[EvidenceItem],
        contradicting: &[EvidenceItem],
    ) -> Assessment {
        let prompt = match prompts::format_verdict_prompt(claim, supporting, contradicting) {
            Ok(prompt) => prompt,
            Err(e) => {
                tracing::error!(error = %e, "Verdict determination failed");
                return Assessment::new(
                    Verdict::Unverified,
                    0.0,
                    format!("Error during verification: {}", e),
                );
            }
        };

        let response = match self.reasoner.invoke(prompts::VERDICT_SYSTEM, &prompt).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Verdict reasoner failed, using evidence counts");
                return fallback_assessment(supporting.len(), contradicting.len());
            }
        };

        match parse::parse_verdict_response(&response) {
            Ok(assessment) => assessment,
            Err(e) => {
                tracing::warn!(error = %e, "Verdict response unreadable, using evidence counts");
                fallback_assessment(supporting.len(), contradicting.len())
            }
        }
    }
}

/// Verdict from evidence counts alone.
pub fn fallback_assessment(supporting: usize, contradicting: usize) -> Assessment {
    if contradicting > supporting {
        Assessment::new(Verdict::False, 60.0, "Multiple sources contradict this claim.")
    } else if supporting > contradicting {
        Assessment::new(Verdict::True, 60.0, "Multiple sources support this claim.")
    } else {
        Assessment::new(
            Verdict::Unverified,
            30.0,
            "Insufficient evidence to verify this claim.",
        )
    }
}
