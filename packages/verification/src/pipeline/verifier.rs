//! End-to-end verification of a single claim.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use crate::credibility::CredibilityTable;
use crate::error::Result;
use crate::pipeline::aggregator::EvidenceAggregator;
use crate::pipeline::planner::QueryPlanner;
use crate::pipeline::synthesizer::VerdictSynthesizer;
use crate::traits::evidence::EvidenceSource;
use crate::traits::reasoner::Reasoner;
use crate::traits::similarity::SimilarityScorer;
use crate::types::claim::Claim;
use crate::types::config::PipelineConfig;
use crate::types::verdict::VerdictResult;

/// Runs query planning, evidence aggregation and verdict synthesis.
///
/// Holds no mutable state, so one verifier can check many claims
/// concurrently.
pub struct ClaimVerifier {
    planner: QueryPlanner,
    aggregator: EvidenceAggregator,
    synthesizer: VerdictSynthesizer,
}

impl ClaimVerifier {
    /// Wire a verifier from capabilities. Fails only on invalid config.
    pub fn new(
        reasoner: Arc<dyn Reasoner>,
        evidence_source: Arc<dyn EvidenceSource>,
        scorer: Arc<dyn SimilarityScorer>,
        credibility: Arc<CredibilityTable>,
        config: PipelineConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self::from_parts(
            QueryPlanner::new(reasoner.clone(), config.max_queries),
            EvidenceAggregator::new(evidence_source, scorer, credibility, &config),
            VerdictSynthesizer::new(reasoner),
        ))
    }

    pub fn from_parts(
        planner: QueryPlanner,
        aggregator: EvidenceAggregator,
        synthesizer: VerdictSynthesizer,
    ) -> Self {
        Self {
            planner,
            aggregator,
            synthesizer,
        }
    }

    /// Verify one claim. Never fails: any error or panic becomes an
    /// `UNVERIFIED` result with confidence 0.
    pub async fn verify(&self, claim_text: &str, claim_id: &str) -> VerdictResult {
        let preview: String = claim_text.chars().take(100).collect();
        tracing::info!(claim_id = %claim_id, claim = %preview, "Starting verification");

        let outcome = AssertUnwindSafe(self.run(claim_text, claim_id))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(result)) => {
                tracing::info!(
                    claim_id = %claim_id,
                    verdict = %result.verdict,
                    confidence = result.confidence,
                    "Verdict reached"
                );
                result
            }
            Ok(Err(e)) => {
                tracing::error!(claim_id = %claim_id, error = %e, "Claim verification failed");
                VerdictResult::failed(claim_id, e)
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                tracing::error!(claim_id = %claim_id, panic = %message, "Claim verification panicked");
                VerdictResult::failed(claim_id, message)
            }
        }
    }

    /// Verify a stored claim, preferring its English rendering.
    pub async fn verify_claim(&self, claim: &Claim) -> VerdictResult {
        self.verify(claim.verification_text(), &claim.id).await
    }

    async fn run(&self, claim_text: &str, claim_id: &str) -> Result<VerdictResult> {
        let queries = self.planner.generate_queries(claim_text).await?;
        let (supporting, contradicting) = self
            .aggregator
            .aggregate(claim_text, &queries)
            .await
            .into_parts();
        let assessment = self
            .synthesizer
            .synthesize(claim_text, &supporting, &contradicting)
            .await;

        Ok(VerdictResult::new(
            claim_id,
            assessment,
            supporting,
            contradicting,
        ))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
