//! Evidence aggregation: search, score, annotate, partition.

use std::collections::HashSet;
use std::sync::Arc;

use crate::credibility::CredibilityTable;
use crate::pacing::Pacer;
use crate::traits::evidence::EvidenceSource;
use crate::traits::similarity::SimilarityScorer;
use crate::types::config::{PipelineConfig, MAX_PER_DIRECTION};
use crate::types::evidence::{EvidenceItem, EvidenceSets, Stance};

/// Collects evidence for a claim and keeps the relevant, directional part.
pub struct EvidenceAggregator {
    source: Arc<dyn EvidenceSource>,
    scorer: Arc<dyn SimilarityScorer>,
    credibility: Arc<CredibilityTable>,
    pacer: Pacer,
    similarity_threshold: f32,
    max_per_direction: usize,
    lexical_weight: f32,
}

impl EvidenceAggregator {
    pub fn new(
        source: Arc<dyn EvidenceSource>,
        scorer: Arc<dyn SimilarityScorer>,
        credibility: Arc<CredibilityTable>,
        config: &PipelineConfig,
    ) -> Self {
        Self {
            source,
            scorer,
            credibility,
            pacer: Pacer::new(&config.pacing),
            similarity_threshold: config.similarity_threshold,
            max_per_direction: config.max_per_direction.clamp(1, MAX_PER_DIRECTION),
            lexical_weight: config.lexical_weight,
        }
    }

    /// Gather evidence for every query and split it into supporting and
    /// contradicting sets, each capped at `max_per_direction`.
    pub async fn aggregate(&self, claim: &str, queries: &[String]) -> EvidenceSets {
        let mut items = self.gather(queries).await;
        for item in items.iter_mut() {
            item.similarity_score = self.score(claim, &item.relevant_text).await;
            item.credibility_score = self.credibility.score_for_source_name(&item.source_name);
        }

        let sets = self.partition(items);
        tracing::info!(
            supporting = sets.supporting.len(),
            contradicting = sets.contradicting.len(),
            "Aggregated evidence"
        );
        sets
    }

    /// Search each query in order. A failed search contributes nothing.
    async fn gather(&self, queries: &[String]) -> Vec<EvidenceItem> {
        let mut all = Vec::new();
        for (index, query) in queries.iter().enumerate() {
            self.pacer.before_call(index).await;
            match self.source.search(query).await {
                Ok(items) => all.extend(items),
                Err(e) => {
                    tracing::error!(query = %query, error = %e, "Source search failed");
                }
            }
        }
        all
    }

    /// Similarity in [0, 1], falling back to lexical overlap when the
    /// scorer fails or returns a non-finite value.
    async fn score(&self, claim: &str, text: &str) -> f32 {
        match self.scorer.score(claim, text).await {
            Ok(score) if score.is_finite() => score.clamp(0.0, 1.0),
            Ok(score) => {
                tracing::warn!(score, "Similarity not finite, using lexical overlap");
                lexical_overlap(claim, text, self.lexical_weight)
            }
            Err(e) => {
                tracing::error!(error = %e, "Similarity calculation failed, using lexical overlap");
                lexical_overlap(claim, text, self.lexical_weight)
            }
        }
    }

    fn partition(&self, items: Vec<EvidenceItem>) -> EvidenceSets {
        let mut sets = EvidenceSets::default();
        for item in items {
            if item.similarity_score <= self.similarity_threshold {
                continue;
            }
            let bucket = match item.stance {
                Stance::Supports => &mut sets.supporting,
                Stance::Contradicts => &mut sets.contradicting,
                Stance::Neutral => continue,
            };
            if bucket.len() < self.max_per_direction {
                bucket.push(item);
            }
        }
        sets
    }
}

/// Shared-word ratio scaled by `weight`.
///
/// Counts distinct lowercase whitespace tokens present in both texts,
/// divided by the longer text's word count (at least 1).
pub fn lexical_overlap(a: &str, b: &str, weight: f32) -> f32 {
    let lower_a = a.to_lowercase();
    let lower_b = b.to_lowercase();
    let tokens_a: HashSet<&str> = lower_a.split_whitespace().collect();
    let tokens_b: HashSet<&str> = lower_b.split_whitespace().collect();

    let common = tokens_a.intersection(&tokens_b).count();
    let longest = a
        .split_whitespace()
        .count()
        .max(b.split_whitespace().count())
        .max(1);

    common as f32 / longest as f32 * weight
}
