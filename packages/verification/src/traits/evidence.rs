//! Evidence source trait for gathering material about a claim.
//!
//! The pipeline never fetches documents itself. It hands a search query to
//! an `EvidenceSource` and gets back candidate items with a stance. The
//! reference implementation asks a reasoner what the trusted fact-check
//! outlets have published on the query.

use std::sync::Arc;

use async_trait::async_trait;

use crate::credibility::CredibilityTable;
use crate::error::Result;
use crate::pipeline::{parse, prompts};
use crate::traits::reasoner::Reasoner;
use crate::types::evidence::EvidenceItem;

/// Source of candidate evidence for a search query.
#[async_trait]
pub trait EvidenceSource: Send + Sync {
    /// Search for evidence relevant to `query`.
    ///
    /// Items come back unscored: similarity and credibility are assigned
    /// by the aggregator.
    async fn search(&self, query: &str) -> Result<Vec<EvidenceItem>>;
}

/// Evidence source backed by a reasoning capability.
pub struct ReasonerEvidenceSource {
    reasoner: Arc<dyn Reasoner>,
    credibility: Arc<CredibilityTable>,
}

impl ReasonerEvidenceSource {
    pub fn new(reasoner: Arc<dyn Reasoner>, credibility: Arc<CredibilityTable>) -> Self {
        Self {
            reasoner,
            credibility,
        }
    }
}

#[async_trait]
impl EvidenceSource for ReasonerEvidenceSource {
    async fn search(&self, query: &str) -> Result<Vec<EvidenceItem>> {
        let sources = self.credibility.trusted_source_names();
        let prompt = prompts::format_evidence_prompt(query, &sources);

        let response = self
            .reasoner
            .invoke(prompts::EVIDENCE_SYSTEM, &prompt)
            .await?;

        let items = parse::parse_evidence_response(&response)?;
        tracing::info!(query = %query, count = items.len(), "Found sources for query");
        Ok(items)
    }
}
