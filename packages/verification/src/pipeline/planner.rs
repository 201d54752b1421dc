//! Query planning: turn a claim into a few targeted search queries.

use std::sync::Arc;

use crate::error::{Result, VerifyError};
use crate::pipeline::{parse, prompts};
use crate::traits::reasoner::Reasoner;
use crate::types::config::MAX_QUERIES;

/// Generates search queries for a claim.
pub struct QueryPlanner {
    reasoner: Arc<dyn Reasoner>,
    max_queries: usize,
}

impl QueryPlanner {
    pub fn new(reasoner: Arc<dyn Reasoner>, max_queries: usize) -> Self {
        Self {
            reasoner,
            max_queries: max_queries.clamp(1, MAX_QUERIES),
        }
    }

    /// Produce between 1 and `max_queries` search queries.
    ///
    /// Returns `InvalidClaim` for a blank claim without calling the
    /// reasoner. Any reasoner or parse failure falls back to the claim
    /// itself as the only query.
    pub async fn generate_queries(&self, claim: &str) -> Result<Vec<String>> {
        if claim.trim().is_empty() {
            return Err(VerifyError::InvalidClaim {
                reason: "claim text is empty".to_string(),
            });
        }

        let prompt = prompts::format_query_prompt(claim, self.max_queries);
        let queries = match self.reasoner.invoke(prompts::QUERY_SYSTEM, &prompt).await {
            Ok(response) => match parse::parse_string_list(&response) {
                Ok(queries) => queries,
                Err(e) => {
                    tracing::warn!(error = %e, "Query response unreadable, using claim as query");
                    Vec::new()
                }
            },
            Err(e) => {
                tracing::error!(error = %e, "Query generation failed");
                Vec::new()
            }
        };

        let mut queries: Vec<String> = queries
            .into_iter()
            .filter(|q| !q.trim().is_empty())
            .take(self.max_queries)
            .collect();

        if queries.is_empty() {
            queries.push(claim.to_string());
        }

        tracing::info!(count = queries.len(), "Generated search queries");
        Ok(queries)
    }
}
