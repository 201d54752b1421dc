//! Storage trait for articles, claims, and verification results.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::types::{
    article::Article,
    claim::Claim,
    verdict::{Verdict, VerificationRecord},
};

/// Aggregate counters over everything stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationStats {
    pub total_articles: usize,
    pub total_claims: usize,
    pub total_verifications: usize,
    pub verdict_distribution: BTreeMap<Verdict, usize>,
}

impl VerificationStats {
    /// Stats with every verdict present at zero.
    pub fn empty() -> Self {
        Self {
            total_articles: 0,
            total_claims: 0,
            total_verifications: 0,
            verdict_distribution: Verdict::ALL.iter().map(|v| (*v, 0)).collect(),
        }
    }
}

/// Persistence for the article workflow.
#[async_trait]
pub trait VerificationStore: Send + Sync {
    async fn store_article(&self, article: &Article) -> Result<()>;

    async fn store_claim(&self, claim: &Claim) -> Result<()>;

    async fn store_result(&self, record: &VerificationRecord) -> Result<()>;

    /// Most recent articles first.
    async fn recent_articles(&self, limit: usize) -> Result<Vec<Article>>;

    async fn results_for_claim(&self, claim_id: &str) -> Result<Vec<VerificationRecord>>;

    async fn stats(&self) -> Result<VerificationStats>;
}
