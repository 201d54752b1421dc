//! In-memory storage implementation for tests and single-node deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::error::{Result, VerifyError};
use crate::traits::store::{VerificationStats, VerificationStore};
use crate::types::{
    article::Article,
    claim::Claim,
    verdict::VerificationRecord,
};

/// In-memory storage for articles, claims and verification results.
///
/// Data is lost on restart.
pub struct MemoryStore {
    articles: RwLock<Vec<Article>>,
    claims: RwLock<HashMap<String, Claim>>,
    results: RwLock<Vec<VerificationRecord>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            articles: RwLock::new(Vec::new()),
            claims: RwLock::new(HashMap::new()),
            results: RwLock::new(Vec::new()),
        }
    }

    /// Claims belonging to one article.
    pub fn claims_for_article(&self, article_id: &str) -> Result<Vec<Claim>> {
        let claims = self.claims.read().map_err(poisoned)?;
        let mut found: Vec<Claim> = claims
            .values()
            .filter(|c| c.article_id == article_id)
            .cloned()
            .collect();
        found.sort_by_key(|c| c.timestamp);
        Ok(found)
    }
}

fn poisoned<T>(_: PoisonError<T>) -> VerifyError {
    VerifyError::Storage("memory store lock poisoned".into())
}

#[async_trait]
impl VerificationStore for MemoryStore {
    async fn store_article(&self, article: &Article) -> Result<()> {
        self.articles.write().map_err(poisoned)?.push(article.clone());
        Ok(())
    }

    async fn store_claim(&self, claim: &Claim) -> Result<()> {
        self.claims
            .write()
            .map_err(poisoned)?
            .insert(claim.id.clone(), claim.clone());
        Ok(())
    }

    async fn store_result(&self, record: &VerificationRecord) -> Result<()> {
        self.results.write().map_err(poisoned)?.push(record.clone());
        Ok(())
    }

    async fn recent_articles(&self, limit: usize) -> Result<Vec<Article>> {
        let mut articles = self.articles.read().map_err(poisoned)?.clone();
        // Newest first; insertion order breaks ties
        articles.reverse();
        articles.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        articles.truncate(limit);
        Ok(articles)
    }

    async fn results_for_claim(&self, claim_id: &str) -> Result<Vec<VerificationRecord>> {
        Ok(self
            .results
            .read()
            .map_err(poisoned)?
            .iter()
            .filter(|r| r.result.claim_id == claim_id)
            .cloned()
            .collect())
    }

    async fn stats(&self) -> Result<VerificationStats> {
        let mut stats = VerificationStats::empty();
        stats.total_articles = self.articles.read().map_err(poisoned)?.len();
        stats.total_claims = self.claims.read().map_err(poisoned)?.len();

        let results = self.results.read().map_err(poisoned)?;
        stats.total_verifications = results.len();
        for record in results.iter() {
            *stats
                .verdict_distribution
                .entry(record.result.verdict)
                .or_insert(0) += 1;
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::article::InputType;
    use crate::types::verdict::{Assessment, Verdict, VerdictResult};

    fn record(claim_id: &str, verdict: Verdict) -> VerificationRecord {
        VerificationRecord::new(VerdictResult::new(
            claim_id,
            Assessment::new(verdict, 70.0, "because"),
            Vec::new(),
            Vec::new(),
        ))
    }

    #[tokio::test]
    async fn test_recent_articles_newest_first() {
        let store = MemoryStore::new();
        let mut first = Article::new(InputType::Text, "first");
        first.timestamp -= chrono::Duration::seconds(10);
        let second = Article::new(InputType::Text, "second");

        store.store_article(&first).await.unwrap();
        store.store_article(&second).await.unwrap();

        let recent = store.recent_articles(20).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].content, "second");

        let limited = store.recent_articles(1).await.unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].content, "second");
    }

    #[tokio::test]
    async fn test_stats_counts_verdicts() {
        let store = MemoryStore::new();
        let article = Article::new(InputType::Text, "content");
        let claim = Claim::new(&article.id, "claim");

        store.store_article(&article).await.unwrap();
        store.store_claim(&claim).await.unwrap();
        store.store_result(&record(&claim.id, Verdict::False)).await.unwrap();
        store.store_result(&record(&claim.id, Verdict::False)).await.unwrap();
        store.store_result(&record("other", Verdict::True)).await.unwrap();

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.total_articles, 1);
        assert_eq!(stats.total_claims, 1);
        assert_eq!(stats.total_verifications, 3);
        assert_eq!(stats.verdict_distribution[&Verdict::False], 2);
        assert_eq!(stats.verdict_distribution[&Verdict::True], 1);
        assert_eq!(stats.verdict_distribution[&Verdict::Misleading], 0);

        assert_eq!(store.results_for_claim(&claim.id).await.unwrap().len(), 2);
        assert_eq!(store.claims_for_article(&article.id).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_stats_list_all_verdicts() {
        let stats = MemoryStore::new().stats().await.unwrap();
        assert_eq!(stats.total_verifications, 0);
        assert_eq!(stats.verdict_distribution.len(), 4);
    }
}
