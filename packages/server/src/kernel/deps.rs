//! Server dependencies for the article workflow (using traits for testability)
//!
//! Every external capability sits behind a trait object from the
//! verification crate, so tests swap in mocks without touching the routes.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use verification::{
    AiCredentials, ArticleProcessor, ClaimVerifier, CredibilityTable, EmbeddingSimilarity,
    ImageReader, MemoryStore, OpenAI, PacingPolicy, PipelineConfig, Reasoner,
    ReasonerEvidenceSource, RetryPolicy, Retrying, VerificationStore,
};

use crate::config::Config;

/// Server dependencies shared by every request
#[derive(Clone)]
pub struct ServerDeps {
    pub verifier: Arc<ClaimVerifier>,
    pub processor: Arc<ArticleProcessor>,
    pub credibility: Arc<CredibilityTable>,
    pub store: Arc<dyn VerificationStore>,
    /// Claims verified per submitted article
    pub max_claims_per_article: usize,
}

impl ServerDeps {
    pub fn new(
        verifier: Arc<ClaimVerifier>,
        processor: Arc<ArticleProcessor>,
        credibility: Arc<CredibilityTable>,
        store: Arc<dyn VerificationStore>,
        max_claims_per_article: usize,
    ) -> Self {
        Self {
            verifier,
            processor,
            credibility,
            store,
            max_claims_per_article,
        }
    }

    /// Wire the production stack: OpenAI for reasoning, embeddings and OCR,
    /// an in-memory store, and the configured credibility table.
    pub fn from_config(config: &Config) -> Result<Self> {
        let credibility = Arc::new(match &config.credibility_table_path {
            Some(path) => CredibilityTable::from_path(path)
                .with_context(|| format!("Failed to load credibility table from {}", path))?,
            None => CredibilityTable::load_default().context("Failed to load credibility table")?,
        });

        let mut credentials =
            AiCredentials::new(config.openai_api_key.clone(), config.openai_model.clone())
                .with_embedding_model(config.openai_embedding_model.clone());
        if let Some(url) = &config.openai_base_url {
            credentials = credentials.with_base_url(url.clone());
        }

        let openai = OpenAI::from_credentials(&credentials).context("Failed to create OpenAI client")?;
        let ai = Arc::new(Retrying::new(openai, RetryPolicy::new(config.max_retries)));
        tracing::info!(
            model = %config.openai_model,
            embedding_model = %config.openai_embedding_model,
            max_retries = config.max_retries,
            "OpenAI capabilities ready"
        );

        let reasoner: Arc<dyn Reasoner> = ai.clone();
        let image_reader: Arc<dyn ImageReader> = ai.clone();
        let evidence_source = Arc::new(ReasonerEvidenceSource::new(
            reasoner.clone(),
            credibility.clone(),
        ));
        let scorer = Arc::new(EmbeddingSimilarity::new(ai));

        let pipeline_config =
            PipelineConfig::default().with_pacing(PacingPolicy::fixed_millis(config.pacing_ms));
        let verifier = ClaimVerifier::new(
            reasoner.clone(),
            evidence_source,
            scorer,
            credibility.clone(),
            pipeline_config,
        )
        .context("Invalid pipeline configuration")?;

        Ok(Self::new(
            Arc::new(verifier),
            Arc::new(ArticleProcessor::new(reasoner, image_reader)),
            credibility,
            Arc::new(MemoryStore::new()),
            config.max_claims_per_article,
        ))
    }
}

/// Request timeout applied by the HTTP layer; articles fan out into many model calls.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);
