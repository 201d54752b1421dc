//! Testing utilities including mock implementations.
//!
//! These let applications exercise the pipeline without real model or
//! network calls. Every mock records its calls for assertions.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::error::{Result, VerifyError};
use crate::traits::{
    evidence::EvidenceSource,
    reasoner::Reasoner,
    similarity::{Embedder, SimilarityScorer},
    vision::ImageReader,
};
use crate::types::evidence::EvidenceItem;

#[derive(Debug, Clone)]
enum Scripted {
    Respond(String),
    Fail(String),
    Panic(String),
}

/// Record of a call made to the mock reasoner.
#[derive(Debug, Clone)]
pub struct ReasonerCall {
    pub system: String,
    pub prompt: String,
}

/// A scripted reasoner.
///
/// Responses are keyed by a marker that must appear in the system prompt,
/// so one mock can answer every pipeline stage. Calls with no matching
/// rule fail with a capability error.
#[derive(Default)]
pub struct MockReasoner {
    rules: Arc<RwLock<Vec<(String, Scripted)>>>,
    fallback: Arc<RwLock<Option<Scripted>>>,
    calls: Arc<RwLock<Vec<ReasonerCall>>>,
}

impl MockReasoner {
    pub fn new() -> Self {
        Self::default()
    }

    /// A reasoner whose every call fails.
    pub fn failing() -> Self {
        let mock = Self::new();
        *mock.fallback.write().unwrap() = Some(Scripted::Fail("reasoner unavailable".into()));
        mock
    }

    /// Answer `response` when the system prompt contains `system_marker`.
    pub fn respond_to(self, system_marker: impl Into<String>, response: impl Into<String>) -> Self {
        self.rules
            .write()
            .unwrap()
            .push((system_marker.into(), Scripted::Respond(response.into())));
        self
    }

    /// Fail with `message` when the system prompt contains `system_marker`.
    pub fn fail_on(self, system_marker: impl Into<String>, message: impl Into<String>) -> Self {
        self.rules
            .write()
            .unwrap()
            .push((system_marker.into(), Scripted::Fail(message.into())));
        self
    }

    /// Panic when the system prompt contains `system_marker`.
    pub fn panic_on(self, system_marker: impl Into<String>, message: impl Into<String>) -> Self {
        self.rules
            .write()
            .unwrap()
            .push((system_marker.into(), Scripted::Panic(message.into())));
        self
    }

    /// Answer `response` to any call no rule matches.
    pub fn respond_by_default(self, response: impl Into<String>) -> Self {
        *self.fallback.write().unwrap() = Some(Scripted::Respond(response.into()));
        self
    }

    pub fn calls(&self) -> Vec<ReasonerCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Reasoner for MockReasoner {
    async fn invoke(&self, system: &str, prompt: &str) -> Result<String> {
        self.calls.write().unwrap().push(ReasonerCall {
            system: system.to_string(),
            prompt: prompt.to_string(),
        });

        let scripted = self
            .rules
            .read()
            .unwrap()
            .iter()
            .find(|(marker, _)| system.contains(marker.as_str()))
            .map(|(_, s)| s.clone())
            .or_else(|| self.fallback.read().unwrap().clone());

        match scripted {
            Some(Scripted::Respond(text)) => Ok(text),
            Some(Scripted::Fail(message)) => Err(VerifyError::capability(message)),
            Some(Scripted::Panic(message)) => panic!("{}", message),
            None => Err(VerifyError::capability("no mock response configured")),
        }
    }
}

/// A mock evidence source keyed by query.
#[derive(Default)]
pub struct MockEvidenceSource {
    results: Arc<RwLock<HashMap<String, Vec<EvidenceItem>>>>,
    default: Arc<RwLock<Option<Vec<EvidenceItem>>>>,
    failing_queries: Arc<RwLock<HashSet<String>>>,
    fail_all: bool,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockEvidenceSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// A source whose every search fails.
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    pub fn with_results(self, query: impl Into<String>, items: Vec<EvidenceItem>) -> Self {
        self.results.write().unwrap().insert(query.into(), items);
        self
    }

    /// Items returned for any query without specific results.
    pub fn with_default(self, items: Vec<EvidenceItem>) -> Self {
        *self.default.write().unwrap() = Some(items);
        self
    }

    pub fn fail_on(self, query: impl Into<String>) -> Self {
        self.failing_queries.write().unwrap().insert(query.into());
        self
    }

    /// Queries searched, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl EvidenceSource for MockEvidenceSource {
    async fn search(&self, query: &str) -> Result<Vec<EvidenceItem>> {
        self.calls.write().unwrap().push(query.to_string());

        if self.fail_all || self.failing_queries.read().unwrap().contains(query) {
            return Err(VerifyError::capability(format!("search failed for {}", query)));
        }

        Ok(self
            .results
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .or_else(|| self.default.read().unwrap().clone())
            .unwrap_or_default())
    }
}

/// A mock similarity scorer.
///
/// Scores are keyed by the evidence text (the second argument).
#[derive(Default)]
pub struct MockSimilarity {
    scores: Arc<RwLock<HashMap<String, f32>>>,
    default_score: f32,
    failing: bool,
    calls: Arc<RwLock<Vec<(String, String)>>>,
}

impl MockSimilarity {
    /// Unknown texts score 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every pair scores `score`.
    pub fn fixed(score: f32) -> Self {
        Self {
            default_score: score,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with_score(self, text: impl Into<String>, score: f32) -> Self {
        self.scores.write().unwrap().insert(text.into(), score);
        self
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl SimilarityScorer for MockSimilarity {
    async fn score(&self, text_a: &str, text_b: &str) -> Result<f32> {
        self.calls
            .write()
            .unwrap()
            .push((text_a.to_string(), text_b.to_string()));

        if self.failing {
            return Err(VerifyError::capability("embedding service unavailable"));
        }
        Ok(self
            .scores
            .read()
            .unwrap()
            .get(text_b)
            .copied()
            .unwrap_or(self.default_score))
    }
}

/// A mock embedder with deterministic fallback vectors.
pub struct MockEmbedder {
    embeddings: Arc<RwLock<HashMap<String, Vec<f32>>>>,
    embedding_dim: usize,
    failing: bool,
    calls: Arc<RwLock<Vec<String>>>,
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self {
            embeddings: Arc::default(),
            embedding_dim: 64,
            failing: false,
            calls: Arc::default(),
        }
    }
}

impl MockEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with_embedding_dim(mut self, dim: usize) -> Self {
        self.embedding_dim = dim;
        self
    }

    pub fn with_embedding(self, text: impl Into<String>, embedding: Vec<f32>) -> Self {
        self.embeddings
            .write()
            .unwrap()
            .insert(text.into(), embedding);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Hash-seeded embedding, stable across runs.
    fn deterministic_embedding(&self, text: &str) -> Vec<f32> {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        let hash = hasher.finalize();

        (0..self.embedding_dim)
            .map(|i| (hash[i % 32] as f32 / 127.5) - 1.0)
            .collect()
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.write().unwrap().push(text.to_string());

        if self.failing {
            return Err(VerifyError::capability("embedding service unavailable"));
        }
        Ok(self
            .embeddings
            .read()
            .unwrap()
            .get(text)
            .cloned()
            .unwrap_or_else(|| self.deterministic_embedding(text)))
    }
}

/// A mock OCR capability.
#[derive(Default)]
pub struct MockImageReader {
    text: Option<String>,
    failing: bool,
    calls: Arc<RwLock<Vec<usize>>>,
}

impl MockImageReader {
    /// Every image reads as `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Images hold no text.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Payload lengths of the images read.
    pub fn calls(&self) -> Vec<usize> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl ImageReader for MockImageReader {
    async fn read_text(&self, image_base64: &str) -> Result<Option<String>> {
        self.calls.write().unwrap().push(image_base64.len());

        if self.failing {
            return Err(VerifyError::capability("vision model unavailable"));
        }
        Ok(self.text.clone())
    }
}
