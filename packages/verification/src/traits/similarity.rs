//! Similarity scoring between a claim and an evidence excerpt.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Result, VerifyError};

/// Longest input (in bytes) sent to an embedder.
pub const MAX_EMBED_INPUT_BYTES: usize = 8000;

/// Scores agreement between two text spans.
#[async_trait]
pub trait SimilarityScorer: Send + Sync {
    /// Return a score in [0, 1]; 1 means the texts say the same thing.
    async fn score(&self, text_a: &str, text_b: &str) -> Result<f32>;
}

/// Embedding capability.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding vector for `text`.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Similarity scorer that compares embeddings with cosine similarity.
pub struct EmbeddingSimilarity {
    embedder: Arc<dyn Embedder>,
}

impl EmbeddingSimilarity {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }
}

#[async_trait]
impl SimilarityScorer for EmbeddingSimilarity {
    async fn score(&self, text_a: &str, text_b: &str) -> Result<f32> {
        let a = self.embedder.embed(truncate(text_a)).await?;
        let b = self.embedder.embed(truncate(text_b)).await?;

        if a.len() != b.len() || a.is_empty() {
            return Err(VerifyError::malformed(format!(
                "embedding dimensions differ: {} vs {}",
                a.len(),
                b.len()
            )));
        }

        let similarity = cosine_similarity(&a, &b);
        tracing::debug!(similarity, "Calculated similarity");
        Ok(similarity)
    }
}

fn truncate(text: &str) -> &str {
    if text.len() <= MAX_EMBED_INPUT_BYTES {
        return text;
    }
    let mut end = MAX_EMBED_INPUT_BYTES;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Cosine similarity of two equal-length vectors. Zero vectors score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
