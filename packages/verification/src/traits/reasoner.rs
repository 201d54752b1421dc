//! Reasoning capability: a hosted LLM answering one prompt.

use async_trait::async_trait;

use crate::error::Result;

/// A single-shot reasoning capability.
///
/// Implementations wrap a specific LLM provider. The response is free text;
/// whether it holds JSON is advisory and up to the caller to check.
#[async_trait]
pub trait Reasoner: Send + Sync {
    /// Send system instructions plus one user prompt, return the raw answer.
    async fn invoke(&self, system: &str, prompt: &str) -> Result<String>;
}
