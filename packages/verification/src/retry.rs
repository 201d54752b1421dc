//! Bounded retry for capability calls.
//!
//! `Retrying<T>` wraps any capability and re-issues calls that failed with
//! a retryable error (see [`crate::error::VerifyError::is_retryable`]), waiting a linearly
//! growing delay between attempts. With `max_retries == 0` it is a
//! pass-through.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use crate::error::Result;
use crate::traits::evidence::EvidenceSource;
use crate::traits::reasoner::Reasoner;
use crate::traits::similarity::{Embedder, SimilarityScorer};
use crate::traits::vision::ImageReader;
use crate::types::evidence::EvidenceItem;

const RETRY_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    /// Base delay; attempt `n` waits `n * delay`
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            delay: Duration::from_millis(RETRY_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    async fn run<T, F, Fut>(&self, operation: &str, mut call: F) -> Result<T>
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = Result<T>> + Send,
        T: Send,
    {
        let mut retries = 0;
        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && retries < self.max_retries => {
                    retries += 1;
                    tracing::warn!(
                        operation,
                        error = %e,
                        retry = retries,
                        max_retries = self.max_retries,
                        "Capability call failed, retrying..."
                    );
                    sleep(self.delay * retries).await;
                }
                Err(e) => {
                    if retries > 0 {
                        tracing::error!(operation, error = %e, "Capability call failed after all retries");
                    }
                    return Err(e);
                }
            }
        }
    }
}

/// A capability wrapped with a [`RetryPolicy`].
#[derive(Debug, Clone)]
pub struct Retrying<T> {
    inner: T,
    policy: RetryPolicy,
}

impl<T> Retrying<T> {
    pub fn new(inner: T, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: Reasoner> Reasoner for Retrying<T> {
    async fn invoke(&self, system: &str, prompt: &str) -> Result<String> {
        self.policy
            .run("reasoner", move || self.inner.invoke(system, prompt))
            .await
    }
}

#[async_trait]
impl<T: EvidenceSource> EvidenceSource for Retrying<T> {
    async fn search(&self, query: &str) -> Result<Vec<EvidenceItem>> {
        self.policy
            .run("evidence_search", move || self.inner.search(query))
            .await
    }
}

#[async_trait]
impl<T: SimilarityScorer> SimilarityScorer for Retrying<T> {
    async fn score(&self, text_a: &str, text_b: &str) -> Result<f32> {
        self.policy
            .run("similarity", move || self.inner.score(text_a, text_b))
            .await
    }
}

#[async_trait]
impl<T: Embedder> Embedder for Retrying<T> {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.policy
            .run("embedding", move || self.inner.embed(text))
            .await
    }
}

#[async_trait]
impl<T: ImageReader> ImageReader for Retrying<T> {
    async fn read_text(&self, image_base64: &str) -> Result<Option<String>> {
        self.policy
            .run("ocr", move || self.inner.read_text(image_base64))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VerifyError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails with the given error for the first `failures` calls.
    struct Flaky {
        failures: usize,
        retryable: bool,
        calls: AtomicUsize,
    }

    impl Flaky {
        fn new(failures: usize, retryable: bool) -> Self {
            Self {
                failures,
                retryable,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Reasoner for Flaky {
        async fn invoke(&self, _system: &str, _prompt: &str) -> Result<String> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                if self.retryable {
                    Err(VerifyError::capability("503 from upstream"))
                } else {
                    Err(VerifyError::malformed("not json"))
                }
            } else {
                Ok("ok".to_string())
            }
        }
    }

    fn policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy::new(max_retries).with_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_retries_transient_failures() {
        let reasoner = Retrying::new(Flaky::new(2, true), policy(3));

        assert_eq!(reasoner.invoke("s", "p").await.unwrap(), "ok");
        assert_eq!(reasoner.inner().calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let reasoner = Retrying::new(Flaky::new(10, true), policy(2));

        assert!(reasoner.invoke("s", "p").await.is_err());
        assert_eq!(reasoner.inner().calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_does_not_retry_malformed_responses() {
        let reasoner = Retrying::new(Flaky::new(1, false), policy(3));

        assert!(reasoner.invoke("s", "p").await.is_err());
        assert_eq!(reasoner.inner().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_default_policy_is_pass_through() {
        let reasoner = Retrying::new(Flaky::new(1, true), RetryPolicy::default());

        assert!(reasoner.invoke("s", "p").await.is_err());
        assert_eq!(reasoner.inner().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_wraps_other_capabilities() {
        use crate::testing::MockEmbedder;

        let embedder = Retrying::new(
            MockEmbedder::new().with_embedding("x", vec![1.0, 2.0]),
            policy(1),
        );
        assert_eq!(embedder.embed("x").await.unwrap(), vec![1.0, 2.0]);
    }
}
