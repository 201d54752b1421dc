//! Rate limiting between evidence searches.
//!
//! The aggregator asks its [`Pacer`] for permission before every evidence
//! search. A fixed policy sleeps between successive calls of one
//! aggregation; a token bucket (via `governor`) is shared across every
//! aggregation that uses the same aggregator.

use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

type DefaultRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// How evidence searches are spaced out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PacingPolicy {
    /// No spacing at all
    None,

    /// Sleep this long between successive searches of one claim
    Fixed(Duration),

    /// Sustained rate with bursts, shared by all claims
    TokenBucket { per_second: NonZeroU32, burst: NonZeroU32 },
}

impl PacingPolicy {
    /// Fixed spacing in milliseconds; zero disables pacing.
    pub fn fixed_millis(ms: u64) -> Self {
        if ms == 0 {
            Self::None
        } else {
            Self::Fixed(Duration::from_millis(ms))
        }
    }
}

/// Enforces a [`PacingPolicy`].
#[derive(Clone)]
pub struct Pacer {
    kind: PacerKind,
}

#[derive(Clone)]
enum PacerKind {
    None,
    Fixed(Duration),
    Bucket(Arc<DefaultRateLimiter>),
}

impl Pacer {
    pub fn new(policy: &PacingPolicy) -> Self {
        let kind = match policy {
            PacingPolicy::None => PacerKind::None,
            PacingPolicy::Fixed(spacing) if spacing.is_zero() => PacerKind::None,
            PacingPolicy::Fixed(spacing) => PacerKind::Fixed(*spacing),
            PacingPolicy::TokenBucket { per_second, burst } => {
                let quota = Quota::per_second(*per_second).allow_burst(*burst);
                PacerKind::Bucket(Arc::new(RateLimiter::direct(quota)))
            }
        };
        Self { kind }
    }

    /// Wait until call number `index` (0-based, within one aggregation) may proceed.
    pub async fn before_call(&self, index: usize) {
        match &self.kind {
            PacerKind::None => {}
            PacerKind::Fixed(spacing) => {
                if index > 0 {
                    tokio::time::sleep(*spacing).await;
                }
            }
            PacerKind::Bucket(limiter) => limiter.until_ready().await,
        }
    }
}

impl std::fmt::Debug for Pacer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match &self.kind {
            PacerKind::None => "none".to_string(),
            PacerKind::Fixed(d) => format!("fixed({:?})", d),
            PacerKind::Bucket(_) => "token_bucket".to_string(),
        };
        f.debug_struct("Pacer").field("kind", &label).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_fixed_spacing_skips_first_call() {
        let pacer = Pacer::new(&PacingPolicy::Fixed(Duration::from_millis(200)));

        let start = Instant::now();
        pacer.before_call(0).await;
        assert!(start.elapsed() < Duration::from_millis(100));

        pacer.before_call(1).await;
        assert!(start.elapsed() >= Duration::from_millis(200));
    }

    #[tokio::test]
    async fn test_token_bucket_limits_rate() {
        let pacer = Pacer::new(&PacingPolicy::TokenBucket {
            per_second: NonZeroU32::new(2).unwrap(),
            burst: NonZeroU32::new(1).unwrap(),
        });

        let start = Instant::now();
        for i in 0..3 {
            pacer.before_call(i).await;
        }

        // First is immediate, the next two wait ~500ms each
        assert!(start.elapsed().as_millis() >= 500, "elapsed {:?}", start.elapsed());
    }

    #[test]
    fn test_fixed_millis_zero_is_none() {
        assert_eq!(PacingPolicy::fixed_millis(0), PacingPolicy::None);
        assert_eq!(
            PacingPolicy::fixed_millis(250),
            PacingPolicy::Fixed(Duration::from_millis(250))
        );
    }
}
