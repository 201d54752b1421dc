//! Pipeline tuning knobs.

use std::time::Duration;

use crate::error::{Result, VerifyError};
use crate::pacing::PacingPolicy;

/// Hard ceiling on search queries per claim.
pub const MAX_QUERIES: usize = 3;

/// Hard ceiling on evidence items kept per direction.
pub const MAX_PER_DIRECTION: usize = 3;

/// Configuration for a claim verification pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Upper bound on search queries per claim
    pub max_queries: usize,

    /// Evidence items kept per direction (supporting / contradicting)
    pub max_per_direction: usize,

    /// Items must score strictly above this to be kept
    pub similarity_threshold: f32,

    /// Spacing between successive evidence searches
    pub pacing: PacingPolicy,

    /// Scale applied to the lexical-overlap similarity fallback
    pub lexical_weight: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_queries: MAX_QUERIES,
            max_per_direction: MAX_PER_DIRECTION,
            similarity_threshold: 0.5,
            pacing: PacingPolicy::Fixed(Duration::from_millis(500)),
            lexical_weight: 0.5,
        }
    }
}

impl PipelineConfig {
    pub fn with_pacing(mut self, pacing: PacingPolicy) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_max_queries(mut self, max_queries: usize) -> Self {
        self.max_queries = max_queries;
        self
    }

    pub fn with_max_per_direction(mut self, max: usize) -> Self {
        self.max_per_direction = max;
        self
    }

    pub fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Reject settings that would break the pipeline's bounds.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_QUERIES).contains(&self.max_queries) {
            return Err(VerifyError::config(format!(
                "max_queries must be within 1..={}",
                MAX_QUERIES
            )));
        }
        if !(1..=MAX_PER_DIRECTION).contains(&self.max_per_direction) {
            return Err(VerifyError::config(format!(
                "max_per_direction must be within 1..={}",
                MAX_PER_DIRECTION
            )));
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(VerifyError::config("similarity_threshold must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.lexical_weight) {
            return Err(VerifyError::config("lexical_weight must be within [0, 1]"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.max_queries, 3);
        assert_eq!(config.max_per_direction, 3);
        assert_eq!(config.similarity_threshold, 0.5);
        assert_eq!(config.pacing, PacingPolicy::Fixed(Duration::from_millis(500)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_bounds() {
        assert!(PipelineConfig::default().with_max_queries(0).validate().is_err());
        assert!(PipelineConfig::default().with_max_per_direction(0).validate().is_err());
        assert!(PipelineConfig::default()
            .with_similarity_threshold(1.5)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_rejects_bounds_above_three() {
        let err = PipelineConfig::default()
            .with_max_queries(5)
            .validate()
            .unwrap_err();
        assert!(matches!(err, VerifyError::Config(_)));
        assert!(err.to_string().contains("max_queries"));

        let err = PipelineConfig::default()
            .with_max_per_direction(4)
            .validate()
            .unwrap_err();
        assert!(matches!(err, VerifyError::Config(_)));
        assert!(err.to_string().contains("max_per_direction"));

        let lowest = PipelineConfig::default()
            .with_max_queries(1)
            .with_max_per_direction(1);
        assert!(lowest.validate().is_ok());
    }
}
