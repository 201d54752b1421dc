//! Typed errors for the verification library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Boxed error carried by capability, config and storage failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur inside the verification pipeline and its collaborators.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// External capability (LLM, embeddings, OCR) unavailable or failed
    #[error("capability error: {0}")]
    Capability(#[source] BoxError),

    /// Capability refused the request itself (bad request, unknown model)
    #[error("capability rejected request: {0}")]
    Rejected(#[source] BoxError),

    /// Capability answered, but not in the shape we asked for
    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Claim text unusable (empty, whitespace only)
    #[error("invalid claim: {reason}")]
    InvalidClaim { reason: String },

    /// Article input unusable (too short, bad image payload)
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Configuration error
    #[error("config error: {0}")]
    Config(#[source] BoxError),

    /// Storage operation failed
    #[error("storage error: {0}")]
    Storage(#[source] BoxError),
}

impl VerifyError {
    /// Wrap any error (or message) as a capability failure.
    pub fn capability(err: impl Into<BoxError>) -> Self {
        Self::Capability(err.into())
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    pub fn config(err: impl Into<BoxError>) -> Self {
        Self::Config(err.into())
    }

    /// Whether retrying the same call could plausibly succeed.
    ///
    /// Only capability failures qualify; a rejected request, a malformed
    /// answer or a bad claim will not improve on a second attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Capability(_))
    }
}

/// Result type alias for verification operations.
pub type Result<T> = std::result::Result<T, VerifyError>;
