//! Claim Verification Library
//!
//! Takes a single factual claim and decides whether it is TRUE, FALSE,
//! MISLEADING or UNVERIFIED, backed by evidence from trusted fact-check
//! outlets. All model access goes through capability traits, so the
//! pipeline runs the same against OpenAI or against mocks.
//!
//! # Design
//!
//! - Every stage degrades on failure instead of aborting
//! - `ClaimVerifier::verify` never returns an error
//! - Capabilities are shared through `Arc<dyn Trait>`; the pipeline holds no mutable state
//!
//! # Usage
//!
//! ```rust,ignore
//! use verification::{ClaimVerifier, CredibilityTable, PipelineConfig, ReasonerEvidenceSource};
//! use verification::testing::{MockReasoner, MockSimilarity};
//!
//! let reasoner = Arc::new(MockReasoner::new());
//! let credibility = Arc::new(CredibilityTable::load_default()?);
//! let source = Arc::new(ReasonerEvidenceSource::new(reasoner.clone(), credibility.clone()));
//!
//! let verifier = ClaimVerifier::new(
//!     reasoner,
//!     source,
//!     Arc::new(MockSimilarity::fixed(0.8)),
//!     credibility,
//!     PipelineConfig::default(),
//! )?;
//!
//! let result = verifier.verify("5G towers spread COVID-19", "claim-1").await;
//! println!("{} ({}%)", result.verdict, result.confidence);
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Capability abstractions (Reasoner, EvidenceSource, SimilarityScorer, ...)
//! - [`types`] - Claims, evidence, verdicts, articles, config
//! - [`pipeline`] - Query planning, evidence aggregation, verdict synthesis
//! - [`preprocess`] - OCR, language detection, translation, claim extraction
//! - [`credibility`] - Source credibility table
//! - [`stores`] - Storage implementations (MemoryStore)
//! - [`security`] - Credential handling
//! - [`testing`] - Mock implementations for testing

pub mod ai;
pub mod credibility;
pub mod error;
pub mod pacing;
pub mod pipeline;
pub mod preprocess;
pub mod retry;
pub mod security;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{Result, VerifyError};
pub use traits::{
    evidence::{EvidenceSource, ReasonerEvidenceSource},
    reasoner::Reasoner,
    similarity::{cosine_similarity, Embedder, EmbeddingSimilarity, SimilarityScorer},
    store::{VerificationStats, VerificationStore},
    vision::ImageReader,
};
pub use types::{
    article::{Article, ExtractedClaim, InputType},
    claim::{Claim, ClaimType, Entity},
    config::PipelineConfig,
    evidence::{EvidenceItem, EvidenceSets, Reputation, Stance},
    verdict::{Assessment, VerdictResult, Verdict, VerificationRecord},
};

// Re-export pipeline components
pub use pipeline::{
    fallback_assessment, lexical_overlap, ClaimVerifier, EvidenceAggregator, QueryPlanner,
    VerdictSynthesizer,
};

pub use credibility::{CredibilityTable, TrustedDomain, TrustedSource};
pub use pacing::{Pacer, PacingPolicy};
pub use preprocess::{overall_assessment, ArticleProcessor};
pub use retry::{RetryPolicy, Retrying};
pub use security::{AiCredentials, SecretString};
pub use stores::MemoryStore;

#[cfg(feature = "openai")]
pub use ai::OpenAI;

// Re-export testing utilities
pub use testing::{MockEmbedder, MockEvidenceSource, MockImageReader, MockReasoner, MockSimilarity};
