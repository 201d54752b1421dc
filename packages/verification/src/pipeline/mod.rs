//! The claim verification pipeline.
//!
//! ```text
//! claim ─► QueryPlanner ─► EvidenceAggregator ─► VerdictSynthesizer ─► VerdictResult
//!              │                 │   │                   │
//!          Reasoner    EvidenceSource SimilarityScorer   Reasoner
//! ```
//!
//! Each stage degrades on its own when a capability fails; `ClaimVerifier`
//! turns anything that still escapes into an `UNVERIFIED` result.

pub mod aggregator;
pub mod parse;
pub mod planner;
pub mod prompts;
pub mod synthesizer;
pub mod verifier;

pub use aggregator::{lexical_overlap, EvidenceAggregator};
pub use planner::QueryPlanner;
pub use synthesizer::{fallback_assessment, VerdictSynthesizer};
pub use verifier::ClaimVerifier;
