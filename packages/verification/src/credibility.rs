//! Source credibility data.
//!
//! Two lookups live here: trusted fact-check outlets matched by name (used
//! while aggregating evidence) and domain ratings matched by URL (used for
//! the reputation pass and the public source list). The table is loaded
//! once at startup and never changes.

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, VerifyError};
use crate::types::evidence::{EvidenceItem, Reputation};

const DEFAULT_TABLE: &str = include_str!("../data/credibility.json");

/// Domains scoring at least this are listed as trusted.
pub const TRUSTED_DOMAIN_MIN_SCORE: f32 = 80.0;

/// A fact-check outlet recognised by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustedSource {
    pub name: String,
    pub url: String,
    pub credibility: f32,
}

#[derive(Debug, Clone, Deserialize)]
struct DomainRating {
    domain: String,
    score: f32,
    #[serde(default)]
    specializations: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TableDocument {
    #[serde(default = "default_domain_score")]
    default_domain_score: f32,
    #[serde(default = "unmatched_source_score")]
    unmatched_source_score: f32,
    trusted_sources: Vec<TrustedSource>,
    domain_ratings: Vec<DomainRating>,
}

fn default_domain_score() -> f32 {
    60.0
}

fn unmatched_source_score() -> f32 {
    70.0
}

/// Entry in the public trusted-domain list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrustedDomain {
    pub domain: String,
    pub credibility_score: f32,
    pub specialization: Vec<String>,
}

/// Immutable credibility configuration.
#[derive(Debug, Clone)]
pub struct CredibilityTable {
    trusted_sources: Vec<TrustedSource>,
    // Ordered: the first rating whose domain appears in a host wins
    domain_ratings: Vec<DomainRating>,
    default_domain_score: f32,
    unmatched_source_score: f32,
}

impl CredibilityTable {
    /// The bundled table.
    pub fn load_default() -> Result<Self> {
        Self::from_json(DEFAULT_TABLE)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            VerifyError::config(format!("cannot read credibility table {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let doc: TableDocument = serde_json::from_str(raw)
            .map_err(|e| VerifyError::config(format!("invalid credibility table: {}", e)))?;

        let scores = doc
            .trusted_sources
            .iter()
            .map(|s| s.credibility)
            .chain(doc.domain_ratings.iter().map(|r| r.score))
            .chain([doc.default_domain_score, doc.unmatched_source_score]);
        for score in scores {
            if !(0.0..=100.0).contains(&score) {
                return Err(VerifyError::config(format!(
                    "credibility score {} outside [0, 100]",
                    score
                )));
            }
        }

        let domain_ratings = doc
            .domain_ratings
            .into_iter()
            .map(|mut r| {
                r.domain = r.domain.trim().to_lowercase();
                r
            })
            .filter(|r| !r.domain.is_empty())
            .collect();

        Ok(Self {
            trusted_sources: doc.trusted_sources,
            domain_ratings,
            default_domain_score: doc.default_domain_score,
            unmatched_source_score: doc.unmatched_source_score,
        })
    }

    /// Names of the trusted outlets, in table order.
    pub fn trusted_source_names(&self) -> Vec<&str> {
        self.trusted_sources.iter().map(|s| s.name.as_str()).collect()
    }

    /// Score by source name: the first trusted outlet whose name appears
    /// (case-insensitively) in `source_name`, else the unmatched default.
    pub fn score_for_source_name(&self, source_name: &str) -> f32 {
        let lowered = source_name.to_lowercase();
        self.trusted_sources
            .iter()
            .find(|s| lowered.contains(&s.name.to_lowercase()))
            .map(|s| s.credibility)
            .unwrap_or(self.unmatched_source_score)
    }

    /// Score by URL: a rated domain contained in the host, else a
    /// heuristic on the host itself.
    pub fn score_for_url(&self, url: &str) -> f32 {
        let domain = domain_of(url);

        if let Some(rating) = self
            .domain_ratings
            .iter()
            .find(|r| domain.contains(&r.domain))
        {
            tracing::debug!(domain = %domain, score = rating.score, "Found credibility score");
            return rating.score;
        }

        let score = if domain.ends_with(".gov.in") {
            90.0
        } else if domain.ends_with(".edu") {
            85.0
        } else if domain.ends_with(".org.in") || domain.ends_with(".org") {
            75.0
        } else if ["fake", "satire", "parody"]
            .iter()
            .any(|word| domain.contains(word))
        {
            20.0
        } else {
            self.default_domain_score
        };
        tracing::debug!(domain = %domain, score, "Using default credibility score");
        score
    }

    /// Re-score an evidence item by its URL and attach a reputation label.
    pub fn apply_reputation(&self, item: &mut EvidenceItem) {
        let score = self.score_for_url(&item.source_url);
        item.credibility_score = score;
        item.reputation = Some(Reputation::from_score(score));
    }

    /// Rated domains scoring at least 80, highest first.
    pub fn trusted_sources(&self) -> Vec<TrustedDomain> {
        let mut listed: Vec<TrustedDomain> = self
            .domain_ratings
            .iter()
            .filter(|r| r.score >= TRUSTED_DOMAIN_MIN_SCORE)
            .map(|r| TrustedDomain {
                domain: r.domain.clone(),
                credibility_score: r.score,
                specialization: if r.specializations.is_empty() {
                    vec!["General".to_string()]
                } else {
                    r.specializations.clone()
                },
            })
            .collect();
        // Stable sort keeps table order among equal scores
        listed.sort_by(|a, b| b.credibility_score.total_cmp(&a.credibility_score));
        listed
    }
}

/// Lowercased host of `url` without a leading `www.`.
///
/// Scheme-less input is retried as `https://`; anything still unparsable
/// is returned lowercased as-is.
pub fn domain_of(url: &str) -> String {
    let trimmed = url.trim();
    let host = Url::parse(trimmed)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .or_else(|| {
            Url::parse(&format!("https://{}", trimmed))
                .ok()
                .and_then(|u| u.host_str().map(str::to_string))
        });

    match host {
        Some(host) => {
            let host = host.to_lowercase();
            host.strip_prefix("www.").map(str::to_string).unwrap_or(host)
        }
        None => trimmed.to_lowercase(),
    }
}
