use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of statement extracted from an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimType {
    #[default]
    Factual,
    Opinion,
    Satire,
}

impl ClaimType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "factual" => Some(Self::Factual),
            "opinion" => Some(Self::Opinion),
            "satire" => Some(Self::Satire),
            _ => None,
        }
    }
}

/// A named entity mentioned in a claim (person, place, organization, date).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub value: String,
}

/// A single atomic factual assertion extracted from an article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub id: String,
    pub article_id: String,
    pub claim_text: String,
    pub claim_text_english: Option<String>,
    pub entities: Vec<Entity>,
    pub claim_type: ClaimType,
    pub timestamp: DateTime<Utc>,
}

impl Claim {
    /// Create a factual claim with a fresh id.
    pub fn new(article_id: impl Into<String>, claim_text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            article_id: article_id.into(),
            claim_text: claim_text.into(),
            claim_text_english: None,
            entities: Vec::new(),
            claim_type: ClaimType::Factual,
            timestamp: Utc::now(),
        }
    }

    pub fn with_english(mut self, text: impl Into<String>) -> Self {
        self.claim_text_english = Some(text.into());
        self
    }

    pub fn with_entities(mut self, entities: Vec<Entity>) -> Self {
        self.entities = entities;
        self
    }

    pub fn with_type(mut self, claim_type: ClaimType) -> Self {
        self.claim_type = claim_type;
        self
    }

    /// Text the pipeline should verify: the English rendering when present.
    pub fn verification_text(&self) -> &str {
        self.claim_text_english
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.claim_text)
    }
}
