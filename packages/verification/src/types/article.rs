//! Submitted articles and the claims pulled out of them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::claim::{ClaimType, Entity};

/// How the submitted content should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
    Url,
    Image,
}

/// A piece of submitted content, after language detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub input_type: InputType,
    /// Text, URL, or base64 image as submitted
    pub content: String,
    pub detected_language: Option<String>,
    /// Text before translation
    pub original_text: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Article {
    pub fn new(input_type: InputType, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            input_type,
            content: content.into(),
            detected_language: None,
            original_text: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.detected_language = Some(language.into());
        self
    }

    pub fn with_original_text(mut self, text: impl Into<String>) -> Self {
        self.original_text = Some(text.into());
        self
    }
}

/// A claim as returned by the claim extractor, before it gets an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedClaim {
    pub claim_text: String,
    pub claim_type: ClaimType,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl ExtractedClaim {
    pub fn factual(claim_text: impl Into<String>) -> Self {
        Self {
            claim_text: claim_text.into(),
            claim_type: ClaimType::Factual,
            entities: Vec::new(),
        }
    }
}
