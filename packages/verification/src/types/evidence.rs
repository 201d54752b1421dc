//! Evidence items returned by an evidence source and annotated by the aggregator.

use serde::{Deserialize, Serialize};

/// An evidence item's claimed relationship to the claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    Supports,
    Contradicts,
    #[default]
    Neutral,
}

impl Stance {
    /// Parse a stance label. Anything other than `supports` / `contradicts`
    /// (case and surrounding whitespace ignored) is neutral.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "supports" => Self::Supports,
            "contradicts" => Self::Contradicts,
            _ => Self::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Supports => "supports",
            Self::Contradicts => "contradicts",
            Self::Neutral => "neutral",
        }
    }
}

/// Reputation bucket derived from a credibility score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reputation {
    #[serde(rename = "Highly Trusted")]
    HighlyTrusted,
    #[serde(rename = "Trusted")]
    Trusted,
    #[serde(rename = "Moderate")]
    Moderate,
    #[serde(rename = "Questionable")]
    Questionable,
}

impl Reputation {
    /// Bucket a 0-100 credibility score.
    pub fn from_score(score: f32) -> Self {
        if score >= 85.0 {
            Self::HighlyTrusted
        } else if score >= 70.0 {
            Self::Trusted
        } else if score >= 50.0 {
            Self::Moderate
        } else {
            Self::Questionable
        }
    }
}

/// One piece of information found for a search query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub source_name: String,
    pub source_url: String,
    pub relevant_text: String,
    pub stance: Stance,

    /// Confidence reported by the source (0.0-1.0)
    pub confidence: f32,

    /// Agreement between claim and `relevant_text` (0.0-1.0), set during aggregation
    #[serde(default)]
    pub similarity_score: f32,

    /// Source credibility (0-100), set during aggregation
    #[serde(default)]
    pub credibility_score: f32,

    #[serde(
        rename = "reputation_category",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub reputation: Option<Reputation>,
}

impl EvidenceItem {
    /// Create an unscored evidence item.
    pub fn new(
        source_name: impl Into<String>,
        source_url: impl Into<String>,
        relevant_text: impl Into<String>,
        stance: Stance,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            source_url: source_url.into(),
            relevant_text: relevant_text.into(),
            stance,
            confidence: 0.0,
            similarity_score: 0.0,
            credibility_score: 0.0,
            reputation: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }
}

/// Evidence that survived filtering, split by direction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidenceSets {
    pub supporting: Vec<EvidenceItem>,
    pub contradicting: Vec<EvidenceItem>,
}

impl EvidenceSets {
    pub fn is_empty(&self) -> bool {
        self.supporting.is_empty() && self.contradicting.is_empty()
    }

    pub fn into_parts(self) -> (Vec<EvidenceItem>, Vec<EvidenceItem>) {
        (self.supporting, self.contradicting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stance_parse() {
        assert_eq!(Stance::parse("supports"), Stance::Supports);
        assert_eq!(Stance::parse(" Contradicts "), Stance::Contradicts);
        assert_eq!(Stance::parse("neutral"), Stance::Neutral);
        assert_eq!(Stance::parse("supported"), Stance::Neutral);
        assert_eq!(Stance::parse(""), Stance::Neutral);
    }

    #[test]
    fn test_reputation_buckets() {
        assert_eq!(Reputation::from_score(95.0), Reputation::HighlyTrusted);
        assert_eq!(Reputation::from_score(85.0), Reputation::HighlyTrusted);
        assert_eq!(Reputation::from_score(84.9), Reputation::Trusted);
        assert_eq!(Reputation::from_score(70.0), Reputation::Trusted);
        assert_eq!(Reputation::from_score(50.0), Reputation::Moderate);
        assert_eq!(Reputation::from_score(20.0), Reputation::Questionable);
    }

    #[test]
    fn test_evidence_serialization_keys() {
        let mut item = EvidenceItem::new("Alt News", "https://altnews.in/a", "text", Stance::Supports)
            .with_confidence(0.9);
        item.reputation = Some(Reputation::HighlyTrusted);

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["stance"], "supports");
        assert_eq!(json["reputation_category"], "Highly Trusted");
        assert!(json.get("similarity_score").is_some());
        assert!(json.get("credibility_score").is_some());
    }
}
