//! Parsing of reasoner responses.
//!
//! Reasoners are asked for bare JSON but frequently wrap it in a markdown
//! code fence. Everything here strips the fence first and then applies a
//! strict shape check, returning `MalformedResponse` when the shape is wrong
//! so callers can take their fallback path.

use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, VerifyError};
use crate::types::article::ExtractedClaim;
use crate::types::claim::{ClaimType, Entity};
use crate::types::evidence::{EvidenceItem, Stance};
use crate::types::verdict::{Assessment, Verdict};

pub const DEFAULT_CONFIDENCE: f64 = 50.0;
pub const DEFAULT_EXPLANATION: &str = "Unable to determine verdict";

lazy_static! {
    // Opening fence, optionally tagged as json
    static ref FENCE_OPEN_REGEX: Regex = Regex::new(r"^```(?:json|JSON)?[ \t]*\r?\n?").unwrap();

    // Closing fence at the very end
    static ref FENCE_CLOSE_REGEX: Regex = Regex::new(r"\r?\n?```$").unwrap();
}

/// Remove a surrounding ``` / ```json fence, if any.
pub fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    let start = FENCE_OPEN_REGEX.find(trimmed).map(|m| m.end()).unwrap_or(0);
    let body = &trimmed[start..];
    let end = FENCE_CLOSE_REGEX
        .find(body)
        .map(|m| m.start())
        .unwrap_or(body.len());
    body[..end].trim()
}

/// Strip the fence and deserialize.
pub fn parse_json<T: DeserializeOwned>(response: &str) -> Result<T> {
    let body = strip_code_fence(response);
    if body.is_empty() {
        return Err(VerifyError::malformed("empty response"));
    }
    Ok(serde_json::from_str(body)?)
}

/// Parse a JSON array of strings. Non-string entries are skipped.
pub fn parse_string_list(response: &str) -> Result<Vec<String>> {
    let value: Value = parse_json(response)?;
    let Value::Array(entries) = value else {
        return Err(VerifyError::malformed("expected a JSON array of strings"));
    };

    Ok(entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}

/// Coerce a JSON number or numeric string into a finite `f64`.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

#[derive(Debug, Deserialize)]
struct RawEvidence {
    #[serde(default)]
    source_name: Option<String>,
    #[serde(default)]
    source_url: Option<String>,
    #[serde(default)]
    relevant_text: Option<String>,
    #[serde(default)]
    stance: Option<String>,
    #[serde(default)]
    confidence: Option<Value>,
}

impl From<RawEvidence> for EvidenceItem {
    fn from(raw: RawEvidence) -> Self {
        let stance = raw
            .stance
            .as_deref()
            .map(Stance::parse)
            .unwrap_or_default();
        let confidence = raw
            .confidence
            .as_ref()
            .and_then(coerce_f64)
            .unwrap_or(0.0) as f32;

        EvidenceItem::new(
            raw.source_name.unwrap_or_default(),
            raw.source_url.unwrap_or_default(),
            raw.relevant_text.unwrap_or_default(),
            stance,
        )
        .with_confidence(confidence)
    }
}

/// Parse an evidence search response: a JSON array of evidence objects.
///
/// Missing fields are tolerated; entries that are not objects are skipped.
pub fn parse_evidence_response(response: &str) -> Result<Vec<EvidenceItem>> {
    let value: Value = parse_json(response)?;
    let Value::Array(entries) = value else {
        return Err(VerifyError::malformed("expected a JSON array of evidence"));
    };

    let mut items = Vec::with_capacity(entries.len());
    for entry in entries {
        if !entry.is_object() {
            tracing::debug!(entry = %entry, "Skipping non-object evidence entry");
            continue;
        }
        match serde_json::from_value::<RawEvidence>(entry) {
            Ok(raw) => items.push(raw.into()),
            Err(e) => tracing::debug!(error = %e, "Skipping unreadable evidence entry"),
        }
    }
    Ok(items)
}

/// Parse a verdict object `{verdict, confidence, explanation}`.
///
/// Missing fields take defaults and unknown labels become `UNVERIFIED`.
/// A confidence that is present but not numeric makes the whole response
/// malformed.
pub fn parse_verdict_response(response: &str) -> Result<Assessment> {
    let value: Value = parse_json(response)?;
    let Value::Object(fields) = value else {
        return Err(VerifyError::malformed("expected a JSON verdict object"));
    };

    let verdict = match fields.get("verdict") {
        Some(Value::String(label)) => Verdict::parse(label).unwrap_or_else(|| {
            tracing::warn!(label = %label, "Unknown verdict label");
            Verdict::Unverified
        }),
        _ => Verdict::Unverified,
    };

    let confidence = match fields.get("confidence") {
        None | Some(Value::Null) => DEFAULT_CONFIDENCE,
        Some(raw) => coerce_f64(raw).ok_or_else(|| {
            VerifyError::malformed(format!("confidence is not numeric: {}", raw))
        })?,
    };

    let explanation = match fields.get("explanation") {
        Some(Value::String(text)) => text.clone(),
        None | Some(Value::Null) => DEFAULT_EXPLANATION.to_string(),
        Some(other) => other.to_string(),
    };

    Ok(Assessment::new(verdict, confidence, explanation))
}

/// Parse a claim extraction response, keeping factual claims only.
pub fn parse_claims_response(response: &str) -> Result<Vec<ExtractedClaim>> {
    let value: Value = parse_json(response)?;
    let Value::Array(entries) = value else {
        return Err(VerifyError::malformed("expected a JSON array of claims"));
    };

    let claims = entries
        .into_iter()
        .filter_map(|entry| {
            let Value::Object(mut fields) = entry else {
                return None;
            };
            let claim_type = fields
                .get("claim_type")
                .and_then(Value::as_str)
                .and_then(ClaimType::parse)?;
            if claim_type != ClaimType::Factual {
                return None;
            }
            let claim_text = fields
                .get("claim_text")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|t| !t.is_empty())?
                .to_string();
            let entities: Vec<Entity> = fields
                .remove("entities")
                .and_then(|raw| serde_json::from_value(raw).ok())
                .unwrap_or_default();

            Some(ExtractedClaim {
                claim_text,
                claim_type,
                entities,
            })
        })
        .collect();
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("[1, 2]"), "[1, 2]");
        assert_eq!(strip_code_fence("```json\n[1, 2]\n```"), "[1, 2]");
        assert_eq!(strip_code_fence("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("  ```json\n[]\n```  "), "[]");
        assert_eq!(strip_code_fence("```json [\"x\"]```"), "[\"x\"]");
    }

    #[test]
    fn test_parse_string_list() {
        let queries = parse_string_list("```json\n[\"a\", \"b\", 3]\n```").unwrap();
        assert_eq!(queries, vec!["a".to_string(), "b".to_string()]);

        assert!(parse_string_list("{\"queries\": []}").is_err());
        assert!(parse_string_list("not json").is_err());
        assert!(parse_string_list("").is_err());
    }

    #[test]
    fn test_coerce_f64() {
        assert_eq!(coerce_f64(&serde_json::json!(85)), Some(85.0));
        assert_eq!(coerce_f64(&serde_json::json!("72.5")), Some(72.5));
        assert_eq!(coerce_f64(&serde_json::json!("90%")), Some(90.0));
        assert_eq!(coerce_f64(&serde_json::json!("high")), None);
        assert_eq!(coerce_f64(&serde_json::json!("inf")), None);
        assert_eq!(coerce_f64(&serde_json::json!(true)), None);
    }

    #[test]
    fn test_parse_evidence_tolerates_missing_fields() {
        let items = parse_evidence_response(
            r#"[{"source_name": "BoomLive", "stance": "supports", "confidence": "0.7"}, 42]"#,
        )
        .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].source_name, "BoomLive");
        assert_eq!(items[0].relevant_text, "");
        assert_eq!(items[0].stance, Stance::Supports);
        assert!((items[0].confidence - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_parse_evidence_unknown_stance_is_neutral() {
        let items = parse_evidence_response(r#"[{"stance": "unclear"}]"#).unwrap();
        assert_eq!(items[0].stance, Stance::Neutral);
    }

    #[test]
    fn test_parse_claims_keeps_factual_only() {
        let claims = parse_claims_response(
            r#"```json
[
  {"claim_text": "RBI issued a new 1000 rupee note", "claim_type": "factual",
   "entities": [{"type": "organization", "value": "RBI"}]},
  {"claim_text": "This is the worst government", "claim_type": "opinion"},
  {"claim_text": "  ", "claim_type": "factual"},
  {"claim_text": "No entities here", "claim_type": "factual", "entities": "bad"}
]
```"#,
        )
        .unwrap();

        assert_eq!(claims.len(), 2);
        assert_eq!(claims[0].entities.len(), 1);
        assert_eq!(claims[0].entities[0].value, "RBI");
        assert!(claims[1].entities.is_empty());
        assert!(parse_claims_response("Claims: none").is_err());
    }

    #[test]
    fn test_parse_verdict_full() {
        let assessment = parse_verdict_response(
            "```json\n{\"verdict\": \"FALSE\", \"confidence\": 85, \"explanation\": \"Debunked.\"}\n```",
        )
        .unwrap();
        assert_eq!(assessment.verdict, Verdict::False);
        assert_eq!(assessment.confidence, 85.0);
        assert_eq!(assessment.explanation, "Debunked.");
    }

    #[test]
    fn test_parse_verdict_defaults() {
        let assessment = parse_verdict_response("{}").unwrap();
        assert_eq!(assessment.verdict, Verdict::Unverified);
        assert_eq!(assessment.confidence, DEFAULT_CONFIDENCE);
        assert_eq!(assessment.explanation, DEFAULT_EXPLANATION);
    }

    #[test]
    fn test_parse_verdict_unknown_label_and_clamp() {
        let assessment =
            parse_verdict_response(r#"{"verdict": "PARTLY TRUE", "confidence": "140"}"#).unwrap();
        assert_eq!(assessment.verdict, Verdict::Unverified);
        assert_eq!(assessment.confidence, 100.0);

        let negative = parse_verdict_response(r#"{"verdict": "true", "confidence": -3}"#).unwrap();
        assert_eq!(negative.verdict, Verdict::True);
        assert_eq!(negative.confidence, 0.0);
    }

    #[test]
    fn test_parse_verdict_rejects_bad_shapes() {
        assert!(parse_verdict_response(r#"["TRUE"]"#).is_err());
        assert!(parse_verdict_response(r#"{"confidence": "very"}"#).is_err());
        assert!(parse_verdict_response("I think it's true").is_err());
    }
}
