//! Prompt templates for every reasoning call.
//!
//! System prompts are constants so mocks and logs can tell the calls apart.

use crate::error::Result;
use crate::types::evidence::EvidenceItem;

pub const QUERY_SYSTEM: &str = "You are a search query generation expert for fact-checking.";

pub const EVIDENCE_SYSTEM: &str = "You are a fact-checking research assistant with knowledge of \
Indian news and fact-check databases.";

pub const VERDICT_SYSTEM: &str =
    "You are an expert fact-checker. Analyze evidence objectively and provide clear verdicts.";

pub const LANGUAGE_SYSTEM: &str =
    "You are a language detection system. Identify the primary language of the text.";

pub const TRANSLATE_SYSTEM: &str =
    "You are a professional translator specializing in Indian languages.";

pub const CLAIMS_SYSTEM: &str =
    "You are a fact-checking expert that extracts verifiable claims from news articles.";

pub const OCR_SYSTEM: &str = "You are an OCR system that extracts text from images accurately. \
Extract all visible text including any Indian language content.";

pub const OCR_PROMPT: &str = "Extract all text from this image. If it contains Indian language \
text (Hindi, Tamil, Telugu, Bengali, etc.), include it as-is. Return only the extracted text \
without any additional commentary.";

/// Characters of article text shown to the language detector.
pub const LANGUAGE_SAMPLE_CHARS: usize = 500;

pub fn format_query_prompt(claim: &str, max_queries: usize) -> String {
    format!(
        r#"Generate {max_queries} effective search queries to verify this claim. Focus on key entities and facts.

Claim: {claim}

Return as JSON array: ["query1", "query2", "query3"]

Return ONLY the JSON array."#
    )
}

pub fn format_evidence_prompt(query: &str, trusted_sources: &[&str]) -> String {
    let sources_list = trusted_sources.join(", ");
    format!(
        r#"Based on your knowledge, provide fact-check information for this query from trusted Indian sources ({sources_list}).

Query: {query}

Return findings as JSON array:
[
  {{
    "source_name": "Source Name",
    "source_url": "https://example.com/article",
    "relevant_text": "Key findings about the claim",
    "stance": "supports" or "contradicts" or "neutral",
    "confidence": 0.85
  }}
]

If no reliable information is found, return empty array [].

Return ONLY the JSON array."#
    )
}

/// Render one evidence set for the verdict prompt; an empty set is `None`.
fn render_evidence(items: &[EvidenceItem]) -> Result<String> {
    if items.is_empty() {
        return Ok("None".to_string());
    }
    Ok(serde_json::to_string_pretty(items)?)
}

pub fn format_verdict_prompt(
    claim: &str,
    supporting: &[EvidenceItem],
    contradicting: &[EvidenceItem],
) -> Result<String> {
    let supporting_text = render_evidence(supporting)?;
    let contradicting_text = render_evidence(contradicting)?;

    Ok(format!(
        r#"Analyze this claim and evidence to provide a fact-check verdict.

Claim: {claim}

Supporting Evidence:
{supporting_text}

Contradicting Evidence:
{contradicting_text}

Provide verdict as JSON:
{{
  "verdict": "TRUE" or "FALSE" or "MISLEADING" or "UNVERIFIED",
  "confidence": 0-100,
  "explanation": "Clear explanation in 2-3 sentences"
}}

Guidelines:
- TRUE: Strong evidence supports, no credible contradictions
- FALSE: Strong evidence contradicts
- MISLEADING: Partially true but missing context or exaggerated
- UNVERIFIED: Insufficient evidence

Return ONLY the JSON object."#
    ))
}

pub fn format_language_prompt(text: &str) -> String {
    let sample: String = text.chars().take(LANGUAGE_SAMPLE_CHARS).collect();
    format!(
        "Identify the primary language of this text. Respond with ONLY the language name \
(e.g., 'Hindi', 'English', 'Tamil', 'Telugu', 'Bengali', 'Kannada', 'Malayalam', 'Marathi', or 'Mixed').\n\nText: {sample}"
    )
}

pub fn format_translate_prompt(text: &str, source_language: &str) -> String {
    format!(
        "Translate the following {source_language} text to English. Maintain the meaning and \
context accurately. Return ONLY the translated text.\n\nText: {text}"
    )
}

pub fn format_claims_prompt(text: &str) -> String {
    format!(
        r#"Extract all factual claims from this text that can be verified. Ignore opinions and satire.

For each claim, provide:
1. The claim text
2. Claim type ('factual', 'opinion', or 'satire')
3. Key entities mentioned (people, places, organizations, dates)

Return as JSON array:
[
  {{
    "claim_text": "specific factual statement",
    "claim_type": "factual",
    "entities": [{{"type": "person", "value": "Name"}}]
  }}
]

Text:
{text}

Return ONLY the JSON array, no other text."#
    )
}
