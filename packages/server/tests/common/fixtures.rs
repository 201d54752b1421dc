//! Canned reasoner responses and evidence for API tests.

use verification::{pipeline::prompts, EvidenceItem, MockReasoner, Stance};

pub const HINDI_ARTICLE: &str =
    "सरकार ने सभी छात्रों के लिए मुफ्त लैपटॉप की घोषणा की है। योजना अगले महीने शुरू होगी।";

pub const TRANSLATED_ARTICLE: &str =
    "The government has announced free laptops for all students. The scheme starts next month.";

pub const TWO_CLAIMS: &str = r#"```json
[
  {"claim_text": "The government announced free laptops for all students", "claim_type": "factual",
   "entities": [{"type": "organization", "value": "government"}]},
  {"claim_text": "The scheme starts next month", "claim_type": "factual", "entities": []},
  {"claim_text": "This is a great day for students", "claim_type": "opinion", "entities": []}
]
```"#;

pub const FALSE_VERDICT: &str =
    r#"{"verdict": "FALSE", "confidence": 88, "explanation": "PIB Fact Check debunked this scheme."}"#;

/// A reasoner scripted for every stage of the article workflow.
pub fn article_reasoner(language: &str, claims_response: &str) -> MockReasoner {
    MockReasoner::new()
        .respond_to(prompts::LANGUAGE_SYSTEM, language)
        .respond_to(prompts::TRANSLATE_SYSTEM, TRANSLATED_ARTICLE)
        .respond_to(prompts::CLAIMS_SYSTEM, claims_response)
        .respond_to(prompts::QUERY_SYSTEM, r#"["free laptop scheme fact check"]"#)
        .respond_to(prompts::VERDICT_SYSTEM, FALSE_VERDICT)
}

pub fn pib_debunk() -> EvidenceItem {
    EvidenceItem::new(
        "PIB Fact Check",
        "https://factcheck.pib.gov.in/free-laptop",
        "No such free laptop scheme has been announced",
        Stance::Contradicts,
    )
    .with_confidence(0.95)
}

/// Named like a trusted outlet, hosted on a low-rated domain.
pub fn mislabeled_source() -> EvidenceItem {
    EvidenceItem::new(
        "PTI",
        "https://www.opindia.com/laptops",
        "Reports of the laptop scheme are unconfirmed",
        Stance::Contradicts,
    )
    .with_confidence(0.6)
}
