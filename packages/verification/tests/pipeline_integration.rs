//! Integration tests for the claim verification pipeline.
//!
//! These drive `ClaimVerifier` end to end against mock capabilities:
//! 1. Plan queries
//! 2. Aggregate evidence
//! 3. Synthesize a verdict
//! 4. Degrade to fallbacks when capabilities fail

use std::sync::Arc;

use proptest::prelude::*;
use verification::{
    pipeline::prompts,
    testing::{MockEmbedder, MockEvidenceSource, MockReasoner, MockSimilarity},
    ClaimVerifier, CredibilityTable, EmbeddingSimilarity, EvidenceItem, PacingPolicy,
    PipelineConfig, ReasonerEvidenceSource, Stance, Verdict,
};

fn config() -> PipelineConfig {
    PipelineConfig::default().with_pacing(PacingPolicy::None)
}

fn credibility() -> Arc<CredibilityTable> {
    Arc::new(CredibilityTable::load_default().unwrap())
}

fn evidence(name: &str, text: &str, stance: Stance) -> EvidenceItem {
    EvidenceItem::new(name, "https://factcheck.pib.gov.in/item", text, stance).with_confidence(0.9)
}

fn verifier(
    reasoner: MockReasoner,
    source: MockEvidenceSource,
    scorer: MockSimilarity,
) -> ClaimVerifier {
    ClaimVerifier::new(
        Arc::new(reasoner),
        Arc::new(source),
        Arc::new(scorer),
        credibility(),
        config(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_failing_evidence_source_yields_insufficient_evidence() {
    let reasoner = MockReasoner::new().fail_on(prompts::VERDICT_SYSTEM, "down");

    let result = verifier(reasoner, MockEvidenceSource::failing(), MockSimilarity::fixed(0.9))
        .verify("The moon landing was filmed in a studio", "c1")
        .await;

    assert!(result.supporting_sources.is_empty());
    assert!(result.contradicting_sources.is_empty());
    assert_eq!(result.verdict, Verdict::Unverified);
    assert_eq!(result.confidence, 30.0);
    assert_eq!(result.explanation, "Insufficient evidence to verify this claim.");
}

#[tokio::test]
async fn test_contradicting_majority_with_failing_reasoner_is_false() {
    let source = MockEvidenceSource::new().with_default(vec![
        evidence("PIB Fact Check", "This viral message is fake", Stance::Contradicts),
        evidence("Alt News", "The image is from 2015", Stance::Contradicts),
    ]);

    let result = verifier(MockReasoner::failing(), source, MockSimilarity::fixed(0.8))
        .verify("Government announced free laptops for all students", "c2")
        .await;

    assert_eq!(result.contradicting_sources.len(), 2);
    assert!(result.supporting_sources.is_empty());
    assert_eq!(result.verdict, Verdict::False);
    assert_eq!(result.confidence, 60.0);
    assert_eq!(result.explanation, "Multiple sources contradict this claim.");
}

#[tokio::test]
async fn test_single_supporting_with_failing_reasoner_is_true() {
    let source = MockEvidenceSource::new()
        .with_default(vec![evidence("PTI", "RBI confirmed the new note", Stance::Supports)]);

    let result = verifier(MockReasoner::failing(), source, MockSimilarity::fixed(0.8))
        .verify("RBI issued a new 20 rupee note", "c3")
        .await;

    assert_eq!(result.supporting_sources.len(), 1);
    assert_eq!(result.verdict, Verdict::True);
    assert_eq!(result.confidence, 60.0);
}

#[tokio::test]
async fn test_similarity_at_threshold_is_excluded() {
    let source = MockEvidenceSource::new().with_default(vec![
        evidence("PTI", "borderline support", Stance::Supports),
        evidence("Alt News", "borderline contradiction", Stance::Contradicts),
    ]);

    let result = verifier(MockReasoner::failing(), source, MockSimilarity::fixed(0.5))
        .verify("claim", "c4")
        .await;

    assert!(result.supporting_sources.is_empty());
    assert!(result.contradicting_sources.is_empty());
    assert_eq!(result.verdict, Verdict::Unverified);
}

#[tokio::test]
async fn test_malformed_query_response_searches_claim_verbatim() {
    let claim = "Vaccine X causes disease Y";
    let reasoner = MockReasoner::new().respond_to(prompts::QUERY_SYSTEM, "I cannot produce JSON");
    let source = Arc::new(MockEvidenceSource::new());

    let verifier = ClaimVerifier::new(
        Arc::new(reasoner),
        source.clone(),
        Arc::new(MockSimilarity::fixed(0.9)),
        credibility(),
        config(),
    )
    .unwrap();
    verifier.verify(claim, "c5").await;

    assert_eq!(source.calls(), vec![claim.to_string()]);
}

#[tokio::test]
async fn test_reasoner_backed_evidence_end_to_end() {
    let reasoner = Arc::new(
        MockReasoner::new()
            .respond_to(prompts::QUERY_SYSTEM, r#"["free laptop scheme", "laptop yojana fact check"]"#)
            .respond_to(
                prompts::EVIDENCE_SYSTEM,
                r#"```json
[
  {"source_name": "PIB Fact Check", "source_url": "https://factcheck.pib.gov.in/1",
   "relevant_text": "free laptop scheme claim is fake", "stance": "contradicts", "confidence": 0.95},
  {"source_name": "Random Blog", "source_url": "https://blog.example.com",
   "relevant_text": "unrelated", "stance": "supports", "confidence": 0.2}
]
```"#,
            )
            .respond_to(
                prompts::VERDICT_SYSTEM,
                r#"{"verdict": "FALSE", "confidence": "92", "explanation": "PIB Fact Check debunked this."}"#,
            ),
    );
    let table = credibility();
    let source = Arc::new(ReasonerEvidenceSource::new(reasoner.clone(), table.clone()));
    let scorer = MockSimilarity::new().with_score("free laptop scheme claim is fake", 0.85);

    let verifier =
        ClaimVerifier::new(reasoner.clone(), source, Arc::new(scorer), table, config()).unwrap();
    let result = verifier.verify("Free laptop scheme for students", "c6").await;

    assert_eq!(result.verdict, Verdict::False);
    assert_eq!(result.confidence, 92.0);
    // One contradicting item per query; the blog scored 0 and was dropped
    assert_eq!(result.contradicting_sources.len(), 2);
    assert!(result.supporting_sources.is_empty());
    assert_eq!(result.contradicting_sources[0].credibility_score, 95.0);

    let systems: Vec<String> = reasoner.calls().into_iter().map(|c| c.system).collect();
    assert_eq!(systems.len(), 4);
    assert_eq!(systems[0], prompts::QUERY_SYSTEM);
    assert_eq!(systems[3], prompts::VERDICT_SYSTEM);
}

#[tokio::test]
async fn test_embedding_similarity_failure_uses_lexical_fallback() {
    let source = MockEvidenceSource::new().with_default(vec![evidence(
        "PTI",
        "the sky is grey today",
        Stance::Supports,
    )]);
    let scorer = EmbeddingSimilarity::new(Arc::new(MockEmbedder::failing()));

    let verifier = ClaimVerifier::new(
        Arc::new(MockReasoner::failing()),
        Arc::new(source),
        Arc::new(scorer),
        credibility(),
        config().with_similarity_threshold(0.3),
    )
    .unwrap();
    let result = verifier.verify("the sky is grey today", "c7").await;

    assert_eq!(result.supporting_sources.len(), 1);
    assert!((result.supporting_sources[0].similarity_score - 0.5).abs() < 1e-6);
}

#[tokio::test]
async fn test_panic_in_capability_becomes_unverified() {
    let reasoner = MockReasoner::new().panic_on(prompts::QUERY_SYSTEM, "reasoner exploded");

    let result = verifier(reasoner, MockEvidenceSource::new(), MockSimilarity::fixed(0.9))
        .verify("claim", "c8")
        .await;

    assert_eq!(result.verdict, Verdict::Unverified);
    assert_eq!(result.confidence, 0.0);
    assert_eq!(
        result.explanation,
        "Verification failed due to technical error: reasoner exploded"
    );
}

#[tokio::test]
async fn test_claims_verified_concurrently_share_one_verifier() {
    let source = MockEvidenceSource::new()
        .with_default(vec![evidence("PTI", "confirmed", Stance::Supports)]);
    let verifier = Arc::new(verifier(
        MockReasoner::failing(),
        source,
        MockSimilarity::fixed(0.9),
    ));

    let futures = (0..5).map(|i| {
        let verifier = verifier.clone();
        async move { verifier.verify(&format!("claim {}", i), &format!("id-{}", i)).await }
    });
    let results = futures::future::join_all(futures).await;

    assert_eq!(results.len(), 5);
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result.claim_id, format!("id-{}", i));
        assert_eq!(result.verdict, Verdict::True);
    }
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap()
        .block_on(future)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn verdict_always_valid_with_bounded_confidence(
        claim in "\\PC{0,80}",
        confidence in prop_oneof![
            any::<f64>().prop_map(|c| format!("\"{}\"", c)),
            (-1000i64..1000).prop_map(|c| c.to_string()),
            Just("null".to_string()),
            Just("\"very high\"".to_string()),
        ],
        label in prop_oneof![
            Just("TRUE"), Just("FALSE"), Just("MISLEADING"), Just("UNVERIFIED"), Just("maybe"),
        ],
    ) {
        let reasoner = MockReasoner::new()
            .respond_to(prompts::QUERY_SYSTEM, "[\"q\"]")
            .respond_to(
                prompts::VERDICT_SYSTEM,
                format!(r#"{{"verdict": "{}", "confidence": {}, "explanation": "x"}}"#, label, confidence),
            );
        let source = MockEvidenceSource::new()
            .with_default(vec![evidence("PTI", "text", Stance::Supports)]);

        let result = block_on(
            verifier(reasoner, source, MockSimilarity::fixed(0.9)).verify(&claim, "p"),
        );

        prop_assert!(Verdict::ALL.contains(&result.verdict));
        prop_assert!((0.0..=100.0).contains(&result.confidence));
    }

    #[test]
    fn partitions_never_exceed_three(
        stances in prop::collection::vec(
            prop_oneof![Just(Stance::Supports), Just(Stance::Contradicts), Just(Stance::Neutral)],
            0..12,
        ),
        score in 0.0f32..1.0,
    ) {
        let items: Vec<EvidenceItem> = stances
            .iter()
            .enumerate()
            .map(|(i, s)| evidence("Alt News", &format!("item {}", i), *s))
            .collect();
        let source = MockEvidenceSource::new().with_default(items);

        let result = block_on(
            verifier(MockReasoner::failing(), source, MockSimilarity::fixed(score)).verify("claim", "p"),
        );

        prop_assert!(result.supporting_sources.len() <= 3);
        prop_assert!(result.contradicting_sources.len() <= 3);
        for item in result.supporting_sources.iter().chain(&result.contradicting_sources) {
            prop_assert!(item.similarity_score > 0.5);
        }
    }
}
