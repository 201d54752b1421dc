//! Test harness: the full router wired to mock capabilities.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use serde_json::Value;
use server_core::{kernel::ServerDeps, server::build_app};
use tower::ServiceExt;
use verification::{
    ArticleProcessor, ClaimVerifier, CredibilityTable, MemoryStore, MockEvidenceSource,
    MockImageReader, MockReasoner, MockSimilarity, PacingPolicy, PipelineConfig,
};

pub struct TestHarness {
    pub app: Router,
    pub reasoner: Arc<MockReasoner>,
    pub evidence: Arc<MockEvidenceSource>,
    pub image_reader: Arc<MockImageReader>,
    pub store: Arc<MemoryStore>,
}

impl TestHarness {
    pub fn new(reasoner: MockReasoner, evidence: MockEvidenceSource) -> Self {
        Self::with_image_reader(reasoner, evidence, MockImageReader::empty())
    }

    pub fn with_image_reader(
        reasoner: MockReasoner,
        evidence: MockEvidenceSource,
        image_reader: MockImageReader,
    ) -> Self {
        Self::build(reasoner, evidence, image_reader, 5)
    }

    pub fn build(
        reasoner: MockReasoner,
        evidence: MockEvidenceSource,
        image_reader: MockImageReader,
        max_claims_per_article: usize,
    ) -> Self {
        let reasoner = Arc::new(reasoner);
        let evidence = Arc::new(evidence);
        let image_reader = Arc::new(image_reader);
        let store = Arc::new(MemoryStore::new());
        let credibility =
            Arc::new(CredibilityTable::load_default().expect("bundled credibility table"));

        let verifier = ClaimVerifier::new(
            reasoner.clone(),
            evidence.clone(),
            Arc::new(MockSimilarity::fixed(0.9)),
            credibility.clone(),
            PipelineConfig::default().with_pacing(PacingPolicy::None),
        )
        .expect("valid pipeline config");

        let deps = ServerDeps::new(
            Arc::new(verifier),
            Arc::new(ArticleProcessor::new(reasoner.clone(), image_reader.clone())),
            credibility,
            store.clone(),
            max_claims_per_article,
        );

        Self {
            app: build_app(deps, &["*".to_string()]),
            reasoner,
            evidence,
            image_reader,
            store,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("valid request");
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.post_raw(uri, body.to_string()).await
    }

    pub async fn post_raw(&self, uri: &str, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .expect("valid request");
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }
}
