//! OpenAI implementation of the reasoning, embedding and OCR capabilities.
//!
//! # Example
//!
//! ```rust,ignore
//! use verification::ai::OpenAI;
//!
//! let ai = Arc::new(OpenAI::new("sk-...").with_model("gpt-4o"));
//! let scorer = EmbeddingSimilarity::new(ai.clone());
//! ```

use std::time::Duration;

use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient, OpenAIError};

use crate::error::{Result, VerifyError};
use crate::pipeline::prompts;
use crate::security::AiCredentials;
use crate::traits::reasoner::Reasoner;
use crate::traits::similarity::Embedder;
use crate::traits::vision::ImageReader;

const DEFAULT_MODEL: &str = "gpt-4o";
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-large";

/// Request timeout applied when built from credentials.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// OpenAI-backed capabilities.
#[derive(Clone, Debug)]
pub struct OpenAI {
    client: OpenAIClient,
    model: String,
    embedding_model: String,
}

impl OpenAI {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: OpenAIClient::new(api_key),
            model: DEFAULT_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
        }
    }

    /// Build from credentials with the default request timeout.
    pub fn from_credentials(credentials: &AiCredentials) -> Result<Self> {
        if credentials.api_key.is_empty() {
            return Err(VerifyError::config("API key is empty"));
        }

        let mut client = OpenAIClient::new(credentials.api_key.expose())
            .with_timeout(DEFAULT_TIMEOUT)
            .map_err(map_error)?;
        if let Some(url) = &credentials.base_url {
            client = client.with_base_url(url);
        }

        Ok(Self {
            client,
            model: credentials.model.clone(),
            embedding_model: credentials.embedding_model.clone(),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.client = self.client.with_base_url(url);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn chat(&self, request: ChatRequest) -> Result<String> {
        let response = self.client.chat_completion(request).await.map_err(map_error)?;
        Ok(response.content)
    }
}

/// Classify client errors so only transient ones are retried.
fn map_error(err: OpenAIError) -> VerifyError {
    match err {
        OpenAIError::Config(msg) => VerifyError::config(msg),
        OpenAIError::Api { status, .. } if status == 401 || status == 403 => {
            VerifyError::config(err.to_string())
        }
        OpenAIError::Empty(msg) | OpenAIError::Parse(msg) => VerifyError::malformed(msg),
        other if other.is_transient() => VerifyError::capability(other),
        other => VerifyError::Rejected(other.into()),
    }
}

#[async_trait]
impl Reasoner for OpenAI {
    async fn invoke(&self, system: &str, prompt: &str) -> Result<String> {
        let request = ChatRequest::new(&self.model)
            .message(Message::system(system))
            .message(Message::user(prompt));
        self.chat(request).await
    }
}

#[async_trait]
impl Embedder for OpenAI {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.client
            .create_embedding(text, &self.embedding_model)
            .await
            .map_err(map_error)
    }
}

#[async_trait]
impl ImageReader for OpenAI {
    async fn read_text(&self, image_base64: &str) -> Result<Option<String>> {
        let request = ChatRequest::new(&self.model)
            .message(Message::system(prompts::OCR_SYSTEM))
            .message(Message::user_with_image(prompts::OCR_PROMPT, image_base64));

        match self.chat(request).await {
            Ok(text) if text.trim().is_empty() => Ok(None),
            Ok(text) => Ok(Some(text.trim().to_string())),
            Err(VerifyError::MalformedResponse { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
