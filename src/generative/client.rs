use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

/// Messages endpoint of the Anthropic API.
pub const ANTHROPIC_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Error)]
pub enum GenerativeError {
    #[error("model API returned {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("model API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("model response contained no text block")]
    EmptyResponse,

    #[error("model output not parseable: {0}")]
    Unparseable(String),
}

/// Single-turn text generation seam. The production implementation talks
/// to the Anthropic API; tests substitute canned generators.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
    ) -> Result<String, GenerativeError>;
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

/// [`TextGenerator`] backed by the Anthropic messages API.
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl AnthropicClient {
    pub fn new(api_key: String, model: String) -> Self {
        // Long deadline: the bias prompt allows a 4096-token reply.
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            http,
            api_key,
            model,
            base_url: ANTHROPIC_MESSAGES_URL.to_string(),
        }
    }

    /// Point the client at a different messages endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl TextGenerator for AnthropicClient {
    #[instrument(skip(self, system, user))]
    async fn generate(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
    ) -> Result<String, GenerativeError> {
        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens,
            system: system.to_string(),
            messages: vec![Message {
                role: "user".to_string(),
                content: user.to_string(),
            }],
        };

        let started = Instant::now();
        let response = self
            .http
            .post(&self.base_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerativeError::Api { status, body });
        }

        let parsed: MessagesResponse = response.json().await?;
        let text = parsed
            .content
            .iter()
            .find(|block| block.block_type == "text")
            .and_then(|block| block.text.as_deref())
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .ok_or(GenerativeError::EmptyResponse)?;

        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            chars = text.chars().count(),
            "model call complete"
        );

        Ok(text.to_string())
    }
}
