//! Language model client used for reports and chat answers.
//!
//! Handlers only see [`LanguageModel`]. The production implementation talks to
//! an OpenAI-compatible `chat/completions` endpoint; when no API key is
//! configured [`UnconfiguredModel`] is installed instead and every call fails
//! with [`LlmError::NotConfigured`].

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use compute::context::Prompt;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::LlmConfig;

#[derive(Error, Debug)]
pub enum LlmError {
    /// No API key available
    #[error("Language model is not configured. Set OPENAI_API_KEY to enable reports and chat.")]
    NotConfigured,

    #[error("Language model request failed: {0}")]
    Request(String),

    /// Upstream answered with a non-success status
    #[error("Language model returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected language model response: {0}")]
    Response(String),
}

#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Sends the prompt and returns the assistant's text.
    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError>;

    /// Short status used by the health endpoint.
    fn describe(&self) -> String;

    fn is_configured(&self) -> bool {
        true
    }
}

/// Builds the model from configuration.
pub fn from_config(config: LlmConfig) -> anyhow::Result<Arc<dyn LanguageModel>> {
    let timeout = config.timeout();
    match config.api_key {
        Some(api_key) => {
            let client = Client::builder()
                .timeout(timeout)
                .build()
                .context("Failed to create HTTP client")?;
            debug!("Language model configured: {}", config.model);
            Ok(Arc::new(OpenAiModel {
                client,
                api_key,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                model: config.model,
            }))
        }
        None => {
            warn!("OPENAI_API_KEY is not set, report and chat endpoints are disabled");
            Ok(Arc::new(UnconfiguredModel))
        }
    }
}

/// OpenAI chat completions client.
pub struct OpenAiModel {
    client: Client,
    api_key: Secret<String>,
    base_url: String,
    model: String,
}

impl OpenAiModel {
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn to_request<'a>(&'a self, prompt: &'a Prompt) -> OpenAiRequest<'a> {
        OpenAiRequest {
            model: &self.model,
            messages: vec![
                OpenAiMessage {
                    role: "system",
                    content: &prompt.system,
                },
                OpenAiMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: prompt.temperature,
            max_tokens: prompt.max_tokens,
        }
    }
}

#[async_trait]
impl LanguageModel for OpenAiModel {
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError> {
        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.api_key.expose_secret()))
            .json(&self.to_request(prompt))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Request("request timed out".to_string())
                } else {
                    LlmError::Request(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Response(e.to_string()))?;
        let content = first_choice(body)?;
        debug!("Received {} characters from language model", content.chars().count());
        Ok(content)
    }

    fn describe(&self) -> String {
        format!("configured ({})", self.model)
    }
}

/// Stand-in used when no API key is available.
pub struct UnconfiguredModel;

#[async_trait]
impl LanguageModel for UnconfiguredModel {
    async fn complete(&self, _prompt: &Prompt) -> Result<String, LlmError> {
        Err(LlmError::NotConfigured)
    }

    fn describe(&self) -> String {
        "not configured".to_string()
    }

    fn is_configured(&self) -> bool {
        false
    }
}

fn first_choice(response: OpenAiResponse) -> Result<String, LlmError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| LlmError::Response("no content in response".to_string()))
}

#[derive(Debug, Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAiMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}
