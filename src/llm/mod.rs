//! OpenAI-compatible chat-completions client
//!
//! One-shot calls only: no retry, no streaming. Transport failures and
//! non-2xx statuses surface as `LlmUnavailable`; a completion that fails to
//! parse into the integration's payload struct surfaces as `SchemaMismatch`.

pub mod history;
pub mod prompts;
pub mod types;

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::constants::LLM_TIMEOUT_SECS;
use crate::error::{AppError, Result};

use types::{ChatMessage, ChatRequest, ChatResponse, ResponseFormat};

/// Per-call knobs; `Default` is plain-text mode with provider defaults
#[derive(Debug, Clone, Copy, Default)]
pub struct ChatParams {
    pub json_mode: bool,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl ChatParams {
    pub fn json() -> Self {
        Self {
            json_mode: true,
            ..Self::default()
        }
    }
}

#[derive(Clone)]
pub struct LlmClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl LlmClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(LLM_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: config.llm_base_url.trim_end_matches('/').to_string(),
            api_key: config.llm_api_key.clone(),
            model: config.llm_model.clone(),
        })
    }

    /// Send one chat call and return the raw completion text
    pub async fn chat(&self, messages: &[ChatMessage], params: ChatParams) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            response_format: params.json_mode.then(ResponseFormat::json_object),
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: ChatResponse = response.json().await?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(AppError::SchemaMismatch {
                integration: "chat",
                reason: "provider returned no completion text".to_string(),
            })
    }

    /// Send one JSON-mode call and parse the completion into `T`
    pub async fn chat_json<T: DeserializeOwned>(
        &self,
        integration: &'static str,
        messages: &[ChatMessage],
        params: ChatParams,
    ) -> Result<T> {
        let text = self.chat(messages, params).await?;
        parse_payload(integration, &text)
    }
}

/// Parse a completion into the integration's payload struct
///
/// The parse boundary is where duck-typed provider output becomes a typed
/// value; anything that doesn't match is a SchemaMismatch, never a panic.
pub fn parse_payload<T: DeserializeOwned>(integration: &'static str, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|e| AppError::SchemaMismatch {
        integration,
        reason: e.to_string(),
    })
}
