//! Completion backend used by `tools/call`
//!
//! The dispatcher only sees the `CompletionProvider` trait. The concrete
//! OpenAI-compatible provider builds its HTTP client and reads the API key on
//! first use, then keeps that client for the rest of the process.

use std::{env, sync::OnceLock};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::ProviderConfig;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{var} environment variable must be set")]
    MissingApiKey { var: String },
    #[error("failed to create HTTP client: {0}")]
    Client(String),
    #[error("completion request failed: {0}")]
    Request(String),
    #[error("completion API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to parse completion response: {0}")]
    Decode(String),
    #[error("completion response contained no message content")]
    EmptyResponse,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str, temperature: f64) -> Result<String, ProviderError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug)]
struct OpenAiClient {
    http: Client,
    api_key: String,
    endpoint: String,
}

impl OpenAiClient {
    fn connect(config: &ProviderConfig, api_key: Option<String>) -> Result<Self, ProviderError> {
        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ProviderError::MissingApiKey {
                var: config.api_key_var.clone(),
            })?;

        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| ProviderError::Client(err.to_string()))?;

        Ok(Self {
            http,
            api_key,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
        })
    }
}

type KeyLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// OpenAI chat-completions provider with a construct-once client.
pub struct OpenAiProvider {
    config: ProviderConfig,
    key_lookup: KeyLookup,
    client: OnceLock<OpenAiClient>,
}

impl OpenAiProvider {
    /// Reads the API key from the process environment on first use.
    pub fn new(config: ProviderConfig) -> Self {
        Self::with_key_lookup(config, |var| env::var(var).ok())
    }

    pub fn with_key_lookup<F>(config: ProviderConfig, key_lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            config,
            key_lookup: Box::new(key_lookup),
            client: OnceLock::new(),
        }
    }

    #[cfg(test)]
    fn is_connected(&self) -> bool {
        self.client.get().is_some()
    }

    // A failed connect is not cached; the next call tries again.
    fn client(&self) -> Result<&OpenAiClient, ProviderError> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }

        let api_key = (self.key_lookup)(&self.config.api_key_var);
        let client = OpenAiClient::connect(&self.config, api_key)?;
        info!(
            endpoint = %client.endpoint,
            model = %self.config.model,
            "completion client initialized"
        );
        Ok(self.client.get_or_init(|| client))
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, prompt: &str, temperature: f64) -> Result<String, ProviderError> {
        let client = self.client()?;
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
        };

        debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            temperature,
            "sending completion request"
        );

        let response = client
            .http
            .post(&client.endpoint)
            .bearer_auth(&client.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| ProviderError::Request(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| ProviderError::Decode(err.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ProviderError::EmptyResponse)
    }
}
