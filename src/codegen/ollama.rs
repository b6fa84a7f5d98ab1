//! Ollama (local) suggestion backend.

use super::{CodeSuggester, SuggestHttpConfig, build_http_client, strip_code_fences};
use crate::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const SYSTEM_PROMPT: &str = "You are an expert programmer. Generate a code snippet for the \
     request below. Respond with only the code, no explanation and no markdown formatting.";

/// Code suggester backed by a local Ollama instance.
///
/// Talks to the OpenAI-compatible chat route, so any server exposing
/// `/v1/chat/completions` works as a drop-in.
pub struct OllamaSuggester {
    /// API endpoint.
    endpoint: String,
    /// Model to use.
    model: String,
    /// HTTP client.
    client: reqwest::Client,
}

impl OllamaSuggester {
    /// Default API endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "http://localhost:11434";

    /// Default model.
    pub const DEFAULT_MODEL: &'static str = "gemma3";

    /// Creates a new Ollama suggester.
    #[must_use]
    pub fn new() -> Self {
        let endpoint =
            std::env::var("OLLAMA_HOST").unwrap_or_else(|_| Self::DEFAULT_ENDPOINT.to_string());
        let model =
            std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| Self::DEFAULT_MODEL.to_string());

        Self {
            endpoint,
            model,
            client: build_http_client(SuggestHttpConfig::from_env()),
        }
    }

    /// Sets the API endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets HTTP client timeouts for suggestion requests.
    #[must_use]
    pub fn with_http_config(mut self, config: SuggestHttpConfig) -> Self {
        self.client = build_http_client(config);
        self
    }

    /// Checks if the Ollama server is reachable.
    pub async fn is_available(&self) -> bool {
        self.client
            .get(format!("{}/api/tags", self.endpoint))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Makes a chat completion request.
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages,
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.endpoint))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let error_kind = if e.is_timeout() {
                    "timeout"
                } else if e.is_connect() {
                    "connect"
                } else if e.is_request() {
                    "request"
                } else {
                    "unknown"
                };
                tracing::error!(
                    backend = "ollama",
                    model = %self.model,
                    error = %e,
                    error_kind = error_kind,
                    "suggestion request failed"
                );
                Error::OperationFailed {
                    operation: "ollama_suggest".to_string(),
                    cause: format!("{error_kind} error: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                backend = "ollama",
                model = %self.model,
                status = %status,
                body = %body,
                "suggestion API returned error status"
            );
            return Err(Error::OperationFailed {
                operation: "ollama_suggest".to_string(),
                cause: format!("API returned status: {status} - {body}"),
            });
        }

        let response: ChatResponse = response.json().await.map_err(|e| {
            tracing::error!(
                backend = "ollama",
                model = %self.model,
                error = %e,
                "failed to parse suggestion response"
            );
            Error::OperationFailed {
                operation: "ollama_suggest_response".to_string(),
                cause: e.to_string(),
            }
        })?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| Error::OperationFailed {
                operation: "ollama_suggest_response".to_string(),
                cause: "response contained no choices".to_string(),
            })
    }
}

impl Default for OllamaSuggester {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CodeSuggester for OllamaSuggester {
    fn name(&self) -> &'static str {
        "ollama"
    }

    async fn suggest(&self, title: &str, description: Option<&str>) -> Result<String> {
        let user_prompt = format!(
            "Title: {title}\nDescription: {}",
            description.unwrap_or("No description provided")
        );
        let messages = vec![
            ChatMessage {
                role: "system".to_string(),
                content: SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: user_prompt,
            },
        ];

        let content = self.chat(messages).await?;
        Ok(strip_code_fences(&content).to_string())
    }
}

/// Request to the chat completions API.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

/// A message in the chat.
#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// One completion choice.
#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Response from the chat completions API.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}
