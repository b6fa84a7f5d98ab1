//! Pluggable code suggestion collaborators.
//!
//! Code generation is an optional feature the rest of the system never
//! depends on: callers hold a [`CodeSuggester`] and degrade gracefully when
//! no backend is reachable. The shipped implementation talks to a local
//! Ollama instance.

use async_trait::async_trait;
use std::time::Duration;

use crate::Result;

pub mod ollama;

pub use ollama::OllamaSuggester;

/// A collaborator that drafts snippet code from a title and description.
#[async_trait]
pub trait CodeSuggester: Send + Sync {
    /// Name of this suggester, for logs.
    fn name(&self) -> &'static str;

    /// Produces a code draft for the given title and optional description.
    async fn suggest(&self, title: &str, description: Option<&str>) -> Result<String>;
}

/// HTTP client configuration for suggestion backends.
#[derive(Debug, Clone, Copy)]
pub struct SuggestHttpConfig {
    /// Request timeout in milliseconds (0 to disable).
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (0 to disable).
    pub connect_timeout_ms: u64,
}

impl Default for SuggestHttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 60_000,
            connect_timeout_ms: 3_000,
        }
    }
}

impl SuggestHttpConfig {
    /// Loads HTTP configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Applies environment variable overrides.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = std::env::var("BYTESTASH_CODEGEN_TIMEOUT_MS") {
            if let Ok(timeout_ms) = v.parse::<u64>() {
                self.timeout_ms = timeout_ms;
            }
        }
        if let Ok(v) = std::env::var("BYTESTASH_CODEGEN_CONNECT_TIMEOUT_MS") {
            if let Ok(connect_timeout_ms) = v.parse::<u64>() {
                self.connect_timeout_ms = connect_timeout_ms;
            }
        }
        self
    }
}

/// Builds an HTTP client for suggestion requests with configured timeouts.
#[must_use]
pub fn build_http_client(config: SuggestHttpConfig) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if config.timeout_ms > 0 {
        builder = builder.timeout(Duration::from_millis(config.timeout_ms));
    }
    if config.connect_timeout_ms > 0 {
        builder = builder.connect_timeout(Duration::from_millis(config.connect_timeout_ms));
    }

    builder.build().unwrap_or_else(|err| {
        tracing::warn!("Failed to build suggestion HTTP client: {err}");
        reqwest::Client::new()
    })
}

/// Strips a surrounding markdown code fence from model output.
///
/// Returns the inner code when the whole text is one fenced block,
/// dropping the language tag line; returns the input unchanged otherwise.
#[must_use]
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return text;
    };
    let Some(end) = rest.rfind("```") else {
        return text;
    };
    let body = &rest[..end];
    let body = body.find('\n').map_or(body, |idx| &body[idx + 1..]);
    body.trim_end()
}
