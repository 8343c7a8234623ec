//! Blocking client for an OpenAI-compatible chat-completion service.
//!
//! The service is used for two things only: picking a semantic category for a
//! field name, and synthesizing one plausible value for it. Both callers go
//! through the [`TextCompletion`] trait so they stay pure functions of their
//! inputs plus an injected capability handle, and can be driven by a fake in
//! tests.

use miette::Diagnostic;
use thiserror::Error;

/// Errors from the chat-completion client.
#[derive(Debug, Error, Diagnostic)]
pub enum LlmError {
    #[error("chat request failed: {message}")]
    #[diagnostic(
        code(formfill::llm::request_failed),
        help("Check the endpoint URL, API key, and network connectivity.")
    )]
    RequestFailed { message: String },

    #[error("failed to parse chat response: {message}")]
    #[diagnostic(
        code(formfill::llm::parse_error),
        help("The service returned an unexpected response format.")
    )]
    ParseError { message: String },
}

/// Configuration for the chat client.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Base URL for the OpenAI-compatible API.
    pub base_url: String,
    /// Bearer token sent with every request.
    pub api_key: String,
    /// Model name to use.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".into(),
            api_key: String::new(),
            model: "gpt-3.5-turbo".into(),
            timeout_secs: 120,
        }
    }
}

/// A single-turn text-completion capability.
///
/// One system instruction, one user prompt, one sampling temperature, one
/// text answer. Implemented by [`ChatClient`] for the real service and by
/// scripted fakes in tests.
pub trait TextCompletion {
    fn complete(&self, system: &str, user: &str, temperature: f32) -> Result<String, LlmError>;
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct ChatClient {
    config: ChatConfig,
}

impl ChatClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ChatConfig) -> Self {
        Self { config }
    }

    /// The model name being used.
    pub fn model(&self) -> &str {
        &self.config.model
    }
}

impl TextCompletion for ChatClient {
    /// Send one system+user exchange and return the first choice's text.
    fn complete(&self, system: &str, user: &str, temperature: f32) -> Result<String, LlmError> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let agent = ureq::AgentBuilder::new()
            .timeout(std::time::Duration::from_secs(self.config.timeout_secs))
            .build();

        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "temperature": temperature,
        });

        let body_str = serde_json::to_string(&body).map_err(|e| LlmError::RequestFailed {
            message: format!("JSON serialize error: {e}"),
        })?;

        let resp = agent
            .post(&url)
            .set("Content-Type", "application/json")
            .set("Authorization", &format!("Bearer {}", self.config.api_key))
            .send_string(&body_str)
            .map_err(|e: ureq::Error| LlmError::RequestFailed {
                message: e.to_string(),
            })?;

        let resp_str = resp.into_string().map_err(|e| LlmError::ParseError {
            message: e.to_string(),
        })?;

        let json: serde_json::Value =
            serde_json::from_str(&resp_str).map_err(|e| LlmError::ParseError {
                message: e.to_string(),
            })?;

        json["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| LlmError::ParseError {
                message: "missing 'choices[0].message.content' field".into(),
            })
    }
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .finish()
    }
}
