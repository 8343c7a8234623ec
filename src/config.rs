//! YAML configuration for the generation service.
//!
//! ```yaml
//! openai:
//!   api_key: sk-...
//!   endpoint_url: https://api.openai.com/v1   # optional
//!   model: gpt-4o-mini                        # optional
//! ```
//!
//! A missing file or a missing/empty `api_key` is a fatal, user-reported
//! error; everything else has a default.

use std::path::Path;

use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;

use crate::llm::ChatConfig;

/// Errors from configuration loading.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("configuration file not found at: {path}")]
    #[diagnostic(
        code(formfill::config::not_found),
        help("Create the file or point at an existing one with --config.")
    )]
    NotFound { path: String },

    #[error("failed to read configuration file: {path}")]
    #[diagnostic(
        code(formfill::config::io),
        help("Check the file's permissions.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration file: {path}")]
    #[diagnostic(
        code(formfill::config::parse),
        help("The file must be valid YAML with an `openai:` table.")
    )]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("OpenAI API key is missing from {path}")]
    #[diagnostic(
        code(formfill::config::missing_api_key),
        help("Set `openai.api_key` in the configuration file.")
    )]
    MissingApiKey { path: String },
}

/// Top-level configuration file contents.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub openai: OpenAiConfig,
}

/// The `openai:` table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenAiConfig {
    /// Bearer token for the service. Required.
    #[serde(default)]
    pub api_key: String,
    /// Endpoint override; empty or absent means the default OpenAI endpoint.
    #[serde(default)]
    pub endpoint_url: Option<String>,
    /// Model name; absent means the default model.
    #[serde(default)]
    pub model: Option<String>,
}

impl Config {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Config = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        if config.openai.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey {
                path: path.display().to_string(),
            });
        }
        Ok(config)
    }

    /// Translate the file contents into a chat client configuration,
    /// applying defaults for the endpoint and model.
    pub fn chat_config(&self) -> ChatConfig {
        let defaults = ChatConfig::default();
        ChatConfig {
            base_url: self
                .openai
                .endpoint_url
                .as_deref()
                .filter(|url| !url.trim().is_empty())
                .map(str::to_string)
                .unwrap_or(defaults.base_url),
            api_key: self.openai.api_key.clone(),
            model: self
                .openai
                .model
                .clone()
                .unwrap_or(defaults.model),
            timeout_secs: defaults.timeout_secs,
        }
    }
}
