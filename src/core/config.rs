//! Environment-driven configuration
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Participant fallback chains, server bind settings, CORS origins

use std::env;
use thiserror::Error;

/// Model used when neither the request nor the environment names one
pub const DEFAULT_MODEL: &str = "google/gemini-2.0-flash-exp:free";

/// Topic used by the web service when a start request omits it
pub const DEFAULT_TOPIC: &str = "The future of AI";

const DEFAULT_REMOTE_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_LOCAL_BASE_URL: &str = "http://localhost:11434/v1";
const DEFAULT_LOCAL_API_KEY: &str = "ollama";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Connection settings for one side of the dialogue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl ParticipantConfig {
    /// Same connection, different model (request-level override)
    pub fn with_model(&self, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub participant_a: ParticipantConfig,
    pub participant_b: ParticipantConfig,
    pub default_topic: String,
    pub bind_addr: String,
    pub port: u16,
    pub log_level: String,
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// Empty values count as unset so a blank line in `.env` falls through to
    /// the next link of the chain.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let first = |keys: &[&str], fallback: &str| {
            keys.iter()
                .find_map(|&k| var(k))
                .unwrap_or_else(|| fallback.to_string())
        };

        let participant_a = ParticipantConfig {
            api_key: first(&["MODEL_A_API_KEY", "OPENROUTER_API_KEY"], ""),
            base_url: first(
                &["MODEL_A_BASE_URL", "OPENROUTER_BASE_URL"],
                DEFAULT_REMOTE_BASE_URL,
            ),
            model: first(&["MODEL_A_NAME"], DEFAULT_MODEL),
        };

        let participant_b = ParticipantConfig {
            api_key: first(&["MODEL_B_API_KEY", "LOCAL_API_KEY"], DEFAULT_LOCAL_API_KEY),
            base_url: first(&["MODEL_B_BASE_URL", "LOCAL_BASE_URL"], DEFAULT_LOCAL_BASE_URL),
            model: first(&["MODEL_B_NAME"], DEFAULT_MODEL),
        };

        let port = match var("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                value: raw.clone(),
            })?,
            None => 5000,
        };

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Config {
            participant_a,
            participant_b,
            default_topic: first(&["DEFAULT_TOPIC"], DEFAULT_TOPIC),
            bind_addr: first(&["BIND_ADDR"], "127.0.0.1"),
            port,
            log_level: first(&["LOG_LEVEL"], "info"),
            cors_allowed_origins,
        })
    }
}
