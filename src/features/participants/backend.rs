//! Remote chat-completion capability
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: ChatBackend seam with an OpenAI-compatible implementation

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use openai::chat::{ChatCompletion, ChatCompletionMessage, ChatCompletionMessageRole};
use openai::Credentials;
use std::sync::Arc;

use super::client::{Role, TranscriptEntry};
use crate::core::ParticipantConfig;

/// Given a transcript, produce the next assistant message
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(&self, model: &str, transcript: &[TranscriptEntry]) -> Result<String>;
}

/// Builds one backend per participant connection
pub trait BackendFactory: Send + Sync {
    fn backend(&self, participant: &ParticipantConfig) -> Arc<dyn ChatBackend>;
}

/// Any OpenAI-compatible endpoint (OpenRouter, Ollama, OpenAI itself)
pub struct OpenAiBackend {
    credentials: Credentials,
}

impl OpenAiBackend {
    pub fn new(api_key: &str, base_url: &str) -> Self {
        Self {
            credentials: Credentials::new(api_key, normalize_base_url(base_url)),
        }
    }
}

/// The openai crate joins routes onto the base URL verbatim
fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    }
}

fn to_openai_message(entry: &TranscriptEntry) -> ChatCompletionMessage {
    let role = match entry.role {
        Role::System => ChatCompletionMessageRole::System,
        Role::User => ChatCompletionMessageRole::User,
        Role::Assistant => ChatCompletionMessageRole::Assistant,
    };

    ChatCompletionMessage {
        role,
        content: Some(entry.content.clone()),
        name: None,
        function_call: None,
        tool_call_id: None,
        tool_calls: None,
    }
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    async fn complete(&self, model: &str, transcript: &[TranscriptEntry]) -> Result<String> {
        let messages: Vec<ChatCompletionMessage> =
            transcript.iter().map(to_openai_message).collect();

        debug!("Requesting completion from {model} with {} messages", messages.len());

        let chat_completion = ChatCompletion::builder(model, messages)
            .credentials(self.credentials.clone())
            .create()
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;

        chat_completion
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| anyhow::anyhow!("No response content from {}", model))
    }
}

/// Production factory: one OpenAI-compatible client per participant
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenAiBackendFactory;

impl BackendFactory for OpenAiBackendFactory {
    fn backend(&self, participant: &ParticipantConfig) -> Arc<dyn ChatBackend> {
        Arc::new(OpenAiBackend::new(&participant.api_key, &participant.base_url))
    }
}
