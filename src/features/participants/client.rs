//! # Remote Chat Client
//!
//! One participant's private view of the dialogue. The transcript is seeded with
//! the persona as a system entry and only ever grows.

use log::{debug, warn};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use super::backend::{ChatBackend, OpenAiBackend};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptEntry {
    pub role: Role,
    pub content: String,
}

impl TranscriptEntry {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Outcome of asking the remote model for its next utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Success(String),
    Failure { cause: String },
}

impl Reply {
    pub fn is_success(&self) -> bool {
        matches!(self, Reply::Success(_))
    }

    /// Conversational text for this reply; failures become a readable placeholder
    pub fn into_text(self, model: &str) -> String {
        match self {
            Reply::Success(text) => text,
            Reply::Failure { cause } => format!("Error communicating with {model}: {cause}"),
        }
    }
}

pub struct RemoteChatClient {
    backend: Arc<dyn ChatBackend>,
    model: String,
    persona: String,
    transcript: Vec<TranscriptEntry>,
}

impl fmt::Debug for RemoteChatClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteChatClient")
            .field("model", &self.model)
            .field("transcript_len", &self.transcript.len())
            .finish()
    }
}

impl RemoteChatClient {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        model: impl Into<String>,
        persona: impl Into<String>,
    ) -> Self {
        let persona = persona.into();
        Self {
            backend,
            model: model.into(),
            transcript: vec![TranscriptEntry::new(Role::System, persona.clone())],
            persona,
        }
    }

    /// Client talking to an OpenAI-compatible endpoint
    pub fn connect(
        api_key: &str,
        base_url: &str,
        model: impl Into<String>,
        persona: impl Into<String>,
    ) -> Self {
        Self::new(Arc::new(OpenAiBackend::new(api_key, base_url)), model, persona)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn persona(&self) -> &str {
        &self.persona
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Ask the remote model to answer `input`.
    ///
    /// The input is recorded as a user entry whatever the outcome. Only a
    /// successful answer is recorded as an assistant entry, so error text never
    /// becomes part of this participant's context.
    pub async fn produce_reply(&mut self, input: &str) -> Reply {
        self.transcript.push(TranscriptEntry::new(Role::User, input));

        match self.backend.complete(&self.model, &self.transcript).await {
            Ok(text) => {
                debug!("{} replied with {} chars", self.model, text.len());
                self.transcript
                    .push(TranscriptEntry::new(Role::Assistant, text.clone()));
                Reply::Success(text)
            }
            Err(e) => {
                warn!("Error communicating with {}: {:#}", self.model, e);
                Reply::Failure {
                    cause: format!("{e:#}"),
                }
            }
        }
    }
}
