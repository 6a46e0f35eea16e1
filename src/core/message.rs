//! Dialogue message record
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use serde::Serialize;

use super::error::DialogueError;

pub const MODERATOR_SPEAKER: &str = "Moderator";
pub const MODERATOR_MODEL: &str = "System";

/// One utterance in the shared transcript
///
/// Fields are private so every instance has passed [`Message::new`]'s checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    speaker: String,
    text: String,
    model: String,
}

impl Message {
    pub fn new(
        speaker: impl Into<String>,
        text: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, DialogueError> {
        let speaker = speaker.into();
        let model = model.into();

        if speaker.trim().is_empty() {
            return Err(DialogueError::internal("message speaker must not be empty"));
        }
        if model.trim().is_empty() {
            return Err(DialogueError::internal(format!(
                "message from {speaker} has no model identifier"
            )));
        }

        Ok(Self {
            speaker,
            text: text.into(),
            model,
        })
    }

    /// The seeded opening line of every dialogue
    pub fn moderator(text: impl Into<String>) -> Self {
        Self {
            speaker: MODERATOR_SPEAKER.to_string(),
            text: text.into(),
            model: MODERATOR_MODEL.to_string(),
        }
    }

    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}
