use thiserror::Error;

/// Errors surfaced by dialogue operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DialogueError {
    /// Advance or history requested for a session that does not exist
    #[error("No conversation started")]
    NoActiveDialogue,

    /// A participant was configured with an unusable value
    #[error("Invalid participant configuration: {0}")]
    InvalidParticipant(String),

    /// Anything else that went wrong while producing a turn
    #[error("{0}")]
    Internal(String),
}

impl DialogueError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the caller, not the service, is at fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::NoActiveDialogue | Self::InvalidParticipant(_))
    }
}
