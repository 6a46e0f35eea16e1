// Core layer - shared types and configuration
pub mod core;

// Features layer - participants and dialogue orchestration
pub mod features;

// HTTP layer - JSON service over the session store
pub mod server;

// Re-export core config for convenience
pub use core::{Config, DialogueError, Message};

// Re-export feature items
pub use features::{
    // Dialogue
    DialogueOrchestrator, SessionId, SessionStore,
    // Participants
    BackendFactory, ChatBackend, OpenAiBackend, OpenAiBackendFactory, Participant,
    RemoteChatClient, Reply,
};
