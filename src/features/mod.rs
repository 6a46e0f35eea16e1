// Participants - personas, chat clients, remote backends
pub mod participants;

// Dialogue - turn-taking orchestrator and session store
pub mod dialogue;

pub use dialogue::{DialogueOrchestrator, SessionId, SessionStore};
pub use participants::{
    BackendFactory, ChatBackend, OpenAiBackend, OpenAiBackendFactory, Participant,
    RemoteChatClient, Reply,
};
