//! # Feature: Participants
//!
//! The two dialogue seats: persona templates, the per-participant chat client
//! with its private transcript, and the remote chat-completion backend.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: RemoteChatClient, ChatBackend seam, curious/skeptic personas

pub mod backend;
pub mod client;
pub mod personas;

pub use backend::{BackendFactory, ChatBackend, OpenAiBackend, OpenAiBackendFactory};
pub use client::{RemoteChatClient, Reply, Role, TranscriptEntry};
pub use personas::{opening_prompt, Participant, DIALOGUE_LANGUAGE};
