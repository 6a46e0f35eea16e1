//! # Dialogue Feature
//!
//! Orchestrates a two-party conversation between AI participants on a given topic.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Session store replaces the single process-wide dialogue
//! - 1.0.0: Initial implementation with strict A/B turn alternation

pub mod orchestrator;
pub mod sessions;

pub use orchestrator::DialogueOrchestrator;
pub use sessions::{SessionHandle, SessionId, SessionStore};
