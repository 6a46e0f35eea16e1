//! # Core Module
//!
//! Core domain types, configuration, and error handling for llm-talks.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Config with participant fallback chains, Message record, DialogueError

pub mod config;
pub mod error;
pub mod message;

// Re-export commonly used items
pub use config::{Config, ConfigError, ParticipantConfig, DEFAULT_MODEL, DEFAULT_TOPIC};
pub use error::DialogueError;
pub use message::{Message, MODERATOR_MODEL, MODERATOR_SPEAKER};
