//! Live dialogues keyed by session id
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: DashMap store with a per-dialogue async mutex

use dashmap::DashMap;
use log::info;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::orchestrator::DialogueOrchestrator;
use crate::core::{DialogueError, Message};

pub type SessionId = Uuid;

/// Shared handle to one dialogue; holding the lock serializes its turns
pub type SessionHandle = Arc<Mutex<DialogueOrchestrator>>;

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<SessionId, SessionHandle>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dialogue under a fresh id
    pub fn start(&self, dialogue: DialogueOrchestrator) -> SessionId {
        let id = Uuid::new_v4();
        info!("Session {id} started on '{}'", dialogue.topic());
        self.sessions.insert(id, Arc::new(Mutex::new(dialogue)));
        id
    }

    pub fn get(&self, id: &SessionId) -> Result<SessionHandle, DialogueError> {
        self.sessions
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or(DialogueError::NoActiveDialogue)
    }

    /// Run the next turn of a session.
    ///
    /// The map entry is released before awaiting, so other sessions are never
    /// blocked by this one's remote call.
    pub async fn advance(&self, id: &SessionId) -> Result<Message, DialogueError> {
        let handle = self.get(id)?;
        let mut dialogue = handle.lock().await;
        let message = dialogue.advance_turn().await?;
        Ok(message)
    }

    pub async fn history(&self, id: &SessionId) -> Result<Vec<Message>, DialogueError> {
        let handle = self.get(id)?;
        let dialogue = handle.lock().await;
        Ok(dialogue.history().to_vec())
    }

    /// Drop a session; returns whether it existed
    pub fn reset(&self, id: &SessionId) -> bool {
        let removed = self.sessions.remove(id).is_some();
        if removed {
            info!("Session {id} reset");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
