//! # Dialogue Orchestrator
//!
//! Manages the turn-taking between two participants on a given topic.

use log::{debug, info, warn};
use std::sync::Arc;

use crate::core::{DialogueError, Message, ParticipantConfig};
use crate::features::participants::{
    opening_prompt, BackendFactory, ChatBackend, Participant, RemoteChatClient,
};

/// Strict A/B alternation over one shared transcript
#[derive(Debug)]
pub struct DialogueOrchestrator {
    topic: String,
    client_a: RemoteChatClient,
    client_b: RemoteChatClient,
    active: Participant,
    last_utterance: String,
    history: Vec<Message>,
}

impl DialogueOrchestrator {
    /// Connect both participants to their OpenAI-compatible endpoints
    pub fn new(
        topic: &str,
        config_a: &ParticipantConfig,
        config_b: &ParticipantConfig,
    ) -> Result<Self, DialogueError> {
        let client_a = RemoteChatClient::connect(
            &config_a.api_key,
            &config_a.base_url,
            config_a.model.clone(),
            Participant::A.persona_prompt(topic),
        );
        let client_b = RemoteChatClient::connect(
            &config_b.api_key,
            &config_b.base_url,
            config_b.model.clone(),
            Participant::B.persona_prompt(topic),
        );
        Self::with_clients(topic, client_a, client_b)
    }

    /// Build both participants through a factory
    pub fn from_factory(
        topic: &str,
        config_a: &ParticipantConfig,
        config_b: &ParticipantConfig,
        factory: &dyn BackendFactory,
    ) -> Result<Self, DialogueError> {
        Self::with_backends(
            topic,
            (factory.backend(config_a), config_a.model.as_str()),
            (factory.backend(config_b), config_b.model.as_str()),
        )
    }

    /// Use the given backends and models, with the standard personas
    pub fn with_backends(
        topic: &str,
        (backend_a, model_a): (Arc<dyn ChatBackend>, &str),
        (backend_b, model_b): (Arc<dyn ChatBackend>, &str),
    ) -> Result<Self, DialogueError> {
        let client_a =
            RemoteChatClient::new(backend_a, model_a, Participant::A.persona_prompt(topic));
        let client_b =
            RemoteChatClient::new(backend_b, model_b, Participant::B.persona_prompt(topic));
        Self::with_clients(topic, client_a, client_b)
    }

    /// Fails when either client has no model identifier, before any remote call
    pub fn with_clients(
        topic: &str,
        client_a: RemoteChatClient,
        client_b: RemoteChatClient,
    ) -> Result<Self, DialogueError> {
        for (seat, client) in [(Participant::A, &client_a), (Participant::B, &client_b)] {
            if client.model().trim().is_empty() {
                return Err(DialogueError::InvalidParticipant(format!(
                    "{} has no model identifier",
                    seat.label()
                )));
            }
        }

        let opening = opening_prompt(topic);

        info!(
            "Starting dialogue: {} vs {} on '{}'",
            client_a.model(),
            client_b.model(),
            topic
        );

        Ok(Self {
            topic: topic.to_string(),
            client_a,
            client_b,
            active: Participant::A,
            history: vec![Message::moderator(opening.clone())],
            last_utterance: opening,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Who speaks on the next call to [`advance_turn`](Self::advance_turn)
    pub fn active(&self) -> Participant {
        self.active
    }

    pub fn last_utterance(&self) -> &str {
        &self.last_utterance
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn turns_completed(&self) -> usize {
        self.history.len() - 1
    }

    pub fn client(&self, participant: Participant) -> &RemoteChatClient {
        match participant {
            Participant::A => &self.client_a,
            Participant::B => &self.client_b,
        }
    }

    fn client_mut(&mut self, participant: Participant) -> &mut RemoteChatClient {
        match participant {
            Participant::A => &mut self.client_a,
            Participant::B => &mut self.client_b,
        }
    }

    /// Run one turn: the active participant answers the last utterance.
    ///
    /// A remote failure still produces a turn; its placeholder text is passed on
    /// to the other participant like any reply.
    pub async fn advance_turn(&mut self) -> Result<Message, DialogueError> {
        let speaker = self.active;
        let input = self.last_utterance.clone();

        debug!(
            "Turn {}: {} responding",
            self.turns_completed() + 1,
            speaker.label()
        );

        let client = self.client_mut(speaker);
        let model = client.model().to_string();
        let reply = client.produce_reply(&input).await;
        if !reply.is_success() {
            warn!("{} turn degraded to an error message", speaker.label());
        }
        let text = reply.into_text(&model);

        let message = Message::new(speaker.label(), text, model)?;

        self.history.push(message.clone());
        self.last_utterance = message.text().to_string();
        self.active = speaker.other();

        info!(
            "{} spoke ({} turns on '{}')",
            speaker.label(),
            self.turns_completed(),
            self.topic
        );

        Ok(message)
    }
}
