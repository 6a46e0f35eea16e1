//! Fixed persona templates for the two seats at the table
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Curious (A) and skeptic (B) personas loaded from prompt/*.md

/// Language both participants are instructed to speak
pub const DIALOGUE_LANGUAGE: &str = "Brazilian Portuguese";

const CURIOUS_TEMPLATE: &str = include_str!("../../../prompt/curious.md");
const SKEPTIC_TEMPLATE: &str = include_str!("../../../prompt/skeptic.md");
const OPENING_TEMPLATE: &str = include_str!("../../../prompt/opening.md");

/// Which side of the dialogue is speaking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Participant {
    A,
    B,
}

impl Participant {
    pub fn other(self) -> Self {
        match self {
            Participant::A => Participant::B,
            Participant::B => Participant::A,
        }
    }

    /// Speaker label shown in the shared transcript
    pub fn label(self) -> &'static str {
        match self {
            Participant::A => "Model A",
            Participant::B => "Model B",
        }
    }

    /// System instruction for this seat, with the topic filled in
    pub fn persona_prompt(self, topic: &str) -> String {
        let template = match self {
            Participant::A => CURIOUS_TEMPLATE,
            Participant::B => SKEPTIC_TEMPLATE,
        };
        render(template, topic)
    }
}

/// Moderator's first line, which also seeds participant A's first input
pub fn opening_prompt(topic: &str) -> String {
    render(OPENING_TEMPLATE, topic)
}

fn render(template: &str, topic: &str) -> String {
    template
        .trim_end()
        .replace("{language}", DIALOGUE_LANGUAGE)
        .replace("{topic}", topic)
}
