//! Conversation messages

use serde::{Deserialize, Serialize};

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A message in a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn is_system(&self) -> bool {
        self.role == Role::System
    }
}

/// Turn placed at the end of a conversation that does not already end with
/// the user, for backends that reject a trailing assistant turn.
pub const CONTINUE_PROMPT: &str = "Continue.";

/// Split a conversation into a single merged system prompt and the remaining
/// turns, for backends that take the system prompt out of band.
///
/// All system messages are kept, joined with a blank line in their original
/// order. Non-system turns keep their relative order. If the remaining turns
/// would not end with a user message, [`CONTINUE_PROMPT`] is appended.
pub fn split_system_prompt(messages: &[Message]) -> (Option<String>, Vec<Message>) {
    let system_parts: Vec<&str> = messages
        .iter()
        .filter(|m| m.is_system())
        .map(|m| m.content.as_str())
        .collect();
    let system = if system_parts.is_empty() {
        None
    } else {
        Some(system_parts.join("\n\n"))
    };

    let mut turns: Vec<Message> = messages
        .iter()
        .filter(|m| !m.is_system())
        .cloned()
        .collect();
    if turns.last().map(|m| m.role) != Some(Role::User) {
        turns.push(Message::user(CONTINUE_PROMPT));
    }

    (system, turns)
}
