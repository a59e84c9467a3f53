//! Chat message formatting for conversation-style completions.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Error formatting chat messages.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatFormatError {
    /// Interaction sequences must arrive in odd-numbered multiples:
    /// user turns at even positions, assistant turns at odd positions,
    /// ending on a user turn.
    #[error("expected an odd number of messages, got {0}")]
    EvenMessageCount(usize),
}

/// Conversation role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The conversation-level instruction.
    System,
    /// A user turn.
    User,
    /// An assistant turn.
    Assistant,
}

/// One message in a chat completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who is speaking.
    pub role: ChatRole,
    /// What they said.
    pub content: String,
}

impl ChatMessage {
    /// Creates a message.
    #[must_use]
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Prepends the system prompt and alternates user/assistant roles over
/// `messages`.
///
/// # Errors
///
/// Returns [`ChatFormatError::EvenMessageCount`] when the message list
/// does not end on a user turn.
pub fn format_messages(
    input_prompt: &str,
    messages: &[String],
) -> Result<Vec<ChatMessage>, ChatFormatError> {
    if messages.len() % 2 != 1 {
        error!(
            count = messages.len(),
            "expected interaction sequences in odd-numbered multiples"
        );
        return Err(ChatFormatError::EvenMessageCount(messages.len()));
    }

    let mut outputs = Vec::with_capacity(messages.len() + 1);
    outputs.push(ChatMessage::new(ChatRole::System, input_prompt));

    for (i, message) in messages.iter().enumerate() {
        let role = if i % 2 == 0 {
            ChatRole::User
        } else {
            ChatRole::Assistant
        };
        outputs.push(ChatMessage::new(role, message));
    }

    Ok(outputs)
}
