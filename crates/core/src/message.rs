//! Chat message types.
//!
//! Two shapes flow through the system: `ChatExchange` is what the browser
//! sends back as conversation history, `ChatMessage` is what goes to the
//! model gateway in OpenAI-compatible form.

use serde::{Deserialize, Serialize};

/// The role of a message sender as understood by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions and assembled context
    System,
    /// The site visitor
    User,
    /// The model
    Assistant,
}

impl Role {
    /// Normalize a role label coming from client-side history.
    ///
    /// The frontend labels model turns `"model"` (Gemini convention); the
    /// gateway expects `"assistant"`. Unknown labels are treated as user
    /// turns so history can never inject a system message.
    pub fn from_history_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "assistant" | "model" => Role::Assistant,
            _ => Role::User,
        }
    }
}

/// A single message sent to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
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
}

/// One prior turn of a conversation, as sent by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatExchange {
    /// `"user"`, `"assistant"`, or `"model"`
    pub role: String,
    pub content: String,
}

impl ChatExchange {
    /// Convert to a gateway message with the role normalized.
    pub fn to_message(&self) -> ChatMessage {
        ChatMessage {
            role: Role::from_history_label(&self.role),
            content: self.content.clone(),
        }
    }
}
