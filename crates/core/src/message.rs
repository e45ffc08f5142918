//! Message domain types.
//!
//! These are the value objects handed to the pipeline by the host:
//! host loads history → pipeline filters it → selector picks a subset →
//! orchestrator formats it into the enhancement request.
//!
//! Messages are never mutated by the pipeline; everything downstream works
//! on borrowed slices and derives new strings.

use serde::{Deserialize, Serialize};

/// Subtype tag carried by the system message that opens a session.
pub const SYSTEM_INIT_SUBTYPE: &str = "init";

/// The role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The AI assistant
    Assistant,
    /// System notices (session init, status lines)
    System,
}

impl Role {
    /// Label used in formatted context entries (`"User: ..."`).
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
            Role::System => "System",
        }
    }

    /// Single-letter tag used in the selection digest (`"[3] U: ..."`).
    pub fn letter(self) -> char {
        match self {
            Role::User => 'U',
            Role::Assistant => 'A',
            Role::System => 'S',
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single message in a conversation, already reduced to plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Who sent this message
    pub role: Role,

    /// The text content
    #[serde(default)]
    pub content: String,

    /// Result payload of the turn, when the host recorded one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,

    /// Host-specific subtype (`"init"` marks session initialization)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
}

impl Message {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            result: None,
            subtype: None,
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create the system-initialization marker that opens a session.
    pub fn system_init() -> Self {
        Self {
            subtype: Some(SYSTEM_INIT_SUBTYPE.into()),
            ..Self::new(Role::System, "")
        }
    }

    /// Attach a result payload.
    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }

    /// Whether this is a system-initialization marker.
    pub fn is_system_init(&self) -> bool {
        self.role == Role::System && self.subtype.as_deref() == Some(SYSTEM_INIT_SUBTYPE)
    }

    /// The text that represents this message in context: the content, or the
    /// result payload when the content is blank.
    pub fn text(&self) -> &str {
        if !self.content.trim().is_empty() {
            return &self.content;
        }
        self.result.as_deref().unwrap_or("")
    }

    /// A meaningful message is neither a system-init marker nor empty of both
    /// content and result payload.
    pub fn is_meaningful(&self) -> bool {
        !self.is_system_init() && !self.text().trim().is_empty()
    }
}

/// Filter a history down to its meaningful messages, preserving order.
pub fn meaningful(messages: &[Message]) -> Vec<&Message> {
    messages.iter().filter(|m| m.is_meaningful()).collect()
}
