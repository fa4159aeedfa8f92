use serde::{Deserialize, Serialize};

/// Who authored a message in a conversation with the agents.
///
/// - `User`: The person typing application ideas
/// - `Developer`: The agent that writes application code
/// - `UnitTester`: The agent that writes unit tests for that code
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Developer,
    UnitTester,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Developer => "developer",
            Self::UnitTester => "unit_tester",
        }
    }

    /// The role name used on the chat wire. Both agent roles speak as the
    /// assistant; only the person at the keyboard is the user.
    pub fn chat_role(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Developer | Self::UnitTester => "assistant",
        }
    }
}

/// A message sent to an agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub sender: Role,
    pub content: String,
}

impl Message {
    pub fn new(sender: Role, content: impl Into<String>) -> Self {
        Self {
            sender,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }
}

/// The answer an agent produced for a single message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentReply {
    /// Name of the agent that answered (e.g. `DeveloperAgent`).
    pub agent: String,
    pub role: Role,
    /// Raw model output, usually markdown with fenced code blocks.
    pub content: String,
}
