//! Named LLM roles.
//!
//! An [`Agent`] pairs a name and a system message with a model on an
//! [`OllamaClient`]. Every call is a fresh two-message conversation
//! (system + user); agents keep no history between calls.

use thiserror::Error;

use crate::llm::{ChatMessage, ChatRequest, ClientError, OllamaClient};
use crate::models::{AgentReply, Message, Role};

pub const DEVELOPER_AGENT_NAME: &str = "DeveloperAgent";
pub const UNIT_TEST_AGENT_NAME: &str = "UnitTestAgent";

const DEVELOPER_SYSTEM_MESSAGE: &str = "You are a professional software engineer, known for your expertise in software development.
You use your skills to create software applications, tools, and games that are both functional and efficient.
Your preference is to write clean, well-structured code that is easy to read and maintain.";

const UNIT_TEST_SYSTEM_MESSAGE: &str = "You are a professional software engineer, known for your expertise in unit testing applications.
You use your skills to create unit tests, using test doubles where collaborators need isolating, that are both functional and efficient.
Your preference is to write clean, well-structured unit tests that are easy to read and maintain.";

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("{agent} failed: {source}")]
    Client {
        agent: String,
        #[source]
        source: ClientError,
    },
}

#[derive(Debug, Clone)]
pub struct Agent {
    name: String,
    role: Role,
    model: String,
    system_message: String,
    client: OllamaClient,
}

impl Agent {
    pub fn new(
        name: impl Into<String>,
        role: Role,
        model: impl Into<String>,
        system_message: impl Into<String>,
        client: OllamaClient,
    ) -> Self {
        Self {
            name: name.into(),
            role,
            model: model.into(),
            system_message: system_message.into(),
            client,
        }
    }

    /// The agent that turns an application idea into code.
    pub fn developer(model: impl Into<String>, client: OllamaClient) -> Self {
        Self::new(
            DEVELOPER_AGENT_NAME,
            Role::Developer,
            model,
            DEVELOPER_SYSTEM_MESSAGE,
            client,
        )
    }

    /// The agent that writes unit tests for generated code.
    pub fn unit_tester(model: impl Into<String>, client: OllamaClient) -> Self {
        Self::new(
            UNIT_TEST_AGENT_NAME,
            Role::UnitTester,
            model,
            UNIT_TEST_SYSTEM_MESSAGE,
            client,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn system_message(&self) -> &str {
        &self.system_message
    }

    /// The exact request [`Agent::send`] would issue for `message`.
    pub fn build_request(&self, message: &Message) -> ChatRequest {
        ChatRequest::new(
            self.model.clone(),
            vec![
                ChatMessage::system(self.system_message.clone()),
                ChatMessage::new(message.sender.chat_role(), message.content.clone()),
            ],
        )
    }

    pub async fn send(&self, message: &Message) -> Result<AgentReply, AgentError> {
        tracing::info!(agent = %self.name, model = %self.model, "Sending message");

        let response = self
            .client
            .chat(&self.build_request(message))
            .await
            .map_err(|source| AgentError::Client {
                agent: self.name.clone(),
                source,
            })?;

        tracing::debug!(agent = %self.name, chars = response.message.content.len(), "Received reply");

        Ok(AgentReply {
            agent: self.name.clone(),
            role: self.role,
            content: response.message.content,
        })
    }
}
