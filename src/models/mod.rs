//! Domain models for devteam.
//!
//! # Core Concepts
//!
//! - [`Application`]: A named application record owning a set of feature names.
//! - [`Message`]: A piece of text sent by a [`Role`] to an agent.
//! - [`AgentReply`]: What an agent answered, tagged with the agent's name.

mod application;
mod message;

pub use application::*;
pub use message::*;
