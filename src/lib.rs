//! Developer and unit-test agents chained against a local Ollama server.
//!
//! - [`builder`]: step tracking and the application/feature registry.
//! - [`llm`]: HTTP client for the Ollama chat API.
//! - [`agent`]: named LLM roles with a fixed system message.
//! - [`team`]: the idea -> code -> unit tests pipeline.
//! - [`output`]: markdown files written per agent.

pub mod agent;
pub mod builder;
pub mod config;
pub mod llm;
pub mod models;
pub mod output;
pub mod team;
