//! Ollama chat API client.

mod client;
mod types;

pub use client::{ClientError, OllamaClient};
pub use types::*;
