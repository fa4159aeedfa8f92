//! The developer -> unit tester pipeline.
//!
//! For each idea the developer agent writes code, the unit-test agent is asked
//! to test that code, and both replies are written under the output root.
//! Nothing is written unless both agents answered.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::agent::{Agent, AgentError};
use crate::builder::StepList;
use crate::models::{AgentReply, Message};
use crate::output::{OutputKind, OutputWriter};

/// Prefix put in front of the generated code when asking for tests.
pub const UNIT_TEST_PROMPT_PREFIX: &str = "write unit tests for the code: ";

#[derive(Debug, Error)]
pub enum TeamError {
    #[error("Application idea must not be empty")]
    EmptyIdea,

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Everything produced for one idea.
#[derive(Debug, Clone)]
pub struct IdeaOutcome {
    pub code: AgentReply,
    pub tests: AgentReply,
    pub code_path: PathBuf,
    pub tests_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Team {
    developer: Agent,
    unit_tester: Agent,
    writer: OutputWriter,
}

impl Team {
    pub fn new(developer: Agent, unit_tester: Agent, writer: OutputWriter) -> Self {
        Self {
            developer,
            unit_tester,
            writer,
        }
    }

    pub fn developer(&self) -> &Agent {
        &self.developer
    }

    pub fn unit_tester(&self) -> &Agent {
        &self.unit_tester
    }

    /// Run one idea through both agents, recording each completed stage in `steps`.
    pub async fn run_idea(&self, idea: &str, steps: &mut StepList) -> Result<IdeaOutcome, TeamError> {
        if idea.trim().is_empty() {
            return Err(TeamError::EmptyIdea);
        }

        let code = self.developer.send(&Message::user(idea)).await?;
        steps.add_step(format!("Generated code with {}", code.agent));

        let test_prompt = format!("{}{}", UNIT_TEST_PROMPT_PREFIX, code.content);
        let tests = self.unit_tester.send(&Message::user(test_prompt)).await?;
        steps.add_step(format!("Generated unit tests with {}", tests.agent));

        let code_path = self.writer.write(OutputKind::Code, &code.agent, &code.content)?;
        steps.add_step(format!("Wrote {}", code_path.display()));

        let tests_path = self
            .writer
            .write(OutputKind::Tests, &tests.agent, &tests.content)?;
        steps.add_step(format!("Wrote {}", tests_path.display()));

        Ok(IdeaOutcome {
            code,
            tests,
            code_path,
            tests_path,
        })
    }
}
