//! Ordered plan steps.

use std::io::{self, Write};

const HEADER: &str = "Steps to implement the discussed application:";

/// An append-only list of human-readable plan steps.
///
/// Steps keep insertion order, may repeat, and may be empty strings. Nothing is
/// ever removed or edited in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepList {
    steps: Vec<String>,
}

impl StepList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, step: impl Into<String>) {
        self.steps.push(step.into());
    }

    /// All steps in the order they were added.
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Write a header followed by one `- <step>` line per step.
    pub fn display_steps<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", HEADER)?;
        for step in &self.steps {
            writeln!(out, "- {}", step)?;
        }
        Ok(())
    }
}
