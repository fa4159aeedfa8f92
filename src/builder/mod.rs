//! Application registry and plan-step tracking.
//!
//! [`ApplicationBuilder`] hands out [`Application`] records and edits their
//! feature sets. It does not keep the applications it creates; callers own
//! them and pass them back in for every feature change.

mod steps;

pub use steps::StepList;

use std::io::{self, Write};

use thiserror::Error;

use crate::models::Application;

/// Errors from builder operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuilderError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Creates applications, manages their features, and tracks plan steps.
#[derive(Debug, Clone, Default)]
pub struct ApplicationBuilder {
    steps: StepList,
}

impl ApplicationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================================
    // Application operations
    // ============================================================

    /// Create a new application with an empty feature set.
    ///
    /// Names that are empty or only whitespace are rejected.
    pub fn create_application(&self, name: &str) -> Result<Application, BuilderError> {
        require_non_blank("application name", name)?;
        let app = Application::new(name);
        tracing::debug!(app_id = %app.id, name = %app.name, "Created application");
        Ok(app)
    }

    /// Add a feature to an application.
    ///
    /// Returns `true` if the feature was newly added, `false` if it was
    /// already present (the set is left unchanged).
    pub fn add_feature(&self, app: &mut Application, feature: &str) -> Result<bool, BuilderError> {
        require_non_blank("feature name", feature)?;
        let added = app.features.insert(feature.to_string());
        if added {
            tracing::debug!(app = %app.name, feature, "Added feature");
        }
        Ok(added)
    }

    /// Remove a feature from an application.
    ///
    /// Removing a feature that is not present is a no-op and returns `false`.
    pub fn remove_feature(&self, app: &mut Application, feature: &str) -> bool {
        let removed = app.features.remove(feature);
        if removed {
            tracing::debug!(app = %app.name, feature, "Removed feature");
        }
        removed
    }

    // ============================================================
    // Step operations
    // ============================================================

    pub fn add_step(&mut self, step: impl Into<String>) {
        self.steps.add_step(step);
    }

    pub fn get_steps(&self) -> &[String] {
        self.steps.steps()
    }

    pub fn display_steps<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.steps.display_steps(out)
    }

    pub fn steps(&self) -> &StepList {
        &self.steps
    }

    pub fn steps_mut(&mut self) -> &mut StepList {
        &mut self.steps
    }
}

fn require_non_blank(what: &str, value: &str) -> Result<(), BuilderError> {
    if value.trim().is_empty() {
        return Err(BuilderError::InvalidArgument(format!(
            "{} must not be empty",
            what
        )));
    }
    Ok(())
}
