use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An application being described to the agents.
///
/// Applications own their features: a feature name has no meaning outside the
/// application it was added to. Membership is by exact string equality, so
/// `"Login"` and `"login"` are distinct features.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Application {
    pub id: Uuid,
    pub name: String,
    pub features: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
}

impl Application {
    /// Create an application with an empty feature set.
    ///
    /// No validation happens here; [`crate::builder::ApplicationBuilder`] is
    /// the checked entry point.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            features: BTreeSet::new(),
            created_at: Utc::now(),
        }
    }

    pub fn has_feature(&self, name: &str) -> bool {
        self.features.contains(name)
    }

    /// Feature names in sorted order.
    pub fn features(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(String::as_str)
    }
}
