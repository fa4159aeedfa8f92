//! Markdown files holding agent replies.
//!
//! Layout under the output root:
//!
//! ```text
//! output/
//! ├── Code/DeveloperAgent.md
//! └── Tests/UnitTestAgent.md
//! ```

use std::io;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Code,
    Tests,
}

impl OutputKind {
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Code => "Code",
            Self::Tests => "Tests",
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputWriter {
    root: PathBuf,
}

impl OutputWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path the reply of `agent_name` would be written to.
    pub fn path_for(&self, kind: OutputKind, agent_name: &str) -> io::Result<PathBuf> {
        validate_file_stem(agent_name)?;
        Ok(self
            .root
            .join(kind.dir_name())
            .join(format!("{}.md", agent_name)))
    }

    /// Write `content` to `<root>/<kind>/<agent_name>.md`, replacing any
    /// previous file.
    pub fn write(&self, kind: OutputKind, agent_name: &str, content: &str) -> io::Result<PathBuf> {
        let path = self.path_for(kind, agent_name)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        tracing::info!(path = %path.display(), bytes = content.len(), "Wrote agent output");
        Ok(path)
    }
}

/// Agent names become file names; anything that could escape the output
/// directory is refused.
fn validate_file_stem(name: &str) -> io::Result<()> {
    let mut components = Path::new(name).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if name.trim().is_empty() || !single_normal || name.contains(['/', '\\']) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid agent name for output file: {:?}", name),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_uses_kind_directory() {
        let writer = OutputWriter::new("output");
        assert_eq!(
            writer.path_for(OutputKind::Tests, "UnitTestAgent").unwrap(),
            PathBuf::from("output/Tests/UnitTestAgent.md")
        );
    }

    #[test]
    fn rejects_traversal_names() {
        let writer = OutputWriter::new("output");
        for name in ["", "..", "../x", "a/b", "a\\b", "."] {
            let err = writer.path_for(OutputKind::Code, name).unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput, "name {:?}", name);
        }
    }
}
