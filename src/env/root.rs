use std::fmt;
use std::path::{Path, PathBuf};

/// What a root contributes to the compilation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootKind {
    /// First-party sources being compiled
    Source,
    /// Pre-built library code
    Library,
}

impl fmt::Display for RootKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootKind::Source => f.write_str("source"),
            RootKind::Library => f.write_str("library"),
        }
    }
}

/// A directory registered with the environment
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Root {
    path: PathBuf,
    kind: RootKind,
}

impl Root {
    pub fn new(path: impl Into<PathBuf>, kind: RootKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn source(path: impl Into<PathBuf>) -> Self {
        Self::new(path, RootKind::Source)
    }

    pub fn library(path: impl Into<PathBuf>) -> Self {
        Self::new(path, RootKind::Library)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> RootKind {
        self.kind
    }

    /// Lexical containment, the root itself included
    pub fn contains(&self, file: &Path) -> bool {
        file.starts_with(&self.path)
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path.display(), self.kind)
    }
}
