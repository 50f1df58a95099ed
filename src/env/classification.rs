//! Root classification
//!
//! Answers which registered root a file belongs to. Source roots are tested
//! before library roots.

use std::fmt;
use std::path::Path;

use crate::env::root::{Root, RootKind};

/// Where a file comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOrigin {
    Source,
    Library,
    Unknown,
}

impl From<RootKind> for FileOrigin {
    fn from(kind: RootKind) -> Self {
        match kind {
            RootKind::Source => FileOrigin::Source,
            RootKind::Library => FileOrigin::Library,
        }
    }
}

impl fmt::Display for FileOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOrigin::Source => f.write_str("source"),
            FileOrigin::Library => f.write_str("library"),
            FileOrigin::Unknown => f.write_str("unknown"),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct RootClassifier {
    source_roots: Vec<Root>,
    library_roots: Vec<Root>,
}

impl RootClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, root: Root) {
        match root.kind() {
            RootKind::Source => self.source_roots.push(root),
            RootKind::Library => self.library_roots.push(root),
        }
    }

    pub fn classify(&self, file: &Path) -> FileOrigin {
        self.root_for(file)
            .map(|root| root.kind().into())
            .unwrap_or(FileOrigin::Unknown)
    }

    /// Registered root containing `file`
    pub fn root_for(&self, file: &Path) -> Option<&Root> {
        self.source_roots
            .iter()
            .chain(&self.library_roots)
            .find(|root| root.contains(file))
    }

    /// Kind of the root registered at exactly `path`
    pub fn kind_of(&self, path: &Path) -> Option<RootKind> {
        self.source_roots
            .iter()
            .chain(&self.library_roots)
            .find(|root| root.path() == path)
            .map(Root::kind)
    }

    /// Registered root nested inside `path` or containing it, exact matches excluded
    pub fn overlapping(&self, path: &Path) -> Option<&Root> {
        self.source_roots
            .iter()
            .chain(&self.library_roots)
            .find(|root| {
                root.path() != path && (root.path().starts_with(path) || path.starts_with(root.path()))
            })
    }

    pub fn source_roots(&self) -> &[Root] {
        &self.source_roots
    }

    pub fn library_roots(&self) -> &[Root] {
        &self.library_roots
    }

    pub fn len(&self) -> usize {
        self.source_roots.len() + self.library_roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.source_roots.clear();
        self.library_roots.clear();
    }
}
