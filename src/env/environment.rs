//! Compilation environment
//!
//! Composition root for one compilation run. Owns the capability registry, the
//! package index and the root classifier, and guards them with an explicit
//! lifecycle:
//!
//! ```text
//! Uninitialized → Bootstrapping → Ready → Disposed
//! ```
//!
//! Mutation needs `&mut Environment` and queries need `&Environment`, so roots
//! must all be registered before the environment is shared for resolution.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::common::config::CompilerArguments;
use crate::common::error::{Error, Result};
use crate::env::classification::{FileOrigin, RootClassifier};
use crate::env::package_index::PackageIndex;
use crate::env::registry::{Capability, CapabilityRegistry};
use crate::env::root::{Root, RootKind};
use crate::env::scope::{ParentScope, ScopeToken};
use crate::env::services::{self, ClassFinder, ClassLocation};
use crate::vfs::{FileSystem, LocalFileSystem};

/// Lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvState {
    Uninitialized,
    Bootstrapping,
    Ready,
    Disposed,
}

impl fmt::Display for EnvState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvState::Uninitialized => f.write_str("uninitialized"),
            EnvState::Bootstrapping => f.write_str("bootstrapping"),
            EnvState::Ready => f.write_str("ready"),
            EnvState::Disposed => f.write_str("disposed"),
        }
    }
}

/// Result of registering a root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddRootOutcome {
    Added { packages: usize },
    /// Same path and kind were registered before; nothing changed
    AlreadyRegistered,
}

pub struct Environment {
    state: EnvState,
    scope: ScopeToken,
    config: CompilerArguments,
    fs: Arc<dyn FileSystem>,
    registry: CapabilityRegistry,
    package_index: PackageIndex,
    classifier: RootClassifier,
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("state", &self.state())
            .field("registry", &self.registry)
            .field("roots", &self.package_index.roots())
            .finish()
    }
}

impl Environment {
    /// Uninitialized environment; call [`Environment::bootstrap`] next
    pub fn new(scope: &ParentScope, config: CompilerArguments, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            state: EnvState::Uninitialized,
            scope: scope.token(),
            config,
            fs,
            registry: CapabilityRegistry::new(),
            package_index: PackageIndex::new(),
            classifier: RootClassifier::new(),
        }
    }

    /// Ready environment backed by the local disk
    pub fn create(scope: &ParentScope, config: CompilerArguments) -> Result<Self> {
        Self::create_with_fs(scope, config, Arc::new(LocalFileSystem))
    }

    /// Ready environment backed by `fs`. On failure nothing is returned.
    pub fn create_with_fs(
        scope: &ParentScope,
        config: CompilerArguments,
        fs: Arc<dyn FileSystem>,
    ) -> Result<Self> {
        let mut env = Self::new(scope, config, fs);
        env.bootstrap()?;
        Ok(env)
    }

    /// Wire the default services. A failed bootstrap disposes the environment.
    pub fn bootstrap(&mut self) -> Result<()> {
        match self.state() {
            EnvState::Uninitialized => {}
            EnvState::Disposed => return Err(Error::EnvironmentDisposed),
            state => {
                return Err(Error::IllegalEnvironmentState {
                    operation: "bootstrap",
                    state,
                })
            }
        }

        self.transition(EnvState::Bootstrapping);
        if let Err(err) = services::register_defaults(&mut self.registry, &self.config, self.fs.clone()) {
            tracing::error!(error = %err, "bootstrap failed");
            self.dispose();
            return Err(err);
        }
        self.transition(EnvState::Ready);
        Ok(())
    }

    /// Current state, parent scope teardown included
    pub fn state(&self) -> EnvState {
        if self.scope.is_disposed() {
            EnvState::Disposed
        } else {
            self.state
        }
    }

    fn transition(&mut self, next: EnvState) {
        tracing::info!(from = %self.state, to = %next, "environment state change");
        self.state = next;
    }

    fn ensure_ready(&self, operation: &'static str) -> Result<()> {
        match self.state() {
            EnvState::Ready => Ok(()),
            EnvState::Disposed => Err(Error::EnvironmentDisposed),
            state => Err(Error::IllegalEnvironmentState { operation, state }),
        }
    }

    /// Release resources if the parent scope went away since the last call
    fn sync_with_scope(&mut self) {
        if self.scope.is_disposed() && self.state != EnvState::Disposed {
            self.dispose();
        }
    }

    /// Register a root in both the package index and the classifier.
    ///
    /// Nothing is changed unless every check and the directory scan succeed.
    #[tracing::instrument(level = "debug", skip(self, root), fields(root = %root))]
    pub fn add_sources_to_classpath(&mut self, root: Root) -> Result<AddRootOutcome> {
        self.sync_with_scope();
        self.ensure_ready("add_sources_to_classpath")?;

        if !self.fs.is_dir(root.path()) {
            return Err(Error::InvalidRootKind {
                path: root.path().to_path_buf(),
            });
        }

        if let Some(registered) = self.classifier.kind_of(root.path()) {
            if registered == root.kind() {
                tracing::debug!("root already registered");
                return Ok(AddRootOutcome::AlreadyRegistered);
            }
            return Err(Error::RootKindConflict {
                path: root.path().to_path_buf(),
                registered,
                requested: root.kind(),
            });
        }

        // Nested roots would index the same member under two packages
        if let Some(registered) = self.classifier.overlapping(root.path()) {
            return Err(Error::OverlappingRoot {
                path: root.path().to_path_buf(),
                registered: registered.path().to_path_buf(),
            });
        }

        let scan = PackageIndex::scan(self.fs.as_ref(), &root)?;
        let packages = scan.package_count();

        self.package_index.commit(scan);
        self.classifier.insert(root);
        debug_assert_eq!(self.package_index.root_count(), self.classifier.len());

        tracing::info!(packages, roots = self.package_index.root_count(), "root added");
        Ok(AddRootOutcome::Added { packages })
    }

    /// Alias of [`Environment::add_sources_to_classpath`]
    pub fn add_root(&mut self, root: Root) -> Result<AddRootOutcome> {
        self.add_sources_to_classpath(root)
    }

    pub fn add_source_root(&mut self, path: impl Into<PathBuf>) -> Result<AddRootOutcome> {
        self.add_sources_to_classpath(Root::source(path))
    }

    pub fn add_library_root(&mut self, path: impl Into<PathBuf>) -> Result<AddRootOutcome> {
        self.add_sources_to_classpath(Root::library(path))
    }

    /// Register the roots named by the compiler arguments: classpath
    /// directories and friend paths as libraries, free arguments as sources.
    /// Entries that are not directories, or that clash with an already
    /// registered root by kind or nesting, are skipped with a warning. Returns
    /// how many roots were newly added.
    pub fn add_configured_roots(&mut self) -> Result<usize> {
        self.sync_with_scope();
        self.ensure_ready("add_configured_roots")?;

        let mut planned: Vec<Root> = Vec::new();
        planned.extend(self.config.classpath_entries().into_iter().map(Root::library));
        planned.extend(self.config.friend_path_entries().into_iter().map(Root::library));
        planned.extend(self.config.source_entries().into_iter().map(Root::source));

        let mut added = 0;
        for root in planned {
            if !self.fs.is_dir(root.path()) {
                tracing::warn!(root = %root, "skipping entry that is not a directory");
                continue;
            }
            match self.add_sources_to_classpath(root) {
                Ok(AddRootOutcome::Added { .. }) => added += 1,
                Ok(AddRootOutcome::AlreadyRegistered) => {}
                Err(err @ (Error::RootKindConflict { .. } | Error::OverlappingRoot { .. })) => {
                    tracing::warn!(error = %err, "skipping conflicting entry");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(added)
    }

    pub fn get<C: Capability>(&self) -> Result<Arc<C>> {
        self.ensure_ready("get")?;
        self.registry.get::<C>()
    }

    /// Roots contributing to `name`, in registration order
    pub fn lookup_package(&self, name: &str) -> Result<&[Root]> {
        self.ensure_ready("lookup_package")?;
        Ok(self.package_index.lookup_package(name))
    }

    pub fn classify(&self, file: &Path) -> Result<FileOrigin> {
        self.ensure_ready("classify")?;
        Ok(self.classifier.classify(file))
    }

    pub fn package_index(&self) -> Result<&PackageIndex> {
        self.ensure_ready("package_index")?;
        Ok(&self.package_index)
    }

    pub fn classifier(&self) -> Result<&RootClassifier> {
        self.ensure_ready("classifier")?;
        Ok(&self.classifier)
    }

    pub fn config(&self) -> &CompilerArguments {
        &self.config
    }

    pub fn find_class(&self, fqn: &str) -> Result<Option<ClassLocation>> {
        let finder = self.get::<ClassFinder>()?;
        Ok(finder.find_class(&self.package_index, &self.classifier, fqn))
    }

    pub fn can_access_internal(&self, from: &Path, target: &Path) -> Result<bool> {
        let finder = self.get::<ClassFinder>()?;
        Ok(finder.can_access_internal(&self.classifier, from, target))
    }

    /// Root kind registered at exactly `path`
    pub fn root_kind(&self, path: &Path) -> Result<Option<RootKind>> {
        self.ensure_ready("root_kind")?;
        Ok(self.classifier.kind_of(path))
    }

    /// Release every binding and index. Further calls are no-ops.
    pub fn dispose(&mut self) {
        if self.state == EnvState::Disposed {
            return;
        }
        self.transition(EnvState::Disposed);
        self.registry.clear();
        self.package_index.clear();
        self.classifier.clear();
    }
}

impl Drop for Environment {
    fn drop(&mut self) {
        self.dispose();
    }
}
