use std::path::PathBuf;

use thiserror::Error;

use crate::env::environment::EnvState;
use crate::env::registry::CapabilityId;
use crate::env::root::RootKind;

/// Result type for classenv operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for environment construction and classpath indexing
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory traversal error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid JVM target: {version} (expected 1.6 or 1.8)")]
    InvalidJvmTarget { version: String },

    #[error("Not a directory: {}", path.display())]
    InvalidRootKind { path: PathBuf },

    #[error("Root {} is already registered as {registered}, cannot add it as {requested}", path.display())]
    RootKindConflict {
        path: PathBuf,
        registered: RootKind,
        requested: RootKind,
    },

    #[error("Root {} overlaps registered root {}", path.display(), registered.display())]
    OverlappingRoot { path: PathBuf, registered: PathBuf },

    #[error("Capability {capability} is already registered")]
    DuplicateRegistration { capability: CapabilityId },

    #[error("Capability {capability} is not bound")]
    UnboundCapability { capability: CapabilityId },

    #[error("Bootstrap failed while constructing {capability}: {source}")]
    BootstrapFailure {
        capability: CapabilityId,
        #[source]
        source: Box<Error>,
    },

    #[error("`{operation}` is not allowed while the environment is {state}")]
    IllegalEnvironmentState {
        operation: &'static str,
        state: EnvState,
    },

    #[error("Environment has been disposed")]
    EnvironmentDisposed,
}

/// Coarse classification of errors.
///
/// None of these are retried. Configuration errors are user facing, wiring
/// errors mean the default service graph is broken, lifecycle errors mean the
/// caller used the environment out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Configuration,
    Wiring,
    Lifecycle,
}

impl Error {
    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    /// Wrap a service construction failure
    pub fn bootstrap_failure(capability: CapabilityId, source: Error) -> Self {
        Self::BootstrapFailure {
            capability,
            source: Box::new(source),
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Io(_)
            | Self::Walk(_)
            | Self::Config { .. }
            | Self::InvalidJvmTarget { .. }
            | Self::InvalidRootKind { .. }
            | Self::RootKindConflict { .. }
            | Self::OverlappingRoot { .. } => ErrorClass::Configuration,
            Self::DuplicateRegistration { .. }
            | Self::UnboundCapability { .. }
            | Self::BootstrapFailure { .. } => ErrorClass::Wiring,
            Self::IllegalEnvironmentState { .. } | Self::EnvironmentDisposed => {
                ErrorClass::Lifecycle
            }
        }
    }
}
