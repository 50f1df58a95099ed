//! Common utilities and definitions shared across modules
//!
//! Compiler arguments, classpath resolution, error definitions and constants
//! used by the environment and the command-line front end.

pub mod classpath;
pub mod config;
pub mod consts;
pub mod error;

// Re-export commonly used items for convenience
pub use classpath::ClasspathResolver;
pub use config::{CompilerArguments, JvmTarget, FLAGS};
pub use error::{Error, ErrorClass, Result};
