//! classenv - compilation environment for JVM compilers
//!
//! Assembles everything later compiler phases need to resolve names against
//! first-party sources and pre-built libraries, for a single compilation run.
//!
//! ## Architecture
//!
//! - **common**: compiler arguments, classpath resolution, errors, constants
//! - **env**: capability registry, package index, root classification and the
//!   `Environment` that owns them
//! - **vfs**: file system capability (local disk or in-memory)
//! - **logging**: subscriber setup for binaries and tests
//! - **bin**: command-line front end
//!
//! ## Lifecycle
//!
//! ```text
//! CompilerArguments → Environment::create → add_root* → get / lookup_package / classify → dispose
//! ```
//!
//! ```no_run
//! use classenv::{CompilerArguments, Environment, ParentScope};
//!
//! let scope = ParentScope::new("build");
//! let mut env = Environment::create(&scope, CompilerArguments::default())?;
//! env.add_source_root("src/main/kotlin")?;
//! let roots = env.lookup_package("com.example")?;
//! # Ok::<(), classenv::Error>(())
//! ```

pub mod common;
pub mod env;
pub mod logging;
pub mod vfs;

pub use common::{CompilerArguments, Error, ErrorClass, JvmTarget, Result};
pub use env::{
    AddRootOutcome, Capability, CapabilityId, EnvState, Environment, FileOrigin, PackageIndex,
    ParentScope, Root, RootKind,
};
pub use vfs::{FileSystem, LocalFileSystem, MemoryFileSystem};
