//! Compilation environment
//!
//! - **root**: source and library roots
//! - **registry**: capability registry
//! - **package_index**: package name → contributing roots
//! - **classification**: file → source / library / unknown
//! - **services**: default capability implementations
//! - **scope**: host-owned disposal scope
//! - **environment**: composition root and lifecycle

pub mod classification;
pub mod environment;
pub mod package_index;
pub mod registry;
pub mod root;
pub mod scope;
pub mod services;

pub use classification::{FileOrigin, RootClassifier};
pub use environment::{AddRootOutcome, EnvState, Environment};
pub use package_index::{PackageIndex, PackageScan};
pub use registry::{Capability, CapabilityId, CapabilityRegistry};
pub use root::{Root, RootKind};
pub use scope::{ParentScope, ScopeToken};
pub use services::{AccessPolicy, ClassFinder, ClassLocation, FileManager, LanguageLevel, ModuleSettings};
