//! Default service set
//!
//! Each service fills exactly one capability and is built once per
//! environment by [`register_defaults`]. Services that need the package index
//! or the classifier take them as arguments: the environment owns both.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::common::config::{CompilerArguments, JvmTarget};
use crate::common::consts::{BINARY_EXTENSIONS, DEFAULT_MODULE_NAME, SOURCE_EXTENSIONS};
use crate::common::error::{Error, Result};
use crate::env::classification::{FileOrigin, RootClassifier};
use crate::env::package_index::{package_dir, PackageIndex};
use crate::env::registry::{Capability, CapabilityId, CapabilityRegistry};
use crate::env::root::{Root, RootKind};
use crate::vfs::FileSystem;

/// Bytecode level the compilation targets
#[derive(Debug, Clone)]
pub struct LanguageLevel {
    target: JvmTarget,
    java_parameters: bool,
}

impl Capability for LanguageLevel {
    const ID: CapabilityId = CapabilityId::LanguageLevel;
}

impl LanguageLevel {
    pub fn from_arguments(args: &CompilerArguments) -> Result<Self> {
        Ok(Self {
            target: args.jvm_target()?,
            java_parameters: args.java_parameters,
        })
    }

    pub fn target(&self) -> JvmTarget {
        self.target
    }

    pub fn class_file_major_version(&self) -> u16 {
        self.target.major_version()
    }

    /// Parameter metadata needs 1.8 class files
    pub fn emits_parameter_metadata(&self) -> bool {
        self.java_parameters && self.target == JvmTarget::Jvm1_8
    }
}

/// Identity of the module being compiled
#[derive(Debug, Clone)]
pub struct ModuleSettings {
    module_name: String,
    destination: Option<PathBuf>,
    friend_paths: Vec<PathBuf>,
}

impl Capability for ModuleSettings {
    const ID: CapabilityId = CapabilityId::ModuleSettings;
}

impl ModuleSettings {
    pub fn from_arguments(args: &CompilerArguments) -> Result<Self> {
        let module_name = match args.module_name.as_deref().map(str::trim) {
            Some("") => return Err(Error::config_error("module name must not be empty")),
            Some(name) => name.to_string(),
            None => DEFAULT_MODULE_NAME.to_string(),
        };

        Ok(Self {
            module_name,
            destination: args.destination.as_ref().map(PathBuf::from),
            friend_paths: args.friend_path_entries(),
        })
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    pub fn friend_paths(&self) -> &[PathBuf] {
        &self.friend_paths
    }

    pub fn is_friend(&self, file: &Path) -> bool {
        self.friend_paths.iter().any(|friend| file.starts_with(friend))
    }
}

/// Where a class was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassLocation {
    pub fqn: String,
    pub path: PathBuf,
    pub root: Root,
    pub origin: FileOrigin,
}

/// Finds member files through the package index
#[derive(Debug)]
pub struct FileManager {
    fs: Arc<dyn FileSystem>,
}

impl Capability for FileManager {
    const ID: CapabilityId = CapabilityId::FileManager;
}

impl FileManager {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// First member file for `fqn`, roots tried in index order.
    /// Source roots hold sources, library roots hold class files.
    pub fn find_member(&self, index: &PackageIndex, fqn: &str) -> Option<(PathBuf, Root)> {
        let (package, simple_name) = split_fqn(fqn);
        if simple_name.is_empty() {
            return None;
        }

        for root in index.lookup_package(package) {
            let dir = package_dir(root.path(), package);
            let extensions = match root.kind() {
                RootKind::Source => SOURCE_EXTENSIONS,
                RootKind::Library => BINARY_EXTENSIONS,
            };
            for extension in extensions {
                let candidate = dir.join(format!("{}.{}", simple_name, extension));
                if self.fs.is_file(&candidate) {
                    return Some((candidate, root.clone()));
                }
            }
        }
        None
    }
}

/// Visibility of `internal` declarations across roots
#[derive(Debug)]
pub struct AccessPolicy {
    module: Arc<ModuleSettings>,
}

impl Capability for AccessPolicy {
    const ID: CapabilityId = CapabilityId::AccessPolicy;
}

impl AccessPolicy {
    pub fn new(module: Arc<ModuleSettings>) -> Self {
        Self { module }
    }

    pub fn can_access_internal(&self, classifier: &RootClassifier, from: &Path, target: &Path) -> bool {
        if classifier.classify(from) != FileOrigin::Source {
            return false;
        }
        match classifier.classify(target) {
            FileOrigin::Source => true,
            FileOrigin::Library => self.module.is_friend(target),
            FileOrigin::Unknown => false,
        }
    }
}

/// Resolution facade used by later phases
#[derive(Debug)]
pub struct ClassFinder {
    files: Arc<FileManager>,
    access: Arc<AccessPolicy>,
    level: Arc<LanguageLevel>,
}

impl Capability for ClassFinder {
    const ID: CapabilityId = CapabilityId::ClassFinder;
}

impl ClassFinder {
    pub fn new(files: Arc<FileManager>, access: Arc<AccessPolicy>, level: Arc<LanguageLevel>) -> Self {
        Self { files, access, level }
    }

    pub fn find_class(
        &self,
        index: &PackageIndex,
        classifier: &RootClassifier,
        fqn: &str,
    ) -> Option<ClassLocation> {
        let (path, root) = self.files.find_member(index, fqn)?;
        let origin = classifier.classify(&path);
        Some(ClassLocation {
            fqn: fqn.to_string(),
            path,
            root,
            origin,
        })
    }

    pub fn can_access_internal(&self, classifier: &RootClassifier, from: &Path, target: &Path) -> bool {
        self.access.can_access_internal(classifier, from, target)
    }

    pub fn language_level(&self) -> &LanguageLevel {
        &self.level
    }
}

fn split_fqn(fqn: &str) -> (&str, &str) {
    match fqn.rsplit_once('.') {
        Some((package, simple_name)) => (package, simple_name),
        None => ("", fqn),
    }
}

/// Register the default services in dependency order
pub fn register_defaults(
    registry: &mut CapabilityRegistry,
    args: &CompilerArguments,
    fs: Arc<dyn FileSystem>,
) -> Result<()> {
    let level = registry.register(build(CapabilityId::LanguageLevel, || {
        LanguageLevel::from_arguments(args)
    })?)?;

    let module = registry.register(build(CapabilityId::ModuleSettings, || {
        ModuleSettings::from_arguments(args)
    })?)?;

    let files = registry.register(FileManager::new(fs))?;

    let access = registry.register(AccessPolicy::new(module.clone()))?;

    registry.register(ClassFinder::new(files, access, level.clone()))?;

    tracing::debug!(
        module = module.module_name(),
        jvm_target = %level.target(),
        services = registry.len(),
        "registered default services"
    );
    Ok(())
}

fn build<T>(capability: CapabilityId, construct: impl FnOnce() -> Result<T>) -> Result<T> {
    construct().map_err(|source| {
        tracing::error!(%capability, error = %source, "service construction failed");
        Error::bootstrap_failure(capability, source)
    })
}
