//! Package index
//!
//! Maps a package-qualified name to the roots contributing members to it, in
//! registration order. Adding a root is split in two steps: [`PackageIndex::scan`]
//! does all the I/O and can fail, [`PackageIndex::commit`] only appends.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use crate::common::consts::{is_member_extension, is_package_segment, DEFAULT_PACKAGE};
use crate::common::error::Result;
use crate::env::root::Root;
use crate::vfs::FileSystem;

/// Packages found under one root, not yet visible in the index
#[derive(Debug, Clone)]
pub struct PackageScan {
    root: Root,
    packages: BTreeSet<String>,
    members: usize,
}

impl PackageScan {
    pub fn root(&self) -> &Root {
        &self.root
    }

    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.packages.iter().map(String::as_str)
    }

    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    pub fn member_count(&self) -> usize {
        self.members
    }
}

#[derive(Debug, Default, Clone)]
pub struct PackageIndex {
    packages: HashMap<String, Vec<Root>>,
    roots: Vec<Root>,
}

impl PackageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find every package `root` contributes to
    pub fn scan(fs: &dyn FileSystem, root: &Root) -> Result<PackageScan> {
        let mut packages = BTreeSet::new();
        let mut members = 0;

        for file in fs.walk_files(root.path())? {
            let Ok(relative) = file.strip_prefix(root.path()) else {
                continue;
            };
            if let Some(package) = member_package(relative) {
                members += 1;
                packages.insert(package);
            }
        }

        tracing::debug!(
            root = %root.path().display(),
            packages = packages.len(),
            members,
            "scanned root"
        );

        Ok(PackageScan {
            root: root.clone(),
            packages,
            members,
        })
    }

    /// Append the scanned root to each of its packages
    pub fn commit(&mut self, scan: PackageScan) {
        for package in scan.packages {
            let roots = self.packages.entry(package).or_default();
            if !roots.contains(&scan.root) {
                roots.push(scan.root.clone());
            }
        }
        self.roots.push(scan.root);
    }

    /// Roots contributing to `name`, first registered first
    pub fn lookup_package(&self, name: &str) -> &[Root] {
        self.packages.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_package(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    /// Known package names, sorted
    pub fn packages(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.packages.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn roots(&self) -> &[Root] {
        &self.roots
    }

    pub fn root(&self, path: &Path) -> Option<&Root> {
        self.roots.iter().find(|root| root.path() == path)
    }

    pub fn contains_root(&self, path: &Path) -> bool {
        self.root(path).is_some()
    }

    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    pub fn clear(&mut self) {
        self.packages.clear();
        self.roots.clear();
    }
}

/// Package of a member file given its path relative to the root
fn member_package(relative: &Path) -> Option<String> {
    let extension = relative.extension()?.to_str()?;
    if !is_member_extension(extension) {
        return None;
    }

    let mut segments = Vec::new();
    if let Some(parent) = relative.parent() {
        for component in parent.components() {
            let segment = component.as_os_str().to_str()?;
            if !is_package_segment(segment) {
                return None;
            }
            segments.push(segment);
        }
    }

    if segments.is_empty() {
        Some(DEFAULT_PACKAGE.to_string())
    } else {
        Some(segments.join("."))
    }
}

/// Directory of `package` below `root`
pub fn package_dir(root: &Path, package: &str) -> PathBuf {
    if package.is_empty() {
        return root.to_path_buf();
    }
    package.split('.').fold(root.to_path_buf(), |dir, segment| dir.join(segment))
}

/// Package of a file below a root, members or not
pub fn package_of(root: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(root).ok()?;
    let parent = relative.parent()?;
    let mut segments = Vec::new();
    for component in parent.components() {
        let segment = component.as_os_str().to_str()?;
        if !is_package_segment(segment) {
            return None;
        }
        segments.push(segment);
    }
    Some(segments.join("."))
}
