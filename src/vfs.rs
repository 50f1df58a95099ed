//! File system capability
//!
//! The environment never touches the disk directly. It asks a [`FileSystem`]
//! whether a path is a directory and which files live below a root.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::common::error::Result;

/// Directory abstraction consumed by the environment
pub trait FileSystem: fmt::Debug + Send + Sync {
    fn is_dir(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    /// Every regular file below `root`, in a deterministic order. Only an
    /// unreadable `root` is an error; unreadable entries below it are skipped.
    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

/// Real disk, traversed with walkdir
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => return Err(err.into()),
                Err(err) => {
                    // Dangling links and link cycles
                    tracing::warn!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}

/// In-memory file tree. Directories exist implicitly above every file and can
/// also be added empty.
#[derive(Debug, Default, Clone)]
pub struct MemoryFileSystem {
    files: BTreeSet<PathBuf>,
    dirs: BTreeSet<PathBuf>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        let path = path.into();
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
        self.files.insert(path);
        self
    }

    pub fn add_dir(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.dirs.insert(path.into());
        self
    }
}

impl FileSystem for MemoryFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        Ok(self
            .files
            .iter()
            .filter(|file| file.starts_with(root) && file.as_path() != root)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_memory_fs_implicit_dirs() {
        let mut fs = MemoryFileSystem::new();
        fs.add_file("/src/com/foo/A.kt");

        assert!(fs.is_dir(Path::new("/src")));
        assert!(fs.is_dir(Path::new("/src/com/foo")));
        assert!(fs.is_file(Path::new("/src/com/foo/A.kt")));
        assert!(!fs.is_dir(Path::new("/src/com/foo/A.kt")));
        assert!(!fs.is_dir(Path::new("/lib")));
    }

    #[test]
    fn test_memory_fs_walk_is_scoped_to_root() {
        let mut fs = MemoryFileSystem::new();
        fs.add_file("/a/x/A.kt").add_file("/ab/B.kt");

        let files = fs.walk_files(Path::new("/a")).unwrap();
        assert_eq!(files, vec![PathBuf::from("/a/x/A.kt")]);
    }

    #[test]
    fn test_local_fs_walk() {
        let temp_dir = TempDir::new().unwrap();
        let pkg = temp_dir.path().join("com").join("foo");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("B.java"), "class B {}").unwrap();
        fs::write(pkg.join("A.kt"), "class A").unwrap();

        let local = LocalFileSystem;
        assert!(local.is_dir(temp_dir.path()));
        assert!(local.is_file(&pkg.join("A.kt")));

        let files = local.walk_files(temp_dir.path()).unwrap();
        assert_eq!(files, vec![pkg.join("A.kt"), pkg.join("B.java")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_local_fs_skips_dangling_links_and_cycles() {
        use std::os::unix::fs::symlink;

        let temp_dir = TempDir::new().unwrap();
        let pkg = temp_dir.path().join("com").join("foo");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("A.kt"), "class A").unwrap();
        symlink(pkg.join("gone.kt"), pkg.join(".#A.kt")).unwrap();
        symlink(temp_dir.path(), temp_dir.path().join("com").join("up")).unwrap();

        let files = LocalFileSystem.walk_files(temp_dir.path()).unwrap();
        assert_eq!(files, vec![pkg.join("A.kt")]);
    }

    #[test]
    fn test_local_fs_missing_root_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");
        assert!(LocalFileSystem.walk_files(&missing).is_err());
    }
}
