//! Package index properties over in-memory trees
//!
//! Every combination of a small package/member layout is registered and the
//! index is compared against what the tree actually contains.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use classenv::env::package_index::package_of;
use classenv::{
    CompilerArguments, Environment, FileOrigin, MemoryFileSystem, ParentScope, Root, RootKind,
};

const PACKAGES: &[&str] = &["", "com", "com.foo", "com.foo.bar", "org.x"];
const FILES: &[&str] = &["A.kt", "B.java", "C.class", "notes.txt"];

fn package_path(root: &Path, package: &str) -> PathBuf {
    package
        .split('.')
        .filter(|segment| !segment.is_empty())
        .fold(root.to_path_buf(), |dir, segment| dir.join(segment))
}

/// Layout for one root, selected by the bits of `mask`
fn layout(root: &Path, mask: usize) -> Vec<(String, PathBuf)> {
    let mut files = Vec::new();
    for (i, package) in PACKAGES.iter().enumerate() {
        let file = FILES[(mask >> i) % FILES.len()];
        if mask & (1 << i) != 0 {
            files.push((package.to_string(), package_path(root, package).join(file)));
        }
    }
    files
}

fn is_member(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("kt" | "java" | "class")
    )
}

#[test]
fn test_lookup_matches_tree_contents() {
    for mask_a in 0..(1 << PACKAGES.len()) {
        let mask_b = (mask_a * 7 + 3) % (1 << PACKAGES.len());
        let root_a = Path::new("/a");
        let root_b = Path::new("/b");

        let mut fs = MemoryFileSystem::new();
        fs.add_dir(root_a).add_dir(root_b);
        let files_a = layout(root_a, mask_a);
        let files_b = layout(root_b, mask_b);
        for (_, path) in files_a.iter().chain(&files_b) {
            fs.add_file(path.clone());
        }

        let scope = ParentScope::new("property");
        let mut env =
            Environment::create_with_fs(&scope, CompilerArguments::default(), Arc::new(fs)).unwrap();
        env.add_source_root(root_a).unwrap();
        env.add_library_root(root_b).unwrap();

        for package in PACKAGES {
            let expected: Vec<&Path> = [(root_a, &files_a), (root_b, &files_b)]
                .iter()
                .filter(|(_, files)| {
                    files.iter().any(|(p, path)| p == package && is_member(path))
                })
                .map(|(root, _)| *root)
                .collect();
            let actual: Vec<&Path> = env
                .lookup_package(package)
                .unwrap()
                .iter()
                .map(Root::path)
                .collect();
            assert_eq!(actual, expected, "package {:?}, masks {} {}", package, mask_a, mask_b);
        }
    }
}

#[test]
fn test_classification_agrees_with_index() {
    let mut fs = MemoryFileSystem::new();
    let files = [
        "/work/src/com/foo/A.kt",
        "/work/src/Main.kt",
        "/deps/lib/com/foo/A.class",
        "/deps/lib/org/x/Y.class",
    ];
    for file in files {
        fs.add_file(file);
    }

    let scope = ParentScope::new("agreement");
    let mut env =
        Environment::create_with_fs(&scope, CompilerArguments::default(), Arc::new(fs)).unwrap();
    env.add_source_root("/work/src").unwrap();
    env.add_library_root("/deps/lib").unwrap();

    for file in files {
        let file = Path::new(file);
        let origin = env.classify(file).unwrap();
        assert_ne!(origin, FileOrigin::Unknown);

        let root = env.classifier().unwrap().root_for(file).unwrap().clone();
        let package = package_of(root.path(), file).unwrap();
        assert!(env.lookup_package(&package).unwrap().contains(&root));

        match root.kind() {
            RootKind::Source => assert_eq!(origin, FileOrigin::Source),
            RootKind::Library => assert_eq!(origin, FileOrigin::Library),
        }
    }
}
