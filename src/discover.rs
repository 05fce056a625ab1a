//! Example discovery within a cloned repository
//!
//! A repository may hold several nested example projects, each carrying
//! its own descriptor file. Discovery walks the whole clone and returns
//! every directory that directly contains one.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Returns every directory under `root` that directly contains a file
/// named `descriptor`, as paths relative to `root`
///
/// Order is filesystem-traversal order and is not stable across systems.
/// A repository with no descriptors yields an empty vec, not an error.
pub fn find_descriptor_dirs(root: &Path, descriptor: &str) -> Vec<PathBuf> {
    let mut found = Vec::new();

    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() || entry.file_name().to_str() != Some(descriptor) {
            continue;
        }
        if let Some(parent) = entry.path().parent() {
            let relative = parent.strip_prefix(root).unwrap_or(parent);
            found.push(relative.to_path_buf());
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const DESCRIPTOR: &str = "mbed-os.lib";

    fn touch(dir: &Path, relative: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "https://github.com/ARMmbed/mbed-os/#deadbeef\n").unwrap();
    }

    #[test]
    fn test_finds_descriptor_at_root() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), DESCRIPTOR);

        let found = find_descriptor_dirs(dir.path(), DESCRIPTOR);
        assert_eq!(found, vec![PathBuf::new()]);
    }

    #[test]
    fn test_finds_nested_descriptors() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "app-a/mbed-os.lib");
        touch(dir.path(), "group/app-b/mbed-os.lib");
        touch(dir.path(), "group/app-b/README.md");

        let mut found = find_descriptor_dirs(dir.path(), DESCRIPTOR);
        found.sort();
        assert_eq!(
            found,
            vec![PathBuf::from("app-a"), PathBuf::from("group/app-b")]
        );
    }

    #[test]
    fn test_no_descriptors_yields_empty_vec() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/main.cpp");

        let found = find_descriptor_dirs(dir.path(), DESCRIPTOR);
        assert!(found.is_empty());
    }

    #[test]
    fn test_only_exact_filename_matches() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "app/mbed-os.lib.bak");
        touch(dir.path(), "app/other.lib");

        let found = find_descriptor_dirs(dir.path(), DESCRIPTOR);
        assert!(found.is_empty());
    }
}
