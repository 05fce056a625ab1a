//! Batch workspace and working-directory discipline
//!
//! Every target is cloned into a single batch working directory, and the
//! process working directory moves into each clone while it is updated.
//! `DirGuard` makes that ambient move scoped: the saved directory is
//! restored when the guard drops, on every exit path.

use crate::error::FatalError;
use log::{info, warn};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Creates the batch working directory, replacing any previous one
pub fn create_work_directory(path: &Path) -> Result<(), FatalError> {
    if path.exists() {
        info!("'{}' directory already exists. Deleting...", path.display());
        fs::remove_dir_all(path).map_err(|source| FatalError::workspace(path, source))?;
    }
    fs::create_dir_all(path).map_err(|source| FatalError::workspace(path, source))
}

/// Scoped change of the process working directory
///
/// Holds the directory that was current at construction and restores it
/// on drop. Targets share the ambient working directory, which is why the
/// batch processes them strictly one at a time.
#[derive(Debug)]
pub struct DirGuard {
    original: PathBuf,
}

impl DirGuard {
    /// Changes into `path`, remembering the current directory
    pub fn enter(path: &Path) -> std::io::Result<Self> {
        let original = env::current_dir()?;
        env::set_current_dir(path)?;
        Ok(Self { original })
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.original) {
            warn!(
                "could not restore working directory {}: {}",
                self.original.display(),
                e
            );
        }
    }
}
