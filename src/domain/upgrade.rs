//! Resolved upgrade configuration

/// How the updated descriptor reaches the canonical repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishMode {
    /// Update a personal fork and raise a pull request against upstream
    Fork { user: String },
    /// Push directly to a destination branch, created from a source branch
    Branch { src: String, dst: String },
}

/// Configuration resolved once per batch run
///
/// `revision` is the immutable commit identifier the tag resolved to; it is
/// looked up before any repository is processed and reused for every target,
/// so a tag moved mid-run cannot split the batch across revisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeConfig {
    /// Human-readable release label
    pub tag: String,
    /// Commit identifier the tag resolved to at batch start
    pub revision: String,
    /// Name of the pinned library, e.g. `mbed-os`
    pub lib_name: String,
    /// Canonical URL of the pinned library repository
    pub lib_repo: String,
    /// Publication mode for the whole batch
    pub mode: PublishMode,
}

impl UpgradeConfig {
    /// Filename of the dependency descriptor, e.g. `mbed-os.lib`
    pub fn descriptor_filename(&self) -> String {
        format!("{}.lib", self.lib_name)
    }

    /// Commit (and pull request) title for this upgrade
    pub fn commit_message(&self) -> String {
        format!("Updating {} to {}", self.lib_name, self.tag)
    }

    /// Returns true when publishing via a fork
    pub fn is_fork(&self) -> bool {
        matches!(self.mode, PublishMode::Fork { .. })
    }
}
