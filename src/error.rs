//! Application error types using thiserror
//!
//! Error hierarchy:
//! - FatalError: aborts the whole batch run (exit code 1)
//! - RecoverableError: fails a single target, the batch continues
//! - HostingError: issues talking to the repository hosting API
//! - UpgradeError: what the orchestrator returns, the batch driver
//!   decides abort-vs-continue on the variant

use std::path::PathBuf;
use thiserror::Error;

/// Error returned by the per-target orchestrator
#[derive(Error, Debug)]
pub enum UpgradeError {
    /// The whole run must stop
    #[error(transparent)]
    Fatal(#[from] FatalError),

    /// Only the current target is lost
    #[error(transparent)]
    Recoverable(#[from] RecoverableError),
}

/// Errors that abort the entire batch run
///
/// These represent states where continuing would corrupt a target
/// repository's remote state (half-finished remote re-pointing, forced
/// resets, branch creation), or where no target can be processed at all
/// (configuration, tag resolution, workspace setup).
#[derive(Error, Debug)]
pub enum FatalError {
    /// Configuration file could not be read or parsed
    #[error("failed to load config file {path}: {message}")]
    ConfigLoad { path: PathBuf, message: String },

    /// The selected publish mode has no matching config section
    #[error("config has no '{section}' section, required by the selected mode")]
    ModeConfigMissing { section: &'static str },

    /// Fork mode needs a hosting token to raise pull requests
    #[error("a github token is required when updating via a fork")]
    TokenMissing,

    /// The configured tag does not resolve to a revision
    #[error("could not obtain a revision for tag: {tag}")]
    UnresolvedTag { tag: String },

    /// The batch working directory could not be prepared or entered
    #[error("failed to prepare working directory {path}: {source}")]
    Workspace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A command whose partial completion is unrecoverable failed
    #[error("command '{command}' failed")]
    CommandFailed { command: String, code: Option<i32> },
}

/// Errors that fail one target but leave the batch running
#[derive(Error, Debug)]
pub enum RecoverableError {
    /// Cloning the target repository failed
    #[error("git clone of {url} failed")]
    CloneFailed { url: String },

    /// The cloned repository could not be entered
    #[error("failed to enter {path}: {source}")]
    EnterFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A discovered example directory has no descriptor file
    #[error("descriptor file not found: {path}")]
    MissingDescriptor { path: PathBuf },

    /// Rewriting a descriptor file failed mid-flight
    #[error("failed to rewrite {path}: {source}")]
    RewriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Staging a rewritten descriptor failed
    #[error("failed to stage {path}")]
    StageFailed { path: PathBuf },

    /// Committing the staged descriptors failed
    #[error("git commit failed")]
    CommitFailed,

    /// Pushing the commit to origin failed
    #[error("git push failed")]
    PushFailed,

    /// The canonical repository URL has no <org>/<repo> tail
    #[error("could not determine upstream repository from {url}")]
    BadRemoteUrl { url: String },

    /// The canonical upstream repository is missing from the host
    #[error("upstream repository {repo} does not exist")]
    UpstreamNotFound { repo: String },

    /// The pull request could not be opened (the push already succeeded)
    #[error("pull request creation failed for {repo}: {message}")]
    PullRequestFailed { repo: String, message: String },

    /// Transport-level hosting API failure
    #[error(transparent)]
    Hosting(#[from] HostingError),
}

/// Errors from the repository hosting API
#[derive(Error, Debug)]
pub enum HostingError {
    /// Repository lookup returned not-found
    #[error("repository {repo} not found")]
    RepoNotFound { repo: String },

    /// The API answered with a non-success status
    #[error("hosting api error for {repo}: {message}")]
    Api { repo: String, message: String },

    /// The request never produced an answer
    #[error("network error for {url}: {message}")]
    Network { url: String, message: String },
}

impl FatalError {
    /// Creates a new ConfigLoad error
    pub fn config_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        FatalError::ConfigLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new Workspace error
    pub fn workspace(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FatalError::Workspace {
            path: path.into(),
            source,
        }
    }

    /// Creates a new UnresolvedTag error
    pub fn unresolved_tag(tag: impl Into<String>) -> Self {
        FatalError::UnresolvedTag { tag: tag.into() }
    }
}

impl RecoverableError {
    /// Creates a new CloneFailed error
    pub fn clone_failed(url: impl Into<String>) -> Self {
        RecoverableError::CloneFailed { url: url.into() }
    }

    /// Creates a new MissingDescriptor error
    pub fn missing_descriptor(path: impl Into<PathBuf>) -> Self {
        RecoverableError::MissingDescriptor { path: path.into() }
    }

    /// Creates a new RewriteFailed error
    pub fn rewrite_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RecoverableError::RewriteFailed {
            path: path.into(),
            source,
        }
    }
}
