//! Repository hosting API access
//!
//! This module provides:
//! - The `HostingClient` trait consumed by the orchestrator
//! - The GitHub v3 implementation
//!
//! Only two operations are used: fetching repository metadata (with a
//! distinguishable not-found condition) and opening a pull request.

mod github;

pub use github::GitHubClient;

use crate::error::HostingError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Metadata of a hosted repository
#[derive(Debug, Clone, Deserialize)]
pub struct RepoMetadata {
    /// `<org>/<repo>` identifier
    pub full_name: String,
    /// Default branch name
    #[serde(default)]
    pub default_branch: String,
}

/// Request payload for opening a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestSpec {
    /// Pull request title
    pub title: String,
    /// Source reference as `user:branch`
    pub head: String,
    /// Target branch on the upstream repository
    pub base: String,
    /// Rendered description
    pub body: String,
}

/// An opened pull request
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    /// Pull request number on the upstream repository
    pub number: u64,
    /// Browser URL of the pull request
    #[serde(default)]
    pub html_url: String,
}

/// Trait for the hosting operations the upgrade workflow needs
#[async_trait]
pub trait HostingClient: Send + Sync {
    /// Fetches repository metadata by `<org>/<repo>`
    async fn get_repo(&self, full_name: &str) -> Result<RepoMetadata, HostingError>;

    /// Opens a pull request on `<org>/<repo>`
    async fn create_pull(
        &self,
        full_name: &str,
        spec: &PullRequestSpec,
    ) -> Result<PullRequest, HostingError>;
}
