//! Per-target upgrade orchestration
//!
//! This module drives the whole sequence for one target repository:
//! clone, discover, synchronize, rewrite every descriptor, commit, push
//! and (fork mode) open a pull request. Every stage exits early on
//! failure; completed remote actions are never compensated, so a push
//! that succeeded before a later failure stays pushed and is reported
//! through the target's Failure detail.

use crate::descriptor::{DescriptorRewriter, RewriteOutcome};
use crate::discover;
use crate::domain::{PublishMode, TargetSpec, UpgradeConfig};
use crate::error::{HostingError, RecoverableError, UpgradeError};
use crate::gitcmd::CommandRunner;
use crate::hosting::{HostingClient, PullRequestSpec};
use crate::sync::{Synchronizer, DEFAULT_BRANCH};
use crate::workdir::DirGuard;
use log::{debug, error, info};
use std::path::Path;

/// Pull request description, parameterized by library and tag
const PR_BODY_TEMPLATE: &str = "\
This automated pull request updates the version of {lib} used by this \
example to the {tag} release.

The pinned revision in each {lib}.lib descriptor now corresponds to the \
{tag} tag. Please do not merge until the release has been announced.";

/// Runs the upgrade sequence for single targets
pub struct UpgradeOrchestrator<'a> {
    runner: &'a dyn CommandRunner,
    hosting: &'a dyn HostingClient,
    config: &'a UpgradeConfig,
}

impl<'a> UpgradeOrchestrator<'a> {
    /// Creates an orchestrator for one batch configuration
    pub fn new(
        runner: &'a dyn CommandRunner,
        hosting: &'a dyn HostingClient,
        config: &'a UpgradeConfig,
    ) -> Self {
        Self {
            runner,
            hosting,
            config,
        }
    }

    /// Upgrades one target repository
    ///
    /// Must be called from the batch working directory; the clone is
    /// created under the target's name. The working directory is
    /// restored before returning on every path.
    pub async fn upgrade(&self, target: &TargetSpec) -> Result<(), UpgradeError> {
        info!("Updating example '{}'", target.name);

        let clone_url = self.clone_url(target);
        debug!("update repository: {}", clone_url);
        if !self.runner.run(&["git", "clone", &clone_url]).success {
            return Err(RecoverableError::clone_failed(clone_url).into());
        }

        let clone_root = Path::new(&target.name);
        let descriptor_name = self.config.descriptor_filename();
        let locations = discover::find_descriptor_dirs(clone_root, &descriptor_name);
        debug!(
            "found {} example location(s) in '{}'",
            locations.len(),
            target.name
        );

        let _cwd = DirGuard::enter(clone_root).map_err(|source| {
            RecoverableError::EnterFailed {
                path: clone_root.to_path_buf(),
                source,
            }
        })?;

        let sync = Synchronizer::new(self.runner);
        match &self.config.mode {
            PublishMode::Fork { .. } => sync.prepare_fork(&target.remote_url)?,
            PublishMode::Branch { src, dst } => sync.prepare_branch(src, dst)?,
        }

        let rewriter = DescriptorRewriter::new(&self.config.lib_repo);
        for location in &locations {
            let descriptor_path = location.join(&descriptor_name);
            if let RewriteOutcome::Rewritten =
                rewriter.rewrite(&descriptor_path, &self.config.revision)?
            {
                let path_arg = descriptor_path.to_string_lossy();
                if !self.runner.run(&["git", "add", path_arg.as_ref()]).success {
                    return Err(RecoverableError::StageFailed {
                        path: descriptor_path,
                    }
                    .into());
                }
            }
        }

        let message = self.config.commit_message();
        if !self.runner.run(&["git", "commit", "-m", &message]).success {
            return Err(RecoverableError::CommitFailed.into());
        }

        if !self.runner.run(&["git", "push", "origin"]).success {
            return Err(RecoverableError::PushFailed.into());
        }

        if let PublishMode::Fork { user } = &self.config.mode {
            self.raise_pull_request(target, user).await?;
        }

        Ok(())
    }

    /// URL the working copy is cloned from
    ///
    /// Fork mode clones the user's fork; branch mode clones the
    /// canonical repository itself.
    fn clone_url(&self, target: &TargetSpec) -> String {
        match &self.config.mode {
            PublishMode::Fork { user } => {
                format!("https://github.com/{}/{}", user, target.name)
            }
            PublishMode::Branch { .. } => target.remote_url.clone(),
        }
    }

    /// Opens the pull request from the fork against upstream
    ///
    /// The push to the fork has already succeeded at this point; a
    /// failure here leaves the fork updated with no open request, which
    /// is reported but not rolled back.
    async fn raise_pull_request(
        &self,
        target: &TargetSpec,
        user: &str,
    ) -> Result<(), RecoverableError> {
        let upstream = target
            .full_name()
            .ok_or_else(|| RecoverableError::BadRemoteUrl {
                url: target.remote_url.clone(),
            })?;
        debug!("upstream repository: {}", upstream);

        let repo = match self.hosting.get_repo(&upstream).await {
            Ok(repo) => repo,
            Err(HostingError::RepoNotFound { .. }) => {
                error!("upstream repo: {}, does not exist - skipping", upstream);
                return Err(RecoverableError::UpstreamNotFound { repo: upstream });
            }
            Err(e) => return Err(e.into()),
        };

        let spec = PullRequestSpec {
            title: self.config.commit_message(),
            head: format!("{}:{}", user, DEFAULT_BRANCH),
            base: DEFAULT_BRANCH.to_string(),
            body: render_pr_body(&self.config.lib_name, &self.config.tag),
        };

        match self.hosting.create_pull(&repo.full_name, &spec).await {
            Ok(pr) => {
                info!("opened pull request #{}: {}", pr.number, pr.html_url);
                Ok(())
            }
            Err(e) => {
                error!("pull request creation failed with error: {}", e);
                Err(RecoverableError::PullRequestFailed {
                    repo: upstream,
                    message: e.to_string(),
                })
            }
        }
    }
}

/// Renders the pull request description
fn render_pr_body(lib_name: &str, tag: &str) -> String {
    PR_BODY_TEMPLATE
        .replace("{lib}", lib_name)
        .replace("{tag}", tag)
}
