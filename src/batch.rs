//! Batch driver for the configured target list
//!
//! Resolves the tag once, prepares the batch working directory and runs
//! the orchestrator for every target in configured order. An individual
//! target's failure is recorded and the batch continues; only a fatal
//! error aborts the run.

use crate::config::UpdateConfigSection;
use crate::domain::{BatchSummary, TargetSpec, UpgradeConfig, UpgradeResult};
use crate::error::{FatalError, UpgradeError};
use crate::gitcmd::CommandRunner;
use crate::hosting::HostingClient;
use crate::orchestrator::UpgradeOrchestrator;
use crate::progress::Progress;
use crate::workdir::{create_work_directory, DirGuard};
use log::{debug, info, warn};
use std::path::PathBuf;

/// Drives the whole batch run
pub struct BatchDriver<'a> {
    runner: &'a dyn CommandRunner,
    hosting: &'a dyn HostingClient,
    work_dir: PathBuf,
    show_progress: bool,
}

impl<'a> BatchDriver<'a> {
    /// Creates a driver cloning into `work_dir`
    pub fn new(
        runner: &'a dyn CommandRunner,
        hosting: &'a dyn HostingClient,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            hosting,
            work_dir: work_dir.into(),
            show_progress: false,
        }
    }

    /// Enables or disables the progress display
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Resolves the configured tag to a commit identifier
    ///
    /// Runs against the repository the process was started in, which is
    /// expected to be a checkout of the pinned library. Resolution
    /// happens exactly once per batch so a tag moved mid-run cannot
    /// split the batch across revisions.
    pub fn resolve_tag(&self, tag: &str) -> Result<String, FatalError> {
        let (status, output) = self.runner.run_capturing(&["git", "rev-list", "-1", tag]);
        if !status.success {
            return Err(FatalError::unresolved_tag(tag));
        }

        let revision = output.trim().to_string();
        if revision.is_empty() {
            return Err(FatalError::unresolved_tag(tag));
        }
        debug!("tag {} resolved to {}", tag, revision);
        Ok(revision)
    }

    /// Processes every target, attempting all and reporting all
    pub async fn run(
        &self,
        targets: &[TargetSpec],
        section: &UpdateConfigSection,
        use_fork: bool,
    ) -> Result<BatchSummary, FatalError> {
        let mode = section.publish_mode(use_fork)?;
        let revision = self.resolve_tag(&section.tag)?;
        let config = UpgradeConfig {
            tag: section.tag.clone(),
            revision,
            lib_name: section.lib_name.clone(),
            lib_repo: section.lib_repo.clone(),
            mode,
        };

        create_work_directory(&self.work_dir)?;
        let _cwd = DirGuard::enter(&self.work_dir)
            .map_err(|source| FatalError::workspace(&self.work_dir, source))?;

        let orchestrator = UpgradeOrchestrator::new(self.runner, self.hosting, &config);
        let mut summary = BatchSummary::new();
        let mut progress = Progress::new(self.show_progress);
        progress.start(targets.len() as u64, "Updating examples");

        for target in targets {
            progress.set_message(&target.name);
            match orchestrator.upgrade(target).await {
                Ok(()) => summary.add(UpgradeResult::success(target.clone())),
                Err(UpgradeError::Recoverable(e)) => {
                    warn!("update of '{}' failed: {}", target.name, e);
                    summary.add(UpgradeResult::failure(target.clone(), e.to_string()));
                }
                Err(UpgradeError::Fatal(e)) => {
                    progress.finish_and_clear();
                    return Err(e);
                }
            }
            progress.inc();
        }

        progress.finish_and_clear();
        info!("Finished updating examples");
        Ok(summary)
    }
}
