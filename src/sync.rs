//! Local working-copy synchronization
//!
//! Prepares a fresh clone for publication in one of two modes. Both run
//! inside the clone and assume the process working directory is the
//! repository root. Every step here re-points remotes, force-resets or
//! creates branches; a failure part-way through leaves state that later
//! steps cannot repair, so each command is batch-aborting.

use crate::error::FatalError;
use crate::gitcmd::{run_capturing_fatal, run_fatal, CommandRunner};
use log::debug;

/// Name given to the canonical repository remote in fork mode
const UPSTREAM_REMOTE: &str = "upstream";

/// Branch the fork is reset to and the pull request targets
pub const DEFAULT_BRANCH: &str = "master";

/// Synchronizes the current clone for either publication mode
pub struct Synchronizer<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> Synchronizer<'a> {
    /// Creates a synchronizer over the given command runner
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Brings a cloned fork up to date with the canonical repository
    ///
    /// Adds the canonical repository as a remote, fetches it, hard-resets
    /// the current branch to its default branch and force-pushes the
    /// result back to the fork's origin.
    pub fn prepare_fork(&self, upstream_url: &str) -> Result<(), FatalError> {
        debug!("synchronizing fork from {}", upstream_url);

        let upstream_ref = format!("{}/{}", UPSTREAM_REMOTE, DEFAULT_BRANCH);
        run_fatal(
            self.runner,
            &["git", "remote", "add", UPSTREAM_REMOTE, upstream_url],
        )?;
        run_fatal(self.runner, &["git", "fetch", UPSTREAM_REMOTE])?;
        run_fatal(self.runner, &["git", "reset", "--hard", &upstream_ref])?;
        run_fatal(self.runner, &["git", "push", "-f", "origin"])
    }

    /// Checks out the destination branch, creating it from the source
    /// branch if it does not exist yet
    ///
    /// An existing destination branch is simply checked out, so a re-run
    /// resumes an in-progress branch instead of recreating it.
    pub fn prepare_branch(&self, src: &str, dst: &str) -> Result<(), FatalError> {
        debug!("preparing branch: {}", dst);

        let branches = run_capturing_fatal(self.runner, &["git", "branch"])?;
        if branches.contains(dst) {
            run_fatal(self.runner, &["git", "checkout", dst])
        } else {
            run_fatal(self.runner, &["git", "checkout", src])?;
            run_fatal(self.runner, &["git", "checkout", "-b", dst])?;
            run_fatal(self.runner, &["git", "push", "-u", "origin", dst])
        }
    }
}
