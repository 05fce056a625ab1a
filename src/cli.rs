//! CLI argument parsing module for exup

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// Updates the pinned library revision across example repositories
///
/// The examples to process and the update settings live in a JSON config
/// file shared with sibling tooling. Exactly one publication mode must be
/// selected: `--fork` updates a personal fork of each example and raises
/// a pull request, `--branch` pushes a destination branch directly.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "exup",
    version,
    about = "Updates the pinned library revision across example repositories",
    group(ArgGroup::new("mode").required(true))
)]
pub struct CliArgs {
    /// Path to the configuration file
    #[arg(short = 'c', long, default_value = "examples.json")]
    pub config_file: PathBuf,

    /// GitHub token for secure access
    #[arg(short = 'T', long)]
    pub github_token: Option<String>,

    /// Update forked repos, using the 'github-user' config parameter
    #[arg(short = 'f', long, group = "mode")]
    pub fork: bool,

    /// Update the destination branch, created from the source branch
    #[arg(short = 'b', long, group = "mode")]
    pub branch: bool,

    /// Directory the example repositories are cloned into
    #[arg(long, default_value = "examples")]
    pub work_dir: PathBuf,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Minimal output, no progress display
    #[arg(short, long)]
    pub quiet: bool,
}
