//! exup - example repository dependency updater
//!
//! Updates the version of the pinned library used within a configured set
//! of example repositories. There are two modes:
//! 1) Fork: update a user fork of each example and raise a pull request
//!    against the canonical repository.
//! 2) Branch: update a destination branch of each example directly,
//!    creating it from a source branch when it does not exist yet.
//!
//! The modes are controlled via the `update-config` section of the JSON
//! config file and selected with `-f` / `-b`.

use clap::Parser;
use exup::batch::BatchDriver;
use exup::cli::CliArgs;
use exup::config;
use exup::error::FatalError;
use exup::gitcmd::GitCli;
use exup::hosting::GitHubClient;
use exup::output;
use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(&args);

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sets the default log level, overridable through RUST_LOG
fn init_logging(args: &CliArgs) {
    let default = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let file = config::load(&args.config_file)?;

    let token = args.github_token.clone().unwrap_or_default();
    if args.fork && token.is_empty() {
        return Err(FatalError::TokenMissing.into());
    }

    let runner = GitCli::new();
    let hosting = GitHubClient::new(token)?;
    let driver = BatchDriver::new(&runner, &hosting, args.work_dir.clone())
        .with_progress(!args.quiet);

    let summary = driver
        .run(&file.examples, &file.update_config, args.fork)
        .await?;

    let mut stdout = io::stdout().lock();
    output::write_summary(&summary, &mut stdout)?;
    stdout.flush()?;

    // Per-target failures are reported in the summary; only a fatal
    // error makes the process itself fail.
    Ok(ExitCode::SUCCESS)
}
