//! End-to-end tests for the exup CLI
//!
//! These tests verify:
//! - Mode selection is required and mutually exclusive
//! - Configuration failures exit with code 1 before any work starts
//! - Fork mode refuses to run without a token

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn exup() -> Command {
    Command::cargo_bin("exup").expect("binary builds")
}

fn write_config(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("examples.json");
    fs::write(
        &path,
        r#"{
            "examples": [
                { "name": "mbed-os-example-blinky",
                  "github": "https://github.com/ARMmbed/mbed-os-example-blinky" }
            ],
            "update-config": {
                "tag": "mbed-os-5.5.0-rc2",
                "via-fork": { "github-user": "adbridge" },
                "via-branch": { "src-branch": "master", "dst-branch": "oob" }
            }
        }"#,
    )
    .unwrap();
    path
}

#[test]
fn test_help_describes_both_modes() {
    exup()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--fork"))
        .stdout(predicate::str::contains("--branch"));
}

#[test]
fn test_mode_flag_is_required() {
    exup()
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_modes_are_mutually_exclusive() {
    exup()
        .args(["-f", "-b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_missing_config_exits_with_one() {
    exup()
        .args(["-b", "-c", "/nonexistent/examples.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to load config"));
}

#[test]
fn test_malformed_config_exits_with_one() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("examples.json");
    fs::write(&path, "{ not json").unwrap();

    exup()
        .args(["-b", "-c", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to load config"));
}

#[test]
fn test_fork_mode_requires_token() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir);

    exup()
        .args(["-f", "-c", config.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("github token"));
}
