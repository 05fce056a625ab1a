//! Configuration file loading
//!
//! The config is a JSON mapping shared with sibling example tooling:
//!
//! ```json
//! {
//!   "examples": [
//!     { "name": "mbed-os-example-blinky",
//!       "github": "https://github.com/ARMmbed/mbed-os-example-blinky" }
//!   ],
//!   "update-config": {
//!     "tag": "mbed-os-5.5.0-rc2",
//!     "via-fork": { "github-user": "adbridge" },
//!     "via-branch": { "src-branch": "mbed-os-5.5.0-rc1-oob",
//!                     "dst-branch": "mbed-os-5.5.0-rc2-oob" }
//!   }
//! }
//! ```
//!
//! Unknown keys (`help` strings, per-example fields used by other tools)
//! are ignored.

use crate::domain::{PublishMode, TargetSpec};
use crate::error::FatalError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Library name used when the config does not override it
pub const DEFAULT_LIB_NAME: &str = "mbed-os";

/// Library repository used when the config does not override it
pub const DEFAULT_LIB_REPO: &str = "https://github.com/ARMmbed/mbed-os";

/// Parsed configuration file
#[derive(Debug, Clone, Deserialize)]
pub struct ExamplesFile {
    /// Target repositories, in processing order
    pub examples: Vec<TargetSpec>,
    /// Update settings shared by the whole batch
    #[serde(rename = "update-config")]
    pub update_config: UpdateConfigSection,
}

/// The `update-config` section
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UpdateConfigSection {
    /// Release tag to pin the examples to
    pub tag: String,
    /// Name of the pinned library
    #[serde(default = "default_lib_name")]
    pub lib_name: String,
    /// Canonical URL of the pinned library repository
    #[serde(default = "default_lib_repo")]
    pub lib_repo: String,
    /// Fork-mode settings
    pub via_fork: Option<ViaFork>,
    /// Branch-mode settings
    pub via_branch: Option<ViaBranch>,
}

/// Settings for updating through a personal fork
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ViaFork {
    /// Hosting user whose forks are updated
    pub github_user: String,
}

/// Settings for updating a branch directly
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ViaBranch {
    /// Branch the destination branch is created from
    pub src_branch: String,
    /// Branch receiving the update
    pub dst_branch: String,
}

fn default_lib_name() -> String {
    DEFAULT_LIB_NAME.to_string()
}

fn default_lib_repo() -> String {
    DEFAULT_LIB_REPO.to_string()
}

impl UpdateConfigSection {
    /// Resolves the publish mode for the whole batch
    ///
    /// The mode section matching the command-line selection must be
    /// present; its absence is a configuration error.
    pub fn publish_mode(&self, use_fork: bool) -> Result<PublishMode, FatalError> {
        if use_fork {
            let via = self
                .via_fork
                .as_ref()
                .ok_or(FatalError::ModeConfigMissing { section: "via-fork" })?;
            Ok(PublishMode::Fork {
                user: via.github_user.clone(),
            })
        } else {
            let via = self
                .via_branch
                .as_ref()
                .ok_or(FatalError::ModeConfigMissing {
                    section: "via-branch",
                })?;
            Ok(PublishMode::Branch {
                src: via.src_branch.clone(),
                dst: via.dst_branch.clone(),
            })
        }
    }
}

/// Loads and parses the configuration file
pub fn load(path: &Path) -> Result<ExamplesFile, FatalError> {
    let content =
        fs::read_to_string(path).map_err(|e| FatalError::config_load(path, e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| FatalError::config_load(path, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
        "examples": [
            { "name": "mbed-os-example-blinky",
              "github": "https://github.com/ARMmbed/mbed-os-example-blinky" },
            { "name": "mbed-os-example-tls",
              "github": "https://github.com/ARMmbed/mbed-os-example-tls",
              "features": ["TLS"] }
        ],
        "update-config": {
            "help": "Update each example repo with a version identified by the tag",
            "tag": "mbed-os-5.5.0-rc2",
            "via-fork": {
                "help": "-f cmd line option. Update a fork",
                "github-user": "adbridge"
            },
            "via-branch": {
                "src-branch": "mbed-os-5.5.0-rc1-oob",
                "dst-branch": "mbed-os-5.5.0-rc2-oob"
            }
        }
    }"#;

    #[test]
    fn test_load_sample_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("examples.json");
        fs::write(&path, SAMPLE).unwrap();

        let file = load(&path).unwrap();
        assert_eq!(file.examples.len(), 2);
        assert_eq!(file.examples[0].name, "mbed-os-example-blinky");
        assert_eq!(file.update_config.tag, "mbed-os-5.5.0-rc2");
        assert_eq!(file.update_config.lib_name, "mbed-os");
        assert_eq!(
            file.update_config.lib_repo,
            "https://github.com/ARMmbed/mbed-os"
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(Path::new("/nonexistent/examples.json")).unwrap_err();
        assert!(matches!(err, FatalError::ConfigLoad { .. }));
    }

    #[test]
    fn test_load_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("examples.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, FatalError::ConfigLoad { .. }));
    }

    #[test]
    fn test_lib_overrides() {
        let json = r#"{
            "examples": [],
            "update-config": {
                "tag": "v2.0.0",
                "lib-name": "widget-lib",
                "lib-repo": "https://github.com/acme/widget-lib"
            }
        }"#;
        let file: ExamplesFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.update_config.lib_name, "widget-lib");
        assert_eq!(
            file.update_config.lib_repo,
            "https://github.com/acme/widget-lib"
        );
    }

    #[test]
    fn test_publish_mode_fork() {
        let file: ExamplesFile = serde_json::from_str(SAMPLE).unwrap();
        let mode = file.update_config.publish_mode(true).unwrap();
        assert_eq!(
            mode,
            PublishMode::Fork {
                user: "adbridge".to_string()
            }
        );
    }

    #[test]
    fn test_publish_mode_branch() {
        let file: ExamplesFile = serde_json::from_str(SAMPLE).unwrap();
        let mode = file.update_config.publish_mode(false).unwrap();
        assert_eq!(
            mode,
            PublishMode::Branch {
                src: "mbed-os-5.5.0-rc1-oob".to_string(),
                dst: "mbed-os-5.5.0-rc2-oob".to_string()
            }
        );
    }

    #[test]
    fn test_publish_mode_missing_section() {
        let json = r#"{
            "examples": [],
            "update-config": { "tag": "v1" }
        }"#;
        let file: ExamplesFile = serde_json::from_str(json).unwrap();

        let err = file.update_config.publish_mode(true).unwrap_err();
        assert!(format!("{}", err).contains("via-fork"));

        let err = file.update_config.publish_mode(false).unwrap_err();
        assert!(format!("{}", err).contains("via-branch"));
    }
}
