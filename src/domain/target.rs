//! Target repository identification

use serde::{Deserialize, Serialize};

/// One downstream repository to update
///
/// Deserialized from an entry of the config file's `examples` array. The
/// `github` key carries the canonical repository URL; entries may carry
/// additional keys used by sibling tooling, which are ignored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSpec {
    /// Repository name, also used as the clone directory name
    pub name: String,
    /// Canonical repository URL
    #[serde(rename = "github")]
    pub remote_url: String,
}

impl TargetSpec {
    /// Creates a new TargetSpec
    pub fn new(name: impl Into<String>, remote_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            remote_url: remote_url.into(),
        }
    }

    /// Returns the `<org>/<repo>` tail of the canonical URL, if it has one
    pub fn full_name(&self) -> Option<String> {
        let trimmed = self
            .remote_url
            .trim_end_matches('/')
            .trim_end_matches(".git");
        let mut segments = trimmed.rsplit('/');
        let repo = segments.next().filter(|s| !s.is_empty())?;
        let org = segments
            .next()
            .filter(|s| !s.is_empty() && !s.contains(':') && !s.contains('.'))?;
        Some(format!("{}/{}", org, repo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_plain_url() {
        let target = TargetSpec::new(
            "mbed-os-example-blinky",
            "https://github.com/ARMmbed/mbed-os-example-blinky",
        );
        assert_eq!(
            target.full_name(),
            Some("ARMmbed/mbed-os-example-blinky".to_string())
        );
    }

    #[test]
    fn test_full_name_trailing_slash_and_git_suffix() {
        let target = TargetSpec::new("repo", "https://github.com/org/repo.git/");
        assert_eq!(target.full_name(), Some("org/repo".to_string()));

        let target = TargetSpec::new("repo", "https://github.com/org/repo.git");
        assert_eq!(target.full_name(), Some("org/repo".to_string()));
    }

    #[test]
    fn test_full_name_rejects_host_only_url() {
        let target = TargetSpec::new("repo", "https://github.com/repo");
        assert_eq!(target.full_name(), None);
    }

    #[test]
    fn test_deserialize_github_key() {
        let json = r#"{"name": "blinky", "github": "https://github.com/ARMmbed/blinky"}"#;
        let target: TargetSpec = serde_json::from_str(json).unwrap();
        assert_eq!(target.name, "blinky");
        assert_eq!(target.remote_url, "https://github.com/ARMmbed/blinky");
    }

    #[test]
    fn test_deserialize_ignores_extra_keys() {
        let json = r#"{
            "name": "blinky",
            "github": "https://github.com/ARMmbed/blinky",
            "features": [],
            "auto-update": true
        }"#;
        let target: TargetSpec = serde_json::from_str(json).unwrap();
        assert_eq!(target.name, "blinky");
    }
}
