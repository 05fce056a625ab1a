//! Per-target upgrade outcome types

use super::TargetSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a target's upgrade went through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Failure,
}

/// Result of upgrading a single target repository
///
/// Produced once per target and appended to the batch summary; never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeResult {
    /// The target this result belongs to
    pub target: TargetSpec,
    /// Success or failure
    pub outcome: Outcome,
    /// Failure description, empty on success
    pub detail: String,
}

impl UpgradeResult {
    /// Creates a Success result
    pub fn success(target: TargetSpec) -> Self {
        Self {
            target,
            outcome: Outcome::Success,
            detail: String::new(),
        }
    }

    /// Creates a Failure result with a detail message
    pub fn failure(target: TargetSpec, detail: impl Into<String>) -> Self {
        Self {
            target,
            outcome: Outcome::Failure,
            detail: detail.into(),
        }
    }

    /// Returns true if this target succeeded
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }
}

impl fmt::Display for UpgradeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            Outcome::Success => write!(f, "SUCCEEDED: {}", self.target.name),
            Outcome::Failure => write!(f, "FAILED: {} ({})", self.target.name, self.detail),
        }
    }
}
