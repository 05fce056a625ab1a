//! Batch summary structures

use super::UpgradeResult;
use serde::{Deserialize, Serialize};

/// Accumulated results of a whole batch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// One result per configured target, in processing order
    pub results: Vec<UpgradeResult>,
}

impl BatchSummary {
    /// Creates an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a target's result
    pub fn add(&mut self, result: UpgradeResult) {
        self.results.push(result);
    }

    /// Returns all successful results
    pub fn successes(&self) -> impl Iterator<Item = &UpgradeResult> {
        self.results.iter().filter(|r| r.is_success())
    }

    /// Returns all failed results
    pub fn failures(&self) -> impl Iterator<Item = &UpgradeResult> {
        self.results.iter().filter(|r| !r.is_success())
    }

    /// Number of successful targets
    pub fn success_count(&self) -> usize {
        self.successes().count()
    }

    /// Number of failed targets
    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// Returns true if at least one target failed
    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }
}
