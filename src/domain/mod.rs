//! Core domain models for exup
//!
//! This module contains the fundamental types used throughout the
//! application:
//! - Target repository identification
//! - Resolved upgrade configuration and publish modes
//! - Per-target upgrade outcomes
//! - Batch summary structures

mod outcome;
mod summary;
mod target;
mod upgrade;

pub use outcome::{Outcome, UpgradeResult};
pub use summary::BatchSummary;
pub use target::TargetSpec;
pub use upgrade::{PublishMode, UpgradeConfig};
