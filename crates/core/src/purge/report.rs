//! Step-by-step record of what a purge removed.

use serde::{Deserialize, Serialize};

/// One executed purge step and how many rows it removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeStep {
    /// Report label, e.g. `checkouts` or `staff addresses`.
    pub label: String,
    /// Rows removed by this step.
    pub removed: u64,
}

/// The outcome of a completed purge run, step by step in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeReport {
    /// Executed steps, oldest first.
    pub steps: Vec<PurgeStep>,
}

impl PurgeReport {
    /// Sum of rows removed across all steps.
    #[must_use]
    pub fn total_removed(&self) -> u64 {
        self.steps.iter().map(|step| step.removed).sum()
    }

    pub(crate) fn record(&mut self, label: &str, removed: u64) {
        self.steps.push(PurgeStep {
            label: label.to_owned(),
            removed,
        });
    }
}

// =============================================================================
// Tests
// =============================================================================
