//! Round-trip summary and reporting

use super::batch::BatchState;
use crate::domain::ids::ItemId;
use crate::domain::item::{Item, RunMode};
use crate::domain::RetouchError;
use std::time::Duration;

/// Kind of per-item problem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Export of the item failed; it was left out of the batch
    Export,
    /// Edited file could not be moved back
    Relocation,
    /// Collision suffixes ran out; a colliding name was used
    PathResolutionExhausted,
    /// Catalog refused the import, grouping or tagging
    Catalog,
    /// Anything else
    Other,
}

/// Problem affecting a single item
#[derive(Debug, Clone)]
pub struct ItemFailure {
    /// Type of problem
    pub kind: FailureKind,

    /// Item concerned
    pub item: ItemId,

    /// Human-readable message
    pub message: String,
}

impl ItemFailure {
    /// Create a new item failure
    pub fn new(kind: FailureKind, item: ItemId, message: impl Into<String>) -> Self {
        Self {
            kind,
            item,
            message: message.into(),
        }
    }

    /// Classify an error raised while processing `item`
    pub fn from_error(item: &ItemId, error: &RetouchError) -> Self {
        let kind = match error {
            RetouchError::ExportFailure { .. } => FailureKind::Export,
            RetouchError::RelocationFailure { .. } => FailureKind::Relocation,
            RetouchError::PathResolutionExhausted { .. } => FailureKind::PathResolutionExhausted,
            RetouchError::Catalog(_) => FailureKind::Catalog,
            _ => FailureKind::Other,
        };
        Self::new(kind, item.clone(), error.to_string())
    }
}

/// Summary of one round-trip
#[derive(Debug, Clone)]
pub struct RoundTripSummary {
    /// Mode the tool ran in
    pub mode: RunMode,

    /// Items requested
    pub total_items: usize,

    /// Items exported into the batch
    pub exported: usize,

    /// Whether the tool was started
    pub launched: bool,

    /// Tool process id
    pub pid: Option<u32>,

    /// Exit code of an attached run
    pub exit_code: Option<i32>,

    /// Items created by reconciliation, in batch order
    pub new_items: Vec<Item>,

    /// Per-item failures
    pub failures: Vec<ItemFailure>,

    /// Problems that did not fail the item
    pub warnings: Vec<ItemFailure>,

    /// State the batch ended in
    pub final_state: BatchState,

    /// Duration of the round-trip
    pub duration: Duration,
}

impl RoundTripSummary {
    /// Create a new empty summary
    pub fn new(mode: RunMode, total_items: usize) -> Self {
        Self {
            mode,
            total_items,
            exported: 0,
            launched: false,
            pid: None,
            exit_code: None,
            new_items: Vec::new(),
            failures: Vec::new(),
            warnings: Vec::new(),
            final_state: BatchState::Building,
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a failure
    pub fn add_failure(&mut self, failure: ItemFailure) {
        self.failures.push(failure);
    }

    /// Record a warning
    pub fn add_warning(&mut self, warning: ItemFailure) {
        self.warnings.push(warning);
    }

    /// Failures of one kind
    pub fn failures_of(&self, kind: FailureKind) -> usize {
        self.failures.iter().filter(|f| f.kind == kind).count()
    }

    /// True when nothing failed
    pub fn is_successful(&self) -> bool {
        self.failures.is_empty() && self.final_state != BatchState::Aborted
    }

    /// Share of exported items that came back as new items, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.exported == 0 {
            return 100.0;
        }
        (self.new_items.len() as f64 / self.exported as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            mode = %self.mode,
            total_items = self.total_items,
            exported = self.exported,
            new_items = self.new_items.len(),
            failed = self.failures.len(),
            warnings = self.warnings.len(),
            exit_code = ?self.exit_code,
            final_state = %self.final_state,
            duration_ms = self.duration.as_millis() as u64,
            "Round-trip finished"
        );

        for failure in &self.failures {
            tracing::warn!(
                kind = ?failure.kind,
                item_id = %failure.item,
                message = %failure.message,
                "Round-trip item failure"
            );
        }
    }
}
