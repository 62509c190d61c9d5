//! Progress reporting
//!
//! One event is emitted per item per phase, in batch order.

use std::fmt;

/// Round-trip phase an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Writing temporary files
    Export,
    /// Moving results back and registering them
    Reconcile,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Export => f.write_str("Exporting"),
            Phase::Reconcile => f.write_str("Reconciling"),
        }
    }
}

/// A single progress step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Phase
    pub phase: Phase,
    /// 1-based index of the item
    pub current: usize,
    /// Number of items in the phase
    pub total: usize,
    /// Item label
    pub label: String,
}

impl ProgressEvent {
    /// Create a new progress event
    pub fn new(phase: Phase, current: usize, total: usize, label: impl Into<String>) -> Self {
        Self {
            phase,
            current,
            total,
            label: label.into(),
        }
    }
}

/// Receives progress events
pub trait ProgressSink: Send + Sync {
    /// Handle one event
    fn report(&self, event: &ProgressEvent);
}

/// Prints `[i/n] Phase label` lines to stdout
#[derive(Debug, Default)]
pub struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn report(&self, event: &ProgressEvent) {
        println!(
            "  [{}/{}] {} {}",
            event.current, event.total, event.phase, event.label
        );
    }
}

/// Emits progress as debug-level tracing events
#[derive(Debug, Default)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn report(&self, event: &ProgressEvent) {
        crate::log_progress!(event.phase, event.current, event.total, &event.label);
    }
}
