//! Round-trip orchestration
//!
//! This module provides:
//! - The batch and its lifecycle states
//! - The coordinator driving export, launch and reconciliation
//! - Progress reporting and the round-trip summary

pub mod batch;
pub mod coordinator;
pub mod progress;
pub mod summary;

pub use batch::{Batch, BatchEntry, BatchState};
pub use coordinator::{propagated_tags, RoundTripCoordinator, RoundTripOptions, Storage};
pub use progress::{ConsoleProgress, Phase, ProgressEvent, ProgressSink, TracingProgress};
pub use summary::{FailureKind, ItemFailure, RoundTripSummary};
