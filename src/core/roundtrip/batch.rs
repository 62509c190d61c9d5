//! Batch of exported items and its lifecycle
//!
//! ```text
//! Building -> Exporting -> Launched -> DetachedDone
//!                                   -> Reconciling -> Done
//! Building | Exporting -> Aborted
//! ```

use crate::domain::ids::ItemId;
use crate::domain::item::{ExportedFile, Item};
use crate::domain::{Result, RetouchError};
use std::fmt;
use std::path::PathBuf;

/// Lifecycle state of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    /// Collecting inputs, nothing exported yet
    Building,
    /// Exports in progress
    Exporting,
    /// External tool started
    Launched,
    /// Tool started detached; terminal
    DetachedDone,
    /// Moving edited files back into the collection
    Reconciling,
    /// Reconciliation finished; terminal
    Done,
    /// Stopped before launch; terminal
    Aborted,
}

impl BatchState {
    /// Whether `next` is a legal successor
    pub fn can_transition_to(self, next: BatchState) -> bool {
        use BatchState::*;
        matches!(
            (self, next),
            (Building, Exporting)
                | (Exporting, Launched)
                | (Launched, DetachedDone)
                | (Launched, Reconciling)
                | (Reconciling, Done)
                | (Building, Aborted)
                | (Exporting, Aborted)
        )
    }

    /// Whether no further transitions are possible
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            BatchState::DetachedDone | BatchState::Done | BatchState::Aborted
        )
    }
}

impl fmt::Display for BatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BatchState::Building => "building",
            BatchState::Exporting => "exporting",
            BatchState::Launched => "launched",
            BatchState::DetachedDone => "detached-done",
            BatchState::Reconciling => "reconciling",
            BatchState::Done => "done",
            BatchState::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// One item and the file exported for it
#[derive(Debug, Clone)]
pub struct BatchEntry {
    /// Original managed item
    pub item: Item,

    /// Temporary file handed to the tool
    pub exported: ExportedFile,
}

/// Ordered item-to-file mapping for one round-trip
#[derive(Debug)]
pub struct Batch {
    entries: Vec<BatchEntry>,
    state: BatchState,
}

impl Batch {
    /// Empty batch in the `Building` state
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            state: BatchState::Building,
        }
    }

    /// Current state
    pub fn state(&self) -> BatchState {
        self.state
    }

    /// Move to `next`
    ///
    /// # Errors
    ///
    /// Returns [`RetouchError::InvalidTransition`] if `next` is not a legal successor.
    pub fn advance(&mut self, next: BatchState) -> Result<()> {
        if !self.state.can_transition_to(next) {
            return Err(RetouchError::InvalidTransition {
                from: self.state.to_string(),
                to: next.to_string(),
            });
        }
        tracing::debug!(from = %self.state, to = %next, "Batch state change");
        self.state = next;
        Ok(())
    }

    /// Whether the batch already holds `item`
    pub fn contains(&self, item: &ItemId) -> bool {
        self.entries.iter().any(|entry| &entry.item.id == item)
    }

    /// Append an exported item
    ///
    /// # Errors
    ///
    /// Fails outside the `Exporting` state or when the item is already present.
    pub fn insert(&mut self, item: Item, exported: ExportedFile) -> Result<()> {
        if self.state != BatchState::Exporting {
            return Err(RetouchError::Validation(format!(
                "Cannot add items to a batch in state {}",
                self.state
            )));
        }
        if self.contains(&item.id) {
            return Err(RetouchError::Validation(format!(
                "Item {} is already in the batch",
                item.id
            )));
        }
        self.entries.push(BatchEntry { item, exported });
        Ok(())
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }

    /// Exported file paths in insertion order
    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries
            .iter()
            .map(|entry| entry.exported.path.clone())
            .collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the batch has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Batch {
    fn default() -> Self {
        Self::new()
    }
}
