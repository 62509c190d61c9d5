//! Collaborator traits
//!
//! The round-trip coordinator talks to the outside world through these two
//! seams: an [`Exporter`] producing temporary files and a [`Collection`]
//! persisting managed items.

use crate::domain::ids::{ItemId, Tag};
use crate::domain::item::{ExportFormat, ExportedFile, Item};
use crate::domain::Result;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::path::Path;

/// Produces temporary files for items
#[async_trait]
pub trait Exporter: Send + Sync {
    /// Export one item
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::RetouchError::ExportFailure`]; the failure
    /// only affects this item.
    async fn export(&self, item: &Item, format: ExportFormat, bit_depth: u8)
        -> Result<ExportedFile>;

    /// Throw away an exported file that will not be reconciled
    async fn discard(&self, file: &ExportedFile) -> Result<()> {
        match tokio::fs::remove_file(&file.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Release per-run resources once the batch is finished
    async fn finish(&self) -> Result<()> {
        Ok(())
    }
}

/// Collection manager holding managed items
#[async_trait]
pub trait Collection: Send + Sync {
    /// Register a file as a managed item; importing a known origin returns the existing item
    async fn import_file(&self, path: &Path) -> Result<Item>;

    /// Put `member` into the group led by `leader`; no-op if already a member
    async fn group_with(&self, leader: &ItemId, member: &ItemId) -> Result<()>;

    /// Tags attached to an item
    async fn get_tags(&self, item: &ItemId) -> Result<BTreeSet<Tag>>;

    /// Attach a tag to an item; no-op if already attached
    async fn attach_tag(&self, tag: &Tag, item: &ItemId) -> Result<()>;

    /// Look up an item by id
    async fn get(&self, item: &ItemId) -> Result<Option<Item>>;

    /// Look up an item by origin path
    async fn find_by_origin(&self, path: &Path) -> Result<Option<Item>>;

    /// All items in import order
    async fn list(&self) -> Result<Vec<Item>>;
}
