//! Round-trip coordinator - main orchestrator for an external edit
//!
//! Exports the requested items, hands the files to the external tool and,
//! for attached runs, moves the edited files back beside their originals and
//! registers them as new catalog items grouped with the originals.

use super::batch::{Batch, BatchEntry, BatchState};
use super::progress::{Phase, ProgressEvent, ProgressSink, TracingProgress};
use super::summary::{FailureKind, ItemFailure, RoundTripSummary};
use crate::adapters::traits::{Collection, Exporter};
use crate::config::RetouchConfig;
use crate::core::fs::{FileRelocator, PathResolver};
use crate::core::launcher::{locate_tool, ProcessLauncher};
use crate::domain::ids::Tag;
use crate::domain::item::{ExportFormat, Item, RunMode};
use crate::domain::{Result, RetouchError};
use crate::{log_item_failure, log_roundtrip_complete, log_roundtrip_start};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

/// A target that accepts a list of items and reports what happened to them
#[async_trait]
pub trait Storage: Send + Sync {
    /// Process `items`
    async fn store(&self, items: Vec<Item>) -> Result<RoundTripSummary>;
}

/// Settings for one round-trip
#[derive(Debug, Clone)]
pub struct RoundTripOptions {
    /// Tool path or bare name searched in PATH
    pub tool: String,
    /// Fixed arguments placed before the file list
    pub args: Vec<String>,
    /// Attached or detached
    pub mode: RunMode,
    /// Requested export format
    pub format: ExportFormat,
    /// Bits per channel
    pub bit_depth: u8,
}

impl RoundTripOptions {
    /// Build options from the loaded configuration
    pub fn from_config(config: &RetouchConfig) -> Result<Self> {
        Ok(Self {
            tool: config.tool.path.clone(),
            args: config.tool.args.clone(),
            mode: config.tool.run_mode(),
            format: config.export.export_format()?,
            bit_depth: config.export.bit_depth,
        })
    }
}

impl Default for RoundTripOptions {
    fn default() -> Self {
        Self {
            tool: "gimp".to_string(),
            args: Vec::new(),
            mode: RunMode::Attached,
            format: ExportFormat::Original,
            bit_depth: 8,
        }
    }
}

/// Tags copied from an original item to its edited version
pub fn propagated_tags(tags: &BTreeSet<Tag>) -> Vec<Tag> {
    tags.iter().filter(|tag| !tag.is_reserved()).cloned().collect()
}

/// Round-trip coordinator
pub struct RoundTripCoordinator {
    options: RoundTripOptions,
    exporter: Arc<dyn Exporter>,
    collection: Arc<dyn Collection>,
    progress: Arc<dyn ProgressSink>,
    launcher: ProcessLauncher,
    resolver: PathResolver,
    relocator: FileRelocator,
}

impl RoundTripCoordinator {
    /// Create a new coordinator reporting progress through tracing
    pub fn new(
        options: RoundTripOptions,
        exporter: Arc<dyn Exporter>,
        collection: Arc<dyn Collection>,
    ) -> Self {
        let launcher = ProcessLauncher::with_args(options.args.clone());
        Self {
            options,
            exporter,
            collection,
            progress: Arc::new(TracingProgress),
            launcher,
            resolver: PathResolver::new(),
            relocator: FileRelocator::new(),
        }
    }

    /// Replace the progress sink
    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Options this coordinator runs with
    pub fn options(&self) -> &RoundTripOptions {
        &self.options
    }

    /// Execute the round-trip
    ///
    /// 1. Locates the tool
    /// 2. Exports every item, skipping the ones that fail
    /// 3. Launches the tool on all exported files
    /// 4. Attached only: relocates, imports, groups and tags each result
    ///
    /// # Errors
    ///
    /// Returns [`RetouchError::ToolNotFound`] before anything is exported,
    /// and [`RetouchError::Launch`] after discarding the exported files.
    /// Per-item problems are reported in the summary.
    pub async fn execute(&self, items: Vec<Item>) -> Result<RoundTripSummary> {
        let start_time = Instant::now();
        let mode = self.options.mode;
        let mut summary = RoundTripSummary::new(mode, items.len());

        let tool = locate_tool(&self.options.tool)?;
        log_roundtrip_start!(tool.display(), items.len(), mode);

        let mut batch = Batch::new();
        batch.advance(BatchState::Exporting)?;
        self.export_all(items, &mut batch, &mut summary).await?;
        summary.exported = batch.len();

        if batch.is_empty() {
            tracing::warn!("No items were exported, not launching the tool");
            batch.advance(BatchState::Aborted)?;
            return Ok(self.finish(summary, &batch, start_time).await);
        }

        let outcome = match self.launcher.launch(&tool, &batch.paths(), mode).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Launch failed, discarding exported files");
                self.discard_all(&batch).await;
                batch.advance(BatchState::Aborted)?;
                self.release_exporter().await;
                return Err(e);
            }
        };
        batch.advance(BatchState::Launched)?;
        summary.launched = true;
        summary.pid = outcome.pid;
        summary.exit_code = outcome.exit_code;

        match mode {
            RunMode::Detached => {
                batch.advance(BatchState::DetachedDone)?;
            }
            RunMode::Attached => {
                if !outcome.exited_cleanly() {
                    tracing::warn!(
                        exit_code = ?outcome.exit_code,
                        "External tool exited with a failure status, reconciling anyway"
                    );
                }
                batch.advance(BatchState::Reconciling)?;
                self.reconcile_all(&batch, &mut summary).await;
                batch.advance(BatchState::Done)?;
            }
        }

        Ok(self.finish(summary, &batch, start_time).await)
    }

    async fn export_all(
        &self,
        items: Vec<Item>,
        batch: &mut Batch,
        summary: &mut RoundTripSummary,
    ) -> Result<()> {
        let total = items.len();
        for (index, item) in items.into_iter().enumerate() {
            let event = ProgressEvent::new(Phase::Export, index + 1, total, item.label());

            if batch.contains(&item.id) {
                summary.add_warning(ItemFailure::new(
                    FailureKind::Other,
                    item.id.clone(),
                    "listed more than once, exported once",
                ));
            } else {
                match self
                    .exporter
                    .export(&item, self.options.format, self.options.bit_depth)
                    .await
                {
                    Ok(exported) => batch.insert(item, exported)?,
                    Err(e) => {
                        log_item_failure!(item.id, e, "export");
                        summary.add_failure(ItemFailure::from_error(&item.id, &e));
                    }
                }
            }
            self.progress.report(&event);
        }
        Ok(())
    }

    async fn reconcile_all(&self, batch: &Batch, summary: &mut RoundTripSummary) {
        let total = batch.len();
        for (index, entry) in batch.entries().iter().enumerate() {
            match self.reconcile(entry, summary).await {
                Ok(item) => summary.new_items.push(item),
                Err(e) => {
                    log_item_failure!(entry.item.id, e, "reconcile");
                    summary.add_failure(ItemFailure::from_error(&entry.item.id, &e));
                }
            }
            self.progress.report(&ProgressEvent::new(
                Phase::Reconcile,
                index + 1,
                total,
                entry.item.label(),
            ));
        }
    }

    async fn reconcile(&self, entry: &BatchEntry, summary: &mut RoundTripSummary) -> Result<Item> {
        let original = &entry.item;
        let target = self
            .resolver
            .resolve(original.origin_dir(), &entry.exported.file_name());
        let mut occupant = None;
        if !target.resolved {
            let warning = RetouchError::PathResolutionExhausted {
                item: original.id.to_string(),
                path: target.path.display().to_string(),
            };
            tracing::warn!(item_id = %original.id, error = %warning, "Reusing colliding path");
            summary.add_warning(ItemFailure::from_error(&original.id, &warning));
            occupant = self.collection.find_by_origin(&target.path).await?;
        }

        self.relocator
            .relocate(&entry.exported.path, &target.path)
            .await
            .map_err(|e| RetouchError::RelocationFailure {
                item: original.id.to_string(),
                reason: e.to_string(),
            })?;

        // The reused path already belongs to another item; leave its group and tags alone
        if let Some(existing) = occupant {
            return Err(RetouchError::Catalog(format!(
                "{} is already managed as item {}, edited file not registered",
                target.path.display(),
                existing.id
            )));
        }

        let imported = self.collection.import_file(&target.path).await?;
        self.collection
            .group_with(&original.group_id, &imported.id)
            .await?;

        let tags = self.collection.get_tags(&original.id).await?;
        for tag in propagated_tags(&tags) {
            self.collection.attach_tag(&tag, &imported.id).await?;
        }

        tracing::debug!(
            item_id = %original.id,
            new_item_id = %imported.id,
            path = %target.path.display(),
            "Reconciled item"
        );
        Ok(self
            .collection
            .get(&imported.id)
            .await?
            .unwrap_or(imported))
    }

    async fn discard_all(&self, batch: &Batch) {
        for entry in batch.entries() {
            if let Err(e) = self.exporter.discard(&entry.exported).await {
                tracing::warn!(
                    path = %entry.exported.path.display(),
                    error = %e,
                    "Failed to discard exported file"
                );
            }
        }
    }

    async fn release_exporter(&self) {
        if let Err(e) = self.exporter.finish().await {
            tracing::warn!(error = %e, "Failed to release export resources");
        }
    }

    async fn finish(
        &self,
        mut summary: RoundTripSummary,
        batch: &Batch,
        start_time: Instant,
    ) -> RoundTripSummary {
        self.release_exporter().await;
        summary.final_state = batch.state();
        let summary = summary.with_duration(start_time.elapsed());
        log_roundtrip_complete!(summary.new_items.len(), summary.duration);
        summary
    }
}

#[async_trait]
impl Storage for RoundTripCoordinator {
    async fn store(&self, items: Vec<Item>) -> Result<RoundTripSummary> {
        self.execute(items).await
    }
}
