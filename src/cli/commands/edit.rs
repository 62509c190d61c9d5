//! Edit command implementation
//!
//! Runs a round-trip in the external editor for the selected catalog items.

use crate::adapters::{Collection, JsonCatalog, LocalExporter};
use crate::cli::load_settings;
use crate::config::RetouchConfig;
use crate::core::roundtrip::{
    ConsoleProgress, ProgressSink, RoundTripCoordinator, RoundTripOptions, RoundTripSummary,
    TracingProgress,
};
use crate::domain::ids::ItemId;
use crate::domain::item::{Item, RunMode};
use crate::domain::RetouchError;
use clap::Args;
use std::path::Path;
use std::sync::Arc;

/// Arguments for the edit command
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Item ids or origin paths, in the order they are passed to the tool
    #[arg(required = true)]
    pub items: Vec<String>,

    /// Override the external tool
    #[arg(long)]
    pub tool: Option<String>,

    /// Start the tool and return immediately (no re-import)
    #[arg(long, conflicts_with = "attached")]
    pub detached: bool,

    /// Wait for the tool and re-import the edited files
    #[arg(long)]
    pub attached: bool,

    /// Override the export format (original, tiff, jpeg, png)
    #[arg(long)]
    pub format: Option<String>,

    /// Override the bit depth (8, 16, 32)
    #[arg(long)]
    pub bit_depth: Option<u8>,

    /// Do not print per-item progress
    #[arg(short, long)]
    pub quiet: bool,
}

impl EditArgs {
    /// Execute the edit command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting edit command");

        let mut config = match load_settings(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };
        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let catalog = Arc::new(JsonCatalog::open(&config.catalog.path).await?);
        let items = match self.select_items(catalog.as_ref()).await? {
            Ok(items) => items,
            Err(unknown) => {
                eprintln!("Not in the catalog: {}", unknown.join(", "));
                eprintln!("Run 'retouch import' first.");
                return Ok(2);
            }
        };

        let exporter = Arc::new(LocalExporter::in_scratch(&config.export.scratch_base()).await?);
        let progress: Arc<dyn ProgressSink> = if self.quiet {
            Arc::new(TracingProgress)
        } else {
            Arc::new(ConsoleProgress)
        };
        let options = RoundTripOptions::from_config(&config)?;
        let mode = options.mode;
        let coordinator =
            RoundTripCoordinator::new(options, exporter, catalog).with_progress(progress);

        println!("Editing {} item(s) with {}", items.len(), config.tool.path);
        let summary = match coordinator.execute(items).await {
            Ok(s) => s,
            Err(RetouchError::ToolNotFound(e)) => {
                tracing::error!(error = %e, "Tool not found");
                eprintln!("External tool not found: {e}");
                eprintln!("Set tool.path in {config_path} or pass --tool.");
                return Ok(3);
            }
            Err(e) => {
                tracing::error!(error = %e, "Round-trip failed");
                eprintln!("Round-trip failed: {e}");
                return Ok(5);
            }
        };

        summary.log_summary();
        Self::print_summary(&summary);

        let exit_code = if summary.is_successful() {
            match mode {
                RunMode::Detached => println!("Tool started; edited files will not be re-imported."),
                RunMode::Attached => println!("Round-trip completed successfully!"),
            }
            0
        } else if summary.exported == 0 {
            println!("Nothing could be exported, the tool was not started.");
            1
        } else {
            println!("Round-trip completed with failures");
            1
        };

        Ok(exit_code)
    }

    /// Apply command-line overrides on top of the configuration
    pub fn apply_overrides(&self, config: &mut RetouchConfig) {
        if let Some(tool) = &self.tool {
            tracing::info!(tool = %tool, "Overriding tool from CLI");
            config.tool.path = tool.clone();
        }
        if self.detached {
            config.tool.run_detached = true;
        }
        if self.attached {
            config.tool.run_detached = false;
        }
        if let Some(format) = &self.format {
            config.export.format = format.clone();
        }
        if let Some(bit_depth) = self.bit_depth {
            config.export.bit_depth = bit_depth;
        }
    }

    /// Look each argument up by id, then by origin path
    ///
    /// The inner `Err` lists the arguments that matched nothing.
    async fn select_items(
        &self,
        catalog: &dyn Collection,
    ) -> crate::domain::Result<Result<Vec<Item>, Vec<String>>> {
        let mut items = Vec::with_capacity(self.items.len());
        let mut unknown = Vec::new();

        for arg in &self.items {
            let by_id = match ItemId::new(arg.as_str()) {
                Ok(id) => catalog.get(&id).await?,
                Err(_) => None,
            };
            let found = match by_id {
                Some(item) => Some(item),
                None => catalog.find_by_origin(Path::new(arg)).await?,
            };
            match found {
                Some(item) => items.push(item),
                None => unknown.push(arg.clone()),
            }
        }

        if unknown.is_empty() {
            Ok(Ok(items))
        } else {
            Ok(Err(unknown))
        }
    }

    fn print_summary(summary: &RoundTripSummary) {
        println!();
        println!("Round-trip Summary:");
        println!("  Mode: {}", summary.mode);
        println!("  Items: {}", summary.total_items);
        println!("  Exported: {}", summary.exported);
        if let Some(code) = summary.exit_code {
            println!("  Tool exit code: {code}");
        }
        if summary.mode == RunMode::Attached && summary.launched {
            println!("  New items: {}", summary.new_items.len());
            println!("  Success Rate: {:.2}%", summary.success_rate());
        }
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());

        if !summary.new_items.is_empty() {
            println!();
            for item in &summary.new_items {
                println!("  + {} {}", item.id, item.origin.display());
            }
        }

        if !summary.warnings.is_empty() {
            println!();
            println!("Warnings:");
            for warning in &summary.warnings {
                println!("  - {}: {}", warning.item, warning.message);
            }
        }

        if !summary.failures.is_empty() {
            println!();
            println!("Failures:");
            for failure in &summary.failures {
                println!("  - {:?} {}: {}", failure.kind, failure.item, failure.message);
            }
        }
        println!();
    }
}
