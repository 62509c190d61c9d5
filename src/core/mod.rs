//! Core business logic for Retouch.
//!
//! # Modules
//!
//! - [`fs`] - Destination naming and cross-filesystem file moves
//! - [`launcher`] - Locating and running the external editing tool
//! - [`filter`] - Pattern-based import filtering
//! - [`roundtrip`] - Batch lifecycle and round-trip coordination
//!
//! # Round-trip Workflow
//!
//! 1. **Locate**: Find the configured tool before touching any file
//! 2. **Export**: Write a temporary file for every selected item
//! 3. **Launch**: Start the tool with all files as arguments
//! 4. **Reconcile** (attached only): Move each edited file beside its
//!    original, import it, group it and copy the user tags
//! 5. **Report**: Produce a round-trip summary
//!
//! # Example
//!
//! ```rust,no_run
//! use retouch::adapters::{Collection, JsonCatalog, LocalExporter};
//! use retouch::config::load_config;
//! use retouch::core::roundtrip::{RoundTripCoordinator, RoundTripOptions};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("retouch.toml")?;
//! let catalog = Arc::new(JsonCatalog::open(&config.catalog.path).await?);
//! let exporter = Arc::new(LocalExporter::in_scratch(&config.export.scratch_base()).await?);
//!
//! let coordinator = RoundTripCoordinator::new(
//!     RoundTripOptions::from_config(&config)?,
//!     exporter,
//!     catalog.clone(),
//! );
//! let summary = coordinator.execute(catalog.list().await?).await?;
//!
//! println!("New items: {}", summary.new_items.len());
//! println!("Failed: {}", summary.failures.len());
//! # Ok(())
//! # }
//! ```

pub mod filter;
pub mod fs;
pub mod launcher;
pub mod roundtrip;
