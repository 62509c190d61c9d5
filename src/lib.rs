// Retouch - External editor round-trip tool
// Copyright (c) 2025 Retouch Contributors
// Licensed under the MIT License

//! # Retouch - External editor round-trip
//!
//! Retouch sends photos from a catalog to an external editor such as GIMP or
//! darktable and brings the results back as new catalog items.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Exporting** catalog items to temporary files
//! - **Launching** the editor, attached (wait and re-import) or detached
//! - **Reconciling** edited files beside their originals without overwriting
//! - **Filtering** import candidates with glob or regex patterns
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (round-trip, launcher, file placement, filtering)
//! - [`adapters`] - Exporter and catalog implementations
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use retouch::adapters::{Collection, JsonCatalog, LocalExporter};
//! use retouch::config::load_config;
//! use retouch::core::roundtrip::{RoundTripCoordinator, RoundTripOptions};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("retouch.toml")?;
//!     let catalog = Arc::new(JsonCatalog::open(&config.catalog.path).await?);
//!     let exporter = Arc::new(LocalExporter::in_scratch(&config.export.scratch_base()).await?);
//!
//!     let coordinator = RoundTripCoordinator::new(
//!         RoundTripOptions::from_config(&config)?,
//!         exporter,
//!         catalog.clone(),
//!     );
//!     let summary = coordinator.execute(catalog.list().await?).await?;
//!
//!     println!("Imported {} edited files", summary.new_items.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Collision-free placement
//!
//! Edited files are placed beside their originals. When the name is taken a
//! two-digit suffix is appended (`IMG_0001_01.jpg`, `IMG_0001_02.jpg`, ...)
//! up to `_99`:
//!
//! ```rust,no_run
//! use retouch::core::fs::PathResolver;
//! use std::path::Path;
//!
//! let resolution = PathResolver::new().resolve(Path::new("/photos"), "IMG_0001.jpg");
//! println!("{} (unique: {})", resolution.path.display(), resolution.resolved);
//! ```
//!
//! ## Import filtering
//!
//! ```rust
//! use retouch::core::filter::{ImportFilter, PatternSyntax};
//!
//! let filter = ImportFilter::compile(PatternSyntax::Glob, &["*.tmp", "bad_*"]).unwrap();
//! let outcome = filter.filter(["a.tmp", "bad_1.jpg", "good.jpg"]);
//! assert_eq!(outcome.kept, vec!["good.jpg"]);
//! assert_eq!(outcome.ignored_count(), 2);
//! ```
//!
//! ## Error Handling
//!
//! Library functions return [`domain::Result`], an alias over
//! [`domain::RetouchError`]:
//!
//! ```rust,no_run
//! use retouch::domain::RetouchError;
//!
//! fn example() -> Result<(), RetouchError> {
//!     let config = retouch::config::load_config("retouch.toml")?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
