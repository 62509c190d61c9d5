//! Collaborator implementations for Retouch.
//!
//! - [`traits`] - the [`Exporter`] and [`Collection`] seams used by the coordinator
//! - [`catalog`] - JSON-file collection manager
//! - [`exporter`] - pass-through exporter writing into a scratch directory
//!
//! # Example
//!
//! ```rust,no_run
//! use retouch::adapters::{Collection, JsonCatalog};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = JsonCatalog::open("retouch-catalog.json").await?;
//! let item = catalog.import_file(Path::new("/photos/IMG_0001.jpg")).await?;
//! println!("Imported {}", item.id);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod exporter;
pub mod traits;

pub use catalog::JsonCatalog;
pub use exporter::LocalExporter;
pub use traits::{Collection, Exporter};
