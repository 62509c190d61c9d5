//! Domain models and types for Retouch.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`ItemId`], [`Tag`])
//! - **Domain models** ([`Item`], [`ExportedFile`], [`RunMode`])
//! - **Error types** ([`RetouchError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, RetouchError>`]:
//!
//! ```rust
//! use retouch::domain::{RetouchError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = retouch::config::load_config("retouch.toml")?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod item;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::RetouchError;
pub use ids::{ItemId, Tag, RESERVED_TAG_PREFIX};
pub use item::{ExportFormat, ExportedFile, Item, ItemBuilder, RunMode};
pub use result::Result;
