//! Configuration management for Retouch.
//!
//! Retouch reads a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `RETOUCH_<SECTION>_<KEY>` overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use retouch::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("retouch.toml")?;
//! println!("Tool: {}", config.tool.path);
//! println!("Detached: {}", config.tool.run_detached);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [tool]
//! path = "gimp"
//! run_detached = false
//!
//! [export]
//! format = "original"
//! bit_depth = 8
//!
//! [catalog]
//! path = "${HOME}/Pictures/retouch-catalog.json"
//!
//! [import]
//! ignore_patterns = "*.tmp|*.xmp"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_from_str};
pub use schema::{
    ApplicationConfig, CatalogConfig, ExportConfig, ImportConfig, LoggingConfig, RetouchConfig,
    ToolConfig,
};
