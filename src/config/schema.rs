//! Configuration schema types
//!
//! Every section has defaults, so an empty file is a valid configuration.

use crate::core::filter::{ImportFilter, PatternSyntax};
use crate::domain::item::{ExportFormat, RunMode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Main Retouch configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetouchConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// External editing tool
    #[serde(default)]
    pub tool: ToolConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Catalog storage
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Import filtering
    #[serde(default)]
    pub import: ImportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RetouchConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.tool.validate()?;
        self.export.validate()?;
        self.catalog.validate()?;
        self.import.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// External editing tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Tool binary: an absolute/relative path, or a bare name searched in PATH
    #[serde(default = "default_tool_path")]
    pub path: String,

    /// Fixed arguments placed before the file list
    #[serde(default)]
    pub args: Vec<String>,

    /// Start the tool without waiting for it (no reconciliation)
    #[serde(default)]
    pub run_detached: bool,
}

impl ToolConfig {
    /// Run mode derived from `run_detached`
    pub fn run_mode(&self) -> RunMode {
        RunMode::from_detached(self.run_detached)
    }

    fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("tool.path cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            path: default_tool_path(),
            args: Vec::new(),
            run_detached: false,
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Export format (original, tiff, jpeg, png)
    #[serde(default = "default_export_format")]
    pub format: String,

    /// Bits per channel (8, 16 or 32)
    #[serde(default = "default_bit_depth")]
    pub bit_depth: u8,

    /// Directory for temporary exports; empty means the system temp dir
    #[serde(default)]
    pub scratch_dir: String,
}

impl ExportConfig {
    /// Parsed export format
    pub fn export_format(&self) -> crate::domain::Result<ExportFormat> {
        ExportFormat::from_str(&self.format)
    }

    /// Base directory for per-run scratch directories
    pub fn scratch_base(&self) -> PathBuf {
        if self.scratch_dir.trim().is_empty() {
            std::env::temp_dir()
        } else {
            PathBuf::from(&self.scratch_dir)
        }
    }

    fn validate(&self) -> Result<(), String> {
        self.export_format().map_err(|e| e.to_string())?;

        let valid_depths = [8u8, 16, 32];
        if !valid_depths.contains(&self.bit_depth) {
            return Err(format!(
                "export.bit_depth must be one of 8, 16, 32, got {}",
                self.bit_depth
            ));
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: default_export_format(),
            bit_depth: default_bit_depth(),
            scratch_dir: String::new(),
        }
    }
}

/// Catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path of the JSON catalog file
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl CatalogConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("catalog.path cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

/// Import filter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Pipe-delimited ignore patterns, evaluated left to right
    #[serde(default)]
    pub ignore_patterns: String,

    /// Pattern dialect (glob or regex)
    #[serde(default = "default_pattern_syntax")]
    pub pattern_syntax: String,
}

impl ImportConfig {
    /// Individual patterns in configured order
    pub fn patterns(&self) -> Vec<String> {
        self.ignore_patterns
            .split('|')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Parsed pattern syntax
    pub fn syntax(&self) -> crate::domain::Result<PatternSyntax> {
        PatternSyntax::from_str(&self.pattern_syntax)
    }

    fn validate(&self) -> Result<(), String> {
        ImportFilter::from_config(self).map_err(|e| e.to_string())?;
        Ok(())
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            ignore_patterns: String::new(),
            pattern_syntax: default_pattern_syntax(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_tool_path() -> String {
    "gimp".to_string()
}

fn default_export_format() -> String {
    "original".to_string()
}

fn default_bit_depth() -> u8 {
    8
}

fn default_catalog_path() -> String {
    "retouch-catalog.json".to_string()
}

fn default_pattern_syntax() -> String {
    "glob".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RetouchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tool.path, "gimp");
        assert_eq!(config.tool.run_mode(), RunMode::Attached);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: RetouchConfig = toml::from_str("").unwrap();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.export.bit_depth, 8);
        assert_eq!(config.catalog.path, "retouch-catalog.json");
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = RetouchConfig::default();
        config.application.log_level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_bit_depth() {
        let mut config = RetouchConfig::default();
        config.export.bit_depth = 12;
        let err = config.validate().unwrap_err();
        assert!(err.contains("bit_depth"));
    }

    #[test]
    fn test_invalid_format() {
        let mut config = RetouchConfig::default();
        config.export.format = "webp".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_tool_path_rejected() {
        let mut config = RetouchConfig::default();
        config.tool.path = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_import_patterns_split() {
        let import = ImportConfig {
            ignore_patterns: " *.tmp | bad_* ||".to_string(),
            pattern_syntax: "glob".to_string(),
        };
        assert_eq!(import.patterns(), vec!["*.tmp", "bad_*"]);
    }

    #[test]
    fn test_invalid_regex_pattern_rejected() {
        let mut config = RetouchConfig::default();
        config.import.pattern_syntax = "regex".to_string();
        config.import.ignore_patterns = "(unclosed".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_run_detached_maps_to_mode() {
        let mut tool = ToolConfig::default();
        tool.run_detached = true;
        assert_eq!(tool.run_mode(), RunMode::Detached);
    }

    #[test]
    fn test_scratch_base_defaults_to_temp() {
        let export = ExportConfig::default();
        assert_eq!(export.scratch_base(), std::env::temp_dir());
    }
}
