//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Retouch using clap.

pub mod commands;

use crate::config::{load_config, load_config_from_str, RetouchConfig};
use clap::{Parser, Subcommand};
use std::path::Path;

/// Retouch - External editor round-trip tool
#[derive(Parser, Debug)]
#[command(name = "retouch")]
#[command(version, about, long_about = None)]
#[command(author = "Retouch Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "retouch.toml", env = "RETOUCH_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RETOUCH_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open catalog items in the external editor and import the results
    Edit(commands::edit::EditArgs),

    /// Import files into the catalog
    Import(commands::import::ImportArgs),

    /// Show which candidates the import filter would ignore
    Filter(commands::filter::FilterArgs),

    /// List catalog items
    Status(commands::status::StatusArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

/// Load the configuration, falling back to defaults when the file does not exist
///
/// Environment overrides apply in both cases.
pub fn load_settings(config_path: &str) -> crate::domain::Result<RetouchConfig> {
    if Path::new(config_path).exists() {
        load_config(config_path)
    } else {
        tracing::debug!(config_path = %config_path, "No configuration file, using defaults");
        load_config_from_str("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_edit() {
        let cli = Cli::parse_from(["retouch", "edit", "/photos/a.jpg"]);
        assert_eq!(cli.config, "retouch.toml");
        assert!(matches!(cli.command, Commands::Edit(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["retouch", "--config", "custom.toml", "status"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["retouch", "--log-level", "debug", "status"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_import_with_tags() {
        let cli = Cli::parse_from([
            "retouch", "import", "a.jpg", "b.jpg", "--tag", "places|porto", "--tag", "trip",
        ]);
        match cli.command {
            Commands::Import(args) => {
                assert_eq!(args.paths.len(), 2);
                assert_eq!(args.tags, vec!["places|porto", "trip"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_filter() {
        let cli = Cli::parse_from(["retouch", "filter", "a.tmp", "b.jpg"]);
        assert!(matches!(cli.command, Commands::Filter(_)));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["retouch", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["retouch", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test]
    fn test_edit_requires_item() {
        assert!(Cli::try_parse_from(["retouch", "edit"]).is_err());
    }

    #[test]
    fn test_edit_mode_flags_conflict() {
        assert!(Cli::try_parse_from(["retouch", "edit", "--detached", "--attached", "a"]).is_err());
    }

    #[test]
    fn test_load_settings_missing_file_uses_defaults() {
        let config = load_settings("/no/such/retouch.toml").unwrap();
        assert_eq!(config.tool.path, "gimp");
    }
}
