//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Retouch configuration file.

use crate::config::load_config;
use crate::core::filter::ImportFilter;
use crate::core::launcher::locate_tool;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Also check that the configured tool can be found
    #[arg(long)]
    pub check_tool: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("Configuration is valid");
                c
            }
            Err(e) => {
                println!("Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let pattern_count = ImportFilter::from_config(&config.import)
            .map(|f| f.len())
            .unwrap_or(0);

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Tool: {}", config.tool.path);
        if !config.tool.args.is_empty() {
            println!("  Tool Arguments: {:?}", config.tool.args);
        }
        println!("  Run Mode: {}", config.tool.run_mode());
        println!("  Export Format: {}", config.export.format);
        println!("  Bit Depth: {}", config.export.bit_depth);
        println!("  Scratch Directory: {}", config.export.scratch_base().display());
        println!("  Catalog: {}", config.catalog.path);
        println!(
            "  Ignore Patterns: {} ({})",
            pattern_count, config.import.pattern_syntax
        );
        println!();

        if self.check_tool {
            match locate_tool(&config.tool.path) {
                Ok(path) => println!("Tool found: {}", path.display()),
                Err(e) => {
                    println!("{e}");
                    return Ok(3);
                }
            }
        }

        Ok(0)
    }
}
