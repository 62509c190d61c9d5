//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "retouch.toml")]
    pub output: String,

    /// Include comments explaining every option
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Set tool.path to your editor in {}", self.output);
                println!("  2. Validate configuration: retouch validate-config --check-tool");
                println!("  3. Import photos: retouch import ~/Pictures");
                println!("  4. Edit: retouch edit <ITEM>...");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Retouch Configuration File

[application]
log_level = "info"

[tool]
path = "gimp"
args = []
run_detached = false

[export]
format = "original"
bit_depth = 8
scratch_dir = ""

[catalog]
path = "retouch-catalog.json"

[import]
ignore_patterns = "*.tmp|*.xmp|.DS_Store"
pattern_syntax = "glob"

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with comments
    fn generate_config_with_examples() -> String {
        r#"# Retouch Configuration File
#
# Values of the form ${VAR} are read from the environment.
# Any key can also be overridden with RETOUCH_<SECTION>_<KEY>,
# for example RETOUCH_TOOL_PATH=/usr/bin/darktable.

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[tool]
# Editor binary: a bare name searched in PATH, or a path.
# On macOS an application bundle works too, e.g. "/Applications/GIMP.app"
path = "gimp"

# Arguments passed before the file list
args = []

# true: start the editor and return, edited files are not re-imported
# false: wait for the editor to exit, then import the edited files
#        beside their originals and group them together
run_detached = false

[export]
# original | tiff | jpeg | png
# Anything but "original" requires the item to already be in that format
format = "original"

# Bits per channel (8, 16 or 32)
bit_depth = 8

# Where temporary exports are written (empty = system temp directory)
scratch_dir = ""

[catalog]
# JSON file holding the managed items
path = "retouch-catalog.json"

[import]
# Pipe-delimited file name patterns skipped on import
ignore_patterns = "*.tmp|*.xmp|.DS_Store"

# glob | regex
pattern_syntax = "glob"

[logging]
# Write JSON logs to local_path in addition to the console
local_enabled = false
local_path = "./logs"

# daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;
    use tempfile::TempDir;

    #[test]
    fn test_generated_configs_are_valid() {
        for content in [
            InitArgs::generate_minimal_config(),
            InitArgs::generate_config_with_examples(),
        ] {
            let config = load_config_from_str(&content).unwrap();
            assert_eq!(config.tool.path, "gimp");
            assert_eq!(config.import.patterns().len(), 3);
        }
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("retouch.toml");
        fs::write(&output, "# existing").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().into_owned(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "# existing");
    }

    #[tokio::test]
    async fn test_init_force_writes() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("retouch.toml");
        fs::write(&output, "# existing").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().into_owned(),
            with_examples: true,
            force: true,
        };
        assert_eq!(args.execute().await.unwrap(), 0);
        assert!(fs::read_to_string(&output).unwrap().contains("[tool]"));
    }
}
