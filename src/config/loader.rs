//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::RetouchConfig;
use crate::domain::errors::RetouchError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into RetouchConfig
/// 4. Applies environment variable overrides (RETOUCH_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, a referenced
/// environment variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use retouch::config::loader::load_config;
///
/// let config = load_config("retouch.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<RetouchConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RetouchError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RetouchError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Loads configuration from TOML text
///
/// Same pipeline as [`load_config`] without the file read.
pub fn load_config_from_str(contents: &str) -> Result<RetouchConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: RetouchConfig = toml::from_str(&contents)
        .map_err(|e| RetouchError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        RetouchError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| RetouchError::Configuration(format!("Invalid placeholder pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(RetouchError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using RETOUCH_* prefix
///
/// Environment variables follow the pattern: RETOUCH_<SECTION>_<KEY>
/// For example: RETOUCH_TOOL_PATH, RETOUCH_TOOL_RUN_DETACHED
fn apply_env_overrides(config: &mut RetouchConfig) {
    if let Ok(val) = std::env::var("RETOUCH_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Tool overrides
    if let Ok(val) = std::env::var("RETOUCH_TOOL_PATH") {
        config.tool.path = val;
    }
    if let Ok(val) = std::env::var("RETOUCH_TOOL_RUN_DETACHED") {
        config.tool.run_detached = val.parse().unwrap_or(false);
    }

    // Export overrides
    if let Ok(val) = std::env::var("RETOUCH_EXPORT_FORMAT") {
        config.export.format = val;
    }
    if let Ok(val) = std::env::var("RETOUCH_EXPORT_BIT_DEPTH") {
        if let Ok(depth) = val.parse() {
            config.export.bit_depth = depth;
        }
    }
    if let Ok(val) = std::env::var("RETOUCH_EXPORT_SCRATCH_DIR") {
        config.export.scratch_dir = val;
    }

    if let Ok(val) = std::env::var("RETOUCH_CATALOG_PATH") {
        config.catalog.path = val;
    }

    // Import overrides
    if let Ok(val) = std::env::var("RETOUCH_IMPORT_IGNORE_PATTERNS") {
        config.import.ignore_patterns = val;
    }
    if let Ok(val) = std::env::var("RETOUCH_IMPORT_PATTERN_SYNTAX") {
        config.import.pattern_syntax = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("RETOUCH_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("RETOUCH_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
