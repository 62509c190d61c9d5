//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold ENV_MUTEX.

use retouch::config::load_config;
use retouch::domain::{ExportFormat, RunMode};
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    std::env::remove_var("RETOUCH_APPLICATION_LOG_LEVEL");
    std::env::remove_var("RETOUCH_TOOL_PATH");
    std::env::remove_var("RETOUCH_TOOL_RUN_DETACHED");
    std::env::remove_var("RETOUCH_EXPORT_FORMAT");
    std::env::remove_var("RETOUCH_EXPORT_BIT_DEPTH");
    std::env::remove_var("RETOUCH_IMPORT_IGNORE_PATTERNS");
    std::env::remove_var("TEST_RETOUCH_EDITOR");
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[application]
log_level = "debug"

[tool]
path = "/usr/bin/darktable"
args = ["--library", ":memory:"]
run_detached = true

[export]
format = "tiff"
bit_depth = 16
scratch_dir = "/tmp/retouch-scratch"

[catalog]
path = "/data/catalog.json"

[import]
ignore_patterns = " *.tmp | | *.xmp "
pattern_syntax = "glob"

[logging]
local_enabled = false
local_path = "/tmp/retouch-logs"
local_rotation = "hourly"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.tool.path, "/usr/bin/darktable");
    assert_eq!(config.tool.args, vec!["--library", ":memory:"]);
    assert_eq!(config.tool.run_mode(), RunMode::Detached);
    assert_eq!(config.export.export_format().unwrap(), ExportFormat::Tiff);
    assert_eq!(config.export.bit_depth, 16);
    assert_eq!(config.catalog.path, "/data/catalog.json");
    assert_eq!(config.import.patterns(), vec!["*.tmp", "*.xmp"]);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config("[tool]\n");
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.tool.path, "gimp");
    assert_eq!(config.tool.run_mode(), RunMode::Attached);
    assert_eq!(config.export.export_format().unwrap(), ExportFormat::Original);
    assert_eq!(config.export.bit_depth, 8);
    assert_eq!(config.catalog.path, "retouch-catalog.json");
    assert!(config.import.patterns().is_empty());
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_RETOUCH_EDITOR", "/opt/editor/bin/editor");

    let temp_file = write_config(
        r#"
[tool]
# path = "${NOT_SET_BUT_COMMENTED}"
path = "${TEST_RETOUCH_EDITOR}"
"#,
    );
    let config = load_config(temp_file.path()).expect("Failed to load config");
    assert_eq!(config.tool.path, "/opt/editor/bin/editor");

    cleanup_env_vars();
}

#[test]
fn test_missing_env_var_is_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config("[tool]\npath = \"${TEST_RETOUCH_EDITOR}\"\n");
    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_RETOUCH_EDITOR"));
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("RETOUCH_TOOL_PATH", "krita");
    std::env::set_var("RETOUCH_TOOL_RUN_DETACHED", "true");
    std::env::set_var("RETOUCH_EXPORT_BIT_DEPTH", "32");
    std::env::set_var("RETOUCH_IMPORT_IGNORE_PATTERNS", "*.bak");

    let temp_file = write_config(
        r#"
[tool]
path = "gimp"
run_detached = false

[export]
bit_depth = 8
"#,
    );
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.tool.path, "krita");
    assert_eq!(config.tool.run_mode(), RunMode::Detached);
    assert_eq!(config.export.bit_depth, 32);
    assert_eq!(config.import.patterns(), vec!["*.bak"]);

    cleanup_env_vars();
}

#[test]
fn test_override_is_validated() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("RETOUCH_EXPORT_FORMAT", "webp");

    let temp_file = write_config("[export]\nformat = \"original\"\n");
    let result = load_config(temp_file.path());
    assert!(result.is_err());

    cleanup_env_vars();
}

#[test]
fn test_invalid_values_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    for content in [
        "[application]\nlog_level = \"loud\"\n",
        "[tool]\npath = \"  \"\n",
        "[export]\nbit_depth = 12\n",
        "[import]\npattern_syntax = \"sql\"\n",
        "[import]\npattern_syntax = \"regex\"\nignore_patterns = \"(unclosed\"\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
    ] {
        let temp_file = write_config(content);
        assert!(
            load_config(temp_file.path()).is_err(),
            "expected rejection of {content:?}"
        );
    }
}

#[test]
fn test_missing_file() {
    let result = load_config("/no/such/dir/retouch.toml");
    assert!(result.is_err());
}
