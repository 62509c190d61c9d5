//! Domain error types
//!
//! This module defines the error hierarchy for Retouch. Fatal errors abort a
//! round-trip before any partial state is created; per-item errors are
//! collected into the round-trip summary instead of being propagated.

use thiserror::Error;

/// Main Retouch error type
///
/// This is the primary error type used throughout the library.
#[derive(Debug, Error)]
pub enum RetouchError {
    /// The configured editing tool could not be located
    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    /// The editing tool was located but the process could not be started
    #[error("Failed to launch external tool: {0}")]
    Launch(String),

    /// Exporting a single item failed
    #[error("Export failed for item {item}: {reason}")]
    ExportFailure { item: String, reason: String },

    /// Moving an edited file back beside its original failed
    #[error("Relocation failed for item {item}: {reason}")]
    RelocationFailure { item: String, reason: String },

    /// Every collision suffix up to the ceiling was already taken
    #[error("No free destination name for item {item}, falling back to {path}")]
    PathResolutionExhausted { item: String, path: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Catalog (collection manager) errors
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Batch lifecycle violated
    #[error("Invalid batch state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl RetouchError {
    /// Whether this error aborts the whole batch
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RetouchError::ToolNotFound(_)
                | RetouchError::Launch(_)
                | RetouchError::Configuration(_)
                | RetouchError::InvalidTransition { .. }
        )
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for RetouchError {
    fn from(err: std::io::Error) -> Self {
        RetouchError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for RetouchError {
    fn from(err: serde_json::Error) -> Self {
        RetouchError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for RetouchError {
    fn from(err: toml::de::Error) -> Self {
        RetouchError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_not_found_display() {
        let err = RetouchError::ToolNotFound("gimp".to_string());
        assert_eq!(err.to_string(), "External tool not found: gimp");
    }

    #[test]
    fn test_relocation_failure_display() {
        let err = RetouchError::RelocationFailure {
            item: "abc".to_string(),
            reason: "disk full".to_string(),
        };
        assert_eq!(err.to_string(), "Relocation failed for item abc: disk full");
    }

    #[test]
    fn test_fatal_classification() {
        assert!(RetouchError::ToolNotFound("x".to_string()).is_fatal());
        assert!(RetouchError::Launch("x".to_string()).is_fatal());
        assert!(!RetouchError::ExportFailure {
            item: "a".to_string(),
            reason: "b".to_string()
        }
        .is_fatal());
        assert!(!RetouchError::RelocationFailure {
            item: "a".to_string(),
            reason: "b".to_string()
        }
        .is_fatal());
        assert!(!RetouchError::PathResolutionExhausted {
            item: "a".to_string(),
            path: "b".to_string()
        }
        .is_fatal());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: RetouchError = io_err.into();
        assert!(matches!(err, RetouchError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: RetouchError = json_err.into();
        assert!(matches!(err, RetouchError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: RetouchError = toml_err.into();
        assert!(matches!(err, RetouchError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }
}
