//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - Console output filtered by `RUST_LOG` or the configured level
//! - Optional JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use retouch::logging::init_logging;
//! use retouch::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a round-trip
///
/// # Example
///
/// ```no_run
/// use retouch::log_roundtrip_start;
/// use retouch::domain::RunMode;
///
/// log_roundtrip_start!("gimp", 3, RunMode::Attached);
/// ```
#[macro_export]
macro_rules! log_roundtrip_start {
    ($tool:expr, $count:expr, $mode:expr) => {
        tracing::info!(
            tool = %$tool,
            item_count = $count,
            mode = %$mode,
            "Starting round-trip"
        );
    };
}

/// Log the completion of a round-trip
///
/// # Example
///
/// ```no_run
/// use retouch::log_roundtrip_complete;
/// use std::time::Duration;
///
/// log_roundtrip_complete!(3, Duration::from_secs(12));
/// ```
#[macro_export]
macro_rules! log_roundtrip_complete {
    ($new_items:expr, $duration:expr) => {
        tracing::info!(
            new_items = $new_items,
            duration_ms = $duration.as_millis() as u64,
            "Round-trip completed"
        );
    };
}

/// Log a per-item failure
///
/// # Example
///
/// ```no_run
/// use retouch::log_item_failure;
/// use retouch::domain::RetouchError;
///
/// let error = RetouchError::Catalog("locked".to_string());
/// log_item_failure!("item-1", &error, "import");
/// ```
#[macro_export]
macro_rules! log_item_failure {
    ($item:expr, $error:expr, $step:expr) => {
        tracing::warn!(
            item_id = %$item,
            error = %$error,
            step = $step,
            "Item failed"
        );
    };
}

/// Log a progress step
#[macro_export]
macro_rules! log_progress {
    ($phase:expr, $current:expr, $total:expr, $label:expr) => {
        tracing::debug!(
            phase = %$phase,
            current = $current,
            total = $total,
            label = %$label,
            "Progress"
        );
    };
}
