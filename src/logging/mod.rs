//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - JSON-formatted logs
//! - Configurable log levels
//! - Local file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use geopack::logging::init_logging;
//! use geopack::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the acceptance of an export task
///
/// # Example
///
/// ```no_run
/// use geopack::log_task_accepted;
/// use geopack::domain::TaskId;
///
/// let task_id = TaskId::generate();
/// log_task_accepted!(&task_id, "geojson");
/// ```
#[macro_export]
macro_rules! log_task_accepted {
    ($task_id:expr, $output_type:expr) => {
        tracing::info!(
            task_id = %$task_id,
            output_type = %$output_type,
            "Export task accepted"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use geopack::log_error_with_context;
/// use geopack::domain::GeopackError;
///
/// let error = GeopackError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
