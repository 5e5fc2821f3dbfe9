//! Domain error types
//!
//! This module defines the error hierarchy for geopack. All errors are
//! domain-specific and don't expose third-party types: the feature store,
//! task executor and object store report through their own enums, which
//! fold into [`GeopackError`].

use thiserror::Error;

/// Main geopack error type
///
/// This is the primary error type used throughout the crate. It wraps
/// specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum GeopackError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request validation errors (rejected synchronously, never enqueued)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Filter or plain-query compilation errors
    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    /// Feature store errors
    #[error("Feature store error: {0}")]
    Store(#[from] StoreError),

    /// Task executor errors
    #[error("Task executor error: {0}")]
    Executor(#[from] ExecutorError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Filter and plain-query compilation errors
///
/// These are synchronous, client-facing rejections: a request that fails
/// compilation is never handed to the executor.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompileError {
    /// A geometry-type tag in the filters is not one of
    /// point/line/polygon/all_geometry
    #[error("unknown geometry type tag: {0}")]
    UnknownGeometryType(String),

    /// Filters target a geometry type absent from the request's
    /// geometryType selection
    #[error("filter targets geometry type '{tag}' which is not in the requested selection")]
    FilterGeometryTypeMismatch { tag: String },

    /// `lookIn` named no feature table at all
    #[error("lookIn must name at least one feature table")]
    EmptyTableSelection,
}

/// Feature-store errors
///
/// The store itself is an external collaborator; these variants cover the
/// failure modes its adapter can surface without leaking client types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to reach the feature store
    #[error("Failed to connect to feature store: {0}")]
    ConnectionFailed(String),

    /// Query execution failed inside the store
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A plain query matched more rows than the synchronous path allows
    #[error("Query matched {rows} rows, the plain endpoint supports up to {limit}")]
    ResultTooLarge { rows: usize, limit: usize },

    /// Store returned something the adapter could not interpret
    #[error("Invalid response from feature store: {0}")]
    InvalidResponse(String),

    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

/// Task-executor errors
///
/// Execution failures inside a running export are NOT reported here; they
/// surface through `ExportTask.status == FAILURE`. These variants cover the
/// dispatch/status plumbing only.
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The executor refused or failed to accept the task
    #[error("Failed to dispatch task: {0}")]
    DispatchFailed(String),

    /// Status was requested for a task id the executor has never seen
    #[error("Unknown task: {0}")]
    UnknownTask(String),

    /// The executor's status endpoint could not be reached
    #[error("Task status unavailable: {0}")]
    StatusUnavailable(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for GeopackError {
    fn from(err: std::io::Error) -> Self {
        GeopackError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for GeopackError {
    fn from(err: serde_json::Error) -> Self {
        GeopackError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for GeopackError {
    fn from(err: toml::de::Error) -> Self {
        GeopackError::Configuration(format!("TOML parse error: {err}"))
    }
}
