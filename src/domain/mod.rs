//! Domain models and types for geopack.
//!
//! This module contains the core domain models, types, and business rules:
//!
//! - **Strongly-typed identifiers** ([`TaskId`])
//! - **Filter DSL** ([`FilterSpec`], [`GeometryType`], [`GeometryTag`],
//!   [`JoinFilterType`])
//! - **Request models** ([`ExportRequest`], [`PlainQuery`], [`OutputType`],
//!   [`FeatureTable`])
//! - **Task lifecycle** ([`ExportTask`], [`TaskStatus`], [`TaskHandle`])
//! - **Error types** ([`GeopackError`], [`CompileError`], [`StoreError`],
//!   [`ExecutorError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type safety
//!
//! Geometry types are enumerated variants rather than free-form strings, so
//! an unknown geometry-type tag in a filter fails at parse time instead of
//! at store-query time:
//!
//! ```
//! use geopack::domain::GeometryTag;
//! use std::str::FromStr;
//!
//! assert!(GeometryTag::from_str("all_geometry").is_ok());
//! assert!(GeometryTag::from_str("circle").is_err());
//! ```

pub mod errors;
pub mod filters;
pub mod ids;
pub mod request;
pub mod result;
pub mod task;

// Re-export commonly used types for convenience
pub use errors::{CompileError, ExecutorError, GeopackError, StoreError};
pub use filters::{FilterSpec, GeometryTag, GeometryType, JoinFilterType};
pub use ids::TaskId;
pub use request::{
    sanitize_file_name, ExportRequest, FeatureTable, OutputType, PlainQuery, WhereCondition,
};
pub use result::Result;
pub use task::{ExportTask, TaskHandle, TaskStatus};
