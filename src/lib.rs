// geopack - Geospatial feature export service
// Licensed under the MIT License

//! # geopack - Geospatial feature export service
//!
//! geopack turns tag-filter export requests over OSM-style feature data
//! into canonical query plans, runs exports as fire-and-forget background
//! tasks, and watches upload locations so local copies are only deleted
//! once the published object is actually reachable.
//!
//! ## Architecture
//!
//! geopack follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (orchestrator, snapshot service, upload watcher)
//! - [`compiler`] - Filter and plain-query compilation
//! - [`adapters`] - External seams (feature store, task executor, upload probe)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! Compiling a filter specification into its canonical plan:
//!
//! ```rust
//! use geopack::compiler::compile_filters;
//! use geopack::domain::{FilterSpec, GeometryType};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let spec: FilterSpec = serde_json::from_str(
//!     r#"{
//!         "tags": { "all_geometry": { "building": [] } },
//!         "attributes": { "all_geometry": ["name"] }
//!     }"#,
//! )?;
//!
//! let plan = compile_filters(&GeometryType::ALL, Some(&spec))?;
//! println!("{}", plan.to_canonical_json()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! geopack uses the [`domain::GeopackError`] type for all errors:
//!
//! ```rust,no_run
//! use geopack::domain::GeopackError;
//!
//! fn example() -> Result<(), GeopackError> {
//!     let config = geopack::config::load_config("geopack.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! geopack uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!("Starting export");
//! warn!(task_id = "0b0f...", "Upload not yet visible");
//! ```

pub mod adapters;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
