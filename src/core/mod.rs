//! Business logic
//!
//! The three asynchronous pieces of the export service: task
//! orchestration, upload watching and the typed service surface that ties
//! them to the compilers and adapter seams.

pub mod orchestrator;
pub mod service;
pub mod watcher;

pub use orchestrator::{CompiledRequest, ExportOrchestrator};
pub use service::{SnapshotResponse, SnapshotService, StatusResponse};
pub use watcher::{spawn_watch, watch_upload, WatchOptions, WatchOutcome};
