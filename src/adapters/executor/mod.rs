//! Task-executor adapter seam
//!
//! The broker/worker runtime that actually executes exports is an external
//! collaborator. The orchestrator only dispatches compiled work and relays
//! status; all state transitions happen on the executor's side of this
//! trait.

pub mod local;

pub use local::{ExportJob, LocalExecutor};

use crate::core::orchestrator::CompiledRequest;
use crate::domain::{ExportTask, Result, TaskId};
use async_trait::async_trait;

/// Interface to the export task executor
#[async_trait]
pub trait TaskExecutor: Send + Sync {
    /// Enqueues a compiled export under the given task id
    ///
    /// Must return as soon as the task is accepted; callers never wait for
    /// the STARTED transition.
    async fn dispatch(&self, task_id: &TaskId, job: CompiledRequest) -> Result<()>;

    /// Current status of a previously dispatched task
    ///
    /// # Errors
    ///
    /// `ExecutorError::UnknownTask` for an id that was never dispatched.
    async fn status(&self, task_id: &TaskId) -> Result<ExportTask>;
}
