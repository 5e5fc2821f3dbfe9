//! Export task state and tracking handle
//!
//! An [`ExportTask`] is created at dispatch time and mutated only by the
//! task executor. SUCCESS and FAILURE are terminal: a finished task is
//! never resurrected.

use crate::domain::ids::TaskId;
use serde::{Deserialize, Serialize};
use url::Url;

/// Lifecycle state of an export task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Just enqueued, not yet picked up
    Pending,
    /// The executor has picked the task up
    Started,
    /// Artifact produced; `result_url` is set
    Success,
    /// The executor reported an error; `error` is populated
    Failure,
}

impl TaskStatus {
    /// SUCCESS and FAILURE are terminal states
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Success | TaskStatus::Failure)
    }
}

/// Status payload for one export task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportTask {
    pub task_id: TaskId,
    pub status: TaskStatus,

    /// Download URL of the produced artifact, set on SUCCESS
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_url: Option<Url>,

    /// Opaque executor error message, set on FAILURE
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExportTask {
    /// A freshly enqueued task
    pub fn pending(task_id: TaskId) -> Self {
        Self {
            task_id,
            status: TaskStatus::Pending,
            result_url: None,
            error: None,
        }
    }

    /// Marks the task as picked up. No-op once terminal.
    pub fn mark_started(&mut self) {
        if !self.status.is_terminal() {
            self.status = TaskStatus::Started;
        }
    }

    /// Marks the task successful with its artifact URL. No-op once terminal.
    pub fn complete(&mut self, result_url: Url) {
        if !self.status.is_terminal() {
            self.status = TaskStatus::Success;
            self.result_url = Some(result_url);
            self.error = None;
        }
    }

    /// Marks the task failed with an opaque error message. No-op once
    /// terminal.
    pub fn fail(&mut self, error: impl Into<String>) {
        if !self.status.is_terminal() {
            self.status = TaskStatus::Failure;
            self.error = Some(error.into());
        }
    }
}

/// Opaque identifier plus tracking path returned on snapshot submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskHandle {
    pub task_id: TaskId,
    pub track_link: String,
}

impl TaskHandle {
    /// Builds the handle with its canonical tracking path
    pub fn new(task_id: TaskId) -> Self {
        let track_link = format!("/tasks/status/{task_id}/");
        Self {
            task_id,
            track_link,
        }
    }
}
