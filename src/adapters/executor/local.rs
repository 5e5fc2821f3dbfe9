//! In-process task executor
//!
//! Runs each dispatched export on a spawned tokio task and keeps statuses
//! in a shared map. Used by tests and single-node deployments; a brokered
//! runtime would implement [`TaskExecutor`](super::TaskExecutor) against
//! its own queue instead.

use super::TaskExecutor;
use crate::core::orchestrator::CompiledRequest;
use crate::domain::errors::ExecutorError;
use crate::domain::{ExportTask, Result, TaskId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use url::Url;

/// The work one export performs once the executor picks it up
///
/// Returns the object-store URL where the produced artifact will become
/// available. Errors surface as `ExportTask.status == FAILURE` with the
/// message relayed opaquely; they are never retried here.
#[async_trait]
pub trait ExportJob: Send + Sync {
    async fn run(&self, task_id: &TaskId, job: &CompiledRequest) -> Result<Url>;
}

type TaskMap = Arc<Mutex<HashMap<TaskId, ExportTask>>>;

/// In-process [`TaskExecutor`] backed by a task map
pub struct LocalExecutor {
    tasks: TaskMap,
    job: Arc<dyn ExportJob>,
}

impl LocalExecutor {
    pub fn new(job: Arc<dyn ExportJob>) -> Self {
        Self {
            tasks: Arc::new(Mutex::new(HashMap::new())),
            job,
        }
    }
}

#[async_trait]
impl TaskExecutor for LocalExecutor {
    async fn dispatch(&self, task_id: &TaskId, job: CompiledRequest) -> Result<()> {
        {
            let mut tasks = self.tasks.lock().await;
            tasks.insert(task_id.clone(), ExportTask::pending(task_id.clone()));
        }

        let tasks = self.tasks.clone();
        let runner = self.job.clone();
        let task_id = task_id.clone();
        tokio::spawn(async move {
            {
                let mut tasks = tasks.lock().await;
                if let Some(task) = tasks.get_mut(&task_id) {
                    task.mark_started();
                }
            }
            tracing::debug!(task_id = %task_id, "Export task started");

            let outcome = runner.run(&task_id, &job).await;

            let mut tasks = tasks.lock().await;
            if let Some(task) = tasks.get_mut(&task_id) {
                match outcome {
                    Ok(url) => {
                        tracing::info!(task_id = %task_id, url = %url, "Export task succeeded");
                        task.complete(url);
                    }
                    Err(e) => {
                        tracing::error!(task_id = %task_id, error = %e, "Export task failed");
                        task.fail(e.to_string());
                    }
                }
            }
        });

        Ok(())
    }

    async fn status(&self, task_id: &TaskId) -> Result<ExportTask> {
        let tasks = self.tasks.lock().await;
        tasks
            .get(task_id)
            .cloned()
            .ok_or_else(|| ExecutorError::UnknownTask(task_id.to_string()).into())
    }
}
