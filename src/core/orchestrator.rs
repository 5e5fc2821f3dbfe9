//! Export task orchestrator
//!
//! Turns a synchronous snapshot request into an asynchronous, trackable
//! unit of work. The orchestrator validates and compiles the request up
//! front (malformed requests are rejected synchronously, never enqueued),
//! issues the task id, creates the task's private working directory and
//! hands the compiled work to the executor. It never transitions task
//! state itself; `status` only relays the executor's view.

use crate::adapters::executor::TaskExecutor;
use crate::compiler::{compile_filters, QueryPlan};
use crate::domain::request::ExportRequest;
use crate::domain::{ExportTask, Result, TaskHandle, TaskId};
use std::path::PathBuf;
use std::sync::Arc;

/// A validated, compiled export ready for dispatch
///
/// The working directory is private to this task; no other export ever
/// reads or writes it.
#[derive(Debug, Clone)]
pub struct CompiledRequest {
    pub request: ExportRequest,
    pub plan: QueryPlan,
    pub file_name: String,
    pub working_dir: PathBuf,
}

/// Orchestrates snapshot submissions and status lookups
pub struct ExportOrchestrator {
    executor: Arc<dyn TaskExecutor>,
    export_path: PathBuf,
}

impl ExportOrchestrator {
    pub fn new(executor: Arc<dyn TaskExecutor>, export_path: impl Into<PathBuf>) -> Self {
        Self {
            executor,
            export_path: export_path.into(),
        }
    }

    /// Submits an export request and returns its tracking handle
    ///
    /// Fire-and-forget from the caller's perspective: returns as soon as
    /// the executor accepts the task, without waiting for STARTED.
    ///
    /// # Errors
    ///
    /// Validation and compile errors are returned synchronously; nothing
    /// is enqueued in that case.
    pub async fn submit(&self, request: ExportRequest) -> Result<TaskHandle> {
        request.validate()?;
        let plan = compile_filters(&request.geometry_type, request.filters.as_ref())?;

        let task_id = TaskId::generate();
        let working_dir = self.export_path.join(task_id.as_str());
        tokio::fs::create_dir_all(&working_dir).await?;

        let file_name = request.export_file_name(&task_id);
        tracing::info!(
            task_id = %task_id,
            output_type = %request.output_type,
            file_name = %file_name,
            "Dispatching snapshot task"
        );

        self.executor
            .dispatch(
                &task_id,
                CompiledRequest {
                    request,
                    plan,
                    file_name,
                    working_dir,
                },
            )
            .await?;

        Ok(TaskHandle::new(task_id))
    }

    /// Relays the executor's status for a task
    pub async fn status(&self, task_id: &TaskId) -> Result<ExportTask> {
        self.executor.status(task_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ExecutorError;
    use crate::domain::filters::{FilterSpec, GeometryTag, GeometryType};
    use crate::domain::GeopackError;
    use async_trait::async_trait;
    use geojson::{Geometry, Value as GeoValue};
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// Records dispatches without executing anything
    struct RecordingExecutor {
        dispatched: Mutex<Vec<TaskId>>,
    }

    impl RecordingExecutor {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                dispatched: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TaskExecutor for RecordingExecutor {
        async fn dispatch(&self, task_id: &TaskId, _job: CompiledRequest) -> Result<()> {
            self.dispatched.lock().unwrap().push(task_id.clone());
            Ok(())
        }

        async fn status(&self, task_id: &TaskId) -> Result<ExportTask> {
            let dispatched = self.dispatched.lock().unwrap();
            if dispatched.contains(task_id) {
                Ok(ExportTask::pending(task_id.clone()))
            } else {
                Err(ExecutorError::UnknownTask(task_id.to_string()).into())
            }
        }
    }

    fn rectangle_request() -> ExportRequest {
        ExportRequest::new(Geometry::new(GeoValue::Polygon(vec![vec![
            vec![83.96, 28.19],
            vec![83.99, 28.19],
            vec![83.99, 28.21],
            vec![83.96, 28.21],
            vec![83.96, 28.19],
        ]])))
    }

    #[tokio::test]
    async fn test_submit_creates_working_dir_and_dispatches() {
        let executor = RecordingExecutor::new();
        let export_root = tempfile::tempdir().unwrap();
        let orchestrator = ExportOrchestrator::new(executor.clone(), export_root.path());

        let handle = orchestrator.submit(rectangle_request()).await.unwrap();
        assert_eq!(
            handle.track_link,
            format!("/tasks/status/{}/", handle.task_id)
        );
        assert!(export_root.path().join(handle.task_id.as_str()).is_dir());
        assert_eq!(executor.dispatched.lock().unwrap().len(), 1);

        let task = orchestrator.status(&handle.task_id).await.unwrap();
        assert_eq!(task.task_id, handle.task_id);
    }

    #[tokio::test]
    async fn test_invalid_request_is_never_enqueued() {
        let executor = RecordingExecutor::new();
        let export_root = tempfile::tempdir().unwrap();
        let orchestrator = ExportOrchestrator::new(executor.clone(), export_root.path());

        let mut request = rectangle_request();
        request.geometry = Geometry::new(GeoValue::Point(vec![1.0, 2.0]));
        let err = orchestrator.submit(request).await.unwrap_err();
        assert!(matches!(err, GeopackError::Validation(_)));
        assert!(executor.dispatched.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_filter_mismatch_is_rejected_before_dispatch() {
        let executor = RecordingExecutor::new();
        let export_root = tempfile::tempdir().unwrap();
        let orchestrator = ExportOrchestrator::new(executor.clone(), export_root.path());

        let mut request = rectangle_request();
        request.geometry_type = vec![GeometryType::Point];
        let mut filters = FilterSpec::default();
        filters
            .tags
            .entry(GeometryTag::Polygon)
            .or_insert_with(BTreeMap::new)
            .insert("building".to_string(), vec![]);
        request.filters = Some(filters);

        let err = orchestrator.submit(request).await.unwrap_err();
        assert!(matches!(err, GeopackError::Compile(_)));
        assert!(executor.dispatched.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_each_submission_gets_a_distinct_id() {
        let executor = RecordingExecutor::new();
        let export_root = tempfile::tempdir().unwrap();
        let orchestrator = ExportOrchestrator::new(executor.clone(), export_root.path());

        let a = orchestrator.submit(rectangle_request()).await.unwrap();
        let b = orchestrator.submit(rectangle_request()).await.unwrap();
        assert_ne!(a.task_id, b.task_id);
    }
}
