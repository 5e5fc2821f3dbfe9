//! Integration tests for export task orchestration

use geopack::adapters::executor::{ExportJob, LocalExecutor, TaskExecutor};
use geopack::core::orchestrator::CompiledRequest;
use geopack::core::ExportOrchestrator;
use geopack::domain::{
    ExportRequest, ExportTask, GeopackError, Result, TaskId, TaskStatus,
};
use async_trait::async_trait;
use geojson::{Geometry, Value as GeoValue};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use url::Url;

fn rectangle() -> Geometry {
    Geometry::new(GeoValue::Polygon(vec![vec![
        vec![83.969, 28.194],
        vec![83.998, 28.194],
        vec![83.998, 28.215],
        vec![83.969, 28.215],
        vec![83.969, 28.194],
    ]]))
}

/// Accepts everything, remembers nothing
struct NullExecutor;

#[async_trait]
impl TaskExecutor for NullExecutor {
    async fn dispatch(&self, _task_id: &TaskId, _job: CompiledRequest) -> Result<()> {
        Ok(())
    }

    async fn status(&self, task_id: &TaskId) -> Result<ExportTask> {
        Ok(ExportTask::pending(task_id.clone()))
    }
}

struct OkJob;

#[async_trait]
impl ExportJob for OkJob {
    async fn run(&self, task_id: &TaskId, job: &CompiledRequest) -> Result<Url> {
        // the per-task working directory exists before the job runs
        assert!(job.working_dir.is_dir());
        Url::parse(&format!("https://objects.example.com/{task_id}.zip"))
            .map_err(|e| GeopackError::Other(e.to_string()))
    }
}

struct FailJob;

#[async_trait]
impl ExportJob for FailJob {
    async fn run(&self, _task_id: &TaskId, _job: &CompiledRequest) -> Result<Url> {
        Err(GeopackError::Other("disk full".to_string()))
    }
}

async fn wait_terminal(orchestrator: &ExportOrchestrator, task_id: &TaskId) -> ExportTask {
    for _ in 0..200 {
        let task = orchestrator.status(task_id).await.unwrap();
        if task.status.is_terminal() {
            return task;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("task {task_id} never reached a terminal status");
}

#[tokio::test]
async fn test_submit_returns_track_link_immediately() {
    let dir = TempDir::new().unwrap();
    let orchestrator = ExportOrchestrator::new(Arc::new(NullExecutor), dir.path());

    let handle = orchestrator
        .submit(ExportRequest::new(rectangle()))
        .await
        .unwrap();

    assert_eq!(
        handle.track_link,
        format!("/tasks/status/{}/", handle.task_id)
    );
    // working directory was provisioned under the export path
    assert!(dir.path().join(handle.task_id.as_str()).is_dir());
}

#[tokio::test]
async fn test_successful_export_lifecycle() {
    let dir = TempDir::new().unwrap();
    let orchestrator =
        ExportOrchestrator::new(Arc::new(LocalExecutor::new(Arc::new(OkJob))), dir.path());

    let handle = orchestrator
        .submit(ExportRequest::new(rectangle()))
        .await
        .unwrap();

    let task = wait_terminal(&orchestrator, &handle.task_id).await;
    assert_eq!(task.status, TaskStatus::Success);
    let url = task.result_url.expect("successful task carries result url");
    assert!(url.as_str().contains(handle.task_id.as_str()));
    assert!(task.error.is_none());
}

#[tokio::test]
async fn test_failed_export_carries_error_message() {
    let dir = TempDir::new().unwrap();
    let orchestrator =
        ExportOrchestrator::new(Arc::new(LocalExecutor::new(Arc::new(FailJob))), dir.path());

    let handle = orchestrator
        .submit(ExportRequest::new(rectangle()))
        .await
        .unwrap();

    let task = wait_terminal(&orchestrator, &handle.task_id).await;
    assert_eq!(task.status, TaskStatus::Failure);
    assert!(task.result_url.is_none());
    assert!(task.error.unwrap().contains("disk full"));
}

#[tokio::test]
async fn test_invalid_request_is_rejected_before_dispatch() {
    let dir = TempDir::new().unwrap();
    let orchestrator = ExportOrchestrator::new(Arc::new(NullExecutor), dir.path());

    let request = ExportRequest::new(Geometry::new(GeoValue::Point(vec![1.0, 2.0])));
    let err = orchestrator.submit(request).await.unwrap_err();
    assert!(matches!(err, GeopackError::Validation(_)));

    // no working directory was created for the rejected request
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_unknown_task_status_is_an_error() {
    let dir = TempDir::new().unwrap();
    let orchestrator =
        ExportOrchestrator::new(Arc::new(LocalExecutor::new(Arc::new(OkJob))), dir.path());

    let never_submitted = TaskId::generate();
    assert!(orchestrator.status(&never_submitted).await.is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_submissions_get_distinct_ids() {
    let dir = TempDir::new().unwrap();
    let orchestrator = Arc::new(ExportOrchestrator::new(Arc::new(NullExecutor), dir.path()));

    let submissions = (0..10_000).map(|_| {
        let orchestrator = Arc::clone(&orchestrator);
        tokio::spawn(async move {
            orchestrator
                .submit(ExportRequest::new(rectangle()))
                .await
                .unwrap()
                .task_id
        })
    });

    let mut seen = HashSet::new();
    for result in futures::future::join_all(submissions).await {
        let task_id = result.unwrap();
        assert!(seen.insert(task_id.clone()), "duplicate task id {task_id}");
    }
    assert_eq!(seen.len(), 10_000);
}
