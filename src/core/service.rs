//! Snapshot service surface
//!
//! Typed mirror of the external endpoints. HTTP routing, versioning and
//! rate limiting live outside this crate; a host embeds [`SnapshotService`]
//! and maps these calls onto its own transport.

use crate::adapters::executor::TaskExecutor;
use crate::adapters::store::FeatureStore;
use crate::compiler::compile_plain;
use crate::core::orchestrator::ExportOrchestrator;
use crate::domain::request::{ExportRequest, PlainQuery};
use crate::domain::{ExportTask, Result, TaskHandle, TaskId};
use chrono::{DateTime, Utc};
use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// `GET /status/` payload: recency of the store's last full refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub last_updated: Option<DateTime<Utc>>,
}

/// `POST /snapshot/` payload: the tracking handle for a submitted export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub task_id: String,
    pub track_link: String,
}

impl From<TaskHandle> for SnapshotResponse {
    fn from(handle: TaskHandle) -> Self {
        Self {
            task_id: handle.task_id.into_inner(),
            track_link: handle.track_link,
        }
    }
}

/// The snapshot service core
///
/// Owns the orchestrator and the feature-store seam; all state lives
/// behind those, so the service itself is cheap to share.
pub struct SnapshotService {
    store: Arc<dyn FeatureStore>,
    orchestrator: ExportOrchestrator,
}

impl SnapshotService {
    pub fn new(
        store: Arc<dyn FeatureStore>,
        executor: Arc<dyn TaskExecutor>,
        export_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            orchestrator: ExportOrchestrator::new(executor, export_path),
        }
    }

    /// Recency of the underlying feature store's last full refresh
    pub async fn status(&self) -> Result<StatusResponse> {
        let last_updated = self.store.last_updated().await?;
        Ok(StatusResponse { last_updated })
    }

    /// Submits an asynchronous snapshot export
    pub async fn snapshot(&self, request: ExportRequest) -> Result<SnapshotResponse> {
        let handle = self.orchestrator.submit(request).await?;
        Ok(handle.into())
    }

    /// Status of a previously submitted export task
    pub async fn task_status(&self, task_id: &TaskId) -> Result<ExportTask> {
        self.orchestrator.status(task_id).await
    }

    /// Synchronous plain query for small extracts; the caller blocks for
    /// the feature collection
    pub async fn snapshot_plain(&self, query: PlainQuery) -> Result<FeatureCollection> {
        let plan = compile_plain(&query)?;
        tracing::debug!(
            tables = plan.tables.len(),
            conditions = plan.conditions.len(),
            "Running plain snapshot query"
        );
        self.store.run_plain_query(&plan).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::executor::{ExportJob, LocalExecutor};
    use crate::adapters::store::{MemoryFeatureStore, StoredFeature};
    use crate::core::orchestrator::CompiledRequest;
    use crate::domain::request::{FeatureTable, WhereCondition};
    use crate::domain::{GeopackError, JoinFilterType};
    use async_trait::async_trait;
    use geojson::{Geometry, Value as GeoValue};
    use url::Url;

    struct NoopJob;

    #[async_trait]
    impl ExportJob for NoopJob {
        async fn run(&self, task_id: &TaskId, _job: &CompiledRequest) -> Result<Url> {
            Url::parse(&format!("https://objects.example.com/{task_id}.zip"))
                .map_err(|e| GeopackError::Other(e.to_string()))
        }
    }

    fn service(store: MemoryFeatureStore, export_path: &std::path::Path) -> SnapshotService {
        SnapshotService::new(
            Arc::new(store),
            Arc::new(LocalExecutor::new(Arc::new(NoopJob))),
            export_path,
        )
    }

    #[tokio::test]
    async fn test_status_reports_store_recency() {
        let dir = tempfile::tempdir().unwrap();
        let now = Utc::now();
        let service = service(MemoryFeatureStore::new().with_last_updated(now), dir.path());
        let response = service.status().await.unwrap();
        assert_eq!(response.last_updated, Some(now));
    }

    #[tokio::test]
    async fn test_snapshot_returns_track_link() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(MemoryFeatureStore::new(), dir.path());
        let request = ExportRequest::new(Geometry::new(GeoValue::Polygon(vec![vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
            vec![0.0, 0.0],
        ]])));
        let response = service.snapshot(request).await.unwrap();
        assert_eq!(
            response.track_link,
            format!("/tasks/status/{}/", response.task_id)
        );
    }

    #[tokio::test]
    async fn test_snapshot_plain_projects_matches() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryFeatureStore::new()
            .with_feature(
                StoredFeature::new(
                    FeatureTable::Relations,
                    Geometry::new(GeoValue::Point(vec![84.0, 28.0])),
                )
                .with_tag("admin_level", "2")
                .with_tag("name", "Nepal")
                .with_tag("boundary", "administrative"),
            )
            .with_feature(
                StoredFeature::new(
                    FeatureTable::Nodes,
                    Geometry::new(GeoValue::Point(vec![84.0, 28.0])),
                )
                .with_tag("admin_level", "2"),
            );
        let service = service(store, dir.path());

        let query = PlainQuery {
            select: vec!["name".to_string()],
            where_: vec![WhereCondition {
                key: "admin_level".to_string(),
                values: vec!["2".to_string()],
            }],
            join_by: JoinFilterType::And,
            look_in: Some(vec![FeatureTable::Relations]),
            bbox: None,
        };
        let collection = service.snapshot_plain(query).await.unwrap();
        assert_eq!(collection.features.len(), 1);
        let props = collection.features[0].properties.as_ref().unwrap();
        assert_eq!(props.len(), 1);
        assert_eq!(props.get("name").unwrap(), "Nepal");
    }

    #[tokio::test]
    async fn test_empty_look_in_is_a_compile_error() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(MemoryFeatureStore::new(), dir.path());
        let query = PlainQuery {
            select: vec!["*".to_string()],
            where_: vec![],
            join_by: JoinFilterType::And,
            look_in: Some(vec![]),
            bbox: None,
        };
        let err = service.snapshot_plain(query).await.unwrap_err();
        assert!(matches!(err, GeopackError::Compile(_)));
    }
}
