//! Feature-store adapter seam
//!
//! The geographic feature store and its query execution are external
//! collaborators. This module defines the trait the service core talks to
//! and an in-memory implementation used by tests and local development.

pub mod memory;

pub use memory::{MemoryFeatureStore, StoredFeature};

use crate::compiler::PlainQueryPlan;
use crate::domain::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use geojson::FeatureCollection;

/// Interface to the geographic feature store
///
/// Implementations receive compiled query plans, never raw request DSL:
/// validation and normalization have already happened by the time a plan
/// reaches the store.
#[async_trait]
pub trait FeatureStore: Send + Sync {
    /// Timestamp of the store's last full refresh, `None` when it has
    /// never completed one
    async fn last_updated(&self) -> Result<Option<DateTime<Utc>>>;

    /// Executes a plain query synchronously and returns the matching
    /// features
    ///
    /// # Errors
    ///
    /// `StoreError::ResultTooLarge` when the query matches more rows than
    /// the synchronous path allows; other `StoreError` variants for
    /// connectivity and execution failures.
    async fn run_plain_query(&self, plan: &PlainQueryPlan) -> Result<FeatureCollection>;
}
