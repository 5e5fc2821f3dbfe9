//! In-memory feature store
//!
//! Backs the plain-query path in tests and local development. Matching is
//! tag-level only; spatial evaluation of the bbox is the real store's job
//! and is not emulated here.

use super::FeatureStore;
use crate::compiler::PlainQueryPlan;
use crate::domain::errors::StoreError;
use crate::domain::request::FeatureTable;
use crate::domain::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue};
use std::collections::BTreeMap;

/// One feature held by the in-memory store
#[derive(Debug, Clone)]
pub struct StoredFeature {
    pub table: FeatureTable,
    pub tags: BTreeMap<String, String>,
    pub geometry: Geometry,
}

impl StoredFeature {
    pub fn new(table: FeatureTable, geometry: Geometry) -> Self {
        Self {
            table,
            tags: BTreeMap::new(),
            geometry,
        }
    }

    /// Adds a tag, builder style
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

/// In-memory [`FeatureStore`] implementation
pub struct MemoryFeatureStore {
    last_updated: Option<DateTime<Utc>>,
    features: Vec<StoredFeature>,
    row_limit: usize,
}

impl MemoryFeatureStore {
    /// Empty store with the default synchronous row limit
    pub fn new() -> Self {
        Self {
            last_updated: None,
            features: Vec::new(),
            row_limit: 1000,
        }
    }

    /// Sets the refresh timestamp reported by `last_updated`
    pub fn with_last_updated(mut self, at: DateTime<Utc>) -> Self {
        self.last_updated = Some(at);
        self
    }

    /// Adds a feature, builder style
    pub fn with_feature(mut self, feature: StoredFeature) -> Self {
        self.features.push(feature);
        self
    }

    /// Overrides the synchronous row limit
    pub fn with_row_limit(mut self, limit: usize) -> Self {
        self.row_limit = limit;
        self
    }
}

impl Default for MemoryFeatureStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeatureStore for MemoryFeatureStore {
    async fn last_updated(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.last_updated)
    }

    async fn run_plain_query(&self, plan: &PlainQueryPlan) -> Result<FeatureCollection> {
        let matched: Vec<&StoredFeature> = self
            .features
            .iter()
            .filter(|f| plan.matches(f.table, &f.tags))
            .collect();

        if matched.len() > self.row_limit {
            return Err(StoreError::ResultTooLarge {
                rows: matched.len(),
                limit: self.row_limit,
            }
            .into());
        }

        let features = matched
            .into_iter()
            .map(|f| {
                let properties: JsonObject = plan
                    .project(&f.tags)
                    .into_iter()
                    .map(|(k, v)| (k, JsonValue::String(v)))
                    .collect();
                Feature {
                    bbox: None,
                    geometry: Some(f.geometry.clone()),
                    id: None,
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();

        Ok(FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile_plain;
    use crate::domain::request::{PlainQuery, WhereCondition};
    use crate::domain::{GeopackError, JoinFilterType};
    use geojson::Value as GeoValue;

    fn point() -> Geometry {
        Geometry::new(GeoValue::Point(vec![85.3, 27.7]))
    }

    fn store() -> MemoryFeatureStore {
        MemoryFeatureStore::new()
            .with_feature(
                StoredFeature::new(FeatureTable::Relations, point())
                    .with_tag("admin_level", "2")
                    .with_tag("name", "Nepal"),
            )
            .with_feature(
                StoredFeature::new(FeatureTable::Nodes, point()).with_tag("amenity", "cafe"),
            )
    }

    fn plain(conditions: &[(&str, &[&str])], look_in: Option<Vec<FeatureTable>>) -> PlainQuery {
        PlainQuery {
            select: vec!["*".to_string()],
            where_: conditions
                .iter()
                .map(|(k, vs)| WhereCondition {
                    key: k.to_string(),
                    values: vs.iter().map(|v| v.to_string()).collect(),
                })
                .collect(),
            join_by: JoinFilterType::And,
            look_in,
            bbox: None,
        }
    }

    #[tokio::test]
    async fn test_query_filters_by_table_and_conditions() {
        let plan = compile_plain(&plain(
            &[("admin_level", &["2"])],
            Some(vec![FeatureTable::Relations]),
        ))
        .unwrap();
        let collection = store().run_plain_query(&plan).await.unwrap();
        assert_eq!(collection.features.len(), 1);
        let props = collection.features[0].properties.as_ref().unwrap();
        assert_eq!(props.get("name").unwrap(), "Nepal");
    }

    #[tokio::test]
    async fn test_row_limit_is_enforced() {
        let mut store = MemoryFeatureStore::new().with_row_limit(1);
        for _ in 0..3 {
            store = store.with_feature(
                StoredFeature::new(FeatureTable::Nodes, point()).with_tag("building", "yes"),
            );
        }
        let plan = compile_plain(&plain(&[("building", &[])], None)).unwrap();
        let err = store.run_plain_query(&plan).await.unwrap_err();
        assert!(matches!(
            err,
            GeopackError::Store(StoreError::ResultTooLarge { rows: 3, limit: 1 })
        ));
    }

    #[tokio::test]
    async fn test_last_updated_round_trip() {
        let now = Utc::now();
        let store = MemoryFeatureStore::new().with_last_updated(now);
        assert_eq!(store.last_updated().await.unwrap(), Some(now));
        assert_eq!(MemoryFeatureStore::new().last_updated().await.unwrap(), None);
    }
}
