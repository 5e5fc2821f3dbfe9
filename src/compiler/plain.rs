//! Plain-query compiler
//!
//! Normalizes the simpler select/where/join/look-in query used for small,
//! synchronous extracts into a [`PlainQueryPlan`]. The plan is consumed
//! synchronously by the feature store; there is no task indirection on
//! this path.

use crate::domain::errors::CompileError;
use crate::domain::filters::JoinFilterType;
use crate::domain::request::{FeatureTable, PlainQuery};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Attribute projection of a plain query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Projection {
    /// `select = ["*"]` (or an empty select): all attributes
    All,
    /// Explicit attribute list, order preserved, duplicates removed
    Columns(Vec<String>),
}

/// Normalized `where` condition; empty value set means "key present, any
/// value"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainCondition {
    pub key: String,
    pub values: BTreeSet<String>,
}

/// Canonical plan for a synchronous plain query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlainQueryPlan {
    pub projection: Projection,
    pub conditions: Vec<PlainCondition>,
    pub join: JoinFilterType,
    pub tables: BTreeSet<FeatureTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f64; 4]>,
}

impl PlainQueryPlan {
    /// Whether a feature from `table` with `tags` satisfies the plan
    pub fn matches(&self, table: FeatureTable, tags: &BTreeMap<String, String>) -> bool {
        if !self.tables.contains(&table) {
            return false;
        }
        if self.conditions.is_empty() {
            return true;
        }

        let normalized: BTreeMap<String, String> = tags
            .iter()
            .map(|(k, v)| (normalize_token(k), normalize_token(v)))
            .collect();

        let condition_holds = |cond: &PlainCondition| -> bool {
            match normalized.get(&cond.key) {
                Some(value) => cond.values.is_empty() || cond.values.contains(value),
                None => false,
            }
        };

        match self.join {
            JoinFilterType::And => self.conditions.iter().all(condition_holds),
            JoinFilterType::Or => self.conditions.iter().any(condition_holds),
        }
    }

    /// Projects a feature's attributes per the select clause
    pub fn project(&self, tags: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        match &self.projection {
            Projection::All => tags.clone(),
            Projection::Columns(columns) => tags
                .iter()
                .filter(|(k, _)| columns.iter().any(|c| c == k.trim()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

/// Compiles a [`PlainQuery`] into its canonical plan
///
/// # Errors
///
/// [`CompileError::EmptyTableSelection`] when `lookIn` is present but names
/// no table; omitting `lookIn` scans all four partitions.
pub fn compile_plain(query: &PlainQuery) -> Result<PlainQueryPlan, CompileError> {
    let projection = compile_projection(&query.select);

    let conditions: Vec<PlainCondition> = query
        .where_
        .iter()
        .filter_map(|cond| {
            let key = normalize_token(&cond.key);
            if key.is_empty() {
                return None;
            }
            let values: BTreeSet<String> = cond
                .values
                .iter()
                .map(|v| normalize_token(v))
                .filter(|v| !v.is_empty() && v != "*")
                .collect();
            Some(PlainCondition { key, values })
        })
        .collect();

    let tables: BTreeSet<FeatureTable> = match &query.look_in {
        None => FeatureTable::ALL.into_iter().collect(),
        Some(list) if list.is_empty() => return Err(CompileError::EmptyTableSelection),
        Some(list) => list.iter().copied().collect(),
    };

    Ok(PlainQueryPlan {
        projection,
        conditions,
        join: query.join_by,
        tables,
        bbox: query.bbox,
    })
}

/// `["*"]` is the wildcard sentinel; an empty select means the same thing
fn compile_projection(select: &[String]) -> Projection {
    let trimmed: Vec<&str> = select
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    if trimmed.is_empty() || (trimmed.len() == 1 && trimmed[0] == "*") {
        return Projection::All;
    }

    let mut seen = BTreeSet::new();
    let columns = trimmed
        .into_iter()
        .filter(|c| seen.insert(c.to_string()))
        .map(str::to_string)
        .collect();
    Projection::Columns(columns)
}

fn normalize_token(s: &str) -> String {
    s.trim().to_lowercase()
}
