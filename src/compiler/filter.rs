//! FilterSpec compiler
//!
//! Normalizes the nested, per-geometry-type tag/attribute DSL into a
//! canonical [`QueryPlan`]. Pure and synchronous: no I/O, deterministic for
//! identical logical input regardless of key/value ordering.
//!
//! Normalization rules:
//! - feature keys and tag values are trimmed and lowercased; source
//!   catalogs carry whitespace-padded values (`"mosque "`, `" church "`)
//!   that must collapse onto their normalized form
//! - an empty value list means "key present, any value"
//! - `all_geometry` entries union into every selected geometry type's own
//!   entries
//! - attribute names are trimmed but keep their case (OSM attribute keys
//!   such as `is_in:RW` are case-significant)

use crate::domain::errors::CompileError;
use crate::domain::filters::{FilterSpec, GeometryTag, GeometryType, JoinFilterType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Normalized (predicate-set, attribute-set) pair for one geometry type
///
/// `predicates` maps a normalized feature key to its allowed values; an
/// empty value set is the key-presence predicate. An empty `attributes`
/// set retains every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GeometryPlan {
    pub predicates: BTreeMap<String, BTreeSet<String>>,
    pub attributes: BTreeSet<String>,
}

impl GeometryPlan {
    /// True when a feature with the given tags satisfies this plan's
    /// predicates under `join`
    fn matches(&self, join: JoinFilterType, tags: &BTreeMap<String, String>) -> bool {
        if self.predicates.is_empty() {
            // no tag filter for this geometry type: everything is included
            return true;
        }

        let normalized: BTreeMap<String, String> = tags
            .iter()
            .map(|(k, v)| (normalize_token(k), normalize_token(v)))
            .collect();

        let predicate_holds = |key: &String, allowed: &BTreeSet<String>| -> bool {
            match normalized.get(key) {
                Some(value) => allowed.is_empty() || allowed.contains(value),
                None => false,
            }
        };

        match join {
            JoinFilterType::And => self.predicates.iter().all(|(k, v)| predicate_holds(k, v)),
            JoinFilterType::Or => self.predicates.iter().any(|(k, v)| predicate_holds(k, v)),
        }
    }

    /// Retains only the attributes selected for this geometry type
    fn project(&self, tags: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        if self.attributes.is_empty() {
            return tags.clone();
        }
        tags.iter()
            .filter(|(k, _)| self.attributes.contains(k.trim()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// Canonical, geometry-type-keyed query plan
///
/// This is the contract handed to the feature store: `matches` decides
/// inclusion, `project` decides which fields are retained. Serialization is
/// byte-stable for identical logical input (BTree ordering throughout).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPlan {
    pub join: JoinFilterType,
    pub geometries: BTreeMap<GeometryType, GeometryPlan>,
}

impl QueryPlan {
    /// Whether a feature of `geometry_type` with `tags` is included
    ///
    /// Attributes never gate inclusion; only the tag predicates do. A
    /// geometry type outside the plan is never included.
    pub fn matches(&self, geometry_type: GeometryType, tags: &BTreeMap<String, String>) -> bool {
        self.geometries
            .get(&geometry_type)
            .map(|plan| plan.matches(self.join, tags))
            .unwrap_or(false)
    }

    /// Projects a matched feature's tags down to the retained attributes
    pub fn project(
        &self,
        geometry_type: GeometryType,
        tags: &BTreeMap<String, String>,
    ) -> BTreeMap<String, String> {
        self.geometries
            .get(&geometry_type)
            .map(|plan| plan.project(tags))
            .unwrap_or_default()
    }

    /// Canonical JSON rendering, reproducible across runs for caching and
    /// testing
    pub fn to_canonical_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Compiles geometry-type selection plus an optional filter spec into a
/// [`QueryPlan`]
///
/// An empty `geometry_types` slice selects all three types. Absent filters
/// compile to a plan that includes every feature of the selected types.
///
/// # Errors
///
/// [`CompileError::FilterGeometryTypeMismatch`] when filters target a
/// geometry type outside the selection. Unknown geometry-type tags cannot
/// reach this function through typed input; raw string input fails earlier
/// with [`CompileError::UnknownGeometryType`] via `GeometryTag::from_str`.
pub fn compile_filters(
    geometry_types: &[GeometryType],
    filters: Option<&FilterSpec>,
) -> Result<QueryPlan, CompileError> {
    let selected: BTreeSet<GeometryType> = if geometry_types.is_empty() {
        GeometryType::ALL.into_iter().collect()
    } else {
        geometry_types.iter().copied().collect()
    };

    let mut geometries: BTreeMap<GeometryType, GeometryPlan> = selected
        .iter()
        .map(|gt| (*gt, GeometryPlan::default()))
        .collect();

    let join = filters.map(|f| f.join_filter_type).unwrap_or_default();

    if let Some(spec) = filters {
        for (tag, entries) in &spec.tags {
            let targets = resolve_targets(*tag, &selected)?;
            for (key, values) in entries {
                let key = normalize_token(key);
                if key.is_empty() {
                    continue;
                }
                let normalized: BTreeSet<String> = values
                    .iter()
                    .map(|v| normalize_token(v))
                    .filter(|v| !v.is_empty())
                    .collect();
                // a non-empty input list whose values all trim away is the
                // key-presence predicate as well
                let any_value = values.is_empty() || normalized.is_empty();
                for target in &targets {
                    if let Some(plan) = geometries.get_mut(target) {
                        merge_predicate(&mut plan.predicates, key.clone(), &normalized, any_value);
                    }
                }
            }
        }

        for (tag, attrs) in &spec.attributes {
            let targets = resolve_targets(*tag, &selected)?;
            let normalized: BTreeSet<String> = attrs
                .iter()
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect();
            for target in &targets {
                if let Some(plan) = geometries.get_mut(target) {
                    plan.attributes.extend(normalized.iter().cloned());
                }
            }
        }
    }

    Ok(QueryPlan { join, geometries })
}

/// Geometry types a tag's entries apply to
fn resolve_targets(
    tag: GeometryTag,
    selected: &BTreeSet<GeometryType>,
) -> Result<Vec<GeometryType>, CompileError> {
    match tag.geometry_type() {
        None => Ok(selected.iter().copied().collect()),
        Some(gt) if selected.contains(&gt) => Ok(vec![gt]),
        Some(_) => Err(CompileError::FilterGeometryTypeMismatch {
            tag: tag.as_str().to_string(),
        }),
    }
}

/// Unions an incoming value set into the predicate map
///
/// The key-presence predicate (empty set) absorbs any value restriction:
/// once a source says "any value", the union stays "any value" no matter
/// the merge order.
fn merge_predicate(
    predicates: &mut BTreeMap<String, BTreeSet<String>>,
    key: String,
    values: &BTreeSet<String>,
    any_value: bool,
) {
    use std::collections::btree_map::Entry;
    match predicates.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(if any_value {
                BTreeSet::new()
            } else {
                values.clone()
            });
        }
        Entry::Occupied(mut slot) => {
            if any_value {
                slot.get_mut().clear();
            } else if !slot.get().is_empty() {
                slot.get_mut().extend(values.iter().cloned());
            }
            // existing empty set already means "any value"
        }
    }
}

fn normalize_token(s: &str) -> String {
    s.trim().to_lowercase()
}
