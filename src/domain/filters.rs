//! Filter DSL types
//!
//! The filter specification is a nested, per-geometry-type tag/attribute
//! structure with AND/OR join semantics. Geometry types are enumerated
//! variants rather than free-form string keys, so an unknown type tag fails
//! at deserialize/parse time instead of at store-query time.

use crate::domain::errors::CompileError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One of the three feature-shape partitions a filter can target
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum GeometryType {
    Point,
    Line,
    Polygon,
}

impl GeometryType {
    /// All three geometry types, the default selection for an export
    pub const ALL: [GeometryType; 3] = [
        GeometryType::Point,
        GeometryType::Line,
        GeometryType::Polygon,
    ];

    /// Canonical lowercase name, as used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryType::Point => "point",
            GeometryType::Line => "line",
            GeometryType::Polygon => "polygon",
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GeometryType {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "point" => Ok(GeometryType::Point),
            "line" => Ok(GeometryType::Line),
            "polygon" => Ok(GeometryType::Polygon),
            other => Err(CompileError::UnknownGeometryType(other.to_string())),
        }
    }
}

/// Geometry-type tag usable as a key inside `tags`/`attributes`
///
/// `all_geometry` entries apply to every geometry type selected by the
/// request, in addition to that type's own entries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum GeometryTag {
    Point,
    Line,
    Polygon,
    AllGeometry,
}

impl GeometryTag {
    /// The concrete geometry type this tag names, or `None` for
    /// `all_geometry`
    pub fn geometry_type(&self) -> Option<GeometryType> {
        match self {
            GeometryTag::Point => Some(GeometryType::Point),
            GeometryTag::Line => Some(GeometryType::Line),
            GeometryTag::Polygon => Some(GeometryType::Polygon),
            GeometryTag::AllGeometry => None,
        }
    }

    /// Canonical name, as used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryTag::Point => "point",
            GeometryTag::Line => "line",
            GeometryTag::Polygon => "polygon",
            GeometryTag::AllGeometry => "all_geometry",
        }
    }
}

impl fmt::Display for GeometryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GeometryTag {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "point" => Ok(GeometryTag::Point),
            "line" => Ok(GeometryTag::Line),
            "polygon" => Ok(GeometryTag::Polygon),
            "all_geometry" => Ok(GeometryTag::AllGeometry),
            other => Err(CompileError::UnknownGeometryType(other.to_string())),
        }
    }
}

/// How multiple tag-filter keys compose within a geometry type
///
/// `AND` requires every keyed predicate to hold; `OR` passes a feature that
/// matches any one key's allowed values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default,
)]
pub enum JoinFilterType {
    #[default]
    #[serde(rename = "AND", alias = "and")]
    And,
    #[serde(rename = "OR", alias = "or")]
    Or,
}

/// Per-geometry-type tag/attribute filter structure
///
/// `tags` maps a geometry-type tag to feature keys with their allowed
/// values; an empty value list means "key present, any value".
/// `attributes` controls only which fields are retained in the output,
/// never inclusion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FilterSpec {
    /// geometry-type tag -> feature key -> allowed values
    #[serde(default)]
    pub tags: BTreeMap<GeometryTag, BTreeMap<String, Vec<String>>>,

    /// geometry-type tag -> attribute names to retain in the output
    #[serde(default)]
    pub attributes: BTreeMap<GeometryTag, Vec<String>>,

    /// Join semantics for the tag predicates, default AND
    #[serde(default, rename = "joinFilterType")]
    pub join_filter_type: JoinFilterType,
}

impl FilterSpec {
    /// True when neither tags nor attributes carry any entry
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.attributes.is_empty()
    }
}
