//! Export and plain-query request models
//!
//! These are the bodies of the two snapshot endpoints. Geometry fields use
//! GeoJSON coordinate order (longitude, latitude), SRID 4326. Ring validity
//! of the supplied polygon is the feature store's concern; this crate only
//! rejects non-polygonal geometry kinds.

use crate::domain::errors::GeopackError;
use crate::domain::filters::{FilterSpec, GeometryType, JoinFilterType};
use crate::domain::ids::TaskId;
use crate::domain::result::Result;
use geojson::{Geometry, Value as GeoValue};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Output file format for an export
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    #[default]
    Geojson,
    Shp,
    Kml,
    Csv,
    Mbtiles,
    Flatgeobuf,
    Sql,
    Gpkg,
}

impl OutputType {
    /// File extension used for the produced artifact
    pub fn extension(&self) -> &'static str {
        match self {
            OutputType::Geojson => "geojson",
            OutputType::Shp => "shp",
            OutputType::Kml => "kml",
            OutputType::Csv => "csv",
            OutputType::Mbtiles => "mbtiles",
            OutputType::Flatgeobuf => "fgb",
            OutputType::Sql => "sql",
            OutputType::Gpkg => "gpkg",
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

fn default_geometry_types() -> Vec<GeometryType> {
    GeometryType::ALL.to_vec()
}

/// Body of a snapshot export request
///
/// Absent `filters` means "all features in the area". `geometryType`
/// defaults to all three partitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    /// GeoJSON Polygon or MultiPolygon delimiting the export area
    pub geometry: Geometry,

    /// Optional tag/attribute filter specification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterSpec>,

    /// Output file format, default geojson
    #[serde(default, rename = "outputType")]
    pub output_type: OutputType,

    /// Optional export file name; sanitized before use
    #[serde(default, rename = "fileName", skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// Geometry types to extract, default all three
    #[serde(default = "default_geometry_types", rename = "geometryType")]
    pub geometry_type: Vec<GeometryType>,

    /// Minimum zoom level, mbtiles only
    #[serde(default, rename = "minZoom", skip_serializing_if = "Option::is_none")]
    pub min_zoom: Option<u8>,

    /// Maximum zoom level, mbtiles only
    #[serde(default, rename = "maxZoom", skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<u8>,
}

impl ExportRequest {
    /// Minimal request: geometry only, everything else defaulted
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            filters: None,
            output_type: OutputType::default(),
            file_name: None,
            geometry_type: default_geometry_types(),
            min_zoom: None,
            max_zoom: None,
        }
    }

    /// Validates the request ahead of compilation and dispatch
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error for non-polygonal geometry, an empty
    /// geometry-type selection, or an inverted mbtiles zoom range.
    pub fn validate(&self) -> Result<()> {
        match self.geometry.value {
            GeoValue::Polygon(_) | GeoValue::MultiPolygon(_) => {}
            ref other => {
                return Err(GeopackError::Validation(format!(
                    "geometry must be a Polygon or MultiPolygon, got {}",
                    other.type_name()
                )))
            }
        }

        if self.geometry_type.is_empty() {
            return Err(GeopackError::Validation(
                "geometryType must select at least one of point, line, polygon".to_string(),
            ));
        }

        if self.output_type == OutputType::Mbtiles {
            if let (Some(min), Some(max)) = (self.min_zoom, self.max_zoom) {
                if min > max {
                    return Err(GeopackError::Validation(format!(
                        "minZoom ({min}) cannot exceed maxZoom ({max})"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Join semantics requested for the tag filters, default AND
    pub fn join_filter_type(&self) -> JoinFilterType {
        self.filters
            .as_ref()
            .map(|f| f.join_filter_type)
            .unwrap_or_default()
    }

    /// Export file name: the sanitized client name, or a generated one
    pub fn export_file_name(&self, task_id: &TaskId) -> String {
        match self.file_name.as_deref().map(sanitize_file_name) {
            Some(name) if !name.is_empty() => name,
            _ => format!("raw_export_{task_id}"),
        }
    }
}

/// Sanitizes a client-supplied file name
///
/// Keeps alphanumerics, `-`, `_` and `.`; whitespace collapses to a single
/// underscore; path separators and anything else are dropped. Leading dots
/// are stripped so the name can never be hidden or traverse upward.
pub fn sanitize_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_sep = true;
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
            out.push(ch);
            last_was_sep = false;
        } else if ch == '.' {
            if !out.is_empty() {
                out.push(ch);
                last_was_sep = false;
            }
        } else if ch.is_whitespace() {
            if !last_was_sep {
                out.push('_');
                last_was_sep = true;
            }
        }
        // everything else (path separators, shell metacharacters) is dropped
    }
    out.trim_end_matches(['_', '.']).to_string()
}

/// One of the four feature-table partitions a plain query can scan
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FeatureTable {
    Nodes,
    WaysPoly,
    WaysLine,
    Relations,
}

impl FeatureTable {
    /// All four partitions, the default scan set
    pub const ALL: [FeatureTable; 4] = [
        FeatureTable::Nodes,
        FeatureTable::WaysPoly,
        FeatureTable::WaysLine,
        FeatureTable::Relations,
    ];
}

/// A single `where` condition for a plain query
///
/// An empty value list follows the same rule as tag filters: "key present,
/// any value".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhereCondition {
    pub key: String,
    #[serde(default, rename = "value", alias = "values")]
    pub values: Vec<String>,
}

/// Body of a synchronous plain snapshot query
///
/// Intended for small-area extracts: the caller blocks for the result and
/// there is no task indirection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlainQuery {
    /// Attribute projection; `["*"]` selects all attributes
    #[serde(default)]
    pub select: Vec<String>,

    /// Conditions combined per `joinBy`
    #[serde(default, rename = "where")]
    pub where_: Vec<WhereCondition>,

    /// AND requires every condition; OR at least one
    #[serde(default, rename = "joinBy")]
    pub join_by: JoinFilterType,

    /// Feature-table partitions to scan; absent means all four
    #[serde(default, rename = "lookIn", skip_serializing_if = "Option::is_none")]
    pub look_in: Option<Vec<FeatureTable>>,

    /// Optional bounding box: xmin, ymin, xmax, ymax (SRID 4326)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f64; 4]>,
}
