//! Dissolves sub-district polygons into a single constituency boundary.
//!
//! Inputs are deduplicated by reference identity and folded with
//! [`BooleanOps::union`], so shared edges between neighbouring
//! sub-districts disappear and overlaps are counted once. Disjoint parts
//! (islands, enclaves) stay separate polygons of a multi-polygon.

use geo::{Area, BooleanOps, MultiPolygon, Polygon};
use thiserror::Error;

use crate::catalogue::SubdistrictRecord;

/// Errors that can occur while merging geometries.
///
/// Input topology is not validated or repaired. A sub-district whose
/// polygons have no area (a collapsed ring or a zero-width sliver) unions to
/// nothing and is reported as [`MergeError::EmptyUnion`], which aborts the
/// build rather than silently dropping the constituency.
#[derive(Debug, Error)]
pub enum MergeError {
    /// The union of non-empty inputs came out empty, which indicates
    /// invalid input geometry.
    #[error("Union of {input_count} geometries is empty")]
    EmptyUnion {
        /// Number of distinct input geometries.
        input_count: usize,
    },
}

/// A merged constituency boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum MergedGeometry {
    /// The union is one contiguous polygon.
    Polygon(Polygon<f64>),
    /// The union has disjoint parts.
    MultiPolygon(MultiPolygon<f64>),
}

impl MergedGeometry {
    fn from_union(union: MultiPolygon<f64>) -> Self {
        match <[Polygon<f64>; 1]>::try_from(union.0) {
            Ok([polygon]) => Self::Polygon(polygon),
            Err(polygons) => Self::MultiPolygon(MultiPolygon(polygons)),
        }
    }

    /// Unsigned planar area, in squared coordinate units.
    #[must_use]
    pub fn area(&self) -> f64 {
        match self {
            Self::Polygon(polygon) => polygon.unsigned_area(),
            Self::MultiPolygon(multi) => multi.unsigned_area(),
        }
    }

    /// Number of disjoint parts.
    #[must_use]
    pub fn part_count(&self) -> usize {
        match self {
            Self::Polygon(_) => 1,
            Self::MultiPolygon(multi) => multi.0.len(),
        }
    }

    /// Converts the boundary to a `GeoJSON` geometry.
    #[must_use]
    pub fn to_geojson(&self) -> geojson::Geometry {
        let value = match self {
            Self::Polygon(polygon) => geojson::Value::from(polygon),
            Self::MultiPolygon(multi) => geojson::Value::from(multi),
        };
        geojson::Geometry::new(value)
    }
}

/// Merges the geometries of `records` into one boundary.
///
/// Returns `Ok(None)` when `records` is empty. The same record borrowed
/// more than once contributes its geometry once; distinct records with
/// equal geometry are each merged.
///
/// # Errors
///
/// Returns [`MergeError::EmptyUnion`] if the union of non-empty inputs
/// has no polygons.
pub fn merge_geometries<'a>(
    records: impl IntoIterator<Item = &'a SubdistrictRecord>,
) -> Result<Option<MergedGeometry>, MergeError> {
    let mut distinct: Vec<&SubdistrictRecord> = vec![];
    for record in records {
        if !distinct.iter().any(|seen| std::ptr::eq(*seen, record)) {
            distinct.push(record);
        }
    }

    if distinct.is_empty() {
        return Ok(None);
    }

    let union = distinct
        .iter()
        .fold(MultiPolygon::new(vec![]), |acc, record| acc.union(&record.geometry));

    if union.0.is_empty() && distinct.iter().any(|r| !r.geometry.0.is_empty()) {
        return Err(MergeError::EmptyUnion {
            input_count: distinct.len(),
        });
    }

    Ok(Some(MergedGeometry::from_union(union)))
}
