//! Sub-district catalogue loading.
//!
//! Reads a `GeoJSON` `FeatureCollection` of admin3 boundaries into
//! [`SubdistrictRecord`]s. Every feature must carry the configured name and
//! district properties and a `Polygon` or `MultiPolygon` geometry; anything
//! else aborts the load.

use std::path::{Path, PathBuf};

use constituency_map_boundary_models::CatalogueFields;
use geo::MultiPolygon;
use geojson::GeoJson;
use thiserror::Error;

/// Errors that can occur while reading the catalogue.
#[derive(Debug, Error)]
pub enum CatalogueError {
    /// The catalogue file could not be read.
    #[error("Failed to read catalogue {}: {source}", path.display())]
    Io {
        /// Catalogue path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The document is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The document is valid `GeoJSON` but not a `FeatureCollection`.
    #[error("Catalogue is not a GeoJSON FeatureCollection")]
    NotFeatureCollection,

    /// A feature is missing a required string property.
    #[error("Feature {index} is missing string property '{property}'")]
    MissingProperty {
        /// Position of the feature in the collection.
        index: usize,
        /// Name of the missing property.
        property: String,
    },

    /// A feature has no geometry.
    #[error("Feature {index} ({name}) has no geometry")]
    MissingGeometry {
        /// Position of the feature in the collection.
        index: usize,
        /// Sub-district name.
        name: String,
    },

    /// A feature's geometry is not polygonal.
    #[error("Feature {index} ({name}) has unsupported {kind} geometry")]
    UnsupportedGeometry {
        /// Position of the feature in the collection.
        index: usize,
        /// Sub-district name.
        name: String,
        /// Geometry type found.
        kind: &'static str,
    },
}

/// One sub-district polygon from the catalogue.
#[derive(Debug, Clone, PartialEq)]
pub struct SubdistrictRecord {
    id: usize,
    /// Sub-district name as spelled in the catalogue.
    pub name: String,
    /// Parent district name as spelled in the catalogue.
    pub district: String,
    /// Boundary; single polygons are promoted to a one-part multi-polygon.
    pub geometry: MultiPolygon<f64>,
}

impl SubdistrictRecord {
    /// Creates a record. Its catalogue position is assigned when it is
    /// added to a [`crate::ResolverIndex`]; until then it reads as 0.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        district: impl Into<String>,
        geometry: MultiPolygon<f64>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            district: district.into(),
            geometry,
        }
    }

    /// The record's position in the catalogue.
    #[must_use]
    pub const fn id(&self) -> usize {
        self.id
    }

    pub(crate) const fn set_id(&mut self, id: usize) {
        self.id = id;
    }
}

/// Reads and parses the catalogue at `path`.
///
/// # Errors
///
/// Returns [`CatalogueError`] if the file cannot be read or any feature is
/// malformed.
pub fn load_catalogue(
    path: &Path,
    fields: &CatalogueFields,
) -> Result<Vec<SubdistrictRecord>, CatalogueError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogueError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse_catalogue(&content, fields)?;
    log::info!(
        "Loaded {} sub-districts from {}",
        records.len(),
        path.display()
    );

    Ok(records)
}

/// Parses a catalogue `FeatureCollection` into records, in feature order.
///
/// # Errors
///
/// Returns [`CatalogueError`] if the document is not a `FeatureCollection`
/// or any feature lacks a name, district, or polygonal geometry.
pub fn parse_catalogue(
    geojson_str: &str,
    fields: &CatalogueFields,
) -> Result<Vec<SubdistrictRecord>, CatalogueError> {
    let GeoJson::FeatureCollection(collection) = geojson_str.parse::<GeoJson>()? else {
        return Err(CatalogueError::NotFeatureCollection);
    };

    collection
        .features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| {
            let name = string_property(&feature, &fields.name, index)?;
            let district = string_property(&feature, &fields.district, index)?;

            let Some(geometry) = feature.geometry else {
                return Err(CatalogueError::MissingGeometry { index, name });
            };

            let geometry = match geo::Geometry::<f64>::try_from(geometry)? {
                geo::Geometry::MultiPolygon(mp) => mp,
                geo::Geometry::Polygon(p) => MultiPolygon(vec![p]),
                other => {
                    return Err(CatalogueError::UnsupportedGeometry {
                        index,
                        name,
                        kind: geometry_kind(&other),
                    });
                }
            };

            let mut record = SubdistrictRecord::new(name, district, geometry);
            record.set_id(index);
            Ok(record)
        })
        .collect()
}

fn string_property(
    feature: &geojson::Feature,
    property: &str,
    index: usize,
) -> Result<String, CatalogueError> {
    feature
        .property(property)
        .and_then(serde_json::Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| CatalogueError::MissingProperty {
            index,
            property: property.to_string(),
        })
}

const fn geometry_kind(geometry: &geo::Geometry<f64>) -> &'static str {
    match geometry {
        geo::Geometry::Point(_) => "Point",
        geo::Geometry::Line(_) => "Line",
        geo::Geometry::LineString(_) => "LineString",
        geo::Geometry::Polygon(_) => "Polygon",
        geo::Geometry::MultiPoint(_) => "MultiPoint",
        geo::Geometry::MultiLineString(_) => "MultiLineString",
        geo::Geometry::MultiPolygon(_) => "MultiPolygon",
        geo::Geometry::GeometryCollection(_) => "GeometryCollection",
        geo::Geometry::Rect(_) => "Rect",
        geo::Geometry::Triangle(_) => "Triangle",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_feature(name: &str, district: &str) -> serde_json::Value {
        serde_json::json!({
            "type": "Feature",
            "properties": { "adm3_name": name, "adm2_name": district },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]
            }
        })
    }

    #[test]
    fn parses_polygon_and_multipolygon_features() {
        let doc = serde_json::json!({
            "type": "FeatureCollection",
            "features": [
                square_feature("Tentulia", "Panchagarh"),
                {
                    "type": "Feature",
                    "properties": { "adm3_name": "Hatiya", "adm2_name": "Noakhali" },
                    "geometry": {
                        "type": "MultiPolygon",
                        "coordinates": [
                            [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
                            [[[5.0, 5.0], [6.0, 5.0], [6.0, 6.0], [5.0, 5.0]]]
                        ]
                    }
                }
            ]
        });

        let records = parse_catalogue(&doc.to_string(), &CatalogueFields::default()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Tentulia");
        assert_eq!(records[0].district, "Panchagarh");
        assert_eq!(records[0].geometry.0.len(), 1);
        assert_eq!(records[1].id(), 1);
        assert_eq!(records[1].geometry.0.len(), 2);
    }

    #[test]
    fn honors_custom_field_names() {
        let doc = serde_json::json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "upazila": "Boda", "zila": "Panchagarh" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
                }
            }]
        });
        let fields = CatalogueFields {
            name: "upazila".to_string(),
            district: "zila".to_string(),
        };

        let records = parse_catalogue(&doc.to_string(), &fields).unwrap();
        assert_eq!(records[0].name, "Boda");
        assert_eq!(records[0].district, "Panchagarh");
    }

    #[test]
    fn rejects_feature_without_district() {
        let doc = serde_json::json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "adm3_name": "Boda" },
                "geometry": null
            }]
        });

        let err = parse_catalogue(&doc.to_string(), &CatalogueFields::default()).unwrap_err();
        assert!(matches!(
            err,
            CatalogueError::MissingProperty { index: 0, ref property } if property == "adm2_name"
        ));
    }

    #[test]
    fn rejects_feature_without_geometry() {
        let doc = serde_json::json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "adm3_name": "Boda", "adm2_name": "Panchagarh" },
                "geometry": null
            }]
        });

        let err = parse_catalogue(&doc.to_string(), &CatalogueFields::default()).unwrap_err();
        assert!(matches!(err, CatalogueError::MissingGeometry { index: 0, .. }));
    }

    #[test]
    fn rejects_point_geometry() {
        let doc = serde_json::json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "adm3_name": "Boda", "adm2_name": "Panchagarh" },
                "geometry": { "type": "Point", "coordinates": [88.5, 26.2] }
            }]
        });

        let err = parse_catalogue(&doc.to_string(), &CatalogueFields::default()).unwrap_err();
        assert!(matches!(
            err,
            CatalogueError::UnsupportedGeometry { kind: "Point", .. }
        ));
    }

    #[test]
    fn rejects_bare_geometry_document() {
        let doc = serde_json::json!({ "type": "Point", "coordinates": [88.5, 26.2] });
        let err = parse_catalogue(&doc.to_string(), &CatalogueFields::default()).unwrap_err();
        assert!(matches!(err, CatalogueError::NotFeatureCollection));
    }
}
