//! `GeoJSON` output for merged constituency boundaries.
//!
//! The collection carries a `name` and a legacy `crs` member naming
//! OGC CRS84 (longitude/latitude WGS 84). Output is serialized in memory and
//! written through a sibling temporary file, so a failed run never leaves a
//! truncated document at the target path.

use std::path::{Path, PathBuf};

use geojson::{Feature, FeatureCollection, JsonObject};
use thiserror::Error;

use crate::build::ConstituencyFeature;

/// URN of the coordinate reference system declared on the output.
pub const CRS84_URN: &str = "urn:ogc:def:crs:OGC:1.3:CRS84";

/// Default `name` member of the output collection.
pub const DEFAULT_COLLECTION_NAME: &str = "bangladesh_constituencies_2025";

/// Errors that can occur while writing output.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the output file failed.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        /// Path being written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Builds the output `FeatureCollection`.
///
/// # Errors
///
/// Returns [`OutputError::Json`] if feature properties cannot be converted
/// to a JSON object.
pub fn to_feature_collection(
    features: &[ConstituencyFeature],
    collection_name: &str,
) -> Result<FeatureCollection, OutputError> {
    let features = features
        .iter()
        .map(to_feature)
        .collect::<Result<Vec<_>, _>>()?;

    let mut foreign_members = JsonObject::new();
    foreign_members.insert(
        "name".to_string(),
        serde_json::Value::String(collection_name.to_string()),
    );
    foreign_members.insert(
        "crs".to_string(),
        serde_json::json!({
            "type": "name",
            "properties": { "name": CRS84_URN },
        }),
    );

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(foreign_members),
    })
}

fn to_feature(feature: &ConstituencyFeature) -> Result<Feature, OutputError> {
    let properties = match serde_json::to_value(&feature.properties)? {
        serde_json::Value::Object(map) => map,
        _ => JsonObject::new(),
    };

    Ok(Feature {
        bbox: None,
        geometry: Some(feature.geometry.to_geojson()),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
}

/// Serializes `collection` and writes it to `path`, creating parent
/// directories as needed.
///
/// # Errors
///
/// Returns [`OutputError`] if serialization or any filesystem operation
/// fails.
pub fn write_feature_collection(
    path: &Path,
    collection: &FeatureCollection,
    pretty: bool,
) -> Result<(), OutputError> {
    let content = if pretty {
        serde_json::to_string_pretty(collection)?
    } else {
        serde_json::to_string(collection)?
    };

    let io_err = |source: std::io::Error| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut tmp_path = path.as_os_str().to_owned();
    tmp_path.push(".tmp");
    let tmp_path = PathBuf::from(tmp_path);

    std::fs::write(&tmp_path, content).map_err(io_err)?;
    if let Err(source) = std::fs::rename(&tmp_path, path) {
        std::fs::remove_file(&tmp_path).ok();
        return Err(io_err(source));
    }

    log::info!(
        "Wrote {} features to {}",
        collection.features.len(),
        path.display()
    );

    Ok(())
}
