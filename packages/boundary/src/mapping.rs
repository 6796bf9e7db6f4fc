//! Constituency mapping loading.

use std::path::{Path, PathBuf};

use constituency_map_boundary_models::ConstituencyMapping;
use thiserror::Error;

/// Errors that can occur while reading the constituency mapping.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The mapping file could not be read.
    #[error("Failed to read mapping {}: {source}", path.display())]
    Io {
        /// Mapping path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The mapping is not valid JSON or is missing required fields.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reads and parses the mapping at `path`.
///
/// # Errors
///
/// Returns [`MappingError`] if the file cannot be read or parsed.
pub fn load_mapping(path: &Path) -> Result<ConstituencyMapping, MappingError> {
    let content = std::fs::read_to_string(path).map_err(|source| MappingError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mapping = parse_mapping(&content)?;
    log::info!(
        "Loaded {} constituencies from {}",
        mapping.constituencies.len(),
        path.display()
    );

    Ok(mapping)
}

/// Parses a mapping document.
///
/// # Errors
///
/// Returns [`MappingError::Json`] if the document is malformed.
pub fn parse_mapping(json: &str) -> Result<ConstituencyMapping, MappingError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mapping_document() {
        let json = r#"{
            "constituencies": [
                {
                    "code": "1",
                    "name": "Panchagarh-1",
                    "district": "Panchagarh",
                    "division": "Rangpur",
                    "upazilas": ["Tetulia", "Panchagarh Sadar", "Atwari"]
                }
            ]
        }"#;

        let mapping = parse_mapping(json).unwrap();
        assert_eq!(mapping.constituencies.len(), 1);
        assert_eq!(mapping.constituencies[0].subdistricts.len(), 3);
    }

    #[test]
    fn rejects_document_without_constituencies() {
        assert!(matches!(
            parse_mapping(r#"{ "seats": [] }"#),
            Err(MappingError::Json(_))
        ));
    }

    #[test]
    fn reports_missing_file_path() {
        let err = load_mapping(Path::new("does/not/exist.json")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
