//! Alias and spelling-normalization tables.
//!
//! The default tables are embedded at compile time from
//! `tables/name_tables.toml`. A replacement file can be supplied at run time
//! so the tables can be extended without a rebuild. Keys and values are
//! trimmed and lowercased on load.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use constituency_map_boundary_models::NameTables;
use thiserror::Error;

use crate::resolver::normalize_key;

/// Embedded default tables.
const DEFAULT_TABLES_TOML: &str = include_str!("../tables/name_tables.toml");

/// Errors that can occur while reading or writing name tables.
#[derive(Debug, Error)]
pub enum TablesError {
    /// The tables file could not be read.
    #[error("Failed to read name tables {}: {source}", path.display())]
    Io {
        /// Tables path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The tables are not valid TOML for [`NameTables`].
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The tables could not be rendered as TOML.
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Returns the embedded default tables.
///
/// # Panics
///
/// Panics if the embedded TOML fails to parse. It is a compile-time
/// constant, so a failure is a development error caught by the tests below.
#[must_use]
pub fn default_tables() -> NameTables {
    parse_tables(DEFAULT_TABLES_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse embedded name tables: {e}"))
}

/// Reads tables from `path`.
///
/// # Errors
///
/// Returns [`TablesError`] if the file cannot be read or parsed.
pub fn load_tables(path: &Path) -> Result<NameTables, TablesError> {
    let content = std::fs::read_to_string(path).map_err(|source| TablesError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let tables = parse_tables(&content)?;
    log::info!(
        "Loaded {} aliases and {} normalizations from {}",
        tables.aliases.len(),
        tables.normalize.len(),
        path.display()
    );

    Ok(tables)
}

/// Parses tables from a TOML string, normalizing every key and value.
///
/// # Errors
///
/// Returns [`TablesError::Parse`] if the TOML is invalid.
pub fn parse_tables(toml_str: &str) -> Result<NameTables, TablesError> {
    let raw: NameTables = toml::de::from_str(toml_str)?;

    Ok(NameTables {
        aliases: normalize_table(raw.aliases),
        normalize: normalize_table(raw.normalize),
    })
}

/// Renders tables as TOML.
///
/// # Errors
///
/// Returns [`TablesError::Serialize`] if serialization fails.
pub fn to_toml(tables: &NameTables) -> Result<String, TablesError> {
    Ok(toml::to_string(tables)?)
}

fn normalize_table(table: BTreeMap<String, String>) -> BTreeMap<String, String> {
    table
        .into_iter()
        .map(|(from, to)| (normalize_key(&from), normalize_key(&to)))
        .collect()
}
