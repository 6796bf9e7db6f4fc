#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Sub-district catalogue, constituency mapping, and name table types.
//!
//! The constituency mapping is the delimitation document listing which
//! sub-districts (upazilas/thanas) make up each electoral constituency. The
//! name tables patch over spelling differences between that document and the
//! romanization used by the boundary catalogue.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Property names used to read sub-district features from the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueFields {
    /// Property holding the sub-district name (e.g. `adm3_name`).
    pub name: String,
    /// Property holding the parent district name (e.g. `adm2_name`).
    pub district: String,
}

impl Default for CatalogueFields {
    fn default() -> Self {
        Self {
            name: "adm3_name".to_string(),
            district: "adm2_name".to_string(),
        }
    }
}

/// The constituency mapping document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstituencyMapping {
    /// Constituencies in delimitation order.
    pub constituencies: Vec<ConstituencyEntry>,
}

/// Constituency code as written in the mapping.
///
/// Codes may be JSON strings (`"PAN-1"`) or integers (`1`); either form is
/// kept and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstituencyCode {
    /// Integer code.
    Number(u64),
    /// String code.
    Text(String),
}

impl fmt::Display for ConstituencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(code) => write!(f, "{code}"),
            Self::Text(code) => f.write_str(code),
        }
    }
}

impl From<&str> for ConstituencyCode {
    fn from(code: &str) -> Self {
        Self::Text(code.to_string())
    }
}

impl From<u64> for ConstituencyCode {
    fn from(code: u64) -> Self {
        Self::Number(code)
    }
}

/// One constituency and the sub-districts it is composed of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstituencyEntry {
    /// Constituency code (e.g. `"PAN-1"` or `1`).
    pub code: ConstituencyCode,
    /// Display name (e.g. "Panchagarh-1").
    pub name: String,
    /// Parent district, used as context when resolving sub-district names.
    pub district: String,
    /// Parent division.
    pub division: String,
    /// Sub-district names as spelled in the delimitation document.
    #[serde(rename = "upazilas")]
    pub subdistricts: Vec<String>,
}

/// Properties written on each output constituency feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstituencyProperties {
    /// Constituency code, in the form the mapping used.
    pub constituency_code: ConstituencyCode,
    /// Constituency display name.
    pub constituency_name: String,
    /// Parent district.
    pub district: String,
    /// Parent division.
    pub division: String,
    /// Number of listed names that resolved to a catalogue record. Names
    /// listed in the mapping but left unresolved are not counted.
    pub upazila_count: usize,
}

impl ConstituencyProperties {
    /// Builds the output properties for `entry` with the given resolved
    /// sub-district count.
    #[must_use]
    pub fn from_entry(entry: &ConstituencyEntry, upazila_count: usize) -> Self {
        Self {
            constituency_code: entry.code.clone(),
            constituency_name: entry.name.clone(),
            district: entry.district.clone(),
            division: entry.division.clone(),
            upazila_count,
        }
    }
}

/// A constituency with one or more sub-district names that did not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedEntry {
    /// Constituency code, in display form.
    pub code: String,
    /// Constituency display name.
    pub name: String,
    /// Names that matched no catalogue record, in mapping order.
    pub missing: Vec<String>,
}

/// Static spelling tables, deserialized from TOML.
///
/// Keys and values are lowercase. `aliases` adds extra index keys at build
/// time; `normalize` rewrites a queried name before lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameTables {
    /// Alias name -> canonical catalogue name.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    /// Raw misspelling -> canonical catalogue spelling.
    #[serde(default)]
    pub normalize: BTreeMap<String, String>,
}
