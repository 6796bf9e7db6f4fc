#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Sub-district name resolution and constituency boundary merging.
//!
//! Reads an admin3 (upazila/thana) boundary catalogue, resolves the
//! sub-district names listed for each electoral constituency against it,
//! and dissolves the matched polygons into one boundary per constituency.
//! Name mismatches between the delimitation document and the catalogue are
//! handled by the TOML name tables in [`tables`] plus a fixed set of
//! suffix heuristics in [`resolver`].

pub mod build;
pub mod catalogue;
pub mod mapping;
pub mod merge;
pub mod output;
pub mod progress;
pub mod report;
pub mod resolver;
pub mod tables;

use std::path::Path;

use constituency_map_boundary_models::{CatalogueFields, NameTables};
use thiserror::Error;

pub use build::{BuildError, BuildOutput, ConstituencyFeature, build_constituencies};
pub use catalogue::{CatalogueError, SubdistrictRecord};
pub use mapping::MappingError;
pub use merge::{MergeError, MergedGeometry, merge_geometries};
pub use output::OutputError;
pub use report::UnresolvedReport;
pub use resolver::ResolverIndex;
pub use tables::TablesError;

/// Errors that can occur while building constituency boundaries.
#[derive(Debug, Error)]
pub enum BoundaryError {
    /// The sub-district catalogue could not be read.
    #[error("Catalogue error: {0}")]
    Catalogue(#[from] CatalogueError),

    /// The constituency mapping could not be read.
    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    /// The name tables could not be read.
    #[error("Name tables error: {0}")]
    Tables(#[from] TablesError),

    /// Merging a constituency's sub-districts failed.
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// The output collection could not be written.
    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

/// Loads the catalogue at `path` and builds a [`ResolverIndex`] over it.
///
/// # Errors
///
/// Returns [`BoundaryError::Catalogue`] if the catalogue cannot be loaded.
pub fn load_index(
    path: &Path,
    fields: &CatalogueFields,
    tables: &NameTables,
) -> Result<ResolverIndex, BoundaryError> {
    let records = catalogue::load_catalogue(path, fields)?;
    Ok(ResolverIndex::build(records, tables))
}
