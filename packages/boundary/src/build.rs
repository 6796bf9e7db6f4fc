//! Builds constituency boundaries from a mapping and a resolver index.
//!
//! Each constituency's sub-district names are resolved with the
//! constituency's district as context. Names that do not resolve go to the
//! [`UnresolvedReport`]; the resolved subset is still merged. A constituency
//! where nothing resolves produces no feature.

use constituency_map_boundary_models::{
    ConstituencyEntry, ConstituencyMapping, ConstituencyProperties, UnresolvedEntry,
};
use thiserror::Error;

use crate::catalogue::SubdistrictRecord;
use crate::merge::{MergeError, MergedGeometry, merge_geometries};
use crate::progress::ProgressCallback;
use crate::report::UnresolvedReport;
use crate::resolver::ResolverIndex;

/// Errors that can occur while building constituencies.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Merging one constituency's sub-districts failed.
    #[error("Failed to merge constituency {code}: {source}")]
    Merge {
        /// Constituency code.
        code: String,
        /// Underlying merge error.
        source: MergeError,
    },
}

/// One merged constituency boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstituencyFeature {
    /// Output properties.
    pub properties: ConstituencyProperties,
    /// Dissolved boundary of the resolved sub-districts.
    pub geometry: MergedGeometry,
}

/// Result of a build run.
#[derive(Debug, Clone, Default)]
pub struct BuildOutput {
    /// Features in mapping order.
    pub features: Vec<ConstituencyFeature>,
    /// Constituencies with unresolved names.
    pub report: UnresolvedReport,
    /// Codes of constituencies dropped because nothing resolved.
    pub skipped: Vec<String>,
}

/// Resolution of one constituency's sub-district list.
#[derive(Debug, Clone, Default)]
pub struct EntryResolution<'a> {
    /// Matched records, one per resolved name, in mapping order. Two names
    /// resolving to the same record both appear here.
    pub records: Vec<&'a SubdistrictRecord>,
    /// Names that matched nothing, in mapping order.
    pub missing: Vec<String>,
}

/// Resolves every sub-district name listed for `entry`.
#[must_use]
pub fn resolve_entry<'a>(
    index: &'a ResolverIndex,
    entry: &ConstituencyEntry,
) -> EntryResolution<'a> {
    let mut resolution = EntryResolution::default();

    for name in &entry.subdistricts {
        match index.resolve(name, &entry.district) {
            Some(record) => resolution.records.push(record),
            None => {
                log::debug!("{}: no match for '{name}' in {}", entry.code, entry.district);
                resolution.missing.push(name.clone());
            }
        }
    }

    resolution
}

fn unresolved_entry(entry: &ConstituencyEntry, missing: Vec<String>) -> UnresolvedEntry {
    UnresolvedEntry {
        code: entry.code.to_string(),
        name: entry.name.clone(),
        missing,
    }
}

/// Resolves every constituency without merging, returning only the
/// unresolved report.
#[must_use]
pub fn check_constituencies(
    index: &ResolverIndex,
    mapping: &ConstituencyMapping,
) -> UnresolvedReport {
    let mut report = UnresolvedReport::default();

    for entry in &mapping.constituencies {
        let resolution = resolve_entry(index, entry);
        report.push(unresolved_entry(entry, resolution.missing));
    }

    report
}

/// Builds one feature per constituency that resolves at least one
/// sub-district, preserving mapping order.
///
/// # Errors
///
/// Returns [`BuildError::Merge`] if any constituency's union fails. No
/// partial output is returned in that case.
pub fn build_constituencies(
    index: &ResolverIndex,
    mapping: &ConstituencyMapping,
    progress: &dyn ProgressCallback,
) -> Result<BuildOutput, BuildError> {
    log::info!(
        "Processing {} constituencies...",
        mapping.constituencies.len()
    );
    progress.set_total(mapping.constituencies.len() as u64);

    let mut output = BuildOutput::default();

    for entry in &mapping.constituencies {
        progress.set_message(format!("{} - {}", entry.code, entry.name));

        let resolution = resolve_entry(index, entry);
        let upazila_count = resolution.records.len();

        let geometry = merge_geometries(resolution.records.iter().copied()).map_err(|source| {
            BuildError::Merge {
                code: entry.code.to_string(),
                source,
            }
        })?;

        output
            .report
            .push(unresolved_entry(entry, resolution.missing));

        match geometry {
            Some(geometry) => output.features.push(ConstituencyFeature {
                properties: ConstituencyProperties::from_entry(entry, upazila_count),
                geometry,
            }),
            None => {
                log::warn!("No upazilas found for {} - {}", entry.code, entry.name);
                output.skipped.push(entry.code.to_string());
            }
        }

        progress.inc(1);
    }

    progress.finish(format!(
        "Generated {} constituency boundaries",
        output.features.len()
    ));

    Ok(output)
}
