//! Subcommand implementations.

use std::path::Path;
use std::time::Instant;

use constituency_map_boundary::report::DEFAULT_LISTING_LIMIT;
use constituency_map_boundary::resolver::{candidate_keys, normalize_key};
use constituency_map_boundary::{
    BoundaryError, ResolverIndex, UnresolvedReport, build, load_index, mapping, output, tables,
};
use constituency_map_boundary_models::{CatalogueFields, NameTables};
use constituency_map_cli_utils::{IndicatifProgress, MultiProgress};

use crate::{CatalogueArgs, InputArgs};

impl CatalogueArgs {
    fn fields(&self) -> CatalogueFields {
        CatalogueFields {
            name: self.name_field.clone(),
            district: self.district_field.clone(),
        }
    }
}

fn load_name_tables(path: Option<&Path>) -> Result<NameTables, BoundaryError> {
    match path {
        Some(path) => Ok(tables::load_tables(path)?),
        None => Ok(tables::default_tables()),
    }
}

fn load_catalogue_index(
    catalogue: &CatalogueArgs,
    tables_path: Option<&Path>,
) -> Result<ResolverIndex, BoundaryError> {
    let tables = load_name_tables(tables_path)?;
    log::info!("Loading upazila catalogue...");
    load_index(&catalogue.catalogue, &catalogue.fields(), &tables)
}

fn log_report(report: &UnresolvedReport, limit: usize) {
    for line in report.summary_lines(limit) {
        log::warn!("{line}");
    }
}

/// Runs the full resolve -> merge -> write pipeline.
pub fn generate(
    multi: &MultiProgress,
    inputs: &InputArgs,
    output_path: &Path,
    collection_name: &str,
    pretty: bool,
) -> Result<(), BoundaryError> {
    let start = Instant::now();

    let index = load_catalogue_index(&inputs.catalogue, inputs.tables.as_deref())?;
    let mapping = mapping::load_mapping(&inputs.mapping)?;

    let progress = IndicatifProgress::steps_bar(multi, "Merging constituencies");
    let result = build::build_constituencies(&index, &mapping, progress.as_ref())?;

    let collection = output::to_feature_collection(&result.features, collection_name)?;
    output::write_feature_collection(output_path, &collection, pretty)?;

    log::info!(
        "Generated {} constituency boundaries ({} skipped) in {:.1}s",
        result.features.len(),
        result.skipped.len(),
        start.elapsed().as_secs_f64()
    );
    log::info!("Output saved to: {}", output_path.display());

    log_report(&result.report, DEFAULT_LISTING_LIMIT);

    Ok(())
}

/// Resolves every constituency and reports unresolved names.
pub fn check(inputs: &InputArgs, limit: usize) -> Result<(), BoundaryError> {
    let index = load_catalogue_index(&inputs.catalogue, inputs.tables.as_deref())?;
    let mapping = mapping::load_mapping(&inputs.mapping)?;

    let report = build::check_constituencies(&index, &mapping);

    if report.is_empty() {
        log::info!(
            "All sub-districts of {} constituencies resolved",
            mapping.constituencies.len()
        );
    } else {
        log::info!(
            "{} unresolved names across {} of {} constituencies",
            report.total_missing(),
            report.len(),
            mapping.constituencies.len()
        );
        log_report(&report, limit);
    }

    Ok(())
}

/// Resolves one name and prints the lookup trace.
pub fn resolve(
    name: &str,
    district: &str,
    catalogue: &CatalogueArgs,
    tables_path: Option<&Path>,
) -> Result<(), BoundaryError> {
    let index = load_catalogue_index(catalogue, tables_path)?;

    let query = index.normalize_query(name);
    let district_key = normalize_key(district);
    if query != normalize_key(name) {
        println!("normalized: '{name}' -> '{query}'");
    }

    for key in candidate_keys(&query, &district_key) {
        let hit = index
            .get(&key)
            .map_or_else(|| "-".to_string(), |r| format!("{} ({})", r.name, r.district));
        println!("  {key:<50} {hit}");
    }

    match index.resolve(name, district) {
        Some(record) => println!(
            "resolved: {} ({}), catalogue feature #{}",
            record.name,
            record.district,
            record.id()
        ),
        None => println!("unresolved: '{name}'"),
    }

    Ok(())
}

/// Prints the effective name tables.
pub fn print_tables(tables_path: Option<&Path>) -> Result<(), BoundaryError> {
    let tables = load_name_tables(tables_path)?;
    print!("{}", tables::to_toml(&tables)?);
    Ok(())
}
