#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for building constituency boundaries.
//!
//! Resolves the sub-district names listed for each constituency against an
//! admin3 boundary catalogue and writes one dissolved boundary per
//! constituency as `GeoJSON`. Unresolved names are reported as warnings and
//! never fail the run.

mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use constituency_map_boundary::output::DEFAULT_COLLECTION_NAME;
use constituency_map_boundary::report::DEFAULT_LISTING_LIMIT;

#[derive(Parser)]
#[command(
    name = "constituency_map",
    about = "Constituency boundary builder",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve, merge, and write constituency boundaries
    Generate {
        #[command(flatten)]
        inputs: InputArgs,
        /// Output `GeoJSON` path
        #[arg(long, default_value = "data/constituencies.geojson")]
        output: PathBuf,
        /// `name` member of the output collection
        #[arg(long, default_value = DEFAULT_COLLECTION_NAME)]
        collection_name: String,
        /// Pretty-print the output document
        #[arg(long)]
        pretty: bool,
    },
    /// Resolve every constituency and report unresolved names without
    /// writing output
    Check {
        #[command(flatten)]
        inputs: InputArgs,
        /// Maximum constituencies to list before summarizing the rest
        #[arg(long, default_value_t = DEFAULT_LISTING_LIMIT)]
        limit: usize,
    },
    /// Resolve a single sub-district name and show the matched record
    Resolve {
        /// Sub-district name as spelled in the mapping
        name: String,
        /// District used as lookup context
        #[arg(long, default_value = "")]
        district: String,
        #[command(flatten)]
        catalogue: CatalogueArgs,
        /// Name tables TOML file (defaults to the embedded tables)
        #[arg(long)]
        tables: Option<PathBuf>,
    },
    /// Print the effective name tables as TOML
    Tables {
        /// Name tables TOML file (defaults to the embedded tables)
        #[arg(long)]
        tables: Option<PathBuf>,
    },
}

/// Catalogue location and field names.
#[derive(Args)]
struct CatalogueArgs {
    /// Sub-district boundary catalogue (`GeoJSON` `FeatureCollection`)
    #[arg(long, default_value = "bgd_admin_boundaries.geojson/bgd_admin3.geojson")]
    catalogue: PathBuf,
    /// Catalogue property holding the sub-district name
    #[arg(long, default_value = "adm3_name")]
    name_field: String,
    /// Catalogue property holding the district name
    #[arg(long, default_value = "adm2_name")]
    district_field: String,
}

/// Inputs shared by `generate` and `check`.
#[derive(Args)]
struct InputArgs {
    #[command(flatten)]
    catalogue: CatalogueArgs,
    /// Constituency mapping JSON
    #[arg(long, default_value = "data/constituency_mapping.json")]
    mapping: PathBuf,
    /// Name tables TOML file (defaults to the embedded tables)
    #[arg(long)]
    tables: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = constituency_map_cli_utils::init_logger();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            inputs,
            output,
            collection_name,
            pretty,
        } => commands::generate(&multi, &inputs, &output, &collection_name, pretty)?,
        Commands::Check { inputs, limit } => commands::check(&inputs, limit)?,
        Commands::Resolve {
            name,
            district,
            catalogue,
            tables,
        } => commands::resolve(&name, &district, &catalogue, tables.as_deref())?,
        Commands::Tables { tables } => commands::print_tables(tables.as_deref())?,
    }

    Ok(())
}
