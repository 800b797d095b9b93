// nc_bulk_loader/src/main.rs
// Main entry point for the nc_bulk_loader CLI application.

use std::path::Path;

use clap::Parser;
use nc_bulk_loader::cli::{Cli, Commands, LoadArgs};
use nc_bulk_loader::config::ConnectionConfig;
use nc_bulk_loader::engine::SearchEngine;
use nc_bulk_loader::error::{LoaderError, Result};
use nc_bulk_loader::index_manager::ensure_index;
use nc_bulk_loader::loader::{load_csv, load_json};
use nc_bulk_loader::opensearch::OpenSearchEngine;
use nc_bulk_loader::report::LoadReport;
use serde_json::Value;
use tracing::{error, info};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(),> {
    // Initialize tracing
    let file_appender = tracing_appender::rolling::never(".", "loader.log",);
    let (non_blocking, _guard,) = tracing_appender::non_blocking(file_appender,);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info",),),)
        .with(fmt::layer().with_writer(std::io::stderr,),)
        .with(fmt::layer().with_writer(non_blocking,).with_ansi(false,),)
        .init();

    let cli = Cli::parse();
    let connection = ConnectionConfig::from(&cli.connection,);
    let engine = OpenSearchEngine::new(&connection,)?;

    let report = match &cli.command {
        Commands::CreateIndex(args,) => {
            let mapping = read_mapping(args.mapping.as_deref(),)?;
            ensure_index(&engine, &args.index, mapping.as_ref(),).await?;
            return Ok((),);
        },
        Commands::Csv(args,) => {
            prepare_index(&engine, &args.load,).await?;
            let options = args.csv_options();
            run_load(
                load_csv(&engine, &args.load.path, &args.load.index, args.load.chunk_size, &options,)
                    .await,
                &args.load.path,
            )?
        },
        Commands::Json(args,) => {
            prepare_index(&engine, args,).await?;
            run_load(
                load_json(&engine, &args.path, &args.index, args.chunk_size,).await,
                &args.path,
            )?
        },
    };

    if cli.report {
        report.save(Path::new(nc_bulk_loader::REPORT_FILE_NAME,),)?;
    }

    if cli.strict {
        report.check_strict()?;
    }

    Ok((),)
}

async fn prepare_index(engine: &dyn SearchEngine, args: &LoadArgs,) -> Result<(),> {
    if args.skip_create {
        return Ok((),);
    }
    let mapping = read_mapping(args.mapping.as_deref(),)?;
    ensure_index(engine, &args.index, mapping.as_ref(),).await?;
    Ok((),)
}

fn run_load(result: Result<LoadReport,>, path: &Path,) -> Result<LoadReport,> {
    result.inspect_err(|e| {
        if e.is_parse_error() {
            error!("Could not read {}: {}", path.display(), e);
        }
    },)
}

fn read_mapping(path: Option<&Path,>,) -> Result<Option<Value,>,> {
    let Some(path,) = path else {
        return Ok(None,);
    };
    let text = std::fs::read_to_string(path,).map_err(|e| {
        LoaderError::ConfigurationError(format!(
            "Failed to read mapping file {}: {}",
            path.display(),
            e
        ),)
    },)?;
    let mapping: Value = serde_json::from_str(&text,).map_err(|e| {
        LoaderError::ConfigurationError(format!("Mapping file {} is not valid JSON: {}", path.display(), e),)
    },)?;
    info!("Using mapping from {}", path.display());
    Ok(Some(mapping,),)
}
