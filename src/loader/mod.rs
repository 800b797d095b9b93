// nc_bulk_loader/src/loader/mod.rs
// Load a file into an index: parse, tag, submit, report.

pub mod csv;
pub mod json;

use std::path::Path;

use tracing::info;

use crate::bulk;
use crate::document::IndexedDocument;
use crate::engine::SearchEngine;
use crate::error::Result;
use crate::report::LoadReport;
use self::csv::{CsvOptions, CsvSource};

/// Loads every row of a CSV file into `index`.
///
/// Read and parse errors are returned. Errors during bulk submission are not:
/// they are logged and recorded in the returned report.
pub async fn load_csv(
    engine: &dyn SearchEngine,
    path: &Path,
    index: &str,
    chunk_size: usize,
    options: &CsvOptions,
) -> Result<LoadReport,> {
    let source = CsvSource::from_path(path, options,)?;
    info!(
        "Read {} rows ({} columns) from {}",
        source.len(),
        source.headers().len(),
        path.display()
    );
    Ok(submit_and_report(engine, path, index, source.into_documents(index,), chunk_size,).await,)
}

/// Loads a JSON file into `index`; see [`json::resolve_documents`] for the
/// accepted shapes. Error handling matches [`load_csv`].
pub async fn load_json(
    engine: &dyn SearchEngine,
    path: &Path,
    index: &str,
    chunk_size: usize,
) -> Result<LoadReport,> {
    let documents = json::read_json_documents(path,)?;
    info!("Read {} documents from {}", documents.len(), path.display());
    let tagged = crate::document::tag_documents(index, documents,);
    Ok(submit_and_report(engine, path, index, tagged, chunk_size,).await,)
}

async fn submit_and_report(
    engine: &dyn SearchEngine,
    path: &Path,
    index: &str,
    documents: impl Iterator<Item = IndexedDocument,>,
    chunk_size: usize,
) -> LoadReport {
    let report = match bulk::submit(engine, documents, chunk_size,).await {
        Ok(outcome,) => LoadReport::completed(path, index, outcome,),
        Err(interrupted,) => LoadReport::interrupted(path, index, interrupted,),
    };
    report.log_summary();
    report
}
