// nc_bulk_loader/src/lib.rs
// Public API for loading CSV and JSON files into an OpenSearch index.

pub mod bulk;
pub mod cli;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod index_manager;
pub mod loader;
pub mod opensearch;
pub mod report;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 9200;
pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const REPORT_FILE_NAME: &str = "ingestion_report.json";
