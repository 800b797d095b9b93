// nc_bulk_loader/src/cli.rs
// Command Line Interface (CLI) specific logic for nc_bulk_loader.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::config::ConnectionConfig;
use crate::loader::csv::CsvOptions;

/// Load CSV or JSON files into an OpenSearch index.
#[derive(Parser, Debug,)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    #[clap(flatten)]
    pub connection: ConnectionArgs,

    /// Exit with an error when any document fails or the bulk submission is cut short.
    #[clap(long, global = true)]
    pub strict: bool,

    /// Write a structured load report (ingestion_report.json) at the end.
    #[clap(long, global = true)]
    pub report: bool,
}

#[derive(Subcommand, Debug,)]
pub enum Commands {
    /// Create an index unless it already exists
    CreateIndex(CreateIndexArgs,),
    /// Load a CSV file (header row required)
    Csv(CsvArgs,),
    /// Load a JSON file (array, {"data": [...]}, or a single document)
    Json(LoadArgs,),
}

#[derive(Args, Debug, Clone,)]
pub struct ConnectionArgs {
    /// Search engine host
    #[clap(long, env = "OPENSEARCH_HOST", default_value = crate::DEFAULT_HOST, global = true)]
    pub host: String,

    /// Search engine port
    #[clap(long, env = "OPENSEARCH_PORT", default_value_t = crate::DEFAULT_PORT, global = true)]
    pub port: u16,

    /// Connect over HTTPS
    #[clap(long, env = "OPENSEARCH_USE_TLS", global = true)]
    pub use_tls: bool,

    /// Verify the server certificate (only meaningful with --use-tls)
    #[clap(long, env = "OPENSEARCH_VERIFY_CERTS", global = true)]
    pub verify_certs: bool,
}

impl From<&ConnectionArgs,> for ConnectionConfig {
    fn from(args: &ConnectionArgs,) -> Self {
        ConnectionConfig {
            host:                args.host.clone(),
            port:                args.port,
            use_tls:             args.use_tls,
            verify_certificates: args.verify_certs,
        }
    }
}

#[derive(Args, Debug, Clone,)]
pub struct CreateIndexArgs {
    /// Name of the index
    #[clap(short, long)]
    pub index:   String,
    /// JSON file holding the index mapping (e.g. {"properties": {...}})
    #[clap(long)]
    pub mapping: Option<PathBuf,>,
}

#[derive(Args, Debug, Clone,)]
pub struct LoadArgs {
    /// Path to the data file to load
    #[clap(short, long)]
    pub path: PathBuf,

    /// Name of the target index
    #[clap(short, long)]
    pub index: String,

    /// Number of documents per bulk request
    #[clap(long, default_value_t = crate::DEFAULT_CHUNK_SIZE, value_parser = parse_chunk_size)]
    pub chunk_size: usize,

    /// JSON file holding the mapping used if the index has to be created
    #[clap(long)]
    pub mapping: Option<PathBuf,>,

    /// Do not check for or create the index before loading
    #[clap(long)]
    pub skip_create: bool,
}

#[derive(Args, Debug, Clone,)]
pub struct CsvArgs {
    #[clap(flatten)]
    pub load: LoadArgs,

    /// Cell value to treat as missing, in addition to empty cells (repeatable)
    #[clap(long = "na-value")]
    pub na_values: Vec<String,>,

    /// Treat the common missing-value spellings (NA, NULL, NaN, n/a, ...) as empty cells
    #[clap(long, default_value_t = true, action = ArgAction::Set)]
    pub keep_default_na: bool,

    /// Field delimiter
    #[clap(long, default_value_t = ',', value_parser = parse_delimiter)]
    pub delimiter: char,
}

impl CsvArgs {
    pub fn csv_options(&self,) -> CsvOptions {
        CsvOptions::with_markers(self.delimiter as u8, self.keep_default_na, &self.na_values,)
    }
}

fn parse_chunk_size(s: &str,) -> Result<usize, String,> {
    let size: usize = s.parse().map_err(|e| format!("invalid chunk size `{}`: {}", s, e),)?;
    if size == 0 {
        return Err("chunk size must be at least 1".to_string(),);
    }
    Ok(size,)
}

fn parse_delimiter(s: &str,) -> Result<char, String,> {
    let mut chars = s.chars();
    match (chars.next(), chars.next(),) {
        (Some(c,), None,) if c.is_ascii() => Ok(c,),
        _ => Err(format!("delimiter must be a single ASCII character, got `{}`", s),),
    }
}
