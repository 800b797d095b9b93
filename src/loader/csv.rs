//! CSV source: one document per row.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde_json::{Map, Value};

use crate::document::{Document, IndexedDocument, tag_documents};
use crate::error::{LoaderError, Result};

/// Cell values read as missing unless told otherwise, the usual spreadsheet
/// and dataframe spellings of "no value".
pub const DEFAULT_NULL_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Options for reading a CSV file.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    pub delimiter: u8,
    /// Cell values treated like an empty cell, compared verbatim.
    pub null_markers: Vec<String>,
}

impl CsvOptions {
    /// `extra` markers on top of [`DEFAULT_NULL_MARKERS`], or on their own
    /// when `keep_defaults` is off.
    pub fn with_markers(delimiter: u8, keep_defaults: bool, extra: &[String]) -> Self {
        let mut null_markers: Vec<String> = if keep_defaults {
            DEFAULT_NULL_MARKERS.iter().map(|m| m.to_string()).collect()
        } else {
            Vec::new()
        };
        for marker in extra {
            if !null_markers.contains(marker) {
                null_markers.push(marker.clone());
            }
        }
        Self {
            delimiter,
            null_markers,
        }
    }
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self::with_markers(b',', true, &[])
    }
}

/// A CSV file read fully into memory.
#[derive(Debug, Clone)]
pub struct CsvSource {
    headers: Vec<String>,
    rows: Vec<csv::StringRecord>,
    null_markers: Vec<String>,
}

impl CsvSource {
    pub fn from_path(path: impl AsRef<Path>, options: &CsvOptions) -> Result<Self> {
        let rdr = Self::builder(options).from_path(path)?;
        Self::from_csv_reader(rdr, options)
    }

    pub fn from_reader<R: Read>(reader: R, options: &CsvOptions) -> Result<Self> {
        Self::from_csv_reader(Self::builder(options).from_reader(reader), options)
    }

    fn builder(options: &CsvOptions) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        // short rows are padded with empty cells; long rows are rejected below
        builder
            .has_headers(true)
            .delimiter(options.delimiter)
            .flexible(true);
        builder
    }

    fn from_csv_reader<R: Read>(mut rdr: csv::Reader<R>, options: &CsvOptions) -> Result<Self> {
        let raw_headers = rdr.headers()?.clone();
        if raw_headers.is_empty() {
            return Err(LoaderError::ParseError("csv input has no header row".to_string()));
        }
        let headers = dedupe_headers(raw_headers.iter());

        let mut rows = Vec::new();
        for (row_idx0, result) in rdr.records().enumerate() {
            let record = result?;
            if record.len() > headers.len() {
                // header is line 1
                return Err(LoaderError::ParseError(format!(
                    "line {}: expected {} fields, saw {}",
                    row_idx0 + 2,
                    headers.len(),
                    record.len()
                )));
            }
            rows.push(record);
        }

        Ok(Self {
            headers,
            rows,
            null_markers: options.null_markers.clone(),
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows as flat string objects, missing cells replaced with `""`.
    pub fn into_rows(self) -> impl Iterator<Item = Document> {
        let Self {
            headers,
            rows,
            null_markers,
        } = self;
        rows.into_iter().map(move |record| {
            let mut doc = Map::with_capacity(headers.len());
            for (idx, name) in headers.iter().enumerate() {
                let cell = match record.get(idx) {
                    Some(raw) if !is_null(raw, &null_markers) => raw.to_string(),
                    _ => String::new(),
                };
                doc.insert(name.clone(), Value::String(cell));
            }
            Value::Object(doc)
        })
    }

    pub fn into_documents(self, index: &str) -> impl Iterator<Item = IndexedDocument> {
        tag_documents(index, self.into_rows())
    }
}

fn is_null(raw: &str, markers: &[String]) -> bool {
    raw.is_empty() || markers.iter().any(|m| m == raw)
}

/// `a,b,a,a` becomes `a,b,a.1,a.2`.
fn dedupe_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let raw: Vec<&str> = raw.collect();
    let mut taken: HashMap<String, usize> = HashMap::new();
    for name in &raw {
        taken.insert(name.to_string(), 0);
    }

    let mut headers = Vec::with_capacity(raw.len());
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for name in raw {
        let count = seen.entry(name).or_insert(0);
        if *count == 0 {
            headers.push(name.to_string());
        } else {
            let mut suffix = *count;
            let mut candidate = format!("{}.{}", name, suffix);
            while taken.contains_key(&candidate) {
                suffix += 1;
                candidate = format!("{}.{}", name, suffix);
            }
            *count = suffix;
            taken.insert(candidate.clone(), 0);
            headers.push(candidate);
        }
        *count += 1;
    }
    headers
}
