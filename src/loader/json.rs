//! JSON source.
//!
//! Supported inputs:
//! - A JSON array: every element is a document.
//! - An object with a `data` field: the elements of `data` (or `data` itself
//!   when it is not an array).
//! - Anything else: the whole value is one document.
//!
//! Values are passed through untouched, `null` included.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::document::Document;
use crate::error::Result;

/// Field that wraps the document list in `{"data": [...]}` exports.
pub const DATA_FIELD: &str = "data";

/// Parse a JSON file into its document sequence.
pub fn read_json_documents(path: impl AsRef<Path>) -> Result<Vec<Document>> {
    let text = fs::read_to_string(path)?;
    read_json_documents_from_str(&text)
}

pub fn read_json_documents_from_str(input: &str) -> Result<Vec<Document>> {
    let value: Value = serde_json::from_str(input)?;
    Ok(resolve_documents(value))
}

pub fn resolve_documents(value: Value) -> Vec<Document> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut obj) if obj.contains_key(DATA_FIELD) => {
            match obj.remove(DATA_FIELD) {
                Some(Value::Array(items)) => items,
                Some(other) => vec![other],
                None => Vec::new(),
            }
        }
        other => vec![other],
    }
}
