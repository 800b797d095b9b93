// nc_bulk_loader/src/index_manager.rs
// Makes sure the target index exists before documents are sent.

use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::engine::SearchEngine;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub enum IndexStatus {
    Created,
    AlreadyExists,
}

/// Creates `name` unless it already exists. An existing index is left untouched,
/// whatever `mapping` says. Engine errors propagate.
#[instrument(skip(engine, mapping))]
pub async fn ensure_index(
    engine: &dyn SearchEngine,
    name: &str,
    mapping: Option<&Value,>,
) -> Result<IndexStatus,> {
    if engine.index_exists(name,).await? {
        info!("Index '{}' already exists", name);
        return Ok(IndexStatus::AlreadyExists,);
    }

    engine.create_index(name, creation_body(mapping,),).await?;
    info!("Created index: {}", name);
    Ok(IndexStatus::Created,)
}

fn creation_body(mapping: Option<&Value,>,) -> Value {
    match mapping {
        Some(m,) if !is_empty(m,) => json!({ "mappings": m }),
        _ => json!({}),
    }
}

// Null, `{}` and `[]` mean "no mapping".
fn is_empty(value: &Value,) -> bool {
    match value {
        Value::Null => true,
        Value::Object(obj,) => obj.is_empty(),
        Value::Array(arr,) => arr.is_empty(),
        _ => false,
    }
}
