// nc_bulk_loader/src/document.rs
// Documents as they travel from a loader to the bulk sink.

use serde_json::{Value, json};

/// A document body. CSV rows are flat objects of strings; JSON elements are
/// passed through as parsed.
pub type Document = Value;

/// A document tagged with its target index and positional identifier.
#[derive(Debug, Clone, PartialEq,)]
pub struct IndexedDocument {
    pub index:  String,
    /// Zero-based position in the source file. Not stable across reloads.
    pub id:     u64,
    pub source: Document,
}

impl IndexedDocument {
    pub fn new(index: impl Into<String,>, id: u64, source: Document,) -> Self {
        Self {
            index: index.into(),
            id,
            source,
        }
    }

    /// The `_bulk` action line for this document.
    pub fn action(&self,) -> Value {
        json!({"index": {"_index": self.index, "_id": self.id.to_string()}})
    }
}

/// Tags each document with `index` and its position, lazily.
pub fn tag_documents<I,>(index: &str, documents: I,) -> impl Iterator<Item = IndexedDocument,>
where
    I: IntoIterator<Item = Document,>,
{
    let index = index.to_string();
    documents
        .into_iter()
        .enumerate()
        .map(move |(idx, source,)| IndexedDocument::new(index.clone(), idx as u64, source,),)
}
