// nc_bulk_loader/src/engine.rs
// The seam between the loaders and the search engine.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::document::IndexedDocument;
use crate::error::Result;

/// One document the engine refused.
#[derive(Debug, Clone, PartialEq, Serialize,)]
pub struct FailureDetail {
    pub id:     String,
    pub status: u16,
    pub reason: String,
}

/// Result of one or more bulk requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize,)]
pub struct BulkOutcome {
    pub success: usize,
    pub failed:  Vec<FailureDetail,>,
}

impl BulkOutcome {
    pub fn merge(&mut self, other: BulkOutcome,) {
        self.success += other.success;
        self.failed.extend(other.failed,);
    }

    pub fn failure_count(&self,) -> usize {
        self.failed.len()
    }
}

/// Operations the loader needs from a search engine.
///
/// Every call is a single network round trip. Implementations must not retry;
/// transport failures surface as `LoaderError::ConnectionError`.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Whether an index named `name` exists.
    async fn index_exists(&self, name: &str,) -> Result<bool,>;

    /// Creates `name` with the given request body (`{}` or `{"mappings": ...}`).
    async fn create_index(&self, name: &str, body: Value,) -> Result<(),>;

    /// Sends one bulk request containing `chunk` and classifies each item.
    async fn send_bulk(&self, chunk: &[IndexedDocument],) -> Result<BulkOutcome,>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_accumulates_counts_and_failures() {
        let mut total = BulkOutcome {
            success: 3,
            failed:  vec![],
        };
        total.merge(BulkOutcome {
            success: 1,
            failed:  vec![FailureDetail {
                id:     "4".into(),
                status: 400,
                reason: "mapper_parsing_exception".into(),
            }],
        },);
        assert_eq!(total.success, 4);
        assert_eq!(total.failure_count(), 1);
        assert_eq!(total.failed[0].id, "4");
    }
}
