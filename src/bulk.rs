//! Chunked bulk submission.
//!
//! Documents are pulled lazily from the loader's iterator, grouped into chunks of
//! `chunk_size`, and each chunk goes to the engine as one `_bulk` request. There
//! is no retry: the first transport error stops the submission.

use thiserror::Error;
use tracing::debug;

use crate::document::IndexedDocument;
use crate::engine::{BulkOutcome, SearchEngine};
use crate::error::LoaderError;

/// A submission that stopped before the iterator was exhausted.
#[derive(Debug, Error)]
#[error("bulk submission stopped after {} indexed documents: {source}", .partial.success)]
pub struct BulkInterrupted {
    /// What the engine acknowledged before the failure.
    pub partial: BulkOutcome,
    #[source]
    pub source: LoaderError,
}

pub async fn submit<I>(
    engine: &dyn SearchEngine,
    documents: I,
    chunk_size: usize,
) -> Result<BulkOutcome, BulkInterrupted>
where
    I: IntoIterator<Item = IndexedDocument>,
{
    let mut outcome = BulkOutcome::default();
    if chunk_size == 0 {
        return Err(BulkInterrupted {
            partial: outcome,
            source: LoaderError::ConfigurationError("chunk size must be at least 1".to_string()),
        });
    }

    let mut documents = documents.into_iter();
    let mut chunk = Vec::with_capacity(chunk_size);
    let mut chunk_no = 0usize;
    loop {
        chunk.clear();
        chunk.extend(documents.by_ref().take(chunk_size));
        if chunk.is_empty() {
            break;
        }
        chunk_no += 1;

        match engine.send_bulk(&chunk).await {
            Ok(result) => {
                debug!(
                    chunk = chunk_no,
                    size = chunk.len(),
                    indexed = result.success,
                    failed = result.failure_count(),
                    "Bulk chunk sent"
                );
                outcome.merge(result);
            }
            Err(source) => {
                return Err(BulkInterrupted {
                    partial: outcome,
                    source,
                });
            }
        }

        if chunk.len() < chunk_size {
            break;
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{Value, json};

    use super::*;
    use crate::document::tag_documents;
    use crate::engine::FailureDetail;
    use crate::error::Result;

    /// Records chunk sizes; rejects odd ids; fails the nth request if asked.
    #[derive(Default)]
    struct RecordingEngine {
        chunks: Mutex<Vec<usize>>,
        fail_on_request: Option<usize>,
    }

    #[async_trait]
    impl SearchEngine for RecordingEngine {
        async fn index_exists(&self, _name: &str) -> Result<bool> {
            Ok(true)
        }

        async fn create_index(&self, _name: &str, _body: Value) -> Result<()> {
            Ok(())
        }

        async fn send_bulk(&self, chunk: &[IndexedDocument]) -> Result<BulkOutcome> {
            let mut chunks = self.chunks.lock().unwrap();
            chunks.push(chunk.len());
            if self.fail_on_request == Some(chunks.len()) {
                return Err(LoaderError::ConnectionError("connection refused".into()));
            }
            let mut outcome = BulkOutcome::default();
            for doc in chunk {
                if doc.id % 2 == 1 {
                    outcome.failed.push(FailureDetail {
                        id: doc.id.to_string(),
                        status: 400,
                        reason: "rejected".into(),
                    });
                } else {
                    outcome.success += 1;
                }
            }
            Ok(outcome)
        }
    }

    fn docs(n: usize) -> impl Iterator<Item = IndexedDocument> {
        tag_documents("idx", (0..n).map(|i| json!({ "n": i })))
    }

    #[tokio::test]
    async fn splits_into_fixed_size_chunks() {
        let engine = RecordingEngine::default();
        let outcome = submit(&engine, docs(2500), 1000).await.unwrap();

        assert_eq!(*engine.chunks.lock().unwrap(), vec![1000, 1000, 500]);
        assert_eq!(outcome.success, 1250);
        assert_eq!(outcome.failure_count(), 1250);
    }

    #[tokio::test]
    async fn exact_multiple_sends_no_empty_chunk() {
        let engine = RecordingEngine::default();
        submit(&engine, docs(4), 2).await.unwrap();
        assert_eq!(*engine.chunks.lock().unwrap(), vec![2, 2]);
    }

    #[tokio::test]
    async fn empty_input_sends_nothing() {
        let engine = RecordingEngine::default();
        let outcome = submit(&engine, docs(0), 10).await.unwrap();
        assert!(engine.chunks.lock().unwrap().is_empty());
        assert_eq!(outcome, BulkOutcome::default());
    }

    #[tokio::test]
    async fn transport_error_keeps_partial_counts() {
        let engine = RecordingEngine {
            fail_on_request: Some(2),
            ..Default::default()
        };
        let err = submit(&engine, docs(30), 10).await.unwrap_err();

        assert_eq!(err.partial.success, 5);
        assert!(matches!(err.source, LoaderError::ConnectionError(_)));
        // nothing is sent after the failing request
        assert_eq!(*engine.chunks.lock().unwrap(), vec![10, 10]);
    }

    #[tokio::test]
    async fn zero_chunk_size_is_rejected() {
        let engine = RecordingEngine::default();
        let err = submit(&engine, docs(3), 0).await.unwrap_err();
        assert!(matches!(err.source, LoaderError::ConfigurationError(_)));
        assert!(engine.chunks.lock().unwrap().is_empty());
    }
}
