// nc_bulk_loader/src/report.rs
// Outcome of a single load, as logged and as written to the report file.

use std::path::Path;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::bulk::BulkInterrupted;
use crate::engine::{BulkOutcome, FailureDetail};
use crate::error::{LoaderError, Result};

#[derive(Serialize, Debug, Clone, PartialEq,)]
pub struct LoadReport {
    pub source:        String,
    pub index:         String,
    pub success_count: usize,
    pub failure_count: usize,
    pub failures:      Vec<FailureDetail,>,
    /// Set when the bulk submission was cut short.
    pub error:         Option<String,>,
}

impl LoadReport {
    pub fn completed(source: &Path, index: &str, outcome: BulkOutcome,) -> Self {
        Self {
            source:        source.display().to_string(),
            index:         index.to_string(),
            success_count: outcome.success,
            failure_count: outcome.failed.len(),
            failures:      outcome.failed,
            error:         None,
        }
    }

    pub fn interrupted(source: &Path, index: &str, interrupted: BulkInterrupted,) -> Self {
        let error = Some(interrupted.source.to_string(),);
        Self {
            error,
            ..Self::completed(source, index, interrupted.partial,)
        }
    }

    /// True when every document was indexed and the submission ran to the end.
    pub fn is_clean(&self,) -> bool {
        self.failure_count == 0 && self.error.is_none()
    }

    /// Turns an unclean report into an error, for runs that must not end with
    /// documents missing from the index.
    pub fn check_strict(&self,) -> Result<(),> {
        if self.is_clean() {
            return Ok((),);
        }
        let not_indexed = match &self.error {
            Some(err,) => format!("bulk submission stopped after {} documents ({})", self.success_count, err),
            None => format!(
                "{} of {} documents were not indexed",
                self.failure_count,
                self.failure_count + self.success_count
            ),
        };
        Err(LoaderError::BulkError(format!(
            "Strict mode enabled. Load into '{}' is incomplete: {}",
            self.index, not_indexed
        ),),)
    }

    pub fn log_summary(&self,) {
        if let Some(err,) = &self.error {
            error!("Error during bulk insert: {}", err);
            if self.success_count > 0 {
                warn!(
                    "{} documents were indexed into '{}' before the error",
                    self.success_count, self.index
                );
            }
            return;
        }

        info!("Successfully indexed {} documents", self.success_count);
        if self.failure_count > 0 {
            warn!("Failed to index {} documents", self.failure_count);
            for failure in self.failures.iter().take(10,) {
                warn!(id = %failure.id, status = failure.status, "{}", failure.reason);
            }
        }
    }

    pub fn save(&self, path: &Path,) -> Result<(),> {
        let json = serde_json::to_string_pretty(self,).map_err(|e| {
            LoaderError::Other(format!("Failed to serialize load report: {}", e),)
        },)?;
        std::fs::write(path, json,).map_err(|e| {
            LoaderError::Other(format!("Failed to write {}: {}", path.display(), e),)
        },)?;
        info!("Load report saved to {}", path.display());
        Ok((),)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn failure(id: &str,) -> FailureDetail {
        FailureDetail {
            id:     id.to_string(),
            status: 400,
            reason: "mapper_parsing_exception".to_string(),
        }
    }

    #[test]
    fn completed_report_counts_failures() {
        let report = LoadReport::completed(
            &PathBuf::from("data/orders.csv",),
            "orders",
            BulkOutcome {
                success: 8,
                failed:  vec![failure("3",), failure("5",)],
            },
        );
        assert_eq!(report.success_count, 8);
        assert_eq!(report.failure_count, 2);
        assert!(!report.is_clean());
        assert!(report.error.is_none());
    }

    #[test]
    fn interrupted_report_keeps_partial_progress() {
        let report = LoadReport::interrupted(
            &PathBuf::from("orders.json",),
            "orders",
            BulkInterrupted {
                partial: BulkOutcome {
                    success: 1000,
                    failed:  vec![],
                },
                source:  LoaderError::ConnectionError("connection refused".into(),),
            },
        );
        assert_eq!(report.success_count, 1000);
        assert_eq!(
            report.error.as_deref(),
            Some("Failed to connect to search engine: connection refused")
        );
        assert!(!report.is_clean());
    }

    #[test]
    fn strict_check_passes_clean_report() {
        let report = LoadReport::completed(
            &PathBuf::from("a.csv",),
            "a",
            BulkOutcome {
                success: 3,
                failed:  vec![],
            },
        );
        assert!(report.check_strict().is_ok());
    }

    #[test]
    fn strict_check_rejects_failed_documents() {
        let report = LoadReport::completed(
            &PathBuf::from("a.csv",),
            "a",
            BulkOutcome {
                success: 1,
                failed:  vec![failure("1",)],
            },
        );
        let err = report.check_strict().unwrap_err();
        assert!(matches!(err, LoaderError::BulkError(_)));
        assert!(err.to_string().contains("1 of 2 documents were not indexed"));
    }

    #[test]
    fn strict_check_rejects_interrupted_submission() {
        let report = LoadReport::interrupted(
            &PathBuf::from("a.json",),
            "a",
            BulkInterrupted {
                partial: BulkOutcome::default(),
                source:  LoaderError::ConnectionError("connection refused".into(),),
            },
        );
        let err = report.check_strict().unwrap_err();
        assert!(matches!(err, LoaderError::BulkError(_)));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn save_writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ingestion_report.json",);
        let report = LoadReport::completed(
            &PathBuf::from("a.csv",),
            "a",
            BulkOutcome {
                success: 2,
                failed:  vec![],
            },
        );
        report.save(&path,).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path,).unwrap(),).unwrap();
        assert_eq!(written["success_count"], 2);
        assert_eq!(written["index"], "a");
        assert!(written["error"].is_null());
    }
}
