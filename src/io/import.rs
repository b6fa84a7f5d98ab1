//! Bulk import service.
//!
//! Runs an import in three phases: validate the whole document up front,
//! commit records one at a time with per-record fault isolation, then report
//! the aggregate outcome. A document that fails the structural check is
//! rejected before any record is committed; a record that fails mid-run
//! never stops the records after it.

use crate::io::document::ImportedSnippet;
use crate::io::schema::validate_document;
use crate::models::{ImportProgress, RecordFailure};
use crate::notify::{Notifier, ToastLevel};
use crate::store::SnippetStore;
use crate::{Error, Result};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;
use uuid::Uuid;

/// Message raised when a document fails the structural check.
const INVALID_FORMAT: &str = "Invalid import file format";

/// Final tally of a completed import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    /// Number of records in the document.
    pub total: usize,
    /// Number of records committed.
    pub succeeded: usize,
    /// Number of records that failed.
    pub failed: usize,
    /// Itemized failures, in processing order.
    pub errors: Vec<RecordFailure>,
}

impl ImportReport {
    /// Whether any record failed.
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

impl From<ImportProgress> for ImportReport {
    fn from(progress: ImportProgress) -> Self {
        Self {
            total: progress.total,
            succeeded: progress.succeeded,
            failed: progress.failed,
            errors: progress.errors,
        }
    }
}

/// Imports snippet collections from export documents.
///
/// One run at a time: starting a second run while one is active is rejected
/// with [`Error::ImportInProgress`] and has no side effects. Progress is
/// published through a watch channel after every record, so observers that
/// poll slower than records are processed see only the newest snapshot. The
/// busy flag and the published snapshot are cleared when the run finishes,
/// whatever the outcome.
pub struct ImportService<S, N> {
    store: Arc<S>,
    notifier: N,
    busy: AtomicBool,
    progress_tx: watch::Sender<Option<ImportProgress>>,
}

/// Clears the busy flag and retires the published snapshot when a run
/// leaves scope.
struct ReleaseGuard<'a> {
    busy: &'a AtomicBool,
    progress_tx: &'a watch::Sender<Option<ImportProgress>>,
}

impl Drop for ReleaseGuard<'_> {
    fn drop(&mut self) {
        self.progress_tx.send_replace(None);
        self.busy.store(false, Ordering::SeqCst);
    }
}

impl<S: SnippetStore, N: Notifier> ImportService<S, N> {
    /// Creates an import service over the given store and notifier.
    pub fn new(store: Arc<S>, notifier: N) -> Self {
        let (progress_tx, _) = watch::channel(None);
        Self {
            store,
            notifier,
            busy: AtomicBool::new(false),
            progress_tx,
        }
    }

    /// Returns a receiver observing the latest progress snapshot.
    ///
    /// The value is `None` outside a run. Snapshots are replaced, not
    /// queued: an observer that misses an update sees the next one.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<ImportProgress>> {
        self.progress_tx.subscribe()
    }

    /// Whether a run is currently active.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Imports the export document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ImportInProgress`] if a run is already active,
    /// [`Error::OperationFailed`] if the file cannot be read, and
    /// [`Error::InvalidDocument`] if the payload is not valid JSON or fails
    /// the structural check. Per-record failures do not fail the run.
    pub async fn import_from_file(&self, path: &Path) -> Result<ImportReport> {
        let _guard = self.acquire()?;
        let outcome = match Self::load(path) {
            Ok(document) => self.run(&document).await,
            Err(e) => Err(e),
        };
        self.finish(outcome).await
    }

    /// Imports an export document from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ImportInProgress`] if a run is already active and
    /// [`Error::InvalidDocument`] if the payload is not valid JSON or fails
    /// the structural check. Per-record failures do not fail the run.
    pub async fn import_from_str(&self, payload: &str) -> Result<ImportReport> {
        let _guard = self.acquire()?;
        let outcome = match Self::parse(payload) {
            Ok(document) => self.run(&document).await,
            Err(e) => Err(e),
        };
        self.finish(outcome).await
    }

    /// Imports an already parsed export document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ImportInProgress`] if a run is already active and
    /// [`Error::InvalidDocument`] if the document fails the structural
    /// check. Per-record failures do not fail the run.
    pub async fn import_document(&self, document: &Value) -> Result<ImportReport> {
        let _guard = self.acquire()?;
        let outcome = self.run(document).await;
        self.finish(outcome).await
    }

    fn acquire(&self) -> Result<ReleaseGuard<'_>> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(Error::ImportInProgress);
        }
        Ok(ReleaseGuard {
            busy: &self.busy,
            progress_tx: &self.progress_tx,
        })
    }

    fn load(path: &Path) -> Result<Value> {
        let payload = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "open_import_file".to_string(),
            cause: e.to_string(),
        })?;
        Self::parse(&payload)
    }

    fn parse(payload: &str) -> Result<Value> {
        serde_json::from_str(payload).map_err(|e| Error::InvalidDocument(e.to_string()))
    }

    fn validated_records(document: &Value) -> Result<&[Value]> {
        if !validate_document(document) {
            return Err(Error::InvalidDocument(INVALID_FORMAT.to_string()));
        }
        document
            .get("snippets")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::InvalidDocument(INVALID_FORMAT.to_string()))
    }

    async fn run(&self, document: &Value) -> Result<ImportProgress> {
        let records = Self::validated_records(document)?;
        // Correlation id tying this run's log lines together.
        let run_id = Uuid::new_v4();
        let version = document
            .get("version")
            .and_then(Value::as_str)
            .unwrap_or_default();
        tracing::debug!(
            run_id = %run_id,
            version,
            records = records.len(),
            "import document accepted"
        );

        let mut progress = ImportProgress::new(records.len());
        self.publish(&progress);

        for record in records {
            if let Err(e) = self.import_record(record).await {
                let title = record
                    .get("title")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                tracing::error!(run_id = %run_id, title = %title, error = %e, "failed to import snippet");
                progress.record_failure(title, e.to_string());
            } else {
                progress.record_success();
            }
            self.publish(&progress);
        }
        Ok(progress)
    }

    async fn import_record(&self, record: &Value) -> Result<()> {
        let imported: ImportedSnippet = serde_json::from_value(record.clone())
            .map_err(|e| Error::InvalidInput(format!("malformed snippet record: {e}")))?;
        self.store
            .add_snippet(imported.into_new_snippet(), false)
            .await?;
        Ok(())
    }

    fn publish(&self, progress: &ImportProgress) {
        self.progress_tx.send_replace(Some(progress.clone()));
    }

    async fn finish(&self, outcome: Result<ImportProgress>) -> Result<ImportReport> {
        match outcome {
            Ok(progress) => {
                let report = ImportReport::from(progress);
                if report.has_failures() {
                    self.notifier.add_toast(
                        &format!(
                            "Imported {} snippets, {} failed. Check logs for details.",
                            report.succeeded, report.failed
                        ),
                        ToastLevel::Warning,
                    );
                } else {
                    self.notifier.add_toast(
                        &format!("Successfully imported {} snippets", report.succeeded),
                        ToastLevel::Success,
                    );
                    if let Err(e) = self.store.reload_snippets().await {
                        tracing::error!(error = %e, "reload after import failed");
                        self.notifier.add_toast(&e.to_string(), ToastLevel::Error);
                        return Err(e);
                    }
                }
                Ok(report)
            }
            Err(e) => {
                tracing::error!(error = %e, "import rejected");
                self.notifier.add_toast(&e.to_string(), ToastLevel::Error);
                Err(e)
            }
        }
    }
}
