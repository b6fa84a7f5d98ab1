//! Import progress reporting types.

/// One failed record: the snippet title and the error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    /// Title of the record that failed.
    pub title: String,
    /// Message of the error that caused the failure.
    pub error: String,
}

/// Progress of a bulk import run.
///
/// Counters satisfy `succeeded + failed == current` and `current <= total`
/// at every point; `current` only ever grows. The import service publishes
/// a fresh clone of this value after each record, so observers always see a
/// consistent snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportProgress {
    /// Number of records in the document.
    pub total: usize,
    /// Number of records processed so far (success or failure).
    pub current: usize,
    /// Number of records committed successfully.
    pub succeeded: usize,
    /// Number of records that failed.
    pub failed: usize,
    /// Itemized failures, in processing order.
    pub errors: Vec<RecordFailure>,
}

impl ImportProgress {
    /// Creates a progress record for a run over `total` records.
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    /// Records one successful commit.
    pub const fn record_success(&mut self) {
        self.succeeded += 1;
        self.current += 1;
    }

    /// Records one failed record.
    pub fn record_failure(&mut self, title: impl Into<String>, error: impl Into<String>) {
        self.failed += 1;
        self.current += 1;
        self.errors.push(RecordFailure {
            title: title.into(),
            error: error.into(),
        });
    }

    /// Returns the completion percentage (0.0 to 100.0).
    #[must_use]
    pub fn percent_complete(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let pct = (self.current as f64 / self.total as f64) * 100.0;
        pct
    }

    /// Whether every record has been processed.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.current == self.total
    }
}
