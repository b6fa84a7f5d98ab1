//! Snippet collection export.
//!
//! Serializes the full collection into the versioned envelope. Output is a
//! pure function of the collection and the supplied clock instant, so a
//! fixed input always produces identical bytes.

use crate::io::document::{ExportDocument, ExportedSnippet};
use crate::models::Snippet;
use crate::notify::{Notifier, ToastLevel};
use crate::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use std::io::Write;
use std::path::Path;

/// Envelope version written to every export.
pub const EXPORT_VERSION: &str = "1.0";

/// Toast raised when an export completes.
const EXPORT_OK: &str = "Snippets exported successfully";

/// Toast raised when serialization or the write fails.
const EXPORT_FAILED: &str = "Failed to export snippets";

/// Serializes snippet collections into export documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportSerializer;

impl ExportSerializer {
    /// Creates a new serializer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builds the export envelope for the given collection and instant.
    ///
    /// Snippets appear complete and in collection order; nothing is filtered
    /// or transformed.
    #[must_use]
    pub fn document(&self, snippets: &[Snippet], at: DateTime<Utc>) -> ExportDocument {
        ExportDocument {
            version: EXPORT_VERSION.to_string(),
            exported_at: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            snippets: snippets.iter().map(ExportedSnippet::from).collect(),
        }
    }

    /// Serializes the collection to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] if serialization fails.
    pub fn to_string(&self, snippets: &[Snippet], at: DateTime<Utc>) -> Result<String> {
        serde_json::to_string_pretty(&self.document(snippets, at)).map_err(|e| {
            Error::OperationFailed {
                operation: "serialize_export".to_string(),
                cause: e.to_string(),
            }
        })
    }

    /// Writes the serialized collection to a writer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] if serialization or the write
    /// fails.
    pub fn write_to<W: Write>(
        &self,
        writer: &mut W,
        snippets: &[Snippet],
        at: DateTime<Utc>,
    ) -> Result<()> {
        let payload = self.to_string(snippets, at)?;
        writer
            .write_all(payload.as_bytes())
            .map_err(|e| Error::OperationFailed {
                operation: "write_export".to_string(),
                cause: e.to_string(),
            })
    }

    /// Writes the serialized collection to a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] if serialization or the write
    /// fails.
    pub fn export_to_file(
        &self,
        path: &Path,
        snippets: &[Snippet],
        at: DateTime<Utc>,
    ) -> Result<()> {
        let payload = self.to_string(snippets, at)?;
        std::fs::write(path, payload).map_err(|e| Error::OperationFailed {
            operation: "write_export_file".to_string(),
            cause: e.to_string(),
        })
    }

    /// Writes the collection to a file and reports the outcome as a toast.
    ///
    /// Success raises [`EXPORT_OK`]; a serialization or write failure
    /// raises [`EXPORT_FAILED`] and logs the cause before propagating it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] if serialization or the write
    /// fails.
    pub fn export_and_notify<N: Notifier>(
        &self,
        path: &Path,
        snippets: &[Snippet],
        at: DateTime<Utc>,
        notifier: &N,
    ) -> Result<()> {
        match self.export_to_file(path, snippets, at) {
            Ok(()) => {
                notifier.add_toast(EXPORT_OK, ToastLevel::Success);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, path = %path.display(), "export failed");
                notifier.add_toast(EXPORT_FAILED, ToastLevel::Error);
                Err(e)
            }
        }
    }

    /// Returns the export filename for the given instant:
    /// `bytestash-export-<YYYY-MM-DD>.json` with the UTC calendar date.
    #[must_use]
    pub fn file_name(at: DateTime<Utc>) -> String {
        format!("bytestash-export-{}.json", at.format("%Y-%m-%d"))
    }
}
