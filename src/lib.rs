//! # ByteStash
//!
//! A personal code snippet manager core.
//!
//! ByteStash stores titled code snippets made of one or more fragments,
//! tagged with free-form categories. This crate implements the data
//! management layer: bulk JSON import/export, the category search
//! tokenizer that powers `#category` query suggestions, pluggable snippet
//! stores, and an optional AI code suggestion collaborator.
//!
//! ## Features
//!
//! - Total (never-panicking) structural validation of import documents
//! - Strictly sequential bulk import with per-record fault isolation and
//!   live progress snapshots
//! - Deterministic export with a fixed envelope version and date-stamped
//!   filenames
//! - `#`-token category suggestions with "Add new:" synthesis
//! - File-backed and in-memory snippet stores
//!
//! ## Example
//!
//! ```rust,ignore
//! use bytestash::{ImportService, MemoryStore, TracingNotifier};
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryStore::new());
//! let service = ImportService::new(store, TracingNotifier::new());
//! let report = service.import_from_str(&payload).await?;
//! println!("imported {}", report.succeeded);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
// multiple_crate_versions is inherently crate-level (detects duplicate transitive dependencies).
// Cannot be moved to function level.
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod codegen;
pub mod config;
pub mod display;
pub mod io;
pub mod models;
pub mod notify;
pub mod observability;
pub mod search;
pub mod store;

// Re-exports for convenience
pub use codegen::CodeSuggester;
pub use config::StashConfig;
pub use io::{ExportDocument, ExportSerializer, ImportReport, ImportService, validate_document};
pub use models::{Fragment, ImportProgress, NewSnippet, RecordFailure, Snippet, SnippetId};
pub use notify::{Notifier, RecordingNotifier, ToastLevel, TracingNotifier};
pub use search::{Section, SectionKind, Selection, SnippetFilter, compute_sections,
    resolve_selection};
pub use store::{JsonFileStore, MemoryStore, SnippetStore};

/// Error type for bytestash operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidDocument` | Import document fails JSON parsing or the structural check |
/// | `InvalidInput` | A snippet is missing fragments or a fragment is missing its file name |
/// | `ImportInProgress` | A second import is started while one is running |
/// | `NotFound` | A snippet id is requested that the store does not hold |
/// | `OperationFailed` | Filesystem I/O errors, HTTP failures, store writes fail |
#[derive(Debug, ThisError)]
pub enum Error {
    /// The import document is not structurally valid.
    ///
    /// Raised when:
    /// - The payload is not valid JSON
    /// - The document fails the structural check (`validate_document`)
    ///
    /// This error is raised before any record is committed.
    #[error("{0}")]
    InvalidDocument(String),

    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - A snippet has no fragments
    /// - A fragment has an empty file name
    /// - A record body cannot be decoded into a snippet
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An import run is already in progress.
    ///
    /// Raised when a second import is started on the same service while
    /// another run holds the busy flag. The rejected attempt has no side
    /// effects.
    #[error("an import is already in progress")]
    ImportInProgress,

    /// A requested snippet does not exist.
    #[error("snippet not found: {0}")]
    NotFound(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - Filesystem I/O errors occur
    /// - The store file cannot be read or written
    /// - The code suggestion API call fails
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for bytestash operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDocument("Invalid import file format".to_string());
        assert_eq!(err.to_string(), "Invalid import file format");

        let err = Error::InvalidInput("snippet has no fragments".to_string());
        assert_eq!(err.to_string(), "invalid input: snippet has no fragments");

        let err = Error::OperationFailed {
            operation: "test".to_string(),
            cause: "failed".to_string(),
        };
        assert_eq!(err.to_string(), "operation 'test' failed: failed");

        let err = Error::ImportInProgress;
        assert_eq!(err.to_string(), "an import is already in progress");
    }
}
