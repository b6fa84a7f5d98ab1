//! Import/Export I/O subsystem.
//!
//! Provides bulk snippet import from JSON documents and structured export of
//! the full collection.
//!
//! # Architecture
//!
//! - **Schema layer** ([`schema`]) is a total predicate over an untrusted
//!   parsed document; it never panics and never errors.
//! - **Wire types** ([`document`]) decode records into the commit
//!   representation and encode the export envelope.
//! - **Services** orchestrate the two directions: [`ImportService`] commits
//!   records one at a time with per-record fault isolation,
//!   [`ExportSerializer`] produces deterministic output for a given clock
//!   instant.
//!
//! # Examples
//!
//! ## Import snippets from a JSON document
//!
//! ```rust,ignore
//! use bytestash::io::ImportService;
//!
//! let service = ImportService::new(store, notifier);
//! let report = service.import_from_str(&payload).await?;
//! println!("Imported {} snippets", report.succeeded);
//! ```
//!
//! ## Export the collection
//!
//! ```rust,ignore
//! use bytestash::io::ExportSerializer;
//! use chrono::Utc;
//!
//! let serializer = ExportSerializer::new();
//! let json = serializer.to_string(&snippets, Utc::now())?;
//! ```

pub mod document;
pub mod export;
pub mod import;
pub mod schema;

// Re-exports for convenience
pub use document::{ExportDocument, ExportedSnippet, ImportedFragment, ImportedSnippet};
pub use export::{EXPORT_VERSION, ExportSerializer};
pub use import::{ImportReport, ImportService};
pub use schema::{DocumentIssue, document_issues, validate_document};
