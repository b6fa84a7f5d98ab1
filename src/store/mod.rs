//! Snippet storage backends.
//!
//! The [`SnippetStore`] trait is the commit seam the import pipeline and the
//! CLI talk to. Two backends ship with the crate: [`JsonFileStore`] persists
//! the collection to a single JSON file, [`MemoryStore`] keeps it in memory.
//!
//! Every backend applies the same canonical form on commit: titles are
//! capped, categories normalized, fragment positions reindexed, and a
//! snippet without fragments or with unnamed fragments is rejected.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::models::{NewSnippet, Snippet};
use crate::Result;
use async_trait::async_trait;

/// Storage backend for snippets.
#[async_trait]
pub trait SnippetStore: Send + Sync {
    /// Commits one snippet, assigning its identity and timestamp.
    ///
    /// `notify` asks the backend to announce the new snippet to the user;
    /// bulk import passes `false` so a run produces one aggregate
    /// notification instead of one per record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidInput`] when the snippet fails
    /// validation and [`crate::Error::OperationFailed`] when the commit
    /// itself fails.
    async fn add_snippet(&self, snippet: NewSnippet, notify: bool) -> Result<Snippet>;

    /// Returns the full collection in storage order.
    async fn list_snippets(&self) -> Result<Vec<Snippet>>;

    /// Re-reads the collection from the backing medium.
    ///
    /// Invoked by the import pipeline after a fully successful run.
    async fn reload_snippets(&self) -> Result<()>;
}
