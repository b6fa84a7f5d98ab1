//! File-backed snippet store.
//!
//! Persists the collection as a single pretty-printed JSON file. The file is
//! loaded lazily, kept in an in-memory cache, and rewritten in full on every
//! commit. Identifiers are allocated as `max + 1` over the stored ids.

use super::SnippetStore;
use crate::models::{Fragment, NewSnippet, Snippet, SnippetId};
use crate::{Error, Result};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Serializable snippet format for file storage.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSnippet {
    id: u64,
    title: String,
    #[serde(default)]
    description: Option<String>,
    updated_at: String,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    fragments: Vec<Fragment>,
    #[serde(default)]
    is_public: u8,
}

impl From<&Snippet> for StoredSnippet {
    fn from(s: &Snippet) -> Self {
        Self {
            id: s.id.value(),
            title: s.title.clone(),
            description: s.description.clone(),
            updated_at: s.updated_at.clone(),
            categories: s.categories.clone(),
            fragments: s.fragments.clone(),
            is_public: u8::from(s.is_public),
        }
    }
}

impl StoredSnippet {
    fn into_snippet(self) -> Snippet {
        Snippet {
            id: SnippetId::new(self.id),
            title: self.title,
            description: self.description,
            updated_at: self.updated_at,
            categories: self.categories,
            fragments: self.fragments,
            is_public: self.is_public != 0,
        }
    }
}

/// On-disk file layout.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StashFile {
    snippets: Vec<StoredSnippet>,
}

/// File-backed snippet store.
pub struct JsonFileStore {
    path: PathBuf,
    // None until first load; reload drops back to None so the next access
    // re-reads the file.
    cache: Mutex<Option<Vec<Snippet>>>,
}

impl JsonFileStore {
    /// Creates a store backed by the given file.
    ///
    /// The file is created on first commit; a missing file reads as an
    /// empty collection.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Result<Vec<Snippet>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let payload = std::fs::read_to_string(&self.path).map_err(|e| Error::OperationFailed {
            operation: "read_store_file".to_string(),
            cause: e.to_string(),
        })?;
        let file: StashFile =
            serde_json::from_str(&payload).map_err(|e| Error::OperationFailed {
                operation: "parse_store_file".to_string(),
                cause: e.to_string(),
            })?;
        Ok(file.snippets.into_iter().map(StoredSnippet::into_snippet).collect())
    }

    fn write_file(&self, snippets: &[Snippet]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| Error::OperationFailed {
                    operation: "create_store_dir".to_string(),
                    cause: e.to_string(),
                })?;
            }
        }
        let file = StashFile {
            snippets: snippets.iter().map(StoredSnippet::from).collect(),
        };
        let payload =
            serde_json::to_string_pretty(&file).map_err(|e| Error::OperationFailed {
                operation: "serialize_store_file".to_string(),
                cause: e.to_string(),
            })?;
        std::fs::write(&self.path, payload).map_err(|e| Error::OperationFailed {
            operation: "write_store_file".to_string(),
            cause: e.to_string(),
        })
    }

    async fn load_into_cache<'a>(
        &self,
        cache: &'a mut Option<Vec<Snippet>>,
    ) -> Result<&'a mut Vec<Snippet>> {
        if cache.is_none() {
            *cache = Some(self.read_file()?);
        }
        cache
            .as_mut()
            .ok_or_else(|| Error::OperationFailed {
                operation: "load_store_cache".to_string(),
                cause: "cache unexpectedly empty".to_string(),
            })
    }
}

#[async_trait]
impl SnippetStore for JsonFileStore {
    async fn add_snippet(&self, snippet: NewSnippet, notify: bool) -> Result<Snippet> {
        let snippet = snippet.normalized();
        snippet.validate()?;

        let mut cache = self.cache.lock().await;
        let snippets = self.load_into_cache(&mut cache).await?;

        let id = snippets.iter().map(|s| s.id.value()).max().unwrap_or(0) + 1;
        let stored = Snippet {
            id: SnippetId::new(id),
            title: snippet.title,
            description: snippet.description,
            updated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            categories: snippet.categories,
            fragments: snippet.fragments,
            is_public: snippet.is_public,
        };

        // The cache must never show a record the file does not hold.
        snippets.push(stored.clone());
        if let Err(e) = self.write_file(snippets) {
            snippets.pop();
            return Err(e);
        }
        tracing::debug!(id, title = %stored.title, notify, "snippet added");
        Ok(stored)
    }

    async fn list_snippets(&self) -> Result<Vec<Snippet>> {
        let mut cache = self.cache.lock().await;
        let snippets = self.load_into_cache(&mut cache).await?;
        Ok(snippets.clone())
    }

    async fn reload_snippets(&self) -> Result<()> {
        let reloaded = self.read_file()?;
        let mut cache = self.cache.lock().await;
        *cache = Some(reloaded);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Fragment;
    use tempfile::TempDir;

    fn request(title: &str) -> NewSnippet {
        NewSnippet::new(title).with_fragment(Fragment::new("main.rs", "fn main() {}"))
    }

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("stash.json"));
        assert!(store.list_snippets().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_commit_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stash.json");

        let store = JsonFileStore::new(&path);
        store.add_snippet(request("persisted"), false).await.unwrap();

        let reopened = JsonFileStore::new(&path);
        let snippets = reopened.list_snippets().await.unwrap();
        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0].title, "persisted");
        assert_eq!(snippets[0].id.value(), 1);
    }

    #[tokio::test]
    async fn test_ids_continue_past_existing_max() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stash.json");

        let store = JsonFileStore::new(&path);
        store.add_snippet(request("a"), false).await.unwrap();
        store.add_snippet(request("b"), false).await.unwrap();
        let third = store.add_snippet(request("c"), false).await.unwrap();
        assert_eq!(third.id.value(), 3);
    }

    #[tokio::test]
    async fn test_reload_picks_up_external_changes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stash.json");

        let store = JsonFileStore::new(&path);
        store.add_snippet(request("original"), false).await.unwrap();

        // Another instance writes a second snippet behind this store's cache.
        let other = JsonFileStore::new(&path);
        other.add_snippet(request("external"), false).await.unwrap();
        assert_eq!(store.list_snippets().await.unwrap().len(), 1);

        store.reload_snippets().await.unwrap();
        assert_eq!(store.list_snippets().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_reload_rejects_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stash.json");
        std::fs::write(&path, "not json").unwrap();

        let store = JsonFileStore::new(&path);
        let err = store.reload_snippets().await.unwrap_err();
        assert!(err.to_string().contains("parse_store_file"));
    }

    #[tokio::test]
    async fn test_failed_write_leaves_no_cache_entry() {
        let dir = TempDir::new().unwrap();
        // Make the store's parent a regular file so the write must fail.
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, "").unwrap();
        let store = JsonFileStore::new(blocker.join("stash.json"));

        let err = store.add_snippet(request("phantom"), false).await.unwrap_err();
        assert!(matches!(err, Error::OperationFailed { .. }));

        // The rejected record must not surface from the cache afterwards.
        assert!(store.list_snippets().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_validation_rejected_before_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stash.json");
        let store = JsonFileStore::new(&path);

        let err = store
            .add_snippet(NewSnippet::new("no fragments"), false)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(!path.exists());
    }
}
