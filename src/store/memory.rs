//! In-memory snippet store.
//!
//! Holds the collection in a mutex-guarded vector. Useful for tests and
//! environments without a data directory; nothing survives the process.

use super::SnippetStore;
use crate::models::{NewSnippet, Snippet, SnippetId};
use crate::Result;
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct State {
    snippets: Vec<Snippet>,
    notify_flags: Vec<bool>,
    reloads: usize,
}

type FailurePredicate = dyn Fn(&NewSnippet) -> bool + Send + Sync;

/// In-memory snippet store.
pub struct MemoryStore {
    state: Mutex<State>,
    next_id: AtomicU64,
    fail_when: Option<Box<FailurePredicate>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            next_id: AtomicU64::new(1),
            fail_when: None,
        }
    }

    /// Makes commits fail whenever the predicate matches the request.
    ///
    /// Intended for exercising partial-failure paths in tests.
    #[must_use]
    pub fn with_failure<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&NewSnippet) -> bool + Send + Sync + 'static,
    {
        self.fail_when = Some(Box::new(predicate));
        self
    }

    /// Returns the `notify` flag of every commit so far, in commit order.
    pub async fn notify_flags(&self) -> Vec<bool> {
        self.state.lock().await.notify_flags.clone()
    }

    /// Returns how many times the collection was reloaded.
    pub async fn reload_count(&self) -> usize {
        self.state.lock().await.reloads
    }
}

#[async_trait]
impl SnippetStore for MemoryStore {
    async fn add_snippet(&self, snippet: NewSnippet, notify: bool) -> Result<Snippet> {
        let snippet = snippet.normalized();
        snippet.validate()?;
        if self.fail_when.as_ref().is_some_and(|f| f(&snippet)) {
            return Err(crate::Error::OperationFailed {
                operation: "add_snippet".to_string(),
                cause: "injected failure".to_string(),
            });
        }

        let id = SnippetId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let stored = Snippet {
            id,
            title: snippet.title,
            description: snippet.description,
            updated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            categories: snippet.categories,
            fragments: snippet.fragments,
            is_public: snippet.is_public,
        };

        let mut state = self.state.lock().await;
        state.snippets.push(stored.clone());
        state.notify_flags.push(notify);
        Ok(stored)
    }

    async fn list_snippets(&self) -> Result<Vec<Snippet>> {
        Ok(self.state.lock().await.snippets.clone())
    }

    async fn reload_snippets(&self) -> Result<()> {
        self.state.lock().await.reloads += 1;
        Ok(())
    }
}
