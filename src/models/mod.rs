//! Data models for bytestash.
//!
//! This module contains the core data structures used throughout the system.

mod progress;
mod snippet;

pub use progress::{ImportProgress, RecordFailure};
pub use snippet::{
    Fragment, MAX_CATEGORIES, MAX_TITLE_LEN, NewSnippet, Snippet, SnippetId, unique_languages,
};
