//! Snippet types and identifiers.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of categories a snippet may carry.
pub const MAX_CATEGORIES: usize = 20;

/// Maximum title length in characters; longer titles are truncated.
pub const MAX_TITLE_LEN: usize = 255;

/// Unique identifier for a snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnippetId(u64);

impl SnippetId {
    /// Creates a new snippet ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric value of the ID.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for SnippetId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A single code fragment within a snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// File name the fragment is presented under.
    pub file_name: String,
    /// The code itself.
    pub code: String,
    /// Language tag (free-form, may be empty).
    pub language: String,
    /// Zero-based position within the snippet.
    pub position: u32,
}

impl Fragment {
    /// Creates a new fragment at position 0.
    #[must_use]
    pub fn new(file_name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            code: code.into(),
            language: String::new(),
            position: 0,
        }
    }

    /// Sets the language tag.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the position.
    #[must_use]
    pub const fn with_position(mut self, position: u32) -> Self {
        self.position = position;
        self
    }
}

/// A stored snippet entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// Unique identifier.
    pub id: SnippetId,
    /// Title, at most [`MAX_TITLE_LEN`] characters.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Last update instant, ISO-8601.
    pub updated_at: String,
    /// Normalized category tags (lowercase, trimmed, unique).
    pub categories: Vec<String>,
    /// Code fragments in display order; positions are contiguous from 0.
    pub fragments: Vec<Fragment>,
    /// Whether the snippet is visible without authentication.
    pub is_public: bool,
}

/// A snippet as submitted for creation: no identity, no timestamp.
///
/// This is what the store's `add_snippet` receives. Call
/// [`NewSnippet::normalized`] to apply the canonical form (title length cap,
/// category normalization, contiguous fragment positions) and
/// [`NewSnippet::validate`] before committing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSnippet {
    /// Title of the snippet.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Category tags; normalized on commit.
    pub categories: Vec<String>,
    /// Code fragments; positions are reassigned from input order on commit.
    pub fragments: Vec<Fragment>,
    /// Whether the snippet is publicly visible.
    pub is_public: bool,
}

impl NewSnippet {
    /// Creates a new snippet request with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    /// Adds a fragment.
    #[must_use]
    pub fn with_fragment(mut self, fragment: Fragment) -> Self {
        self.fragments.push(fragment);
        self
    }

    /// Sets public visibility.
    #[must_use]
    pub const fn with_public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    /// Returns the canonical form of this request.
    ///
    /// - The title is capped at [`MAX_TITLE_LEN`] characters.
    /// - Categories are trimmed, lowercased, deduplicated (first occurrence
    ///   wins) and capped at [`MAX_CATEGORIES`]; empties are dropped.
    /// - Fragment positions are reassigned to contiguous zero-based order;
    ///   the input order wins over any stated positions.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.title.chars().count() > MAX_TITLE_LEN {
            self.title = self.title.chars().take(MAX_TITLE_LEN).collect();
        }

        let mut seen: Vec<String> = Vec::new();
        for raw in &self.categories {
            let normalized = raw.trim().to_lowercase();
            if normalized.is_empty() || seen.contains(&normalized) {
                continue;
            }
            if seen.len() >= MAX_CATEGORIES {
                break;
            }
            seen.push(normalized);
        }
        self.categories = seen;

        for (idx, fragment) in self.fragments.iter_mut().enumerate() {
            fragment.position = u32::try_from(idx).unwrap_or(u32::MAX);
        }

        self
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the snippet has no fragments or
    /// any fragment has an empty file name.
    pub fn validate(&self) -> Result<()> {
        if self.fragments.is_empty() {
            return Err(Error::InvalidInput(
                "At least one code fragment is required".to_string(),
            ));
        }
        if self.fragments.iter().any(|f| f.file_name.trim().is_empty()) {
            return Err(Error::InvalidInput(
                "All fragments must have file names".to_string(),
            ));
        }
        Ok(())
    }
}

/// Returns the distinct languages used by the given fragments.
///
/// Comparison is case-insensitive; the output is lowercased and keeps
/// first-occurrence order. Empty language tags are skipped.
#[must_use]
pub fn unique_languages(fragments: &[Fragment]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for fragment in fragments {
        let language = fragment.language.trim().to_lowercase();
        if !language.is_empty() && !seen.contains(&language) {
            seen.push(language);
        }
    }
    seen
}
