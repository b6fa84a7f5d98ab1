//! Wire types for import documents and the export envelope.

use crate::models::{Fragment, NewSnippet, Snippet};
use serde::{Deserialize, Serialize};

/// A fragment as it appears in an import document.
///
/// Only `file_name` is required; the remaining members default when absent.
/// A fragment that cannot be decoded fails its whole record, not the run.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportedFragment {
    /// File name of the fragment.
    pub file_name: String,
    /// The code body.
    #[serde(default)]
    pub code: String,
    /// Language tag.
    #[serde(default)]
    pub language: String,
    /// Stated position; ignored on commit in favor of input order.
    #[serde(default)]
    pub position: u32,
}

impl ImportedFragment {
    /// Converts into the domain fragment.
    #[must_use]
    pub fn into_fragment(self) -> Fragment {
        Fragment {
            file_name: self.file_name,
            code: self.code,
            language: self.language,
            position: self.position,
        }
    }
}

/// A snippet record as it appears in an import document.
///
/// Identity and timestamp members are deliberately absent: the store assigns
/// both on commit. Unknown members are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportedSnippet {
    /// Title of the snippet.
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Code fragments.
    #[serde(default)]
    pub fragments: Vec<ImportedFragment>,
    /// Category tags.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Public visibility as 0 or 1.
    #[serde(default)]
    pub is_public: u8,
}

impl ImportedSnippet {
    /// Converts into a commit request.
    #[must_use]
    pub fn into_new_snippet(self) -> NewSnippet {
        NewSnippet {
            title: self.title,
            description: self.description,
            categories: self.categories,
            fragments: self
                .fragments
                .into_iter()
                .map(ImportedFragment::into_fragment)
                .collect(),
            is_public: self.is_public != 0,
        }
    }
}

/// A snippet as written to an export document: the complete stored record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedSnippet {
    /// Unique identifier.
    pub id: u64,
    /// Title of the snippet.
    pub title: String,
    /// Description, `null` when absent.
    pub description: Option<String>,
    /// Last update instant, ISO-8601.
    pub updated_at: String,
    /// Category tags.
    pub categories: Vec<String>,
    /// Code fragments.
    pub fragments: Vec<Fragment>,
    /// Public visibility as 0 or 1.
    pub is_public: u8,
}

impl From<&Snippet> for ExportedSnippet {
    fn from(snippet: &Snippet) -> Self {
        Self {
            id: snippet.id.value(),
            title: snippet.title.clone(),
            description: snippet.description.clone(),
            updated_at: snippet.updated_at.clone(),
            categories: snippet.categories.clone(),
            fragments: snippet.fragments.clone(),
            is_public: u8::from(snippet.is_public),
        }
    }
}

/// The export envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    /// Envelope version, always `"1.0"`.
    pub version: String,
    /// Instant the export was taken, ISO-8601.
    pub exported_at: String,
    /// The full collection, in collection order.
    pub snippets: Vec<ExportedSnippet>,
}
