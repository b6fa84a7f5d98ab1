//! Resolution of a chosen suggestion back into query and category state.

use super::suggest::{ADD_NEW_PREFIX, FILTER_TRIGGER};
use serde::Serialize;

/// Outcome of resolving a chosen suggestion.
///
/// `next_query` replaces the search bar text; `category` is added to the
/// selected set. The two are separate on purpose: the query truncation is
/// computed from the raw query as typed, while the category text is
/// normalized independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// The query text to display after the selection.
    pub next_query: String,
    /// The category to add, trimmed and lowercased.
    pub category: String,
}

/// Resolves a chosen suggestion option against the raw query.
///
/// A synthetic `"Add new: "` option is unwrapped to the typed term; any
/// other option is taken verbatim. The query keeps everything before its
/// last `#`, trimmed, or stays unchanged when it has none. The category is
/// trimmed and lowercased.
#[must_use]
pub fn resolve_selection(option: &str, raw_query: &str) -> Selection {
    let chosen = option.strip_prefix(ADD_NEW_PREFIX).unwrap_or(option);
    let next_query = raw_query.rfind(FILTER_TRIGGER).map_or_else(
        || raw_query.to_string(),
        |idx| raw_query[..idx].trim().to_string(),
    );
    Selection {
        next_query,
        category: chosen.trim().to_lowercase(),
    }
}
