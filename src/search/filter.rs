//! Snippet filtering over search terms and selected categories.

use crate::models::Snippet;

/// Filter over a snippet collection.
///
/// An empty filter matches everything. A non-empty term must appear in the
/// title or description, or in fragment code when code search is enabled.
/// Every selected category must be present on the snippet. All matching is
/// case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct SnippetFilter {
    term: String,
    categories: Vec<String>,
    include_code: bool,
}

impl SnippetFilter {
    /// Creates an empty filter that matches every snippet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search term.
    #[must_use]
    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = term.into();
        self
    }

    /// Adds a category the snippet must carry.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    /// Replaces the required category set.
    #[must_use]
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    /// Enables or disables matching the term against fragment code.
    #[must_use]
    pub const fn with_code_search(mut self, include_code: bool) -> Self {
        self.include_code = include_code;
        self
    }

    /// Whether the snippet passes this filter.
    #[must_use]
    pub fn matches(&self, snippet: &Snippet) -> bool {
        self.matches_term(snippet) && self.matches_categories(snippet)
    }

    /// Returns the snippets passing this filter, preserving order.
    #[must_use]
    pub fn apply<'a>(&self, snippets: &'a [Snippet]) -> Vec<&'a Snippet> {
        snippets.iter().filter(|s| self.matches(s)).collect()
    }

    fn matches_term(&self, snippet: &Snippet) -> bool {
        let term = self.term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        if snippet.title.to_lowercase().contains(&term) {
            return true;
        }
        if snippet
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&term))
        {
            return true;
        }
        self.include_code
            && snippet
                .fragments
                .iter()
                .any(|f| f.code.to_lowercase().contains(&term))
    }

    fn matches_categories(&self, snippet: &Snippet) -> bool {
        self.categories.iter().all(|wanted| {
            let wanted = wanted.to_lowercase();
            snippet.categories.iter().any(|c| c.to_lowercase() == wanted)
        })
    }
}
