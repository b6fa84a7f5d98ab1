//! Category suggestion sections for the search bar.
//!
//! A query enters filter mode when it contains `#`. Everything after the
//! last `#` is the category term being typed; the text before it is the
//! plain search term. [`compute_sections`] turns the raw query plus the
//! category context into ordered suggestion sections, recomputed on every
//! keystroke.

use serde::Serialize;

/// Marker prefixed to the synthetic "create this category" option.
pub const ADD_NEW_PREFIX: &str = "Add new: ";

/// The character that switches the query into category-filter mode.
pub const FILTER_TRIGGER: char = '#';

/// Kind of a suggestion section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SectionKind {
    /// Existing categories matching the typed term.
    Categories,
    /// The synthetic option offering to create the typed term.
    #[serde(rename = "Add New")]
    AddNew,
}

impl SectionKind {
    /// Returns the section title shown to the user.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Categories => "Categories",
            Self::AddNew => "Add New",
        }
    }
}

/// One titled group of suggestion options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Which group this is.
    pub kind: SectionKind,
    /// Ordered option list.
    pub items: Vec<String>,
}

impl Section {
    /// Creates a section of the given kind.
    #[must_use]
    pub const fn new(kind: SectionKind, items: Vec<String>) -> Self {
        Self { kind, items }
    }

    /// Returns the section title shown to the user.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.kind.title()
    }
}

/// Computes the suggestion sections for a raw query.
///
/// Returns an empty list when the query contains no `#`. Otherwise the term
/// after the last `#` is matched, case-insensitively and unanchored, against
/// the categories not yet selected; matching categories keep their input
/// order. When the term is non-empty and no existing category equals it
/// case-insensitively, a second section offers to create it.
///
/// Never mutates its inputs; safe to call on every keystroke.
#[must_use]
pub fn compute_sections(
    raw_query: &str,
    existing_categories: &[String],
    selected_categories: &[String],
) -> Vec<Section> {
    let Some(idx) = raw_query.rfind(FILTER_TRIGGER) else {
        return Vec::new();
    };
    let term = raw_query[idx + 1..].trim().to_lowercase();

    let selected: Vec<String> = selected_categories
        .iter()
        .map(|c| c.to_lowercase())
        .collect();
    let filtered: Vec<String> = existing_categories
        .iter()
        .filter(|cat| !selected.contains(&cat.to_lowercase()))
        .filter(|cat| term.is_empty() || cat.to_lowercase().contains(&term))
        .cloned()
        .collect();

    let mut sections = Vec::new();
    if !filtered.is_empty() {
        sections.push(Section::new(SectionKind::Categories, filtered));
    }

    let exact_match = existing_categories
        .iter()
        .any(|cat| cat.to_lowercase() == term);
    if !term.is_empty() && !exact_match {
        sections.push(Section::new(
            SectionKind::AddNew,
            vec![format!("{ADD_NEW_PREFIX}{term}")],
        ));
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cats(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_no_trigger_returns_no_sections() {
        let sections = compute_sections("release notes", &cats(&["bug", "feature"]), &[]);
        assert!(sections.is_empty());
    }

    #[test]
    fn test_partial_term_matches_and_offers_add_new() {
        let sections = compute_sections("foo #ba", &cats(&["bar", "baz", "qux"]), &[]);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].kind, SectionKind::Categories);
        assert_eq!(sections[0].items, vec!["bar", "baz"]);
        assert_eq!(sections[1].kind, SectionKind::AddNew);
        assert_eq!(sections[1].items, vec!["Add new: ba"]);
    }

    #[test]
    fn test_exact_match_suppresses_add_new() {
        let sections = compute_sections("foo #bar", &cats(&["bar", "baz"]), &[]);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].kind, SectionKind::Categories);
        assert_eq!(sections[0].items, vec!["bar"]);
    }

    #[test]
    fn test_empty_term_lists_all_unselected() {
        let sections = compute_sections("query #", &cats(&["bar", "baz"]), &cats(&["baz"]));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].items, vec!["bar"]);
    }

    #[test]
    fn test_selected_categories_excluded_case_insensitively() {
        let sections = compute_sections("#b", &cats(&["Bar", "Baz"]), &cats(&["bar"]));
        assert_eq!(sections[0].items, vec!["Baz"]);
    }

    #[test]
    fn test_term_uses_last_trigger() {
        let sections = compute_sections("#one #tw", &cats(&["two", "one"]), &[]);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].items, vec!["two"]);
        assert_eq!(sections[1].items, vec!["Add new: tw"]);
    }

    #[test]
    fn test_term_is_trimmed_and_lowercased() {
        let sections = compute_sections("x #  RU  ", &cats(&["Rust", "ruby"]), &[]);
        assert_eq!(sections[0].items, vec!["Rust", "ruby"]);
        assert_eq!(sections[1].items, vec!["Add new: ru"]);
    }

    #[test]
    fn test_no_matches_still_offers_add_new() {
        let sections = compute_sections("#zig", &cats(&["rust", "go"]), &[]);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].kind, SectionKind::AddNew);
        assert_eq!(sections[0].items, vec!["Add new: zig"]);
    }

    #[test]
    fn test_all_selected_and_empty_term_yields_nothing() {
        let sections = compute_sections("#", &cats(&["rust"]), &cats(&["rust"]));
        assert!(sections.is_empty());
    }

    #[test]
    fn test_exact_match_case_insensitive_against_existing() {
        // "Bar" exists; typing "bar" must not offer to create a duplicate.
        let sections = compute_sections("#bar", &cats(&["Bar"]), &[]);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].kind, SectionKind::Categories);
    }

    #[test]
    fn test_section_titles() {
        assert_eq!(SectionKind::Categories.title(), "Categories");
        assert_eq!(SectionKind::AddNew.title(), "Add New");
    }
}
