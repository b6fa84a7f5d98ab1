//! Search bar tokenizing, suggestion, and filtering.
//!
//! The search bar accepts a free-text query with an optional category
//! sub-expression after a `#`. [`compute_sections`] parses the live query
//! into suggestion sections, [`resolve_selection`] turns a chosen option
//! back into the next query and the category to apply, and
//! [`SnippetFilter`] evaluates the resulting term/category state against
//! the collection. All three are pure and safe to call per keystroke.

pub mod filter;
pub mod select;
pub mod suggest;

pub use filter::SnippetFilter;
pub use select::{Selection, resolve_selection};
pub use suggest::{ADD_NEW_PREFIX, FILTER_TRIGGER, Section, SectionKind, compute_sections};
