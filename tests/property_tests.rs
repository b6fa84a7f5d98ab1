//! Property-based tests for the import/export and search cores.
//!
//! Uses proptest to verify invariants across random inputs:
//! - The structural validator is total and never panics
//! - Import counters always reconcile, whatever subset of commits fails
//! - Exported documents always re-validate
//! - Tokenizer sections never leak selected categories
//! - Selection resolution normalizes the category and truncates the query

// Property tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use async_trait::async_trait;
use bytestash::io::{ExportSerializer, ImportService, validate_document};
use bytestash::models::{Fragment, NewSnippet, Snippet, SnippetId};
use bytestash::notify::RecordingNotifier;
use bytestash::search::{ADD_NEW_PREFIX, SectionKind, compute_sections, resolve_selection};
use bytestash::store::SnippetStore;
use bytestash::{Error, Result};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use serde_json::{Value, json};
use std::sync::Arc;

/// Strategy producing arbitrary JSON values of modest depth.
fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 #.]{0,20}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 24, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::from),
            prop::collection::hash_map("[a-z_]{1,10}", inner, 0..6)
                .prop_map(|m| Value::Object(serde_json::Map::from_iter(m))),
        ]
    })
}

/// Store that fails the commits whose zero-based index is in `fail_at`.
struct ScriptedStore {
    fail_at: Vec<usize>,
    calls: std::sync::Mutex<usize>,
}

#[async_trait]
impl SnippetStore for ScriptedStore {
    async fn add_snippet(&self, snippet: NewSnippet, _notify: bool) -> Result<Snippet> {
        let mut calls = self.calls.lock().unwrap();
        let index = *calls;
        *calls += 1;
        if self.fail_at.contains(&index) {
            return Err(Error::OperationFailed {
                operation: "add_snippet".to_string(),
                cause: format!("scripted failure at {index}"),
            });
        }
        Ok(Snippet {
            id: SnippetId::new(index as u64 + 1),
            title: snippet.title,
            description: snippet.description,
            updated_at: "2024-05-01T00:00:00.000Z".to_string(),
            categories: snippet.categories,
            fragments: snippet.fragments,
            is_public: snippet.is_public,
        })
    }

    async fn list_snippets(&self) -> Result<Vec<Snippet>> {
        Ok(Vec::new())
    }

    async fn reload_snippets(&self) -> Result<()> {
        Ok(())
    }
}

fn run_import(doc: &Value, fail_at: Vec<usize>) -> bytestash::io::ImportReport {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let store = Arc::new(ScriptedStore {
        fail_at,
        calls: std::sync::Mutex::new(0),
    });
    let service = ImportService::new(store, RecordingNotifier::new());
    runtime.block_on(service.import_document(doc)).unwrap()
}

proptest! {
    /// Property: the validator accepts or rejects every input without panicking.
    #[test]
    fn prop_validator_is_total(doc in arb_json()) {
        let _ = validate_document(&doc);
    }

    /// Property: the version member must be a string, nothing else.
    #[test]
    fn prop_version_must_be_string(version in arb_json()) {
        let doc = json!({"version": version, "snippets": []});
        let expected = doc["version"].is_string();
        prop_assert_eq!(validate_document(&doc), expected);
    }

    /// Property: after a run over N records with a scripted failure subset,
    /// succeeded + failed == N and the error list matches the subset.
    #[test]
    fn prop_import_counters_reconcile(
        total in 0usize..12,
        subset in prop::collection::vec(any::<prop::sample::Index>(), 0..12)
    ) {
        let fail_at: Vec<usize> = if total == 0 {
            Vec::new()
        } else {
            let mut picked: Vec<usize> = subset.iter().map(|i| i.index(total)).collect();
            picked.sort_unstable();
            picked.dedup();
            picked
        };

        let records: Vec<Value> = (0..total)
            .map(|i| json!({
                "title": format!("record {i}"),
                "fragments": [{"file_name": "f.rs", "code": "x", "language": "", "position": 0}],
                "categories": []
            }))
            .collect();
        let doc = json!({"version": "1.0", "snippets": records});

        let report = run_import(&doc, fail_at.clone());
        prop_assert_eq!(report.total, total);
        prop_assert_eq!(report.succeeded + report.failed, total);
        prop_assert_eq!(report.failed, fail_at.len());
        prop_assert_eq!(report.errors.len(), fail_at.len());
        for (failure, index) in report.errors.iter().zip(&fail_at) {
            prop_assert_eq!(failure.title.clone(), format!("record {index}"));
        }
    }

    /// Property: a serialized collection always re-validates.
    #[test]
    fn prop_export_round_trips_through_validator(
        titles in prop::collection::vec("[a-zA-Z0-9 ]{0,40}", 0..8)
    ) {
        let snippets: Vec<Snippet> = titles.iter().enumerate().map(|(i, title)| Snippet {
            id: SnippetId::new(i as u64 + 1),
            title: title.clone(),
            description: None,
            updated_at: "2024-05-01T00:00:00.000Z".to_string(),
            categories: vec!["misc".to_string()],
            fragments: vec![Fragment::new("f.rs", "x")],
            is_public: false,
        }).collect();

        let at = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).single().unwrap();
        let payload = ExportSerializer::new().to_string(&snippets, at).unwrap();
        let parsed: Value = serde_json::from_str(&payload).unwrap();
        prop_assert!(validate_document(&parsed));
    }

    /// Property: without a trigger character there are never any sections.
    #[test]
    fn prop_no_trigger_no_sections(
        query in "[a-zA-Z0-9 ]{0,30}",
        categories in prop::collection::vec("[a-z]{1,8}", 0..6)
    ) {
        prop_assert!(compute_sections(&query, &categories, &[]).is_empty());
    }

    /// Property: suggested categories never include an already selected one,
    /// and always come from the existing set in order.
    #[test]
    fn prop_sections_exclude_selected(
        term in "[a-z]{0,4}",
        category_set in prop::collection::hash_set("[a-z]{1,8}", 0..8),
        selected_indices in prop::collection::vec(any::<prop::sample::Index>(), 0..4)
    ) {
        let categories: Vec<String> = category_set.into_iter().collect();
        let selected: Vec<String> = if categories.is_empty() {
            Vec::new()
        } else {
            selected_indices.iter()
                .map(|i| categories[i.index(categories.len())].clone())
                .collect()
        };

        let query = format!("search #{term}");
        let sections = compute_sections(&query, &categories, &selected);

        if let Some(section) = sections.iter().find(|s| s.kind == SectionKind::Categories) {
            for item in &section.items {
                prop_assert!(!selected.contains(item));
                prop_assert!(categories.contains(item));
            }
            // Input order is preserved.
            let positions: Vec<usize> = section.items.iter()
                .map(|item| categories.iter().position(|c| c == item).unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    /// Property: an Add New option is emitted iff the term is non-empty and
    /// no existing category equals it.
    #[test]
    fn prop_add_new_iff_unknown_term(
        term in "[a-z]{0,6}",
        categories in prop::collection::vec("[a-z]{1,8}", 0..8)
    ) {
        let query = format!("#{term}");
        let sections = compute_sections(&query, &categories, &[]);
        let add_new = sections.iter().find(|s| s.kind == SectionKind::AddNew);

        let expected = !term.is_empty() && !categories.contains(&term);
        prop_assert_eq!(add_new.is_some(), expected);
        if let Some(section) = add_new {
            prop_assert_eq!(section.items.clone(), vec![format!("{ADD_NEW_PREFIX}{term}")]);
        }
    }

    /// Property: resolution lowercases the category and truncates the query
    /// at its last trigger.
    #[test]
    fn prop_resolution_normalizes(
        prefix in "[a-zA-Z ]{0,20}",
        option in "[a-zA-Z]{1,10}",
        synthetic in any::<bool>()
    ) {
        let raw_query = format!("{prefix}#typed");
        let chosen = if synthetic {
            format!("{ADD_NEW_PREFIX}{option}")
        } else {
            option.clone()
        };

        let selection = resolve_selection(&chosen, &raw_query);
        prop_assert_eq!(selection.category, option.to_lowercase());
        prop_assert_eq!(selection.next_query, prefix.trim());
    }

    /// Property: a query with no trigger passes through resolution unchanged.
    #[test]
    fn prop_resolution_keeps_triggerless_query(
        query in "[a-zA-Z0-9 ]{0,30}",
        option in "[a-zA-Z]{1,10}"
    ) {
        let selection = resolve_selection(&option, &query);
        prop_assert_eq!(selection.next_query, query);
    }
}
