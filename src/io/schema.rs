//! Structural validation of import documents.
//!
//! The check is a total predicate: every possible [`Value`] maps to valid or
//! invalid, nothing throws and nothing panics. Only the document skeleton is
//! inspected here; decoding failures inside a record body are a per-record
//! concern of the import service, not a structural one.
//!
//! A document is structurally valid when:
//!
//! - it is a JSON object,
//! - its `version` member is a string (the value is read but not enforced),
//! - its `snippets` member is an array,
//! - every element of `snippets` is an object whose `title` is a string and
//!   whose `fragments` and `categories` members are arrays.
//!
//! Extra members anywhere are ignored; `exported_at` is optional and
//! unchecked.

use serde_json::Value;

/// A structural problem found in an import document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentIssue {
    /// Path of the offending member (e.g. `snippets[3].title`).
    pub path: String,
    /// Description of the problem.
    pub message: String,
}

impl DocumentIssue {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Returns whether the document is structurally valid for import.
///
/// Total and non-throwing: any input yields `true` or `false`.
#[must_use]
pub fn validate_document(doc: &Value) -> bool {
    document_issues(doc).is_empty()
}

/// Returns the structural problems in the document, if any.
///
/// An empty result means the document passes [`validate_document`]. Issues
/// are reported in document order, one per offending member.
#[must_use]
pub fn document_issues(doc: &Value) -> Vec<DocumentIssue> {
    let Some(object) = doc.as_object() else {
        return vec![DocumentIssue::new("$", "document is not a JSON object")];
    };

    let mut issues = Vec::new();

    match object.get("version") {
        Some(Value::String(_)) => {},
        Some(_) => issues.push(DocumentIssue::new("version", "must be a string")),
        None => issues.push(DocumentIssue::new("version", "missing")),
    }

    let snippets = match object.get("snippets") {
        Some(Value::Array(snippets)) => snippets.as_slice(),
        Some(_) => {
            issues.push(DocumentIssue::new("snippets", "must be an array"));
            return issues;
        },
        None => {
            issues.push(DocumentIssue::new("snippets", "missing"));
            return issues;
        },
    };

    for (idx, record) in snippets.iter().enumerate() {
        let Some(record) = record.as_object() else {
            issues.push(DocumentIssue::new(
                format!("snippets[{idx}]"),
                "must be an object",
            ));
            continue;
        };

        if !matches!(record.get("title"), Some(Value::String(_))) {
            issues.push(DocumentIssue::new(
                format!("snippets[{idx}].title"),
                "must be a string",
            ));
        }
        if !matches!(record.get("fragments"), Some(Value::Array(_))) {
            issues.push(DocumentIssue::new(
                format!("snippets[{idx}].fragments"),
                "must be an array",
            ));
        }
        if !matches!(record.get("categories"), Some(Value::Array(_))) {
            issues.push(DocumentIssue::new(
                format!("snippets[{idx}].categories"),
                "must be an array",
            ));
        }
    }

    issues
}
