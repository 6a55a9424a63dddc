//! Shape validation of collection documents.
//!
//! This is a structural check, not JSON-Schema validation: it confirms the
//! document parses, has the top-level members a collection needs, and reports
//! the declared schema version and item counts.

use regex::Regex;
use serde_json::Value;

/// Matches the version segment of a collection schema URI.
const SCHEMA_VERSION_PATTERN: &str = r"/collection/v(\d+\.\d+\.\d+)/collection\.json$";

/// Schema version this codec reads and writes.
const SUPPORTED_MAJOR: &str = "2.";

/// Result of [`validate_document`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Whether the document can be decoded as a collection.
    pub is_valid: bool,
    /// Version declared by `info.schema`, e.g. `2.1.0`.
    pub schema_version: Option<String>,
    /// Number of folders at any depth.
    pub folder_count: usize,
    /// Number of requests at any depth.
    pub request_count: usize,
    /// Problems found.
    pub issues: Vec<String>,
}

/// Checks that `json` looks like a collection document.
#[must_use]
pub fn validate_document(json: &str) -> ValidationReport {
    let mut report = ValidationReport::default();
    let document: Value = match serde_json::from_str(json) {
        Ok(document) => document,
        Err(e) => {
            report.issues.push(format!("Invalid JSON: {e}"));
            return report;
        }
    };
    let Some(root) = document.as_object() else {
        report.issues.push("Document is not a JSON object".to_string());
        return report;
    };

    match root.get("info") {
        Some(Value::Object(info)) => {
            if !info.get("name").is_some_and(Value::is_string) {
                report.issues.push("info.name is missing".to_string());
            }
            if let Some(schema) = info.get("schema").and_then(Value::as_str) {
                report.schema_version = detect_version(schema, &mut report.issues);
            }
        }
        _ => report.issues.push("info object is missing".to_string()),
    }

    match root.get("item") {
        Some(Value::Array(items)) => count_items(items, &mut report),
        Some(_) => report.issues.push("item is not an array".to_string()),
        None => report.issues.push("item array is missing".to_string()),
    }

    if let Some(version) = &report.schema_version
        && !version.starts_with(SUPPORTED_MAJOR)
    {
        report
            .issues
            .push(format!("Unsupported schema version: {version}"));
    }

    report.is_valid = report.issues.is_empty();
    report
}

fn detect_version(schema: &str, issues: &mut Vec<String>) -> Option<String> {
    match Regex::new(SCHEMA_VERSION_PATTERN) {
        Ok(re) => {
            let version = re
                .captures(schema)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string());
            if version.is_none() {
                issues.push(format!("Unrecognized schema URI: {schema}"));
            }
            version
        }
        Err(e) => {
            issues.push(format!("Invalid schema pattern: {e}"));
            None
        }
    }
}

fn count_items(items: &[Value], report: &mut ValidationReport) {
    for item in items {
        if item.get("request").is_some() {
            report.request_count += 1;
        } else {
            report.folder_count += 1;
            if let Some(Value::Array(children)) = item.get("item") {
                count_items(children, report);
            }
        }
    }
}
