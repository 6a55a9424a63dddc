//! Collection v2.1 wire types.
//!
//! These mirror the JSON document shape. Decoding is lenient: most fields are
//! optional and several accept more than one JSON shape. Field order matches
//! the order in which documents are written.

#![allow(missing_docs)]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Root of a collection document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireCollection {
    #[serde(default)]
    pub info: WireInfo,
    #[serde(default)]
    pub item: Vec<WireItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub event: Vec<WireEvent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variable: Vec<WireProperty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<WireAuth>,
}

/// Collection metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireInfo {
    #[serde(rename = "_postman_id", default, skip_serializing_if = "Option::is_none")]
    pub postman_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<WireDescription>,
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(rename = "_exporter_id", default, skip_serializing_if = "Option::is_none")]
    pub exporter_id: Option<String>,
}

/// A description given as plain text or as a `{content, type}` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireDescription {
    Text(String),
    Rich {
        #[serde(default)]
        content: Option<String>,
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
    },
}

impl WireDescription {
    /// Returns the description text.
    #[must_use]
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Rich { content, .. } => content,
        }
    }
}

/// A folder or a request; a node without `request` is a folder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<WireDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Vec<Self>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub event: Vec<WireEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<WireAuth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<WireRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Vec<WireResponse>>,
}

/// The HTTP request of a request item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<WireAuth>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub header: Vec<WireProperty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<WireBody>,
    #[serde(default)]
    pub url: WireUrl,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<WireDescription>,
}

/// A URL given as a raw string or as a component object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireUrl {
    Raw(String),
    Structured(WireUrlParts),
}

impl Default for WireUrl {
    fn default() -> Self {
        Self::Raw(String::new())
    }
}

/// URL components.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireUrlParts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<Segments>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Segments>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<WireProperty>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variable: Vec<WireProperty>,
}

/// Host or path given as one string or as a list of segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Segments {
    Joined(String),
    List(Vec<String>),
}

impl Segments {
    /// Splits into segments using `separator` for the joined form.
    #[must_use]
    pub fn into_segments(self, separator: char) -> Vec<String> {
        match self {
            Self::List(list) => list,
            Self::Joined(text) => text
                .split(separator)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }
}

/// A key/value entry: variables, headers, query and form parameters, auth
/// parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireProperty {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<WireValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<WireValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<WireDescription>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// A scalar property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    Other(Value),
}

impl WireValue {
    /// Returns the value as text; `null` becomes `None`.
    #[must_use]
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Bool(flag) => Some(flag.to_string()),
            Self::Number(number) => Some(number.to_string()),
            Self::Text(text) => Some(text),
            Self::Other(Value::Null) => None,
            Self::Other(Value::Array(values)) => Some(
                values
                    .into_iter()
                    .filter_map(|v| v.as_str().map(str::to_owned))
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            Self::Other(other) => Some(other.to_string()),
        }
    }
}

/// Request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireBody {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urlencoded: Option<Vec<WireProperty>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formdata: Option<Vec<WireProperty>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<WireFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphql: Option<WireGraphql>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<WireBodyOptions>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

/// Binary file body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireFile {
    #[serde(default)]
    pub src: Option<String>,
}

/// GraphQL body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireGraphql {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<String>,
}

/// Body options (raw language).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireBodyOptions {
    #[serde(default)]
    pub raw: Option<WireRawOptions>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireRawOptions {
    #[serde(default)]
    pub language: Option<String>,
}

/// Auth block: `{"type": "<scheme>", "<scheme>": [parameters]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireAuth {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub parameters: BTreeMap<String, WireAuthParameters>,
}

/// Parameter list under an auth scheme key.
///
/// A list that does not read as properties is kept as [`Value`] so the
/// decoder can skip the bad entries one by one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireAuthParameters {
    Entries(Vec<WireProperty>),
    Other(Value),
}

/// Pre-request or test script.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireEvent {
    #[serde(default)]
    pub listen: String,
    #[serde(default)]
    pub script: Option<WireScript>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireScript {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub exec: Option<ExecLines>,
}

/// Script source given as one string or as a list of lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExecLines {
    Lines(Vec<String>),
    Source(String),
}

/// Example response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "originalRequest", default, skip_serializing_if = "Option::is_none")]
    pub original_request: Option<WireRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    #[serde(
        rename = "_postman_previewlanguage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub preview_language: Option<String>,
    #[serde(default)]
    pub header: Option<Vec<WireProperty>>,
    #[serde(default)]
    pub cookie: Vec<WireCookie>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Cookie recorded on an example response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCookie {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<WireProperty>,
}

/// Environment document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireEnvironment {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default)]
    pub values: Vec<WireEnvValue>,
}

/// Environment variable; disabled entries are ignored when decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireEnvValue {
    pub key: String,
    #[serde(default)]
    pub value: Option<WireValue>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

const fn default_enabled() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_minimal_collection() {
        let json = r#"{
            "info": {
                "name": "Test Collection",
                "_postman_id": "abc123",
                "schema": "https://schema.getpostman.com/json/collection/v2.1.0/collection.json"
            },
            "item": []
        }"#;

        let collection: WireCollection = serde_json::from_str(json).unwrap();
        assert_eq!(collection.info.name.as_deref(), Some("Test Collection"));
        assert_eq!(collection.info.postman_id.as_deref(), Some("abc123"));
        assert!(collection.item.is_empty());
    }

    #[test]
    fn test_url_accepts_string_and_object() {
        let raw: WireUrl = serde_json::from_str(r#""https://api.example.com/users""#).unwrap();
        assert!(matches!(raw, WireUrl::Raw(ref s) if s == "https://api.example.com/users"));

        let parts: WireUrl = serde_json::from_str(
            r#"{"raw": "https://api.example.com/users", "host": "api.example.com", "path": ["users"]}"#,
        )
        .unwrap();
        let WireUrl::Structured(parts) = parts else {
            panic!("expected structured url");
        };
        assert_eq!(
            parts.host.unwrap().into_segments('.'),
            vec!["api", "example", "com"]
        );
        assert_eq!(parts.path.unwrap().into_segments('/'), vec!["users"]);
    }

    #[test]
    fn test_property_value_shapes() {
        let entries: Vec<WireProperty> = serde_json::from_str(
            r#"[
                {"key": "a", "value": "text"},
                {"key": "b", "value": true},
                {"key": "c", "value": 42},
                {"key": "d", "value": null}
            ]"#,
        )
        .unwrap();
        let values: Vec<Option<String>> = entries
            .into_iter()
            .map(|p| p.value.and_then(WireValue::into_text))
            .collect();
        assert_eq!(
            values,
            vec![
                Some("text".to_string()),
                Some("true".to_string()),
                Some("42".to_string()),
                None
            ]
        );
    }

    #[test]
    fn test_description_and_exec_shapes() {
        let text: WireDescription = serde_json::from_str(r#""plain""#).unwrap();
        let rich: WireDescription =
            serde_json::from_str(r#"{"content": "rich", "type": "text/markdown"}"#).unwrap();
        assert_eq!(text.into_text().as_deref(), Some("plain"));
        assert_eq!(rich.into_text().as_deref(), Some("rich"));

        let one: ExecLines = serde_json::from_str(r#""a()\nb()""#).unwrap();
        let many: ExecLines = serde_json::from_str(r#"["a()", "b()"]"#).unwrap();
        assert_eq!(one, ExecLines::Source("a()\nb()".into()));
        assert_eq!(many, ExecLines::Lines(vec!["a()".into(), "b()".into()]));
    }

    #[test]
    fn test_auth_parameters_are_keyed_by_type() {
        let auth: WireAuth = serde_json::from_str(
            r#"{"type": "bearer", "bearer": [{"key": "token", "value": "abc123"}]}"#,
        )
        .unwrap();
        assert_eq!(auth.kind.as_deref(), Some("bearer"));
        assert!(matches!(
            auth.parameters.get("bearer"),
            Some(WireAuthParameters::Entries(entries)) if entries.len() == 1
        ));
    }

    #[test]
    fn test_auth_without_type_still_reads() {
        let auth: WireAuth =
            serde_json::from_str(r#"{"bearer": [{"key": "token", "value": "abc"}]}"#).unwrap();
        assert_eq!(auth.kind, None);

        let mixed: WireAuth =
            serde_json::from_str(r#"{"type": "basic", "basic": [{"key": "u"}, 7]}"#).unwrap();
        assert!(matches!(
            mixed.parameters.get("basic"),
            Some(WireAuthParameters::Other(Value::Array(_)))
        ));
    }
}
