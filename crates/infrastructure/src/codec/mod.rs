//! Collection v2.1 JSON codec.
//!
//! Documents are decoded into wire types first and then mapped onto the
//! collection model. Decoding tolerates entries the model cannot hold and
//! reports them as [`DecodeWarning`]s; it fails only on invalid JSON or on a
//! request with an unsupported HTTP method.

mod environment;
mod mapper;
pub mod types;
mod validate;
mod warning;

use satchel_application::ApplicationError;
use satchel_domain::{
    BodyElement, Collection, DomainError, Event, Item, ItemGroup, ItemKind, Property,
    PropertyList, RequestAuth, RequestBody, Response, Url,
};
use serde_json::Value;
use tracing::debug;

use crate::serialization::{SerializationError, from_json, to_json_stable};

pub use environment::{parse_environment, render_environment};
pub use validate::{ValidationReport, validate_document};
pub use warning::{DecodeWarning, WarningSeverity};

use mapper::Decoder;
use types::{WireCollection, WireItem};

/// Errors raised while decoding or encoding documents.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The input is not valid JSON or has the wrong shape.
    #[error("invalid document: {0}")]
    Json(#[from] serde_json::Error),

    /// The document violates a model rule.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Rendering failed.
    #[error(transparent)]
    Serialization(#[from] SerializationError),
}

impl From<CodecError> for ApplicationError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Domain(err) => Self::Domain(err),
            other => Self::Codec(other.to_string()),
        }
    }
}

/// Result type alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// A decoded collection and the problems found while decoding it.
#[derive(Debug)]
pub struct Decoded {
    /// The decoded collection.
    pub collection: Collection,
    /// Entries that were skipped or replaced.
    pub warnings: Vec<DecodeWarning>,
}

/// Decodes a collection document, discarding warnings.
///
/// # Errors
///
/// Returns an error if the text is not a collection document.
pub fn parse_collection(json: &str) -> CodecResult<Collection> {
    decode_collection(json).map(|decoded| decoded.collection)
}

/// Decodes a collection document.
///
/// # Errors
///
/// Returns an error if the text is not valid JSON, does not have the shape
/// of a collection, or contains a request with an unsupported method.
pub fn decode_collection(json: &str) -> CodecResult<Decoded> {
    decode_wire(from_json(json).map_err(json_error)?)
}

/// Decodes a collection document that was already parsed as JSON.
///
/// # Errors
///
/// Returns an error if the value does not have the shape of a collection or
/// contains a request with an unsupported method.
pub fn decode_collection_value(value: Value) -> CodecResult<Decoded> {
    decode_wire(serde_json::from_value(value)?)
}

fn decode_wire(wire: WireCollection) -> CodecResult<Decoded> {
    let mut decoder = Decoder::default();
    let collection = decoder.collection(wire)?;
    let warnings = decoder.into_warnings();
    debug!(
        name = collection.name(),
        items = collection.get_items(Some(ItemKind::Folder)).len() + collection.request_count(),
        warnings = warnings.len(),
        "decoded collection"
    );
    Ok(Decoded {
        collection,
        warnings,
    })
}

/// Decodes a single item node.
///
/// # Errors
///
/// Returns an error if the text is not an item node or contains a request
/// with an unsupported method.
pub fn parse_item(json: &str) -> CodecResult<Item> {
    let wire: WireItem = from_json(json).map_err(json_error)?;
    Decoder::default().item(wire)
}

/// Renders a collection as a stable, pretty-printed document.
///
/// # Errors
///
/// Returns an error if rendering fails.
pub fn render_collection(collection: &Collection) -> CodecResult<String> {
    let json = to_json_stable(&mapper::encode_collection(collection))?;
    debug!(name = collection.name(), bytes = json.len(), "rendered collection");
    Ok(json)
}

fn json_error(err: SerializationError) -> CodecError {
    match err {
        SerializationError::Deserialize(err) | SerializationError::Serialize(err) => {
            CodecError::Json(err)
        }
        other => CodecError::Serialization(other),
    }
}

/// Conversion of model elements into their document JSON.
pub trait ToJson {
    /// Returns the JSON node for this element.
    ///
    /// # Errors
    ///
    /// Returns an error if the element cannot be represented as JSON.
    fn to_json(&self) -> CodecResult<Value>;
}

macro_rules! impl_to_json {
    ($($ty:ty => $encode:path),* $(,)?) => {
        $(
            impl ToJson for $ty {
                fn to_json(&self) -> CodecResult<Value> {
                    Ok(serde_json::to_value($encode(self))?)
                }
            }
        )*
    };
}

impl_to_json! {
    Collection => mapper::encode_collection,
    Item => mapper::encode_item,
    RequestBody => mapper::encode_request,
    Url => mapper::encode_url,
    BodyElement => mapper::encode_body,
    RequestAuth => mapper::encode_auth,
    Event => mapper::encode_event,
    Property => mapper::encode_property,
    PropertyList => mapper::encode_properties,
    Response => mapper::encode_response,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use satchel_domain::{
        AuthType, BodyMode, CollectionElement, DEFAULT_COLLECTION_SCHEMA, EventType, HttpMethod,
        Protocol, RawLanguage,
    };
    use serde_json::json;

    const SAMPLE: &str = r#"{
        "info": {
            "_postman_id": "8f3e-41",
            "name": "Pet Store",
            "description": {"content": "Pets API", "type": "text/markdown"},
            "schema": "https://schema.getpostman.com/json/collection/v2.1.0/collection.json"
        },
        "item": [
            {
                "name": "Pets",
                "auth": {"type": "apikey", "apikey": [
                    {"key": "key", "value": "X-Key"},
                    {"key": "value", "value": "{{apiKey}}"}
                ]},
                "event": [{"listen": "prerequest", "script": {"type": "text/javascript", "exec": "setup();\nlog();"}}],
                "item": [
                    {
                        "name": "Get pet",
                        "request": {
                            "method": "GET",
                            "header": [{"key": "Accept", "value": "application/json"}],
                            "url": {
                                "raw": "https://{{host}}:8080/pets/:petId?verbose=true",
                                "protocol": "https",
                                "host": ["{{host}}"],
                                "port": "8080",
                                "path": ["pets", ":petId"],
                                "query": [{"key": "verbose", "value": "true"}],
                                "variable": [{"key": "petId", "value": "7"}]
                            }
                        },
                        "response": [{
                            "name": "Found",
                            "status": "OK",
                            "code": 200,
                            "_postman_previewlanguage": "json",
                            "header": [{"key": "Content-Type", "value": "application/json"}],
                            "cookie": [],
                            "body": "{\"id\": 7}"
                        }]
                    },
                    {
                        "name": "Upload photo",
                        "request": {
                            "method": "post",
                            "url": "https://{{host}}/pets/:petId/photo",
                            "body": {"mode": "formdata", "formdata": [
                                {"key": "file", "src": "/tmp/cat.png", "type": "file"},
                                {"key": "caption", "value": "Cat", "type": "text"}
                            ]}
                        }
                    }
                ]
            },
            {
                "name": "Create pet",
                "request": {
                    "method": "POST",
                    "url": "https://{{host}}/pets",
                    "body": {"mode": "raw", "raw": "{\"name\": \"Rex\"}", "options": {"raw": {"language": "json"}}}
                }
            }
        ],
        "variable": [
            {"key": "host", "value": "pets.test"},
            {"key": "debug", "value": true, "type": "boolean"},
            {"key": "retries", "value": 3},
            {"value": null}
        ],
        "auth": {"type": "bearer", "bearer": [{"key": "token", "value": "t0k3n", "type": "string"}]}
    }"#;

    #[test]
    fn test_decode_sample() {
        let Decoded {
            collection,
            warnings,
        } = decode_collection(SAMPLE).unwrap();

        assert_eq!(collection.name(), "Pet Store");
        assert_eq!(collection.info.description.as_deref(), Some("Pets API"));
        assert_eq!(collection.postman_id().unwrap().as_str(), "8f3e-41");
        assert_eq!(collection.request_count(), 3);

        let pets = collection.get_folder("Pets").unwrap();
        assert_eq!(pets.auth.as_ref().unwrap().auth_type(), AuthType::ApiKey);
        assert_eq!(
            pets.events.get(EventType::PreRequest).unwrap().lines(),
            ["setup();", "log();"]
        );

        let get_pet = collection.get_request("Get pet").unwrap();
        assert_eq!(get_pet.parent(), Some(pets.id()));
        assert_eq!(get_pet.request.url.port.as_deref(), Some("8080"));
        assert_eq!(get_pet.request.url.path, vec!["pets", ":petId"]);
        assert_eq!(
            get_pet.request.url_string(true).unwrap(),
            "https://{{host}}:8080/pets/7?verbose=true"
        );
        assert_eq!(get_pet.responses[0].code, Some(200));
        assert_eq!(get_pet.responses[0].preview_language.as_deref(), Some("json"));

        let upload = collection.get_request("Upload photo").unwrap();
        assert_eq!(upload.request.method, HttpMethod::Post);
        let form = upload.request.body.as_ref().unwrap().form_data().unwrap();
        assert_eq!(form.value_of("file"), Some("/tmp/cat.png"));

        let create = collection.get_request("Create pet").unwrap();
        let body = create.request.body.as_ref().unwrap();
        assert_eq!(body.mode(), BodyMode::Raw);
        assert_eq!(body.raw_language().unwrap(), Some(RawLanguage::Json));

        assert_eq!(collection.variables.value_of("debug"), Some("true"));
        assert_eq!(collection.variables.value_of("retries"), Some("3"));
        assert_eq!(collection.variables.len(), 3);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].path, "Pet Store/variable");
    }

    #[test]
    fn test_render_shapes_document() {
        let collection = parse_collection(SAMPLE).unwrap();
        let rendered: Value = serde_json::from_str(&render_collection(&collection).unwrap()).unwrap();

        let keys: Vec<&str> = rendered.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["info", "item", "variable", "auth"]);
        assert_eq!(rendered["info"]["_postman_id"], "8f3e-41");
        assert_eq!(rendered["variable"][1]["value"], json!(true));
        assert_eq!(rendered["variable"][2]["value"], json!("3"));

        let upload = &rendered["item"][0]["item"][1];
        assert_eq!(upload["request"]["method"], "POST");
        assert_eq!(upload["request"]["body"]["formdata"][0]["src"], "/tmp/cat.png");
        assert!(upload["request"]["body"]["formdata"][0].get("value").is_none());

        let auth = &rendered["item"][0]["auth"];
        assert_eq!(auth["type"], "apikey");
        assert_eq!(auth["apikey"][0], json!({"key": "key", "value": "X-Key", "type": "string"}));
    }

    #[test]
    fn test_render_then_parse_keeps_tree() {
        let original = parse_collection(SAMPLE).unwrap();
        let reparsed = parse_collection(&render_collection(&original).unwrap()).unwrap();

        let names = |c: &Collection| -> Vec<String> {
            c.get_items(None).iter().map(|i| i.name().to_owned()).collect()
        };
        assert_eq!(names(&reparsed), names(&original));
        assert_eq!(
            reparsed.get_request("Get pet").unwrap().request.url.raw(),
            "https://{{host}}:8080/pets/:petId?verbose=true"
        );
        assert_eq!(
            render_collection(&reparsed).unwrap(),
            render_collection(&original).unwrap()
        );
    }

    #[test]
    fn test_defaults_for_missing_info() {
        let collection = parse_collection(r#"{"item": [{"name": "Empty folder"}]}"#).unwrap();
        assert_eq!(collection.name(), "New Collection");
        assert_eq!(collection.info.schema, DEFAULT_COLLECTION_SCHEMA);
        assert!(collection.get_folder("Empty folder").is_some());
    }

    #[test]
    fn test_lenient_entries_produce_warnings() {
        let json = r#"{
            "info": {"name": "Odd"},
            "item": [{
                "name": "Odd request",
                "event": [{"listen": "onload", "script": {"exec": []}}],
                "request": {
                    "method": "GET",
                    "url": "https://odd.test/:id/:id",
                    "auth": {"type": "kerberos"},
                    "body": {"mode": "binary"}
                }
            }]
        }"#;
        let Decoded {
            collection,
            warnings,
        } = decode_collection(json).unwrap();

        let request = collection.get_request("Odd request").unwrap();
        assert!(request.request.auth.is_none());
        assert!(request.request.body.is_none());
        assert!(request.events.is_empty());
        assert_eq!(request.request.url.raw(), "https://odd.test/:id/:id");
        let paths: Vec<&str> = warnings.iter().map(|w| w.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "Odd/Odd request/event",
                "Odd/Odd request/url",
                "Odd/Odd request/body",
                "Odd/Odd request/auth"
            ]
        );
    }

    #[test]
    fn test_empty_document_gets_defaults() {
        let collection = parse_collection("{}").unwrap();
        assert_eq!(collection.name(), "New Collection");
        assert_eq!(collection.info.schema, DEFAULT_COLLECTION_SCHEMA);
        assert!(collection.children().is_empty());

        let rendered: Value = serde_json::from_str(&render_collection(&collection).unwrap()).unwrap();
        assert_eq!(
            rendered,
            json!({
                "info": {
                    "name": "New Collection",
                    "schema": "https://schema.getpostman.com/json/collection/v2.1.0/collection.json"
                },
                "item": []
            })
        );
    }

    #[test]
    fn test_url_protocol_is_checked() {
        let json = r#"{
            "info": {"name": "Schemes"},
            "item": [
                {"name": "secure", "request": {"method": "GET", "url": {
                    "raw": "https://a.test/x", "protocol": "https", "host": ["a", "test"], "path": ["x"]
                }}},
                {"name": "ftp", "request": {"method": "GET", "url": {
                    "raw": "ftp://b.test", "protocol": "ftp", "host": ["b", "test"]
                }}},
                {"name": "shouting", "request": {"method": "GET", "url": {
                    "raw": "HTTP://c.test", "protocol": "HTTP", "host": ["c", "test"]
                }}}
            ]
        }"#;
        let Decoded {
            collection,
            warnings,
        } = decode_collection(json).unwrap();

        let url = |name: &str| collection.get_request(name).unwrap().request.url.clone();
        assert_eq!(url("secure").protocol, Some(Protocol::Https));
        assert_eq!(url("ftp").protocol, None);
        assert_eq!(url("ftp").raw(), "ftp://b.test");
        assert_eq!(url("shouting").protocol, None);

        let paths: Vec<&str> = warnings.iter().map(|w| w.path.as_str()).collect();
        assert_eq!(paths, vec!["Schemes/ftp/url", "Schemes/shouting/url"]);

        let rendered = url("secure").to_json().unwrap();
        assert_eq!(rendered["protocol"], "https");
        assert!(url("ftp").to_json().unwrap().get("protocol").is_none());
    }

    #[test]
    fn test_auth_without_type_is_dropped() {
        let json = r#"{
            "info": {"name": "Untyped"},
            "auth": {"bearer": [{"key": "token", "value": "abc"}]},
            "item": [{"name": "r", "request": {"method": "GET", "url": "https://r.test"}}]
        }"#;
        let Decoded {
            collection,
            warnings,
        } = decode_collection(json).unwrap();

        assert!(collection.auth.is_none());
        assert!(collection.get_request("r").is_some());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].path, "Untyped/auth");
    }

    #[test]
    fn test_auth_skips_unreadable_parameters() {
        let json = r#"{
            "info": {"name": "Basic"},
            "auth": {"type": "basic", "basic": [{"key": "username", "value": "ann"}, 7]}
        }"#;
        let Decoded {
            collection,
            warnings,
        } = decode_collection(json).unwrap();

        let auth = collection.auth.unwrap();
        assert_eq!(auth.auth_type(), AuthType::Basic);
        assert_eq!(auth.parameters().value_of("username"), Some("ann"));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_unsupported_method_and_invalid_json_fail() {
        let json = r#"{"info": {"name": "X"}, "item": [{"name": "r", "request": {"method": "FETCH", "url": ""}}]}"#;
        assert!(matches!(
            parse_collection(json),
            Err(CodecError::Domain(DomainError::UnsupportedMethod(_)))
        ));
        assert!(matches!(parse_collection("{"), Err(CodecError::Json(_))));
    }

    #[test]
    fn test_decode_from_value() {
        let value: Value = serde_json::from_str(SAMPLE).unwrap();
        let decoded = decode_collection_value(value).unwrap();
        assert_eq!(decoded.collection.name(), "Pet Store");
        assert_eq!(decoded.warnings.len(), 1);

        assert!(matches!(
            decode_collection_value(json!({"item": "not a list"})),
            Err(CodecError::Json(_))
        ));
    }

    #[test]
    fn test_parse_item_and_to_json() {
        let item = parse_item(r#"{"name": "Ping", "request": {"method": "HEAD", "url": "https://ping.test"}}"#)
            .unwrap();
        assert_eq!(item.kind(), ItemKind::Request);

        let node = item.to_json().unwrap();
        assert_eq!(node["request"]["method"], "HEAD");
        assert_eq!(node["response"], json!([]));

        let auth = RequestAuth::new(AuthType::NoAuth).to_json().unwrap();
        assert_eq!(auth, json!({"type": "noauth"}));

        let raw_url = Url::with_raw_unparsed("{{base}}").to_json().unwrap();
        assert_eq!(raw_url, json!("{{base}}"));
    }
}
