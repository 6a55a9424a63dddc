//! Collection API client using reqwest.
//!
//! Implements the [`CollectionApi`] port against the hosted collection
//! service. Documents travel wrapped in a `{"collection": ...}` envelope.

use reqwest::{Client, RequestBuilder};
use satchel_application::ports::CollectionApi;
use satchel_application::{ApplicationError, ApplicationResult};
use satchel_domain::{Collection, CollectionId, DEFAULT_COLLECTION_SCHEMA};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::codec::{ToJson, decode_collection_value};
use crate::config::PostmanApiConfig;

const USER_AGENT: &str = concat!("satchel/", env!("CARGO_PKG_VERSION"));

/// Collection API client.
pub struct PostmanApiClient {
    client: Client,
    config: PostmanApiConfig,
}

impl PostmanApiClient {
    /// Creates a client with default HTTP settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: PostmanApiConfig) -> ApplicationResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(map_error)?;
        Ok(Self { client, config })
    }

    /// Creates a client around an existing reqwest client.
    #[must_use]
    pub const fn with_client(client: Client, config: PostmanApiConfig) -> Self {
        Self { client, config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &PostmanApiConfig {
        &self.config
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("accept", "application/json")
            .header("x-api-key", self.config.api_key())
    }

    async fn send(&self, builder: RequestBuilder, resource: &str) -> ApplicationResult<Value> {
        let response = self.authorized(builder).send().await.map_err(map_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_error)?;
        debug!(status, bytes = body.len(), resource, "collection API response");
        let body = interpret_status(status, body, resource)?;
        serde_json::from_str(&body)
            .map_err(|e| ApplicationError::Codec(format!("invalid API response: {e}")))
    }

    async fn upload(
        &self,
        builder: RequestBuilder,
        collection: &Collection,
        resource: &str,
    ) -> ApplicationResult<CollectionId> {
        let envelope = build_envelope(collection.to_json()?);
        let response = self.send(builder.json(&envelope), resource).await?;
        extract_collection_id(&response)
    }
}

impl CollectionApi for PostmanApiClient {
    async fn fetch(&self, id: &CollectionId) -> ApplicationResult<Collection> {
        let url = self.config.endpoint(&["collections", id.as_str()]);
        let mut response = self.send(self.client.get(url), id.as_str()).await?;
        let document = response
            .get_mut("collection")
            .map(Value::take)
            .ok_or_else(|| ApplicationError::Codec("response has no collection".to_string()))?;
        let decoded = decode_collection_value(document)?;
        if !decoded.warnings.is_empty() {
            warn!(
                id = %id,
                warnings = decoded.warnings.len(),
                "fetched collection had unreadable entries"
            );
        }
        Ok(decoded.collection)
    }

    async fn create(
        &self,
        collection: &Collection,
        workspace: Option<&str>,
    ) -> ApplicationResult<CollectionId> {
        let mut url = self.config.endpoint(&["collections"]);
        if let Some(workspace) = workspace.filter(|w| !w.is_empty()) {
            url.query_pairs_mut().append_pair("workspace", workspace);
        }
        self.upload(self.client.post(url), collection, "collections")
            .await
    }

    async fn update(
        &self,
        id: &CollectionId,
        collection: &Collection,
    ) -> ApplicationResult<CollectionId> {
        let url = self.config.endpoint(&["collections", id.as_str()]);
        self.upload(self.client.put(url), collection, id.as_str())
            .await
    }
}

/// Wraps a collection document in the upload envelope.
///
/// The `info` block is reduced to the name and schema; every other member of
/// the document follows it unchanged.
#[must_use]
pub fn build_envelope(document: Value) -> Value {
    let mut members = match document {
        Value::Object(members) => members,
        _ => Map::new(),
    };
    let info = members.remove("info");
    let info_field = |key: &str, default: &str| {
        info.as_ref()
            .and_then(|info| info.get(key))
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    };

    let mut header = Map::new();
    header.insert("name".to_string(), info_field("name", "").into());
    header.insert(
        "schema".to_string(),
        info_field("schema", DEFAULT_COLLECTION_SCHEMA).into(),
    );

    let mut collection = Map::new();
    collection.insert("info".to_string(), Value::Object(header));
    collection.extend(members);

    let mut envelope = Map::new();
    envelope.insert("collection".to_string(), Value::Object(collection));
    Value::Object(envelope)
}

/// Maps an API status to a result, passing the body through on success.
///
/// # Errors
///
/// Returns [`ApplicationError::NotFound`] for 404 and
/// [`ApplicationError::Api`] for any other status than 200.
pub fn interpret_status(status: u16, body: String, resource: &str) -> ApplicationResult<String> {
    match status {
        200 => Ok(body),
        404 => Err(ApplicationError::NotFound(format!("collection {resource}"))),
        _ => Err(ApplicationError::Api { status, body }),
    }
}

/// Reads the collection id from a create or update response.
///
/// # Errors
///
/// Returns [`ApplicationError::Codec`] if neither `collection.id` nor
/// `collection.uid` is present.
pub fn extract_collection_id(response: &Value) -> ApplicationResult<CollectionId> {
    let collection = response.get("collection");
    ["id", "uid"]
        .iter()
        .find_map(|key| {
            collection
                .and_then(|c| c.get(*key))
                .and_then(Value::as_str)
                .filter(|id| !id.is_empty())
        })
        .map(CollectionId::from)
        .ok_or_else(|| ApplicationError::Codec("response has no collection id".to_string()))
}

fn map_error(err: reqwest::Error) -> ApplicationError {
    let message = if err.is_timeout() {
        format!("request timed out: {err}")
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    };
    ApplicationError::Http(message)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_build_envelope_reduces_info() {
        let document = json!({
            "info": {
                "_postman_id": "abc",
                "name": "Pets",
                "schema": "https://schema.getpostman.com/json/collection/v2.1.0/collection.json",
                "description": "dropped"
            },
            "item": [],
            "variable": [{"key": "base", "value": "x"}]
        });

        let envelope = build_envelope(document);

        assert_eq!(
            envelope,
            json!({
                "collection": {
                    "info": {
                        "name": "Pets",
                        "schema": "https://schema.getpostman.com/json/collection/v2.1.0/collection.json"
                    },
                    "item": [],
                    "variable": [{"key": "base", "value": "x"}]
                }
            })
        );
        let keys: Vec<_> = envelope["collection"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["info", "item", "variable"]);
    }

    #[test]
    fn test_build_envelope_without_info() {
        let envelope = build_envelope(json!({"item": []}));
        assert_eq!(envelope["collection"]["info"]["name"], "");
        assert_eq!(
            envelope["collection"]["info"]["schema"],
            DEFAULT_COLLECTION_SCHEMA
        );
    }

    #[test]
    fn test_interpret_status() {
        assert_eq!(interpret_status(200, "{}".into(), "x").unwrap(), "{}");
        assert!(matches!(
            interpret_status(404, String::new(), "abc"),
            Err(ApplicationError::NotFound(resource)) if resource.contains("abc")
        ));
        assert!(matches!(
            interpret_status(401, "denied".into(), "abc"),
            Err(ApplicationError::Api { status: 401, body }) if body == "denied"
        ));
    }

    #[test]
    fn test_extract_collection_id() {
        let id = extract_collection_id(&json!({"collection": {"id": "c1", "uid": "u-c1"}}));
        assert_eq!(id.unwrap().as_str(), "c1");

        let uid = extract_collection_id(&json!({"collection": {"uid": "u-c1"}}));
        assert_eq!(uid.unwrap().as_str(), "u-c1");

        assert!(matches!(
            extract_collection_id(&json!({"error": "nope"})),
            Err(ApplicationError::Codec(_))
        ));
    }

    #[test]
    fn test_client_builds_with_config() {
        let config = PostmanApiConfig::new("key").unwrap();
        let client = PostmanApiClient::new(config.clone()).unwrap();
        assert_eq!(client.config(), &config);
    }
}
