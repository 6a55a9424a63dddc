//! Resolve request use case.

use satchel_domain::{
    AuthType, BodyPayload, Collection, CollectionElement, DomainError, DomainResult, ElementId,
    HttpMethod, Item, ItemGroup, Property, PropertyList, RequestAuth,
};
use tracing::debug;

use crate::ApplicationResult;

/// A request with every `{{name}}` token substituted.
#[derive(Debug, Clone)]
pub struct ResolvedRequest {
    /// HTTP verb.
    pub method: HttpMethod,
    /// Fully resolved URL.
    pub url: String,
    /// Resolved headers in order; entries without a key are dropped.
    pub headers: Vec<(String, String)>,
    /// Resolved raw or URL-encoded body text.
    pub body: Option<String>,
    /// Effective auth after inheritance, with resolved parameter values.
    pub auth: Option<RequestAuth>,
}

/// Use case for resolving a request against collection variables.
///
/// Values from `overrides` (typically a merged environment) shadow the
/// collection variables of the same name.
#[derive(Debug, Default)]
pub struct ResolveRequest {
    overrides: PropertyList,
}

impl ResolveRequest {
    /// Creates a resolver using only collection variables.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            overrides: PropertyList::new(),
        }
    }

    /// Creates a resolver whose `overrides` shadow collection variables.
    #[must_use]
    pub const fn with_overrides(overrides: PropertyList) -> Self {
        Self { overrides }
    }

    /// Resolves arbitrary text.
    ///
    /// # Errors
    ///
    /// Returns a domain `VariableResolution` error for an unknown token.
    pub fn resolve_text(&self, collection: &Collection, text: &str) -> ApplicationResult<String> {
        Ok(collection.resolve_variables_with(text, &self.overrides)?)
    }

    /// Resolves the request named `key`.
    ///
    /// Auth is inherited from the nearest enclosing folder, then the
    /// collection, unless the request declares its own. A `noauth` entry
    /// stops inheritance.
    ///
    /// # Errors
    ///
    /// Returns a domain `NotFound` error if no request is named `key`, or a
    /// `VariableResolution` error for an unknown token.
    pub fn execute(&self, collection: &Collection, key: &str) -> ApplicationResult<ResolvedRequest> {
        let item = collection
            .get_request(key)
            .ok_or_else(|| DomainError::NotFound(key.to_owned()))?;
        let request = &item.request;
        let resolve = |text: &str| collection.resolve_variables_with(text, &self.overrides);

        let url = resolve(&request.url_string(true)?)?;
        let headers = request
            .header
            .iter()
            .filter_map(|header| {
                let name = header.key()?;
                Some((name, header.value().unwrap_or_default()))
            })
            .map(|(name, value)| Ok((resolve(name)?, resolve(value)?)))
            .collect::<DomainResult<Vec<_>>>()?;

        let body = match request.body.as_ref().filter(|b| !b.disabled).map(|b| b.payload()) {
            Some(BodyPayload::Raw {
                content: Some(content),
                ..
            }) => Some(resolve(content)?),
            Some(BodyPayload::Urlencoded(fields)) => Some(resolve(&urlencoded(fields))?),
            _ => None,
        };

        let auth = match request.auth.as_ref() {
            Some(auth) => Some(auth),
            None => inherited_auth(collection, item.id()),
        }
        .filter(|auth| auth.auth_type() != AuthType::NoAuth)
        .map(|auth| resolve_auth(auth, &resolve))
        .transpose()?;

        debug!(request = key, %url, "resolved request");
        Ok(ResolvedRequest {
            method: request.method,
            url,
            headers,
            body,
            auth,
        })
    }
}

fn inherited_auth(collection: &Collection, id: ElementId) -> Option<&RequestAuth> {
    let path = collection.path_to(id)?;
    path.iter()
        .rev()
        .skip(1)
        .find_map(|item| match item {
            Item::Folder(folder) => folder.auth.as_ref(),
            Item::Request(_) => None,
        })
        .or(collection.auth.as_ref())
}

fn resolve_auth(
    auth: &RequestAuth,
    resolve: &impl Fn(&str) -> DomainResult<String>,
) -> DomainResult<RequestAuth> {
    let parameters = auth
        .parameters()
        .iter()
        .map(|parameter| {
            let mut resolved = parameter.clone();
            if let Some(value) = parameter.value() {
                resolved.value = Some(resolve(value)?);
            }
            Ok(resolved)
        })
        .collect::<DomainResult<Vec<Property>>>()?;
    Ok(RequestAuth::with_parameters(
        auth.auth_type(),
        PropertyList::try_from_iter(parameters)?,
    ))
}

fn urlencoded(fields: &PropertyList) -> String {
    fields
        .iter()
        .filter_map(|field| Some(format!("{}={}", field.key()?, field.value().unwrap_or_default())))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ApplicationError;
    use pretty_assertions::assert_eq;
    use satchel_domain::{BodyElement, Folder, Request, RequestBody};

    fn api_collection() -> Collection {
        let mut collection = Collection::new("Api");
        collection.add_variable(Property::new("host", "api.test")).unwrap();
        collection.add_variable(Property::new("token", "collection-token")).unwrap();
        collection.auth = Some(RequestAuth::bearer("{{token}}"));

        let mut users = Folder::new("Users");
        users.auth = Some(RequestAuth::basic("{{user}}", "secret"));

        let mut get_user = RequestBody::get("https://{{host}}/users/:id?expand={{expand}}").unwrap();
        get_user.url.set_path_variable_value("id", "42").unwrap();
        get_user.set_header("Accept", "application/json");
        get_user.set_header("X-Trace", "{{trace}}");
        users.add_item(Request::new("Get user", get_user).into()).unwrap();

        let create = RequestBody::new(HttpMethod::Post, "https://{{host}}/users")
            .unwrap()
            .with_body(BodyElement::raw(r#"{"name":"{{user}}"}"#, None));
        collection.add_request("Create user", create).unwrap();
        collection.add_item(users.into()).unwrap();
        collection
    }

    fn overrides() -> PropertyList {
        PropertyList::try_from_iter([
            Property::new("expand", "roles"),
            Property::new("trace", "abc"),
            Property::new("user", "ada"),
            Property::new("host", "staging.api.test"),
        ])
        .unwrap()
    }

    #[test]
    fn test_resolves_url_headers_and_folder_auth() {
        let resolved = ResolveRequest::with_overrides(overrides())
            .execute(&api_collection(), "Get user")
            .unwrap();

        assert_eq!(resolved.method, HttpMethod::Get);
        assert_eq!(resolved.url, "https://staging.api.test/users/42?expand=roles");
        assert_eq!(
            resolved.headers,
            vec![
                ("Accept".to_string(), "application/json".to_string()),
                ("X-Trace".to_string(), "abc".to_string()),
            ]
        );
        let auth = resolved.auth.unwrap();
        assert_eq!(auth.auth_type(), AuthType::Basic);
        assert_eq!(auth.parameters().value_of("username"), Some("ada"));
        assert_eq!(resolved.body, None);
    }

    #[test]
    fn test_resolves_body_and_collection_auth() {
        let resolved = ResolveRequest::with_overrides(overrides())
            .execute(&api_collection(), "Create user")
            .unwrap();

        assert_eq!(resolved.body.as_deref(), Some(r#"{"name":"ada"}"#));
        let auth = resolved.auth.unwrap();
        assert_eq!(auth.auth_type(), AuthType::Bearer);
        assert_eq!(auth.parameters().value_of("token"), Some("collection-token"));
    }

    #[test]
    fn test_noauth_stops_inheritance() {
        let mut collection = api_collection();
        collection.get_request_mut("Create user").unwrap().request.auth =
            Some(RequestAuth::new(AuthType::NoAuth));

        let resolved = ResolveRequest::with_overrides(overrides())
            .execute(&collection, "Create user")
            .unwrap();
        assert!(resolved.auth.is_none());
    }

    #[test]
    fn test_unknown_token_and_request_fail() {
        let resolver = ResolveRequest::new();
        let collection = api_collection();

        assert!(matches!(
            resolver.execute(&collection, "Get user"),
            Err(ApplicationError::Domain(DomainError::VariableResolution(_)))
        ));
        assert!(matches!(
            resolver.execute(&collection, "Missing"),
            Err(ApplicationError::Domain(DomainError::NotFound(_)))
        ));
        assert_eq!(
            resolver.resolve_text(&collection, "{{host}}/x").unwrap(),
            "api.test/x"
        );
    }
}
