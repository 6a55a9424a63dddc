//! The HTTP request carried by a request item.

mod auth;
mod body;
mod method;

pub use auth::{AuthType, RequestAuth};
pub use body::{BodyElement, BodyMode, BodyPayload, GraphqlPayload, RawLanguage};
pub use method::HttpMethod;

use crate::error::DomainResult;
use crate::property::{Property, PropertyList};
use crate::url::Url;

/// Method, URL, headers, body and auth of a request.
#[derive(Debug, Clone, Default)]
pub struct RequestBody {
    /// HTTP verb.
    pub method: HttpMethod,
    /// Target URL.
    pub url: Url,
    /// Request headers.
    pub header: PropertyList,
    /// Optional payload.
    pub body: Option<BodyElement>,
    /// Optional auth overriding the inherited one.
    pub auth: Option<RequestAuth>,
    /// Free-form description.
    pub description: Option<String>,
}

impl RequestBody {
    /// Creates a GET request for a parsed URL.
    ///
    /// # Errors
    ///
    /// Fails if the URL declares the same path variable twice.
    pub fn get(raw_url: &str) -> DomainResult<Self> {
        Self::new(HttpMethod::Get, raw_url)
    }

    /// Creates a request with the given method and URL.
    ///
    /// # Errors
    ///
    /// Fails if the URL declares the same path variable twice.
    pub fn new(method: HttpMethod, raw_url: &str) -> DomainResult<Self> {
        Ok(Self {
            method,
            url: Url::parse(raw_url)?,
            ..Self::default()
        })
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: BodyElement) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the auth.
    #[must_use]
    pub fn with_auth(mut self, auth: RequestAuth) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Adds or replaces a header.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let _ = self.header.add(Property::new(name, value));
    }

    /// Returns the URL with path variables optionally substituted.
    ///
    /// # Errors
    ///
    /// Fails if a path token has no matching variable.
    pub fn url_string(&self, resolve_path_variables: bool) -> DomainResult<String> {
        self.url.get_url(resolve_path_variables)
    }
}
