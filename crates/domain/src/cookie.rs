//! Cookies recorded on example responses.

use crate::element::CollectionElement;
use crate::id::ElementId;
use crate::property::PropertyList;

/// A cookie captured with an example response.
#[derive(Debug, Clone)]
pub struct Cookie {
    id: ElementId,
    /// Cookie name.
    pub name: Option<String>,
    /// Cookie value.
    pub value: Option<String>,
    /// Domain the cookie belongs to.
    pub domain: Option<String>,
    /// Path the cookie applies to.
    pub path: Option<String>,
    /// Expiry as written by the server.
    pub expires: Option<String>,
    /// `Max-Age` attribute.
    pub max_age: Option<String>,
    /// Host-only flag.
    pub host_only: Option<bool>,
    /// `HttpOnly` flag.
    pub http_only: Option<bool>,
    /// `Secure` flag.
    pub secure: Option<bool>,
    /// Session-cookie flag.
    pub session: Option<bool>,
    /// Non-standard attributes.
    pub extensions: PropertyList,
}

impl Default for Cookie {
    fn default() -> Self {
        Self {
            id: ElementId::generate(),
            name: None,
            value: None,
            domain: None,
            path: None,
            expires: None,
            max_age: None,
            host_only: None,
            http_only: None,
            secure: None,
            session: None,
            extensions: PropertyList::new(),
        }
    }
}

impl Cookie {
    /// Creates a cookie for a domain.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
            domain: Some(domain.into()),
            ..Self::default()
        }
    }
}

impl CollectionElement for Cookie {
    fn id(&self) -> ElementId {
        self.id
    }

    fn key(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
