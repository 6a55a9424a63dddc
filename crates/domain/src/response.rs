//! Saved example responses.

use crate::cookie::Cookie;
use crate::element::CollectionElement;
use crate::id::ElementId;
use crate::property::PropertyList;
use crate::request::RequestBody;

/// An example response stored with a request.
#[derive(Debug, Clone)]
pub struct Response {
    id: ElementId,
    /// Display name of the example.
    pub name: String,
    /// The request this response was produced by.
    pub original_request: Option<RequestBody>,
    /// Status text, e.g. `OK`.
    pub status: Option<String>,
    /// Status code.
    pub code: Option<u16>,
    /// Preview language hint (`_postman_previewlanguage`).
    pub preview_language: Option<String>,
    /// Response headers.
    pub header: PropertyList,
    /// Cookies set by the response.
    pub cookie: Vec<Cookie>,
    /// Response body text.
    pub body: Option<String>,
}

impl Response {
    /// Creates an example response.
    #[must_use]
    pub fn new(name: impl Into<String>, code: u16, status: impl Into<String>) -> Self {
        Self {
            id: ElementId::generate(),
            name: name.into(),
            original_request: None,
            status: Some(status.into()),
            code: Some(code),
            preview_language: None,
            header: PropertyList::new(),
            cookie: Vec::new(),
            body: None,
        }
    }

    /// Sets the body text.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the originating request.
    #[must_use]
    pub fn with_original_request(mut self, request: RequestBody) -> Self {
        self.original_request = Some(request);
        self
    }
}

impl CollectionElement for Response {
    fn id(&self) -> ElementId {
        self.id
    }

    fn key(&self) -> Option<&str> {
        None
    }
}
