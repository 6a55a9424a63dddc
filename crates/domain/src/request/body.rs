//! Request body payloads.
//!
//! A [`BodyElement`] holds exactly one payload shape at a time, selected by
//! its [`BodyMode`]. Accessors for a shape that is not active fail with
//! [`DomainError::IllegalModeAccess`].

use std::fmt;
use std::str::FromStr;

use crate::element::CollectionElement;
use crate::error::{DomainError, DomainResult};
use crate::id::ElementId;
use crate::property::{Property, PropertyList};

/// Discriminator for the active body payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyMode {
    /// Raw text, optionally tagged with a language.
    Raw,
    /// Alias of [`BodyMode::Raw`] with no language.
    Text,
    /// Multipart form fields.
    Formdata,
    /// URL-encoded form fields.
    Urlencoded,
    /// A reference to a file on disk.
    File,
    /// A GraphQL query with variables.
    Graphql,
}

impl BodyMode {
    /// Returns the mode as written in a collection document.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Text => "text",
            Self::Formdata => "formdata",
            Self::Urlencoded => "urlencoded",
            Self::File => "file",
            Self::Graphql => "graphql",
        }
    }
}

impl fmt::Display for BodyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyMode {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "raw" => Ok(Self::Raw),
            "text" => Ok(Self::Text),
            "formdata" => Ok(Self::Formdata),
            "urlencoded" => Ok(Self::Urlencoded),
            "file" => Ok(Self::File),
            "graphql" => Ok(Self::Graphql),
            other => Err(DomainError::UnknownBodyMode(other.to_string())),
        }
    }
}

/// Syntax hint for raw bodies, stored under `options.raw.language`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawLanguage {
    /// Plain text
    Text,
    /// JavaScript source
    Javascript,
    /// JSON document
    Json,
    /// HTML markup
    Html,
    /// XML document
    Xml,
    /// GraphQL source
    Graphql,
}

impl RawLanguage {
    /// Returns the language as written in a collection document.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Javascript => "javascript",
            Self::Json => "json",
            Self::Html => "html",
            Self::Xml => "xml",
            Self::Graphql => "graphql",
        }
    }
}

impl FromStr for RawLanguage {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "text" => Ok(Self::Text),
            "javascript" => Ok(Self::Javascript),
            "json" => Ok(Self::Json),
            "html" => Ok(Self::Html),
            "xml" => Ok(Self::Xml),
            "graphql" => Ok(Self::Graphql),
            other => Err(DomainError::UnknownRawLanguage(other.to_string())),
        }
    }
}

/// GraphQL query text and its JSON-encoded variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphqlPayload {
    /// The query document.
    pub query: Option<String>,
    /// Variables as JSON text.
    pub variables: Option<String>,
}

/// The payload shape held by a [`BodyElement`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyPayload {
    /// Raw text.
    Raw {
        /// Body text.
        content: Option<String>,
        /// Optional syntax hint.
        language: Option<RawLanguage>,
    },
    /// Multipart form fields.
    Formdata(PropertyList),
    /// URL-encoded form fields.
    Urlencoded(PropertyList),
    /// File reference.
    File {
        /// Path of the file to send.
        src: String,
    },
    /// GraphQL query.
    Graphql(GraphqlPayload),
}

impl BodyPayload {
    fn empty(mode: BodyMode) -> Self {
        match mode {
            BodyMode::Raw | BodyMode::Text => Self::Raw {
                content: None,
                language: None,
            },
            BodyMode::Formdata => Self::Formdata(PropertyList::new()),
            BodyMode::Urlencoded => Self::Urlencoded(PropertyList::new()),
            BodyMode::File => Self::File { src: String::new() },
            BodyMode::Graphql => Self::Graphql(GraphqlPayload::default()),
        }
    }

    const fn mode(&self) -> BodyMode {
        match self {
            Self::Raw { .. } => BodyMode::Raw,
            Self::Formdata(_) => BodyMode::Formdata,
            Self::Urlencoded(_) => BodyMode::Urlencoded,
            Self::File { .. } => BodyMode::File,
            Self::Graphql(_) => BodyMode::Graphql,
        }
    }
}

/// A mode-tagged request body.
#[derive(Debug, Clone)]
pub struct BodyElement {
    id: ElementId,
    payload: BodyPayload,
    /// Whether the body is disabled in the editor.
    pub disabled: bool,
}

impl BodyElement {
    /// Creates a body with an empty payload for `mode`.
    #[must_use]
    pub fn new(mode: BodyMode) -> Self {
        Self::from_payload(BodyPayload::empty(mode))
    }

    /// Creates a body from an explicit payload.
    #[must_use]
    pub fn from_payload(payload: BodyPayload) -> Self {
        Self {
            id: ElementId::generate(),
            payload,
            disabled: false,
        }
    }

    /// Creates a raw body.
    #[must_use]
    pub fn raw(content: impl Into<String>, language: Option<RawLanguage>) -> Self {
        Self::from_payload(BodyPayload::Raw {
            content: Some(content.into()),
            language,
        })
    }

    /// Creates a file body.
    #[must_use]
    pub fn file(src: impl Into<String>) -> Self {
        Self::from_payload(BodyPayload::File { src: src.into() })
    }

    /// Creates a GraphQL body.
    #[must_use]
    pub fn graphql(query: impl Into<String>, variables: Option<String>) -> Self {
        Self::from_payload(BodyPayload::Graphql(GraphqlPayload {
            query: Some(query.into()),
            variables,
        }))
    }

    /// Returns the active mode. Text bodies report [`BodyMode::Raw`].
    #[must_use]
    pub const fn mode(&self) -> BodyMode {
        self.payload.mode()
    }

    /// Returns the active payload.
    #[must_use]
    pub const fn payload(&self) -> &BodyPayload {
        &self.payload
    }

    /// Switches mode, discarding the current payload.
    pub fn set_mode(&mut self, mode: BodyMode) {
        self.payload = BodyPayload::empty(mode);
    }

    /// Returns the raw text.
    ///
    /// # Errors
    ///
    /// Fails unless the body is in raw or text mode.
    pub fn raw_content(&self) -> DomainResult<Option<&str>> {
        match &self.payload {
            BodyPayload::Raw { content, .. } => Ok(content.as_deref()),
            _ => Err(self.mode_error("raw")),
        }
    }

    /// Replaces the raw text, keeping the language.
    ///
    /// # Errors
    ///
    /// Fails unless the body is in raw or text mode.
    pub fn set_raw_content(&mut self, text: impl Into<String>) -> DomainResult<()> {
        let err = self.mode_error("raw");
        match &mut self.payload {
            BodyPayload::Raw { content, .. } => {
                *content = Some(text.into());
                Ok(())
            }
            _ => Err(err),
        }
    }

    /// Returns the raw language hint.
    ///
    /// # Errors
    ///
    /// Fails unless the body is in raw or text mode.
    pub fn raw_language(&self) -> DomainResult<Option<RawLanguage>> {
        match &self.payload {
            BodyPayload::Raw { language, .. } => Ok(*language),
            _ => Err(self.mode_error("raw")),
        }
    }

    /// Sets the raw language hint.
    ///
    /// # Errors
    ///
    /// Fails unless the body is in raw or text mode.
    pub fn set_raw_language(&mut self, hint: Option<RawLanguage>) -> DomainResult<()> {
        let err = self.mode_error("raw");
        match &mut self.payload {
            BodyPayload::Raw { language, .. } => {
                *language = hint;
                Ok(())
            }
            _ => Err(err),
        }
    }

    /// Returns the form fields.
    ///
    /// # Errors
    ///
    /// Fails unless the body is in formdata or urlencoded mode.
    pub fn form_data(&self) -> DomainResult<&PropertyList> {
        match &self.payload {
            BodyPayload::Formdata(fields) | BodyPayload::Urlencoded(fields) => Ok(fields),
            _ => Err(self.mode_error("formdata/urlencoded")),
        }
    }

    /// Returns the form fields mutably.
    ///
    /// # Errors
    ///
    /// Fails unless the body is in formdata or urlencoded mode.
    pub fn form_data_mut(&mut self) -> DomainResult<&mut PropertyList> {
        let err = self.mode_error("formdata/urlencoded");
        match &mut self.payload {
            BodyPayload::Formdata(fields) | BodyPayload::Urlencoded(fields) => Ok(fields),
            _ => Err(err),
        }
    }

    /// Adds or replaces a form field.
    ///
    /// # Errors
    ///
    /// Fails unless the body is in formdata or urlencoded mode, or if the field
    /// has neither key nor value.
    pub fn add_form_field(&mut self, field: Property) -> DomainResult<()> {
        self.form_data_mut()?.add(field)?;
        Ok(())
    }

    /// Removes a form field by key.
    ///
    /// # Errors
    ///
    /// Fails unless the body is in formdata or urlencoded mode.
    pub fn remove_form_field(&mut self, key: &str) -> DomainResult<Option<Property>> {
        Ok(self.form_data_mut()?.remove(Some(key)))
    }

    /// Returns the referenced file path.
    ///
    /// # Errors
    ///
    /// Fails unless the body is in file mode.
    pub fn file_src(&self) -> DomainResult<&str> {
        match &self.payload {
            BodyPayload::File { src } => Ok(src),
            _ => Err(self.mode_error("file")),
        }
    }

    /// Sets the referenced file path.
    ///
    /// # Errors
    ///
    /// Fails unless the body is in file mode.
    pub fn set_file_src(&mut self, path: impl Into<String>) -> DomainResult<()> {
        let err = self.mode_error("file");
        match &mut self.payload {
            BodyPayload::File { src } => {
                *src = path.into();
                Ok(())
            }
            _ => Err(err),
        }
    }

    /// Returns the GraphQL payload.
    ///
    /// # Errors
    ///
    /// Fails unless the body is in graphql mode.
    pub fn graphql_payload(&self) -> DomainResult<&GraphqlPayload> {
        match &self.payload {
            BodyPayload::Graphql(graphql) => Ok(graphql),
            _ => Err(self.mode_error("graphql")),
        }
    }

    /// Replaces the GraphQL query and variables.
    ///
    /// # Errors
    ///
    /// Fails unless the body is in graphql mode.
    pub fn set_graphql(
        &mut self,
        query: impl Into<String>,
        variables: Option<String>,
    ) -> DomainResult<()> {
        let err = self.mode_error("graphql");
        match &mut self.payload {
            BodyPayload::Graphql(graphql) => {
                graphql.query = Some(query.into());
                graphql.variables = variables;
                Ok(())
            }
            _ => Err(err),
        }
    }

    const fn mode_error(&self, required: &'static str) -> DomainError {
        DomainError::IllegalModeAccess {
            required,
            actual: self.mode().as_str(),
        }
    }
}

impl CollectionElement for BodyElement {
    fn id(&self) -> ElementId {
        self.id
    }

    fn key(&self) -> Option<&str> {
        None
    }
}
