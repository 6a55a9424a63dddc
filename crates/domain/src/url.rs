//! Request URL model.
//!
//! A [`Url`] keeps the `raw` string it was parsed from alongside the derived
//! components. Parsing and [`Url::generate_url`] are not exact inverses: the
//! raw text is never regenerated implicitly.

use std::fmt;
use std::str::FromStr;

use crate::element::CollectionElement;
use crate::error::{DomainError, DomainResult};
use crate::id::ElementId;
use crate::property::{Property, PropertyList};

/// URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// Plain HTTP
    Http,
    /// HTTP over TLS
    Https,
}

impl Protocol {
    /// Schemes in the order a raw URL prefix is tried.
    const ALL: [Self; 2] = [Self::Https, Self::Http];

    /// Returns the scheme as written in a collection document.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl FromStr for Protocol {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            other => Err(DomainError::UnknownProtocol(other.to_string())),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request URL split into Postman components.
#[derive(Debug, Clone)]
pub struct Url {
    id: ElementId,
    raw: String,
    /// Scheme without `://`.
    pub protocol: Option<Protocol>,
    /// Host segments, split on `.`.
    pub host: Vec<String>,
    /// Path segments; entries starting with `:` are path variables.
    pub path: Vec<String>,
    /// Port digits.
    pub port: Option<String>,
    /// Query parameters in order.
    pub query: PropertyList,
    /// Path variables keyed without the leading `:`.
    pub variable: PropertyList,
}

impl Default for Url {
    fn default() -> Self {
        Self {
            id: ElementId::generate(),
            raw: String::new(),
            protocol: None,
            host: Vec::new(),
            path: Vec::new(),
            port: None,
            query: PropertyList::new(),
            variable: PropertyList::new(),
        }
    }
}

impl Url {
    /// Creates an empty URL.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw URL string into components.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DuplicateVariableKey`] if the same path variable
    /// appears twice.
    pub fn parse(raw: impl Into<String>) -> DomainResult<Self> {
        let mut url = Self::new();
        url.set_raw(raw)?;
        Ok(url)
    }

    /// Creates a URL that keeps `raw` verbatim without deriving components.
    ///
    /// Used when the components are supplied separately, e.g. by a decoder.
    #[must_use]
    pub fn with_raw_unparsed(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            ..Self::default()
        }
    }

    /// Rebuilds the raw text from the current components.
    pub fn refresh_raw(&mut self) {
        self.raw = self.generate_url();
    }

    /// Builds a URL from a dotted host and a slash-separated path.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DuplicateVariableKey`] if the same path variable
    /// appears twice.
    pub fn from_host_and_path(host: &str, path: &str) -> DomainResult<Self> {
        let mut url = Self::new();
        url.host = host.split('.').map(str::to_owned).collect();
        url.parse_path(path)?;
        url.raw = url.generate_url();
        Ok(url)
    }

    /// Returns the raw URL text.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Replaces the raw URL and re-derives every component from it.
    ///
    /// The query is split off at the first `?` and a leading `http://` or
    /// `https://` becomes the protocol. The first `:` followed by two to four
    /// digits is taken as the port, and every `:port` occurrence is stripped.
    /// The text before the next `/` is the host and the remainder is the path.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DuplicateVariableKey`] if the same path variable
    /// appears twice.
    pub fn set_raw(&mut self, raw: impl Into<String>) -> DomainResult<()> {
        let raw = raw.into();
        self.clear_components();

        let (before_query, query) = match raw.split_once('?') {
            Some((head, query)) => (head, Some(query)),
            None => (raw.as_str(), None),
        };
        if let Some(query) = query {
            self.parse_query(query);
        }

        let mut rest = before_query.to_owned();
        for protocol in Protocol::ALL {
            if let Some(stripped) = rest
                .strip_prefix(protocol.as_str())
                .and_then(|r| r.strip_prefix("://"))
            {
                self.protocol = Some(protocol);
                rest = stripped.to_owned();
                break;
            }
        }

        if let Some(port) = find_port(&rest).map(str::to_owned) {
            rest = rest.replace(&format!(":{port}"), "");
            self.port = Some(port);
        }

        let parsed = if rest.is_empty() {
            Ok(())
        } else {
            let (host, path) = rest.find('/').map_or((rest.as_str(), ""), |i| rest.split_at(i));
            if !host.is_empty() {
                self.host = host.split('.').map(str::to_owned).collect();
            }
            self.parse_path(path)
        };
        self.raw = raw;
        parsed
    }

    /// Builds a URL string from the components.
    #[must_use]
    pub fn generate_url(&self) -> String {
        let mut out = String::new();
        if let Some(protocol) = self.protocol {
            out.push_str(protocol.as_str());
            out.push_str("://");
        }
        out.push_str(&self.host.join("."));
        if let Some(port) = self.port.as_deref().filter(|p| !p.is_empty()) {
            out.push(':');
            out.push_str(port);
        }
        for segment in &self.path {
            out.push('/');
            out.push_str(segment);
        }
        if !self.query.is_empty() {
            out.push('?');
            out.push_str(&self.query_string());
        }
        out
    }

    /// Returns the raw URL, optionally with `:name` path tokens replaced by
    /// their path-variable values.
    ///
    /// A variable that exists but has no value leaves its token in place.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::VariableResolution`] if a token has no matching
    /// path variable.
    pub fn get_url(&self, resolve_path_variables: bool) -> DomainResult<String> {
        if resolve_path_variables {
            resolve_path_tokens(&self.raw, &self.variable)
        } else {
            Ok(self.raw.clone())
        }
    }

    /// Returns the query parameters as `key=value` pairs joined by `&`.
    #[must_use]
    pub fn query_string(&self) -> String {
        self.query
            .iter()
            .map(|p| {
                format!(
                    "{}={}",
                    p.key().unwrap_or_default(),
                    p.value().unwrap_or_default()
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Adds or replaces a query parameter.
    pub fn add_query(&mut self, key: impl Into<String>, value: impl Into<String>) {
        // A keyed property is never rejected.
        let _ = self.query.add(Property::new(key, value));
    }

    /// Removes a query parameter.
    pub fn remove_query(&mut self, key: &str) -> Option<Property> {
        self.query.remove(Some(key))
    }

    /// Registers a path variable.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DuplicateVariableKey`] if the key is already
    /// registered, or [`DomainError::NullKeyValue`] for an empty property.
    pub fn add_path_variable(&mut self, variable: Property) -> DomainResult<()> {
        if self.variable.contains_key(variable.key()) {
            return Err(DomainError::DuplicateVariableKey(
                variable.key().unwrap_or_default().to_owned(),
            ));
        }
        self.variable.add(variable)?;
        Ok(())
    }

    /// Sets the value of an existing path variable.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] if no variable has that key.
    pub fn set_path_variable_value(
        &mut self,
        key: &str,
        value: impl Into<String>,
    ) -> DomainResult<()> {
        if self.variable.set_value(Some(key), value) {
            Ok(())
        } else {
            Err(DomainError::NotFound(format!("path variable {key}")))
        }
    }

    /// Returns a path variable by key.
    #[must_use]
    pub fn path_variable(&self, key: &str) -> Option<&Property> {
        self.variable.get(Some(key))
    }

    /// Removes a path variable by key.
    pub fn remove_path_variable(&mut self, key: &str) -> Option<Property> {
        self.variable.remove(Some(key))
    }

    fn clear_components(&mut self) {
        self.protocol = None;
        self.host.clear();
        self.path.clear();
        self.port = None;
        self.query.clear();
        self.variable.clear();
    }

    fn parse_query(&mut self, query: &str) {
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            self.add_query(key, value);
        }
    }

    fn parse_path(&mut self, path: &str) -> DomainResult<()> {
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            if let Some(name) = segment.strip_prefix(':') {
                self.add_path_variable(Property::with_key(name))?;
            }
            self.path.push(segment.to_owned());
        }
        Ok(())
    }
}

impl CollectionElement for Url {
    fn id(&self) -> ElementId {
        self.id
    }

    fn key(&self) -> Option<&str> {
        None
    }
}

/// Returns the digits after the first `:` followed by two to four ASCII digits.
fn find_port(text: &str) -> Option<&str> {
    text.match_indices(':').find_map(|(start, _)| {
        let after = &text[start + 1..];
        let digits = after
            .bytes()
            .take(4)
            .take_while(u8::is_ascii_digit)
            .count();
        (digits >= 2).then(|| &after[..digits])
    })
}

/// Length of a path-variable name at the start of `text`.
fn path_token_len(text: &str) -> usize {
    match text.chars().next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => text
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
            .unwrap_or(text.len()),
        _ => 0,
    }
}

fn resolve_path_tokens(raw: &str, variables: &PropertyList) -> DomainResult<String> {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find("/:") {
        out.push_str(&rest[..=pos]);
        let after = &rest[pos + 2..];
        let len = path_token_len(after);
        let name = &after[..len];
        if len == 0 {
            out.push(':');
        } else {
            let variable = variables
                .get(Some(name))
                .ok_or_else(|| DomainError::VariableResolution(format!(":{name}")))?;
            match variable.value() {
                Some(value) => out.push_str(value),
                None => {
                    out.push(':');
                    out.push_str(name);
                }
            }
        }
        rest = &after[len..];
    }
    out.push_str(rest);
    Ok(out)
}
