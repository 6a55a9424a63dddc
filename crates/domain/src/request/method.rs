//! HTTP method enumeration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// HTTP verbs a collection request may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET method
    #[default]
    Get,
    /// HTTP HEAD method
    Head,
    /// HTTP POST method
    Post,
    /// HTTP PUT method
    Put,
    /// HTTP PATCH method
    Patch,
    /// HTTP DELETE method
    Delete,
    /// HTTP OPTIONS method
    Options,
    /// `WebDAV` COPY method
    Copy,
    /// LINK method
    Link,
    /// UNLINK method
    Unlink,
    /// Cache PURGE method
    Purge,
    /// `WebDAV` LOCK method
    Lock,
    /// `WebDAV` UNLOCK method
    Unlock,
    /// `WebDAV` PROPFIND method
    Propfind,
    /// VIEW method
    View,
    /// HTTP TRACE method
    Trace,
}

impl HttpMethod {
    /// Returns all available HTTP methods.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Get,
            Self::Head,
            Self::Post,
            Self::Put,
            Self::Patch,
            Self::Delete,
            Self::Options,
            Self::Copy,
            Self::Link,
            Self::Unlink,
            Self::Purge,
            Self::Lock,
            Self::Unlock,
            Self::Propfind,
            Self::View,
            Self::Trace,
        ]
    }

    /// Returns whether this method typically has a request body.
    #[must_use]
    pub const fn has_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    /// Returns the method as it appears in a collection document.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Copy => "COPY",
            Self::Link => "LINK",
            Self::Unlink => "UNLINK",
            Self::Purge => "PURGE",
            Self::Lock => "LOCK",
            Self::Unlock => "UNLOCK",
            Self::Propfind => "PROPFIND",
            Self::View => "VIEW",
            Self::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        let upper = s.to_uppercase();
        Self::all()
            .iter()
            .copied()
            .find(|m| m.as_str() == upper)
            .ok_or(DomainError::UnsupportedMethod(upper))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_method_from_str() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("PROPFIND".parse::<HttpMethod>().unwrap(), HttpMethod::Propfind);
        assert_eq!("Unlink".parse::<HttpMethod>().unwrap(), HttpMethod::Unlink);
    }

    #[test]
    fn test_wire_table_is_bijective() {
        for method in HttpMethod::all() {
            assert_eq!(method.as_str().parse::<HttpMethod>().unwrap(), *method);
        }
    }

    #[test]
    fn test_invalid_method() {
        assert_eq!(
            "FETCH".parse::<HttpMethod>(),
            Err(DomainError::UnsupportedMethod("FETCH".into()))
        );
    }

    #[test]
    fn test_has_body() {
        assert!(!HttpMethod::Get.has_body());
        assert!(HttpMethod::Post.has_body());
        assert!(!HttpMethod::Trace.has_body());
    }
}
