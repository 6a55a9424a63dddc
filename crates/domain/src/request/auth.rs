//! Request authentication settings.

use std::fmt;
use std::str::FromStr;

use crate::element::CollectionElement;
use crate::error::{DomainError, DomainResult};
use crate::id::ElementId;
use crate::property::{BOOLEAN_TYPE, Property, PropertyList};

/// Authentication schemes understood by collection documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthType {
    /// Explicitly no authentication.
    NoAuth,
    /// Akamai `EdgeGrid`.
    Akamai,
    /// API key in a header or query parameter.
    ApiKey,
    /// AWS Signature v4.
    Aws,
    /// Bearer token.
    Bearer,
    /// HTTP Basic.
    Basic,
    /// HTTP Digest.
    Digest,
    /// Hawk.
    Hawk,
    /// `OAuth` 1.0.
    OAuth1,
    /// `OAuth` 2.0.
    OAuth2,
    /// NTLM.
    Ntlm,
}

impl AuthType {
    /// Returns all auth types.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::NoAuth,
            Self::Akamai,
            Self::ApiKey,
            Self::Aws,
            Self::Bearer,
            Self::Basic,
            Self::Digest,
            Self::Hawk,
            Self::OAuth1,
            Self::OAuth2,
            Self::Ntlm,
        ]
    }

    /// Returns the `type` string used in documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoAuth => "noauth",
            Self::Akamai => "edgegrid",
            Self::ApiKey => "apikey",
            Self::Aws => "awsv4",
            Self::Bearer => "bearer",
            Self::Basic => "basic",
            Self::Digest => "digest",
            Self::Hawk => "hawk",
            Self::OAuth1 => "oauth1",
            Self::OAuth2 => "oauth2",
            Self::Ntlm => "ntlm",
        }
    }

    /// Returns the canonical parameter template for this scheme.
    #[must_use]
    pub fn template(self) -> PropertyList {
        let keys: &[&str] = match self {
            Self::NoAuth => &[],
            Self::Akamai => &[
                "headersToSign",
                "baseURL",
                "timestamp",
                "nonce",
                "clientSecret",
                "clientToken",
                "accessToken",
            ],
            Self::ApiKey => &["key", "value", "in"],
            Self::Aws => &[
                "sessionToken",
                "service",
                "secretKey",
                "accessKey",
                "addAuthDataToQuery",
            ],
            Self::Bearer => &["token"],
            Self::Basic => &["password", "username"],
            Self::Digest => &[
                "opaque",
                "clientNonce",
                "nonceCount",
                "qop",
                "algorithm",
                "nonce",
                "realm",
                "password",
            ],
            Self::Hawk => &[
                "includePayloadHash",
                "timestamp",
                "delegation",
                "app",
                "extraData",
                "nonce",
                "user",
                "authKey",
                "algorithm",
            ],
            Self::OAuth1 => return oauth1_template(),
            Self::OAuth2 => &[
                "grant_type",
                "tokenName",
                "tokenType",
                "accessToken",
                "addTokenTo",
            ],
            Self::Ntlm => &["workstation", "domain", "password", "username"],
        };
        keyed(keys.iter().map(|key| Property::with_key(*key)))
    }
}

fn oauth1_template() -> PropertyList {
    let strings = [
        "realm",
        "nonce",
        "timestamp",
        "verifier",
        "callback",
        "tokenSecret",
        "token",
        "consumerSecret",
        "consumerKey",
        "signatureMethod",
        "version",
    ];
    let head = [
        Property::with_key("addEmptyParamsToSign").with_type(BOOLEAN_TYPE),
        Property::boolean("includeBodyHash", true),
    ];
    keyed(
        head.into_iter()
            .chain(strings.into_iter().map(Property::with_key))
            .chain(std::iter::once(Property::boolean("addParamsToHeader", false))),
    )
}

fn keyed(properties: impl Iterator<Item = Property>) -> PropertyList {
    let mut list = PropertyList::new();
    for property in properties {
        // Template entries always carry a key.
        let _ = list.add(property);
    }
    list
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthType {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::UnknownAuthType(s.to_string()))
    }
}

/// Authentication settings: a scheme plus its parameters.
#[derive(Debug, Clone)]
pub struct RequestAuth {
    id: ElementId,
    auth_type: AuthType,
    parameters: PropertyList,
}

impl RequestAuth {
    /// Creates auth settings initialised with the scheme's template.
    #[must_use]
    pub fn new(auth_type: AuthType) -> Self {
        Self {
            id: ElementId::generate(),
            auth_type,
            parameters: auth_type.template(),
        }
    }

    /// Creates auth settings with explicit parameters.
    #[must_use]
    pub fn with_parameters(auth_type: AuthType, parameters: PropertyList) -> Self {
        Self {
            id: ElementId::generate(),
            auth_type,
            parameters,
        }
    }

    /// Creates bearer-token auth.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        let mut auth = Self::new(AuthType::Bearer);
        auth.set_value("token", token);
        auth
    }

    /// Creates basic auth.
    #[must_use]
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        let mut auth = Self::new(AuthType::Basic);
        auth.set_value("username", username);
        auth.set_value("password", password);
        auth
    }

    /// Returns the scheme.
    #[must_use]
    pub const fn auth_type(&self) -> AuthType {
        self.auth_type
    }

    /// Switches scheme, replacing all parameters with the new template.
    pub fn set_auth_type(&mut self, auth_type: AuthType) {
        self.auth_type = auth_type;
        self.parameters = auth_type.template();
    }

    /// Returns the parameters in order.
    #[must_use]
    pub const fn parameters(&self) -> &PropertyList {
        &self.parameters
    }

    /// Returns a parameter by key.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Property> {
        self.parameters.get(Some(key))
    }

    /// Adds or replaces a parameter.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NullKeyValue`] if the parameter has neither key nor value.
    pub fn add_property(&mut self, property: Property) -> DomainResult<()> {
        self.parameters.add(property)?;
        Ok(())
    }

    /// Sets the value of a parameter, keeping its type and description.
    pub fn set_value(&mut self, key: &str, value: impl Into<String>) {
        if self.parameters.contains_key(Some(key)) {
            self.parameters.set_value(Some(key), value);
        } else {
            let _ = self.parameters.add(Property::new(key, value));
        }
    }
}

impl CollectionElement for RequestAuth {
    fn id(&self) -> ElementId {
        self.id
    }

    fn key(&self) -> Option<&str> {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn keys(auth: &RequestAuth) -> Vec<&str> {
        auth.parameters()
            .keys()
            .map(Option::unwrap_or_default)
            .collect()
    }

    #[test]
    fn test_templates() {
        assert_eq!(keys(&RequestAuth::new(AuthType::Basic)), vec!["password", "username"]);
        assert_eq!(
            keys(&RequestAuth::new(AuthType::OAuth2)),
            vec!["grant_type", "tokenName", "tokenType", "accessToken", "addTokenTo"]
        );
        assert!(RequestAuth::new(AuthType::NoAuth).parameters().is_empty());
    }

    #[test]
    fn test_oauth1_boolean_defaults() {
        let auth = RequestAuth::new(AuthType::OAuth1);
        let params = auth.parameters();

        assert_eq!(params.len(), 14);
        assert_eq!(params.get_index(0).unwrap().key(), Some("addEmptyParamsToSign"));
        assert!(auth.property("includeBodyHash").unwrap().is_boolean_literal());
        assert_eq!(params.value_of("addParamsToHeader"), Some("false"));
    }

    #[test]
    fn test_set_auth_type_discards_values() {
        let mut auth = RequestAuth::basic("ann", "s3cret");
        assert_eq!(auth.parameters().value_of("username"), Some("ann"));

        auth.set_auth_type(AuthType::Bearer);
        assert_eq!(keys(&auth), vec!["token"]);
        assert_eq!(auth.property("token").unwrap().value(), None);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(AuthType::Akamai.as_str(), "edgegrid");
        assert_eq!(AuthType::Aws.as_str(), "awsv4");
        assert_eq!("bearer".parse::<AuthType>().unwrap(), AuthType::Bearer);
        for auth_type in AuthType::all() {
            assert_eq!(auth_type.as_str().parse::<AuthType>().unwrap(), *auth_type);
        }
        assert!("jwt".parse::<AuthType>().is_err());
    }

    #[test]
    fn test_add_property_replaces() {
        let mut auth = RequestAuth::new(AuthType::ApiKey);
        auth.add_property(Property::new("in", "header")).unwrap();
        assert_eq!(keys(&auth), vec!["key", "value", "in"]);
        assert_eq!(
            auth.add_property(Property::default()),
            Err(DomainError::NullKeyValue)
        );
    }
}
