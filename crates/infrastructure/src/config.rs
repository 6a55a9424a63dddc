//! Remote API configuration.

use satchel_application::ApplicationError;
use url::Url;

/// Default endpoint of the collection API.
pub const DEFAULT_API_URL: &str = "https://api.getpostman.com";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "POSTMAN_API_KEY";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No API key was supplied.
    #[error("missing API key; set POSTMAN_API_KEY or pass --api-key")]
    MissingApiKey,

    /// The base URL is not an absolute http(s) URL.
    #[error("invalid API base URL {url}: {reason}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl From<ConfigError> for ApplicationError {
    fn from(err: ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

/// Connection settings for the collection API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostmanApiConfig {
    base_url: Url,
    api_key: String,
}

impl PostmanApiConfig {
    /// Creates a configuration for the default endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] if `api_key` is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(Self {
            base_url: parse_base_url(DEFAULT_API_URL)?,
            api_key,
        })
    }

    /// Reads the API key from `POSTMAN_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] if the variable is unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(std::env::var(API_KEY_ENV).unwrap_or_default())
    }

    /// Replaces the endpoint, e.g. for a self-hosted mock.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] unless `base_url` is an
    /// absolute http or https URL.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    /// Returns the endpoint.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Builds `{base}/{segments...}`.
    #[must_use]
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

fn parse_base_url(text: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: text.to_string(),
        reason,
    };
    let url = Url::parse(text).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("not a base URL".to_string()));
    }
    Ok(url)
}
