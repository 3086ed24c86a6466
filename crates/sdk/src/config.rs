//! Configuration types for the Trello SDK.

use std::fmt;
use std::time::Duration;
use url::Url;

/// Default Trello REST API root.
pub const DEFAULT_BASE_URL: &str = "https://api.trello.com/1/";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Trello client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Trello API. Always ends with a slash.
    pub base_url: Url,
    /// Key/token pair sent with every request.
    pub credentials: Credentials,
    /// Request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a new configuration with the given base URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            credentials: Credentials::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        let base_url = Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid");
        Self::new(base_url)
    }
}

/// `Url::join` drops the last path segment unless it ends with `/`.
pub(crate) fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// The Trello API key and token.
///
/// Either value may be absent; [`Credentials::is_configured`] tells callers
/// whether a request can be expected to authenticate.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub key: Option<String>,
    pub token: Option<String>,
}

impl Credentials {
    pub fn new(key: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            token: Some(token.into()),
        }
    }

    /// True when both the key and the token are present and non-empty.
    pub fn is_configured(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        present(&self.key) && present(&self.token)
    }

    /// Query parameters to append, skipping absent values.
    pub(crate) fn query_pairs(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [("key", self.key.as_deref()), ("token", self.token.as_deref())]
            .into_iter()
            .filter_map(|(name, value)| value.filter(|v| !v.is_empty()).map(|v| (name, v)))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("Credentials")
            .field("key", &redact(&self.key))
            .field("token", &redact(&self.token))
            .finish()
    }
}
