//! Main client for the Trello SDK.

use crate::api::*;
use crate::config::{normalize_base_url, ClientConfig, Credentials, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::error::TrelloResult;
use crate::request::{RemoteApi, RemoteRequest};
use crate::transport::HttpTransport;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Main client for interacting with the Trello API.
#[derive(Debug, Clone)]
pub struct TrelloClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl TrelloClient {
    /// Create a new client builder.
    pub fn builder() -> TrelloClientBuilder {
        TrelloClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> TrelloResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the boards API.
    pub fn boards(&self) -> BoardsApi<'_> {
        BoardsApi::new(self)
    }

    /// Get the lists API.
    pub fn lists(&self) -> ListsApi<'_> {
        ListsApi::new(self)
    }

    /// Get the cards API.
    pub fn cards(&self) -> CardsApi<'_> {
        CardsApi::new(self)
    }

    /// Get the labels API.
    pub fn labels(&self) -> LabelsApi<'_> {
        LabelsApi::new(self)
    }
}

#[async_trait::async_trait]
impl RemoteApi for TrelloClient {
    fn credentials_configured(&self) -> bool {
        self.config.credentials.is_configured()
    }

    async fn call(&self, request: RemoteRequest) -> TrelloResult<Value> {
        self.http.execute(request).await
    }
}

/// Builder for creating a TrelloClient.
pub struct TrelloClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    api_token: Option<String>,
    timeout: Duration,
}

impl TrelloClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            api_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the API root (defaults to `https://api.trello.com/1/`).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the API token.
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Set both halves of the credential pair, either of which may be absent.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.api_key = credentials.key;
        self.api_token = credentials.token;
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    pub fn build(self) -> TrelloResult<TrelloClient> {
        let base_url = Url::parse(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        let config = ClientConfig {
            base_url: normalize_base_url(base_url),
            credentials: Credentials {
                key: self.api_key,
                token: self.api_token,
            },
            timeout: self.timeout,
        };

        TrelloClient::from_config(config)
    }
}

impl Default for TrelloClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
