use crate::tools::BatchPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use trello_sdk::{Credentials, TrelloClient, DEFAULT_BASE_URL};

/// Server configuration, loaded from an optional TOML file and then
/// overridden by environment variables and command-line flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct McpConfig {
    #[serde(default)]
    pub trello: TrelloConfig,

    #[serde(default)]
    pub server: ServerSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrelloConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub api_token: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for TrelloConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_token: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default)]
    pub batch_policy: BatchPolicy,

    /// Accepted for compatibility with hosted launchers; stdio ignores it.
    #[serde(default)]
    pub port: Option<u16>,
}

/// Values taken from the environment or the command line. `None` keeps
/// whatever the file (or the default) provided.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_key: Option<String>,
    pub api_token: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub batch_policy: Option<BatchPolicy>,
    pub port: Option<u16>,
}

impl McpConfig {
    pub fn load(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "Configuration file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read configuration file {}", config_path.display()))?;
        toml::from_str(&content).context("Failed to parse configuration file")
    }

    pub fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(key) = overrides.api_key {
            self.trello.api_key = Some(key);
        }
        if let Some(token) = overrides.api_token {
            self.trello.api_token = Some(token);
        }
        if let Some(base_url) = overrides.base_url {
            self.trello.base_url = base_url;
        }
        if let Some(timeout_secs) = overrides.timeout_secs {
            self.trello.timeout_secs = timeout_secs;
        }
        if let Some(policy) = overrides.batch_policy {
            self.server.batch_policy = policy;
        }
        if overrides.port.is_some() {
            self.server.port = overrides.port;
        }
        self
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            key: self.trello.api_key.clone(),
            token: self.trello.api_token.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.trello.timeout_secs)
    }

    pub fn build_client(&self) -> Result<TrelloClient> {
        TrelloClient::builder()
            .base_url(self.trello.base_url.clone())
            .credentials(self.credentials())
            .timeout(self.timeout())
            .build()
            .context("Failed to create Trello client")
    }
}
