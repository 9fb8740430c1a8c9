use crate::stash::{ServerConnection, REQUEST_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub stash: StashConfig,

    #[serde(default)]
    pub tools: ToolsConfig,
}

/// Where to reach Stash when running outside of it. Plugin runs take the
/// connection from stdin instead and only use `timeout_secs` from here.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StashConfig {
    #[serde(default = "default_scheme")]
    pub scheme: String,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// API key (Settings > Security in Stash), sent as the `ApiKey` header
    #[serde(default)]
    pub api_key: Option<String>,

    /// Timeout for each GraphQL request in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    9999
}

fn default_timeout() -> u64 {
    REQUEST_TIMEOUT.as_secs()
}

impl Default for StashConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            host: default_host(),
            port: default_port(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl StashConfig {
    pub fn connection(&self) -> ServerConnection {
        ServerConnection {
            scheme: self.scheme.clone(),
            host: Some(self.host.clone()),
            port: self.port,
            session_cookie: None,
            api_key: self.api_key.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsConfig {
    /// Explicit ImageMagick executable; PATH is searched when unset
    #[serde(default)]
    pub magick_path: Option<PathBuf>,
}
