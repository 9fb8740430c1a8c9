use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Connection parameters for the Stash server, as handed to plugins on stdin.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ServerConnection {
    #[serde(default = "default_scheme")]
    pub scheme: String,

    #[serde(default)]
    pub host: Option<String>,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub session_cookie: Option<SessionCookie>,

    /// API key for standalone runs; Stash never sends one to plugins.
    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_port() -> u16 {
    9999
}

impl Default for ServerConnection {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            host: None,
            port: default_port(),
            session_cookie: None,
            api_key: None,
        }
    }
}

impl ServerConnection {
    /// Host to connect to. Stash reports its bind address, which may be a
    /// wildcard; plugins run on the same machine, so that maps to localhost.
    pub fn connect_host(&self) -> &str {
        match self.host.as_deref().map(str::trim) {
            None | Some("") | Some("0.0.0.0") | Some("::") | Some("[::]") => "localhost",
            Some(host) => host,
        }
    }

    pub fn graphql_url(&self) -> String {
        format!(
            "{}://{}:{}/graphql",
            self.scheme,
            self.connect_host(),
            self.port
        )
    }

    /// `Cookie` header value, if a non-empty session cookie was provided.
    pub fn cookie_header(&self) -> Option<String> {
        self.session_cookie
            .as_ref()
            .filter(|c| !c.value.is_empty())
            .map(|c| format!("{}={}", c.name, c.value))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct SessionCookie {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
pub(crate) struct GraphQlResponse<T> {
    #[serde(default)]
    pub data: Option<T>,

    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConfigurationData {
    pub configuration: Configuration,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Configuration {
    pub general: GeneralConfiguration,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeneralConfiguration {
    #[serde(default)]
    pub stashes: Vec<StashPath>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StashPath {
    pub path: String,
}
