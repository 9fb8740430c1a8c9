use super::types::{ConfigurationData, GraphQlRequest, GraphQlResponse, ServerConnection};
use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, COOKIE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::time::Duration;

/// Default timeout for GraphQL requests
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const CONFIGURATION_QUERY: &str = r#"
query Configuration {
    configuration {
        general {
            stashes {
                path
            }
        }
    }
}
"#;

const METADATA_SCAN_MUTATION: &str = r#"
mutation MetadataScan {
    metadataScan(input: {})
}
"#;

/// What the pipeline needs from the host application.
#[async_trait::async_trait]
pub trait HostClient: Send + Sync {
    /// Library root directories configured in the host, in configured order.
    async fn library_paths(&self) -> Result<Vec<PathBuf>>;

    /// Ask the host to rescan its libraries.
    async fn trigger_scan(&self) -> Result<()>;
}

/// GraphQL client for a Stash server.
pub struct StashClient {
    client: Client,
    url: String,
    cookie: Option<String>,
    api_key: Option<String>,
}

impl StashClient {
    pub fn new(connection: &ServerConnection, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {}", e);
                Client::new()
            });

        Self {
            client,
            url: connection.graphql_url(),
            cookie: connection.cookie_header(),
            api_key: connection.api_key.clone().filter(|k| !k.is_empty()),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request<T: DeserializeOwned>(&self, query: &str) -> Result<T> {
        let body = GraphQlRequest {
            query,
            variables: serde_json::json!({}),
        };

        let mut request = self
            .client
            .post(&self.url)
            .header(ACCEPT, "application/json")
            .json(&body);

        if let Some(ref cookie) = self.cookie {
            request = request.header(COOKIE, cookie);
        }
        if let Some(ref api_key) = self.api_key {
            request = request.header("ApiKey", api_key);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("GraphQL request to {} failed", self.url))?;

        let status = response.status();
        if !status.is_success() {
            let error = response.text().await.unwrap_or_default();
            anyhow::bail!("GraphQL request failed ({}): {}", status, error);
        }

        let response: GraphQlResponse<T> = response
            .json()
            .await
            .context("Failed to parse GraphQL response")?;

        if let Some(errors) = response.errors {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            anyhow::bail!("GraphQL errors: {}", messages.join("; "));
        }

        response
            .data
            .context("GraphQL response contained no data")
    }
}

#[async_trait::async_trait]
impl HostClient for StashClient {
    async fn library_paths(&self) -> Result<Vec<PathBuf>> {
        let data: ConfigurationData = self.request(CONFIGURATION_QUERY).await?;

        Ok(data
            .configuration
            .general
            .stashes
            .into_iter()
            .map(|s| PathBuf::from(s.path))
            .collect())
    }

    async fn trigger_scan(&self) -> Result<()> {
        let job: serde_json::Value = self.request(METADATA_SCAN_MUTATION).await?;
        tracing::debug!("Metadata scan queued: {}", job);
        Ok(())
    }
}
