//! Stash raw plugin interface.
//!
//! Stash starts the plugin with one JSON document on stdin and expects one
//! JSON result on stdout: `{"output": ...}` on success or `{"error": ...}` on
//! failure. Logs and progress go to stderr (see [`crate::logging`]).

use crate::config::Config;
use crate::pipeline::Pipeline;
use crate::stash::{HostClient, ServerConnection, StashClient};
use heic_converter_common::Mode;
use heic_converter_magick::{MagickLocator, ToolResolver};
use serde::{Deserialize, Serialize};
use std::process::ExitCode;
use std::sync::Arc;

/// Input document read from stdin.
#[derive(Debug, Default, Deserialize)]
pub struct PluginInput {
    #[serde(default)]
    pub server_connection: Option<ServerConnection>,

    #[serde(default)]
    pub args: Option<PluginArgs>,
}

/// Task arguments from the plugin manifest.
#[derive(Debug, Default, Deserialize)]
pub struct PluginArgs {
    #[serde(default)]
    pub mode: Option<String>,
}

impl PluginInput {
    pub fn parse(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn connection(&self) -> ServerConnection {
        self.server_connection.clone().unwrap_or_default()
    }

    /// The requested mode as given, `convert` when absent.
    pub fn mode_arg(&self) -> String {
        self.args
            .as_ref()
            .and_then(|a| a.mode.clone())
            .unwrap_or_else(|| Mode::default().to_string())
    }
}

/// The single result emitted per run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginOutput {
    Output(String),
    Error(String),
}

impl PluginOutput {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"error":"failed to encode plugin output: {}"}}"#, e)
        })
    }

    /// Print the result to stdout.
    pub fn emit(&self) {
        println!("{}", self.to_json());
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.is_error() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }
}

/// Run the plugin against the real Stash server and ImageMagick.
pub async fn run(input: &PluginInput, config: &Config) -> PluginOutput {
    let host = Arc::new(StashClient::new(&input.connection(), config.stash.timeout()));
    let resolver = Arc::new(MagickLocator::new(config.tools.magick_path.clone()));
    execute(input, host, resolver).await
}

/// Run the plugin with the given collaborators and package the outcome.
pub async fn execute(
    input: &PluginInput,
    host: Arc<dyn HostClient>,
    resolver: Arc<dyn ToolResolver>,
) -> PluginOutput {
    let mode_arg = input.mode_arg();
    tracing::info!("HEIC Converter starting (mode: {})", mode_arg);

    let mode: Mode = match mode_arg.parse() {
        Ok(mode) => mode,
        Err(message) => {
            tracing::error!("{}", message);
            return PluginOutput::Output(message);
        }
    };

    match Pipeline::new(host, resolver).run(mode).await {
        Ok(report) => PluginOutput::Output(report.summary()),
        Err(e) => {
            tracing::error!("Plugin failed: {}", e);
            PluginOutput::Error(e.to_string())
        }
    }
}
