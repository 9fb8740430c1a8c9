mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./config.toml",
        "./heic-converter.toml",
        "~/.config/heic-converter/config.toml",
        "/etc/heic-converter/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Config for a plugin run. Stash only needs the timeout and tool path from
/// here, so an unreadable or invalid file falls back to defaults with a
/// warning instead of failing the run.
pub fn load_plugin_config(custom_path: Option<&Path>) -> Config {
    load_config_or_default(custom_path).unwrap_or_else(|e| {
        tracing::warn!("Ignoring unusable config, using defaults: {:#}", e);
        Config::default()
    })
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.stash.port == 0 {
        anyhow::bail!("Stash port cannot be 0");
    }

    if !matches!(config.stash.scheme.as_str(), "http" | "https") {
        anyhow::bail!(
            "Stash scheme must be \"http\" or \"https\", got {:?}",
            config.stash.scheme
        );
    }

    if config.stash.timeout_secs == 0 {
        anyhow::bail!("Stash timeout_secs cannot be 0");
    }

    if let Some(ref path) = config.tools.magick_path {
        if !path.exists() {
            tracing::warn!(
                "Configured ImageMagick path does not exist, PATH will be searched: {:?}",
                path
            );
        }
    }

    Ok(())
}
