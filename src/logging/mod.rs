//! Logging setup.
//!
//! Under Stash the log stream is the framed stderr protocol handled by
//! [`StashLogLayer`]; from a terminal it is the usual `fmt` output.

pub mod stash_layer;

pub use stash_layer::{StashLogLayer, PROGRESS_FIELD};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Target used for progress events.
pub const PROGRESS_TARGET: &str = "heic_converter::progress";

/// Build the filter directive: `RUST_LOG` if set, otherwise defaults based on
/// the verbose flag.
pub fn default_filter(verbose: bool) -> String {
    std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if verbose {
            "heic_converter=trace,heic_converter_magick=trace,info".to_string()
        } else {
            "heic_converter=debug,heic_converter_magick=debug,info".to_string()
        }
    })
}

/// Install the Stash framing layer on stderr as the global subscriber.
pub fn init_plugin_logging(filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(StashLogLayer::stderr())
        .init();
}

/// Install a human-readable subscriber on stderr, keeping stdout for results.
pub fn init_cli_logging(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Emit a progress fraction, clamped to `[0, 1]`.
pub fn progress(value: f64) {
    tracing::info!(
        target: PROGRESS_TARGET,
        progress = stash_layer::clamp_progress(value)
    );
}
