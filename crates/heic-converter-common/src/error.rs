//! Error types that abort a conversion run.
//!
//! Per-file problems (tool failures, existing outputs, cleanup failures) are
//! not errors here: they are recorded as [`Outcome`](crate::Outcome)s and
//! tallied. Only the kinds below stop a run, and both stop it before any file
//! is touched.

/// Fatal error for a heic-converter run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The library root paths could not be retrieved from the host.
    #[error("could not retrieve library paths: {0}")]
    ConfigUnavailable(String),

    /// None of the known converter executables could be found.
    #[error("ImageMagick not found. Ensure one of {} is installed and on PATH", .searched.join(", "))]
    ToolNotAvailable { searched: Vec<String> },
}

impl Error {
    /// Create a ConfigUnavailable error.
    pub fn config_unavailable<S: Into<String>>(msg: S) -> Self {
        Self::ConfigUnavailable(msg.into())
    }

    /// Create a ToolNotAvailable error listing the names that were searched.
    pub fn tool_not_available<I, S>(searched: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::ToolNotAvailable {
            searched: searched.into_iter().map(Into::into).collect(),
        }
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
