//! Core run types: operating mode, per-file outcomes and the run tally.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Operating mode of a run, fixed for its duration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Dry run: list candidates without touching the filesystem.
    Scan,
    /// Convert every candidate and delete the originals.
    #[default]
    Convert,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scan => write!(f, "scan"),
            Self::Convert => write!(f, "convert"),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scan" => Ok(Self::Scan),
            "convert" => Ok(Self::Convert),
            _ => Err(format!("Unknown mode: {}", s)),
        }
    }
}

/// Why a candidate was left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The JPEG destination is already present.
    AlreadyExists(PathBuf),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyExists(path) => write!(f, "{} already exists", path.display()),
        }
    }
}

/// Why a candidate failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailReason {
    /// The converter exited non-zero or could not be started.
    ConversionFailed(String),
    /// The JPEG was written but the original could not be deleted.
    CleanupFailed { output: PathBuf, message: String },
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConversionFailed(message) => write!(f, "conversion failed: {}", message),
            Self::CleanupFailed { output, message } => write!(
                f,
                "converted to {} but failed to delete original: {}",
                output.display(),
                message
            ),
        }
    }
}

/// Result of processing one candidate file. Every candidate gets exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Converted(PathBuf),
    Skipped(SkipReason),
    Failed(FailReason),
}

impl Outcome {
    pub fn failed<S: Into<String>>(message: S) -> Self {
        Self::Failed(FailReason::ConversionFailed(message.into()))
    }
}

/// Running count of outcomes for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Subset of `failed` where the JPEG exists but the original remains.
    pub cleanup_failed: usize,
}

impl Tally {
    /// Count one outcome.
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Converted(_) => self.converted += 1,
            Outcome::Skipped(_) => self.skipped += 1,
            Outcome::Failed(reason) => {
                self.failed += 1;
                if matches!(reason, FailReason::CleanupFailed { .. }) {
                    self.cleanup_failed += 1;
                }
            }
        }
    }

    /// Number of outcomes recorded.
    pub fn total(&self) -> usize {
        self.converted + self.skipped + self.failed
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} converted, {} skipped, {} failed",
            self.converted, self.skipped, self.failed
        )
    }
}
