use heic_converter_common::{Mode, Tally};
use serde::Serialize;
use std::path::PathBuf;

/// What a finished run did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum RunReport {
    Scan {
        candidates: Vec<PathBuf>,
    },
    Convert {
        total: usize,
        tally: Tally,
        /// Whether a re-index was requested from the host.
        reindex_requested: bool,
        /// Whether the host accepted that request.
        reindex_accepted: bool,
    },
}

impl RunReport {
    pub fn mode(&self) -> Mode {
        match self {
            Self::Scan { .. } => Mode::Scan,
            Self::Convert { .. } => Mode::Convert,
        }
    }

    /// Human-readable one-line summary returned to the host.
    pub fn summary(&self) -> String {
        match self {
            Self::Scan { candidates } if candidates.is_empty() => {
                "No HEIC/HEIF files found".to_string()
            }
            Self::Scan { candidates } => format!("Found {} HEIC/HEIF file(s)", candidates.len()),
            Self::Convert { total: 0, .. } => "No HEIC/HEIF files found".to_string(),
            Self::Convert { tally, .. } => format!("Done: {}", tally),
        }
    }
}
