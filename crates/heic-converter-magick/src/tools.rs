//! ImageMagick detection.

use crate::convert::{Converter, MagickConverter};
use heic_converter_common::{Error, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

/// Executable names searched, in order. ImageMagick 7 ships the unified
/// `magick` command; ImageMagick 6 (and Alpine) only has `convert`.
pub const MAGICK_CANDIDATES: &[&str] = &["magick", "convert"];

/// What `<command> -version` reports about one ImageMagick command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolInfo {
    /// Command name as searched on PATH (`magick` or `convert`).
    pub name: String,
    /// Whether `-version` ran and exited zero.
    pub available: bool,
    /// Release line without the `Version: ` prefix,
    /// e.g. `ImageMagick 7.1.1-29 Q16-HDRI x86_64`.
    pub version: Option<String>,
    /// Whether the `Delegates` line lists `heic`. `None` when the build does
    /// not print a delegates line.
    pub heic_delegate: Option<bool>,
    /// Resolved executable path.
    pub path: Option<PathBuf>,
}

/// Run `<name> -version` and describe what it reports.
///
/// # Example
///
/// ```no_run
/// use heic_converter_magick::check_tool;
///
/// let info = check_tool("magick");
/// if info.available && info.heic_delegate == Some(false) {
///     println!("{} cannot decode HEIC", info.name);
/// }
/// ```
pub fn check_tool(name: &str) -> ToolInfo {
    match Command::new(name).arg("-version").output() {
        Ok(output) if output.status.success() => ToolInfo {
            path: which::which(name).ok(),
            ..parse_version_output(name, &String::from_utf8_lossy(&output.stdout))
        },
        _ => ToolInfo {
            name: name.to_string(),
            ..Default::default()
        },
    }
}

/// Parse ImageMagick's `-version` banner:
///
/// ```text
/// Version: ImageMagick 7.1.1-29 Q16-HDRI x86_64 22086 https://imagemagick.org
/// Delegates (built-in): bzlib fontconfig freetype heic jng jpeg lcms png tiff xml zlib
/// ```
fn parse_version_output(name: &str, stdout: &str) -> ToolInfo {
    let mut version = None;
    let mut heic_delegate = None;

    for line in stdout.lines() {
        if let Some(rest) = line.strip_prefix("Version:") {
            let release = rest.split(" https://").next().unwrap_or(rest).trim();
            version = Some(release.to_string());
        } else if let Some((_, delegates)) = line
            .split_once(':')
            .filter(|(key, _)| key.starts_with("Delegates"))
        {
            heic_delegate = Some(delegates.split_whitespace().any(|d| d == "heic"));
        }
    }

    ToolInfo {
        name: name.to_string(),
        available: true,
        version: version.or_else(|| stdout.lines().next().map(|l| l.trim().to_string())),
        heic_delegate,
        path: None,
    }
}

/// Check every ImageMagick command we know how to drive.
pub fn check_tools() -> Vec<ToolInfo> {
    MAGICK_CANDIDATES.iter().map(|name| check_tool(name)).collect()
}

/// Locate ImageMagick, preferring a configured path over PATH lookup.
///
/// # Errors
///
/// Returns [`Error::ToolNotAvailable`] if no candidate is found.
pub fn locate_magick(configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = configured {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        #[cfg(feature = "tracing")]
        tracing::warn!(
            "Configured ImageMagick path {:?} does not exist, searching PATH",
            path
        );
    }

    locate_magick_in(std::env::var_os("PATH").unwrap_or_default())
}

/// Locate ImageMagick in an explicit search path (same syntax as `PATH`).
pub fn locate_magick_in<P: AsRef<OsStr>>(search_path: P) -> Result<PathBuf> {
    let cwd = std::env::current_dir().unwrap_or_default();

    MAGICK_CANDIDATES
        .iter()
        .find_map(|name| which::which_in(name, Some(search_path.as_ref()), &cwd).ok())
        .ok_or_else(|| Error::tool_not_available(MAGICK_CANDIDATES.iter().copied()))
}

/// Produces the converter for a run. Called once, before any file is touched.
pub trait ToolResolver: Send + Sync {
    fn resolve(&self) -> Result<Arc<dyn Converter>>;
}

/// Resolves an ImageMagick-backed converter from config or PATH.
#[derive(Debug, Clone, Default)]
pub struct MagickLocator {
    configured: Option<PathBuf>,
}

impl MagickLocator {
    pub fn new(configured: Option<PathBuf>) -> Self {
        Self { configured }
    }
}

impl ToolResolver for MagickLocator {
    fn resolve(&self) -> Result<Arc<dyn Converter>> {
        let program = locate_magick(self.configured.as_deref())?;
        Ok(Arc::new(MagickConverter::new(program)))
    }
}
