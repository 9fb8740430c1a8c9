//! Path utilities for detecting HEIC/HEIF files and naming their JPEG output.
//!
//! Discovery and the converter both go through these helpers so the set of
//! recognized extensions and the output naming rule live in one place.

use std::path::{Path, PathBuf};

/// Extensions of the legacy container formats we convert, lower-case, no dot.
const HEIC_EXTENSIONS: &[&str] = &["heic", "heif"];

/// Canonical extension of the converted output.
pub const JPEG_EXTENSION: &str = "jpg";

/// Check if a path has a HEIC or HEIF extension (case-insensitive).
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use heic_converter_common::paths::is_heic_file;
///
/// assert!(is_heic_file(Path::new("photo.heic")));
/// assert!(is_heic_file(Path::new("/library/IMG_0001.HEIF")));
/// assert!(!is_heic_file(Path::new("photo.jpg")));
/// ```
pub fn is_heic_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| HEIC_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Path of the JPEG written next to `source`: same directory and stem,
/// extension replaced with `jpg`.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use heic_converter_common::paths::jpeg_sibling;
///
/// assert_eq!(
///     jpeg_sibling(Path::new("/library/IMG_0001.HEIC")),
///     PathBuf::from("/library/IMG_0001.jpg")
/// );
/// ```
#[must_use]
pub fn jpeg_sibling(source: &Path) -> PathBuf {
    source.with_extension(JPEG_EXTENSION)
}

/// Get the list of recognized HEIC/HEIF extensions.
#[must_use]
pub fn heic_extensions() -> &'static [&'static str] {
    HEIC_EXTENSIONS
}
