//! # heic-converter-magick
//!
//! ImageMagick backend for converting HEIC/HEIF images to JPEG.
//!
//! This crate provides:
//! - Locating an ImageMagick executable (`magick` first, then `convert`)
//! - Converting one file next to its source, never deleting the source
//! - The [`Converter`] and [`ToolResolver`] seams used by the pipeline
//!
//! ## Features
//!
//! - `tracing` - Enable tracing support
//!
//! ## Example
//!
//! ```no_run
//! use heic_converter_magick::{Converter, MagickLocator, ToolResolver};
//! use std::path::Path;
//!
//! let converter = MagickLocator::new(None).resolve()?;
//! let outcome = converter.convert(Path::new("/library/IMG_0001.heic"));
//! println!("{:?}", outcome);
//! # Ok::<(), heic_converter_magick::Error>(())
//! ```

pub mod convert;
pub mod tools;

// Re-exports
pub use convert::{Converter, MagickConverter};
pub use heic_converter_common::{Error, Outcome, Result};
pub use tools::{
    check_tool, check_tools, locate_magick, locate_magick_in, MagickLocator, ToolInfo,
    ToolResolver, MAGICK_CANDIDATES,
};
