//! heic-converter-common: shared types, errors, and path utilities.
//!
//! This crate provides the pieces used by both the converter backend and the
//! pipeline:
//!
//! - **Run Types**: operating [`Mode`], per-file [`Outcome`], and the [`Tally`]
//! - **Path Utilities**: HEIC/HEIF detection and JPEG output naming
//! - **Error Handling**: the fatal [`Error`] kinds and a result alias
//!
//! # Examples
//!
//! ```
//! use heic_converter_common::{Mode, Outcome, Tally};
//! use heic_converter_common::paths::{is_heic_file, jpeg_sibling};
//! use std::path::Path;
//!
//! let source = Path::new("/library/IMG_0001.heic");
//! assert!(is_heic_file(source));
//!
//! let mut tally = Tally::default();
//! tally.record(&Outcome::Converted(jpeg_sibling(source)));
//! assert_eq!(tally.converted, 1);
//! assert_eq!("scan".parse::<Mode>(), Ok(Mode::Scan));
//! ```

pub mod error;
pub mod paths;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
