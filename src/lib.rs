//! heic-converter - HEIC/HEIF to JPEG maintenance job for Stash libraries
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod logging;
pub mod notifications;
pub mod pipeline;
pub mod plugin;
pub mod scanner;
pub mod stash;
