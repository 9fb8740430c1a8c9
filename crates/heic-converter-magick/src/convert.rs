//! HEIC/HEIF to JPEG conversion with ImageMagick.

use heic_converter_common::paths::jpeg_sibling;
use heic_converter_common::{Outcome, SkipReason};
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

/// Converts one source file to a JPEG next to it.
///
/// Implementations must never delete the source; that is the caller's call.
pub trait Converter: Send + Sync {
    fn convert(&self, source: &Path) -> Outcome;

    /// Human-readable description of the command in use, for logs.
    fn describe(&self) -> String;
}

/// Converter that shells out to ImageMagick.
///
/// Invocation is `<program> [leading args...] <source> -quality 100 <dest>`.
#[derive(Debug, Clone)]
pub struct MagickConverter {
    program: OsString,
    leading_args: Vec<OsString>,
}

impl MagickConverter {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    /// Arguments placed before the source path, e.g. a script for an interpreter.
    pub fn with_leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }
}

impl Converter for MagickConverter {
    fn convert(&self, source: &Path) -> Outcome {
        let output = jpeg_sibling(source);

        if output.exists() {
            #[cfg(feature = "tracing")]
            tracing::warn!("JPEG already exists, skipping: {}", output.display());
            return Outcome::Skipped(SkipReason::AlreadyExists(output));
        }

        let mut command = Command::new(&self.program);
        command
            .args(&self.leading_args)
            .arg(source)
            .args(["-quality", "100"])
            .arg(&output);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Running: {} {} -quality 100 {}",
            self.describe(),
            source.display(),
            output.display()
        );

        let result = match command.output() {
            Ok(result) => result,
            Err(e) => {
                remove_partial(&output);
                return Outcome::failed(format!(
                    "failed to run {}: {}",
                    self.program.to_string_lossy(),
                    e
                ));
            }
        };

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("exit code {:?}", result.status.code())
            } else {
                stderr
            };

            #[cfg(feature = "tracing")]
            tracing::error!("ImageMagick failed for {}: {}", source.display(), message);

            remove_partial(&output);
            return Outcome::failed(message);
        }

        Outcome::Converted(output)
    }

    fn describe(&self) -> String {
        std::iter::once(&self.program)
            .chain(&self.leading_args)
            .map(|s| s.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Delete an incomplete output left behind by a failed run.
fn remove_partial(output: &Path) {
    if output.exists() {
        if let Err(_e) = std::fs::remove_file(output) {
            #[cfg(feature = "tracing")]
            tracing::warn!("Failed to remove partial output {}: {}", output.display(), _e);
        }
    }
}
