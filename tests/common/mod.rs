//! Shared test doubles for integration tests.
//!
//! Provides a [`FakeHost`] standing in for the Stash GraphQL API, a set of
//! [`Converter`] doubles that never shell out, and [`Library`] which builds a
//! throwaway library tree on disk.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use heic_converter::stash::HostClient;
use heic_converter_common::paths::jpeg_sibling;
use heic_converter_common::{Error, Outcome, Result, SkipReason};
use heic_converter_magick::{Converter, ToolResolver, MAGICK_CANDIDATES};
use tempfile::TempDir;

/// In-memory host that hands out fixed library roots and counts rescans.
pub struct FakeHost {
    roots: std::result::Result<Vec<PathBuf>, String>,
    scan_fails: bool,
    path_queries: AtomicUsize,
    scans: AtomicUsize,
}

impl FakeHost {
    pub fn with_roots(roots: Vec<PathBuf>) -> Arc<Self> {
        Arc::new(Self {
            roots: Ok(roots),
            scan_fails: false,
            path_queries: AtomicUsize::new(0),
            scans: AtomicUsize::new(0),
        })
    }

    /// Host whose configuration query fails.
    pub fn unreachable(message: &str) -> Arc<Self> {
        Arc::new(Self {
            roots: Err(message.to_string()),
            scan_fails: false,
            path_queries: AtomicUsize::new(0),
            scans: AtomicUsize::new(0),
        })
    }

    /// Host that serves roots but rejects every rescan request.
    pub fn rejecting_scans(roots: Vec<PathBuf>) -> Arc<Self> {
        Arc::new(Self {
            roots: Ok(roots),
            scan_fails: true,
            path_queries: AtomicUsize::new(0),
            scans: AtomicUsize::new(0),
        })
    }

    pub fn path_queries(&self) -> usize {
        self.path_queries.load(Ordering::SeqCst)
    }

    /// Rescan requests received, failed ones included.
    pub fn scans(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl HostClient for FakeHost {
    async fn library_paths(&self) -> anyhow::Result<Vec<PathBuf>> {
        self.path_queries.fetch_add(1, Ordering::SeqCst);
        self.roots.clone().map_err(anyhow::Error::msg)
    }

    async fn trigger_scan(&self) -> anyhow::Result<()> {
        self.scans.fetch_add(1, Ordering::SeqCst);
        if self.scan_fails {
            anyhow::bail!("GraphQL request failed (500 Internal Server Error): boom");
        }
        Ok(())
    }
}

/// Resolver that hands out a fixed converter, or reports ImageMagick missing.
pub struct FakeResolver {
    converter: Option<Arc<dyn Converter>>,
    resolved: AtomicUsize,
}

impl FakeResolver {
    pub fn with(converter: impl Converter + 'static) -> Arc<Self> {
        Arc::new(Self {
            converter: Some(Arc::new(converter)),
            resolved: AtomicUsize::new(0),
        })
    }

    pub fn missing() -> Arc<Self> {
        Arc::new(Self {
            converter: None,
            resolved: AtomicUsize::new(0),
        })
    }

    pub fn resolved(&self) -> usize {
        self.resolved.load(Ordering::SeqCst)
    }
}

impl ToolResolver for FakeResolver {
    fn resolve(&self) -> Result<Arc<dyn Converter>> {
        self.resolved.fetch_add(1, Ordering::SeqCst);
        self.converter
            .clone()
            .ok_or_else(|| Error::tool_not_available(MAGICK_CANDIDATES.iter().copied()))
    }
}

/// Skips when the JPEG exists, otherwise copies the source bytes into it.
#[derive(Default)]
pub struct CopyConverter {
    calls: AtomicUsize,
}

impl CopyConverter {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Converter for CopyConverter {
    fn convert(&self, source: &Path) -> Outcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let output = jpeg_sibling(source);
        if output.exists() {
            return Outcome::Skipped(SkipReason::AlreadyExists(output));
        }
        match fs::copy(source, &output) {
            Ok(_) => Outcome::Converted(output),
            Err(e) => Outcome::failed(e.to_string()),
        }
    }

    fn describe(&self) -> String {
        "copy".to_string()
    }
}

/// Fails every file whose name contains `needle`, copies the rest.
pub struct SelectiveConverter {
    pub needle: &'static str,
    inner: CopyConverter,
}

impl SelectiveConverter {
    pub fn failing_on(needle: &'static str) -> Self {
        Self {
            needle,
            inner: CopyConverter::default(),
        }
    }
}

impl Converter for SelectiveConverter {
    fn convert(&self, source: &Path) -> Outcome {
        let name = source.file_name().unwrap_or_default().to_string_lossy();
        if name.contains(self.needle) {
            return Outcome::failed("no decode delegate for this image format");
        }
        self.inner.convert(source)
    }

    fn describe(&self) -> String {
        format!("copy (fails on {})", self.needle)
    }
}

/// Writes the JPEG and then removes the source itself, so the pipeline's own
/// delete step finds nothing to delete.
pub struct SourceStealingConverter;

impl Converter for SourceStealingConverter {
    fn convert(&self, source: &Path) -> Outcome {
        let output = jpeg_sibling(source);
        if let Err(e) = fs::copy(source, &output).and_then(|_| fs::remove_file(source)) {
            return Outcome::failed(e.to_string());
        }
        Outcome::Converted(output)
    }

    fn describe(&self) -> String {
        "steal".to_string()
    }
}

/// Throwaway library tree.
pub struct Library {
    dir: TempDir,
}

impl Library {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create `rel` (and parents) with some placeholder content.
    pub fn add(&self, rel: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, format!("bytes of {}", rel)).unwrap();
        path
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Every regular file under the root, relative and sorted.
    pub fn listing(&self) -> Vec<String> {
        let mut files: Vec<String> = walkdir::WalkDir::new(self.dir.path())
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                e.path()
                    .strip_prefix(self.dir.path())
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        files.sort();
        files
    }
}
