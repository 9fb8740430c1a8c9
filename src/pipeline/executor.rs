use super::report::RunReport;
use crate::logging;
use crate::notifications::Notifier;
use crate::scanner;
use crate::stash::HostClient;
use heic_converter_common::{Error, FailReason, Mode, Outcome, Result, Tally};
use heic_converter_magick::{Converter, ToolResolver};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Progress callback type: fraction completed and the file just processed.
pub type ProgressCallback = Box<dyn Fn(f64, &Path) + Send + Sync>;

/// Runs one scan or convert pass over the host's libraries.
pub struct Pipeline {
    host: Arc<dyn HostClient>,
    resolver: Arc<dyn ToolResolver>,
    notifier: Notifier,
    progress_callback: Option<ProgressCallback>,
}

impl Pipeline {
    pub fn new(host: Arc<dyn HostClient>, resolver: Arc<dyn ToolResolver>) -> Self {
        let notifier = Notifier::new(Arc::clone(&host));
        Self {
            host,
            resolver,
            notifier,
            progress_callback: None,
        }
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    fn report_progress(&self, completed: usize, total: usize, current: &Path) {
        let progress = progress_fraction(completed, total);
        if let Some(ref cb) = self.progress_callback {
            cb(progress, current);
        }
        logging::progress(progress);
    }

    /// Fetch the library roots from the host, then run `mode` over them.
    ///
    /// # Errors
    ///
    /// [`Error::ConfigUnavailable`] if the roots cannot be retrieved and
    /// [`Error::ToolNotAvailable`] if converting without ImageMagick. Per-file
    /// problems never fail the run.
    pub async fn run(&self, mode: Mode) -> Result<RunReport> {
        let roots = self
            .host
            .library_paths()
            .await
            .map_err(|e| Error::config_unavailable(format!("{:#}", e)))?;

        let listed: Vec<String> = roots.iter().map(|p| p.display().to_string()).collect();
        tracing::info!("Library paths: {}", listed.join(", "));

        self.run_on(mode, &roots).await
    }

    /// Run `mode` over an already resolved set of roots.
    pub async fn run_on(&self, mode: Mode, roots: &[PathBuf]) -> Result<RunReport> {
        let candidates = scanner::find_candidates(roots);

        match mode {
            Mode::Scan => Ok(self.report_scan(candidates)),
            Mode::Convert => self.convert_all(candidates).await,
        }
    }

    fn report_scan(&self, candidates: Vec<PathBuf>) -> RunReport {
        if candidates.is_empty() {
            tracing::info!("No HEIC/HEIF files found in library paths");
        } else {
            tracing::info!("Found {} HEIC/HEIF file(s):", candidates.len());
            for path in &candidates {
                tracing::info!("  {}", path.display());
            }
        }

        RunReport::Scan { candidates }
    }

    async fn convert_all(&self, candidates: Vec<PathBuf>) -> Result<RunReport> {
        let total = candidates.len();
        let mut tally = Tally::default();

        if total == 0 {
            tracing::info!("No HEIC/HEIF files found in library paths");
            return Ok(RunReport::Convert {
                total,
                tally,
                reindex_requested: false,
                reindex_accepted: false,
            });
        }

        tracing::info!("Found {} HEIC/HEIF file(s) to convert", total);

        let converter = self.resolver.resolve()?;
        tracing::info!("Using ImageMagick command: {}", converter.describe());

        for (i, source) in candidates.iter().enumerate() {
            tracing::info!("[{}/{}] Converting: {}", i + 1, total, source.display());

            let outcome = self.process_file(&converter, source).await;
            tally.record(&outcome);

            self.report_progress(i + 1, total, source);
        }

        tracing::info!("Done: {}", tally);
        if tally.cleanup_failed > 0 {
            tracing::warn!(
                "{} file(s) were converted but their original could not be deleted",
                tally.cleanup_failed
            );
        }

        let reindex_requested = tally.converted > 0;
        let reindex_accepted = if reindex_requested {
            tracing::info!("Triggering Stash scan to index new JPEG files...");
            self.notifier.request_reindex().await
        } else {
            false
        };

        Ok(RunReport::Convert {
            total,
            tally,
            reindex_requested,
            reindex_accepted,
        })
    }

    /// Convert one file and, on success, delete its original.
    async fn process_file(&self, converter: &Arc<dyn Converter>, source: &Path) -> Outcome {
        let converter = Arc::clone(converter);
        let path = source.to_path_buf();

        let outcome = match tokio::task::spawn_blocking(move || converter.convert(&path)).await {
            Ok(outcome) => outcome,
            Err(e) => Outcome::failed(format!("conversion task failed: {}", e)),
        };

        match outcome {
            Outcome::Converted(output) => match std::fs::remove_file(source) {
                Ok(()) => {
                    tracing::info!("  → {} (original deleted)", output.display());
                    Outcome::Converted(output)
                }
                Err(e) => {
                    tracing::error!("  Converted but failed to delete original: {}", e);
                    Outcome::Failed(FailReason::CleanupFailed {
                        output,
                        message: e.to_string(),
                    })
                }
            },
            Outcome::Skipped(reason) => {
                tracing::debug!("  Skipped: {}", reason);
                Outcome::Skipped(reason)
            }
            Outcome::Failed(reason) => {
                tracing::debug!("  Failed: {}", reason);
                Outcome::Failed(reason)
            }
        }
    }
}

/// `completed / total`, clamped to `[0, 1]`.
pub fn progress_fraction(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 1.0;
    }
    (completed as f64 / total as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_fraction() {
        assert_eq!(progress_fraction(0, 4), 0.0);
        assert_eq!(progress_fraction(1, 4), 0.25);
        assert_eq!(progress_fraction(4, 4), 1.0);
        assert_eq!(progress_fraction(5, 4), 1.0);
        assert_eq!(progress_fraction(0, 0), 1.0);
    }
}
