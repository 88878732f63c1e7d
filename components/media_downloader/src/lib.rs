// components/media_downloader/src/lib.rs
mod types;
mod utils;
mod ytdlp;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use track_primitives::ResolvedEntry;

pub use types::{
    AcquireFailure, AcquisitionProgress, AcquisitionReport, DownloadError, DownloadOutcome,
    DownloadStatus, TranscodeSettings,
};
pub use utils::{append_extension, sanitize_filename, MAX_DETAIL_CHARS, MAX_NAME_CHARS};
pub use ytdlp::{Downloader, YtDlp};

use utils::truncate_detail;

/// Scratch directory inside the destination for in-progress transcodes
const PARTIAL_DIR: &str = ".partial";

/// `<download_path>/<sanitized name>.<extension>`, or `None` for an unusable name
pub fn target_path(
    download_path: &Path,
    track_name: &str,
    settings: &TranscodeSettings,
) -> Option<PathBuf> {
    let safe_name = sanitize_filename(track_name);
    if safe_name.is_empty() {
        return None;
    }
    Some(append_extension(
        &download_path.join(safe_name),
        settings.extension(),
    ))
}

pub struct MediaDownloader {
    download_path: PathBuf,
    temp_path: PathBuf,
    downloader: Arc<dyn Downloader + Send + Sync>,
    settings: TranscodeSettings,
}

impl MediaDownloader {
    /// Create a new MediaDownloader that will store files in the given directory
    pub async fn new(download_path: impl AsRef<Path>) -> Result<Self, DownloadError> {
        Self::new_with_downloader(download_path, Arc::new(YtDlp)).await
    }

    /// Create a new MediaDownloader with a specific downloader implementation
    pub async fn new_with_downloader(
        download_path: impl AsRef<Path>,
        downloader: Arc<dyn Downloader + Send + Sync>,
    ) -> Result<Self, DownloadError> {
        downloader.check_available().await?;

        let download_path = download_path.as_ref().to_owned();
        let temp_path = download_path.join(PARTIAL_DIR);

        Ok(Self {
            download_path,
            temp_path,
            downloader,
            settings: TranscodeSettings::default(),
        })
    }

    pub fn with_settings(mut self, settings: TranscodeSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn download_path(&self) -> &Path {
        &self.download_path
    }

    /// Where the audio file for `track_name` lives once acquired
    ///
    /// `None` when nothing of the name survives sanitization.
    pub fn target_path(&self, track_name: &str) -> Option<PathBuf> {
        target_path(&self.download_path, track_name, &self.settings)
    }

    /// Acquire one found-manifest line
    ///
    /// Never fails the caller: every problem becomes a failed outcome. An
    /// existing target file short-circuits before any network work.
    pub async fn acquire(&self, line: &str) -> DownloadOutcome {
        let entry = match ResolvedEntry::parse(line) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping malformed manifest line {:?}: {}", line, e);
                return DownloadOutcome::failed(
                    line,
                    AcquireFailure::MalformedEntry {
                        reason: e.to_string(),
                    },
                );
            }
        };

        let Some(final_path) = self.target_path(entry.name()) else {
            warn!("No usable file name in {:?}", entry.name());
            return DownloadOutcome::failed(entry.name(), AcquireFailure::UnusableName);
        };

        if tokio::fs::try_exists(&final_path).await.unwrap_or(false) {
            info!("[SKIP] Already exists: {}", final_path.display());
            return DownloadOutcome::skipped(entry.name(), final_path);
        }

        info!("Downloading: {}", entry.name());
        match self.fetch(&entry, &final_path).await {
            Ok(()) => {
                info!("[DONE] {}", final_path.display());
                DownloadOutcome::downloaded(entry.name(), final_path)
            }
            Err(e) => {
                let detail = truncate_detail(&e.to_string());
                warn!("[ERROR] {}: {}", entry.name(), detail);
                DownloadOutcome::failed(entry.name(), AcquireFailure::Fetch { detail })
            }
        }
    }

    /// Acquire every manifest line in order, one at a time
    ///
    /// Only a destination directory that cannot be created fails the batch.
    /// Cancellation is checked between lines; lines not yet started are
    /// reported as cancelled.
    pub async fn acquire_all<F>(
        &self,
        lines: &[String],
        cancel: &CancellationToken,
        mut on_progress: F,
    ) -> Result<AcquisitionReport, DownloadError>
    where
        F: FnMut(AcquisitionProgress<'_>),
    {
        tokio::fs::create_dir_all(&self.download_path)
            .await
            .map_err(|e| DownloadError::destination(&self.download_path, e))?;

        let total = lines.len();
        info!(
            "Acquiring {} tracks into {}",
            total,
            self.download_path.display()
        );

        let mut report = AcquisitionReport::default();
        for (i, line) in lines.iter().enumerate() {
            let outcome = if cancel.is_cancelled() {
                let name = ResolvedEntry::parse(line)
                    .map(|entry| entry.name().to_string())
                    .unwrap_or_else(|_| line.clone());
                DownloadOutcome::failed(name, AcquireFailure::Cancelled)
            } else {
                self.acquire(line).await
            };

            on_progress(AcquisitionProgress {
                index: i + 1,
                total,
                name: &outcome.name,
                outcome: &outcome,
            });
            report.outcomes.push(outcome);
        }

        // Only succeeds once every scratch directory is gone
        let _ = tokio::fs::remove_dir(&self.temp_path).await;

        info!(
            "Acquisition finished: {}/{} tracks available",
            report.success_count(),
            report.total()
        );
        Ok(report)
    }

    async fn fetch(&self, entry: &ResolvedEntry, final_path: &Path) -> Result<(), DownloadError> {
        // Transcode next to the destination so the final move is a rename
        tokio::fs::create_dir_all(&self.temp_path).await?;
        let temp_dir = TempDir::new_in(&self.temp_path)?;
        let stem = temp_dir.path().join(sanitize_filename(entry.name()));

        let produced = self
            .downloader
            .download_audio(entry.url(), &stem, &self.settings)
            .await?;

        tokio::fs::rename(&produced, final_path).await?;
        Ok(())
    }
}
