use crate::error::PipelineError;
use crate::observer::{PipelineObserver, Stage};
use crate::paths::PipelinePaths;
use crate::post_process::{post_process_files, PostProcessReport, PostProcessor};
use media_downloader::{
    target_path, AcquisitionReport, Downloader, MediaDownloader, TranscodeSettings,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use track_primitives::{manifest, ResolvedEntry};
use track_resolver::{ResolutionReport, Resolver};

/// Final counts of a full run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    pub resolution: ResolutionReport,
    pub acquisition: AcquisitionReport,
    /// `None` when no post-processor was configured
    pub post_processing: Option<PostProcessReport>,
}

/// Resolve the playlist and overwrite both manifests with the outcome
pub async fn resolve_playlist<O>(
    resolver: &Resolver,
    paths: &PipelinePaths,
    workers: usize,
    cancel: &CancellationToken,
    observer: &mut O,
) -> Result<ResolutionReport, PipelineError>
where
    O: PipelineObserver + ?Sized,
{
    let requests = manifest::read_playlist(&paths.playlist).await?;
    observer.stage_started(Stage::Resolution, requests.len());

    let report = resolver
        .resolve_all(requests, workers, cancel, |progress| observer.resolved(progress))
        .await;

    manifest::write_lines(&paths.found, &report.resolved).await?;
    manifest::write_lines(&paths.not_found, &report.unresolved).await?;

    info!(
        "Resolved {}/{} tracks ({} cancelled)",
        report.resolved.len(),
        report.total(),
        report.cancelled
    );
    Ok(report)
}

/// Acquire every line of a found manifest
pub async fn acquire_manifest<O>(
    downloader: &MediaDownloader,
    found: &Path,
    cancel: &CancellationToken,
    observer: &mut O,
) -> Result<AcquisitionReport, PipelineError>
where
    O: PipelineObserver + ?Sized,
{
    let lines = manifest::read_lines(found).await?;
    observer.stage_started(Stage::Acquisition, lines.len());

    let report = downloader
        .acquire_all(&lines, cancel, |progress| observer.acquired(progress))
        .await?;
    Ok(report)
}

/// Post-process the files a found manifest points at
///
/// Entries whose file is not in `destination` are counted as missing.
pub async fn post_process_manifest<O>(
    processor: &(dyn PostProcessor + Send + Sync),
    found: &Path,
    destination: &Path,
    settings: &TranscodeSettings,
    cancel: &CancellationToken,
    observer: &mut O,
) -> Result<PostProcessReport, PipelineError>
where
    O: PipelineObserver + ?Sized,
{
    let lines = manifest::read_lines(found).await?;
    let mut files = Vec::with_capacity(lines.len());
    let mut missing = 0;

    for line in &lines {
        let entry = match ResolvedEntry::parse(line) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping malformed manifest line {:?}: {}", line, e);
                continue;
            }
        };

        let path = target_path(destination, entry.name(), settings);
        let exists = match &path {
            Some(path) => tokio::fs::try_exists(path).await.unwrap_or(false),
            None => false,
        };

        match path {
            Some(path) if exists => files.push((path, entry.name().to_string())),
            _ => {
                debug!("No file for {:?}", entry.name());
                missing += 1;
            }
        }
    }

    let mut report = post_process_files(processor, &files, cancel, observer).await;
    report.missing = missing;
    Ok(report)
}

/// Resolution, acquisition and optional post-processing wired together
pub struct Pipeline {
    resolver: Resolver,
    fetcher: Arc<dyn Downloader + Send + Sync>,
    settings: TranscodeSettings,
    post_processor: Option<Arc<dyn PostProcessor + Send + Sync>>,
}

impl Pipeline {
    pub fn new(resolver: Resolver, fetcher: Arc<dyn Downloader + Send + Sync>) -> Self {
        Self {
            resolver,
            fetcher,
            settings: TranscodeSettings::default(),
            post_processor: None,
        }
    }

    pub fn with_settings(mut self, settings: TranscodeSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_post_processor(mut self, processor: Arc<dyn PostProcessor + Send + Sync>) -> Self {
        self.post_processor = Some(processor);
        self
    }

    /// Run every stage in order
    ///
    /// Files land in `paths.destination`. The fetch tools are checked before
    /// the playlist is read, so a missing tool costs no searches.
    /// Acquisition reads the found manifest back from disk rather than
    /// using the in-memory report, so a run behaves exactly like `search`
    /// followed by `download`.
    pub async fn run_all<O>(
        &self,
        paths: &PipelinePaths,
        workers: usize,
        cancel: &CancellationToken,
        observer: &mut O,
    ) -> Result<PipelineSummary, PipelineError>
    where
        O: PipelineObserver + ?Sized,
    {
        let downloader =
            MediaDownloader::new_with_downloader(&paths.destination, self.fetcher.clone())
                .await?
                .with_settings(self.settings.clone());

        let resolution = resolve_playlist(&self.resolver, paths, workers, cancel, observer).await?;
        let acquisition = acquire_manifest(&downloader, &paths.found, cancel, observer).await?;

        let post_processing = match &self.post_processor {
            Some(processor) => {
                let files: Vec<(PathBuf, String)> = acquisition
                    .outcomes
                    .iter()
                    .filter_map(|o| o.path().map(|path| (path.to_path_buf(), o.name.clone())))
                    .collect();
                Some(post_process_files(processor.as_ref(), &files, cancel, observer).await)
            }
            None => None,
        };

        info!(
            "Run finished: {} resolved, {} unresolved, {}/{} acquired",
            resolution.resolved.len(),
            resolution.unresolved.len(),
            acquisition.success_count(),
            acquisition.total()
        );

        Ok(PipelineSummary {
            resolution,
            acquisition,
            post_processing,
        })
    }
}
