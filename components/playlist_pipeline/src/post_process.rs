use crate::error::PipelineError;
use crate::observer::{PipelineObserver, Stage};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use track_tagger::{TagWriter, TrackTags};

/// Enrichment step run on each acquired file
#[async_trait]
pub trait PostProcessor {
    /// `search` is the playlist line the file was acquired for
    async fn process(&self, file: &Path, search: &str) -> Result<(), PipelineError>;
}

#[async_trait]
impl PostProcessor for TagWriter {
    async fn process(&self, file: &Path, search: &str) -> Result<(), PipelineError> {
        let writer = *self;
        let path = file.to_path_buf();
        let tags = TrackTags::from_search(search);

        tokio::task::spawn_blocking(move || writer.write(&path, &tags))
            .await
            .map_err(|e| PipelineError::post_process(file, e))?
            .map_err(|e| PipelineError::post_process(file, e))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostProcessReport {
    pub succeeded: usize,
    pub failed: usize,
    /// Manifest entries with no file in the destination directory
    pub missing: usize,
    /// Files left untouched because the run was cancelled
    pub cancelled: usize,
}

/// Run `processor` over `(file, search)` pairs, one at a time
///
/// Failures are logged and counted, never propagated.
pub(crate) async fn post_process_files<O>(
    processor: &(dyn PostProcessor + Send + Sync),
    files: &[(PathBuf, String)],
    cancel: &CancellationToken,
    observer: &mut O,
) -> PostProcessReport
where
    O: PipelineObserver + ?Sized,
{
    observer.stage_started(Stage::PostProcessing, files.len());
    let mut report = PostProcessReport::default();

    for (i, (file, search)) in files.iter().enumerate() {
        if cancel.is_cancelled() {
            report.cancelled = files.len() - i;
            break;
        }

        let result = processor.process(file, search).await;
        match &result {
            Ok(()) => {
                debug!("Post-processed {}", file.display());
                report.succeeded += 1;
            }
            Err(e) => {
                warn!("{}", e);
                report.failed += 1;
            }
        }
        observer.post_processed(file, result.as_ref().map(|_| ()));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoopObserver;
    use assert_matches::assert_matches;
    use tempfile::TempDir;

    #[tokio::test]
    async fn tagging_a_missing_file_fails_with_its_path() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("Song A - Artist X.mp3");

        let result = TagWriter.process(&file, "Song A - Artist X").await;

        assert_matches!(result, Err(PipelineError::PostProcess { path, .. }) => {
            assert_eq!(path, file);
        });
    }

    #[tokio::test]
    async fn failures_are_counted_and_processing_continues() {
        let dir = TempDir::new().unwrap();
        let files = vec![
            (dir.path().join("a.mp3"), "A - 1".to_string()),
            (dir.path().join("b.mp3"), "B - 2".to_string()),
        ];

        let report = post_process_files(
            &TagWriter,
            &files,
            &CancellationToken::new(),
            &mut NoopObserver,
        )
        .await;

        assert_eq!(report.failed, 2);
        assert_eq!(report.succeeded, 0);
    }

    #[tokio::test]
    async fn cancellation_leaves_remaining_files_alone() {
        let dir = TempDir::new().unwrap();
        let files = vec![(dir.path().join("a.mp3"), "A - 1".to_string())];
        let cancel = CancellationToken::new();
        cancel.cancel();

        let report = post_process_files(&TagWriter, &files, &cancel, &mut NoopObserver).await;

        assert_eq!(
            report,
            PostProcessReport {
                cancelled: 1,
                ..Default::default()
            }
        );
    }
}
