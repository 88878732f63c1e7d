use media_downloader::DownloadError;
use std::path::PathBuf;
use thiserror::Error;
use track_primitives::ManifestError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Download(#[from] DownloadError),

    #[error("post-processing {path} failed: {reason}")]
    PostProcess { path: PathBuf, reason: String },
}

impl PipelineError {
    pub fn post_process(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        PipelineError::PostProcess {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
