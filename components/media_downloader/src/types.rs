// components/media_downloader/src/types.rs
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Required dependency not found: {0}")]
    DependencyNotFound(&'static str),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("cannot create destination directory {path}")]
    Destination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DownloadError {
    pub fn destination(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DownloadError::Destination {
            path: path.into(),
            source,
        }
    }
}

/// Target container and quality for extracted audio
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeSettings {
    /// Codec name as understood by the fetch tool; doubles as file extension
    pub codec: String,
    pub bitrate_kbps: u32,
}

impl Default for TranscodeSettings {
    fn default() -> Self {
        Self {
            codec: "mp3".to_string(),
            bitrate_kbps: 192,
        }
    }
}

impl TranscodeSettings {
    pub fn extension(&self) -> &str {
        &self.codec
    }
}

/// Why a single manifest line produced no file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquireFailure {
    /// The line is not `"<name> | <url>"`; retrying cannot help
    MalformedEntry { reason: String },
    /// Nothing of the track name survives sanitization
    UnusableName,
    /// Fetching or transcoding failed; detail is shortened for logs
    Fetch { detail: String },
    /// The batch was cancelled before this line was attempted
    Cancelled,
}

impl AcquireFailure {
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            AcquireFailure::MalformedEntry { .. } | AcquireFailure::UnusableName
        )
    }
}

impl fmt::Display for AcquireFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcquireFailure::MalformedEntry { reason } => write!(f, "malformed entry: {}", reason),
            AcquireFailure::UnusableName => write!(f, "track name has no usable characters"),
            AcquireFailure::Fetch { detail } => write!(f, "{}", detail),
            AcquireFailure::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadStatus {
    Downloaded { path: PathBuf },
    /// A previous run already produced the file
    Skipped { path: PathBuf },
    Failed(AcquireFailure),
}

/// Result of acquiring one manifest line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    /// Track name, or the raw line when it could not be parsed
    pub name: String,
    pub status: DownloadStatus,
}

impl DownloadOutcome {
    pub fn downloaded(name: impl Into<String>, path: PathBuf) -> Self {
        Self {
            name: name.into(),
            status: DownloadStatus::Downloaded { path },
        }
    }

    pub fn skipped(name: impl Into<String>, path: PathBuf) -> Self {
        Self {
            name: name.into(),
            status: DownloadStatus::Skipped { path },
        }
    }

    pub fn failed(name: impl Into<String>, failure: AcquireFailure) -> Self {
        Self {
            name: name.into(),
            status: DownloadStatus::Failed(failure),
        }
    }

    /// Skips count as success
    pub fn success(&self) -> bool {
        !matches!(self.status, DownloadStatus::Failed(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.status, DownloadStatus::Skipped { .. })
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.status {
            DownloadStatus::Downloaded { path } | DownloadStatus::Skipped { path } => Some(path),
            DownloadStatus::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&AcquireFailure> {
        match &self.status {
            DownloadStatus::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Progress notification emitted after every manifest line
#[derive(Debug, Clone, Copy)]
pub struct AcquisitionProgress<'a> {
    /// One-based position in the manifest
    pub index: usize,
    pub total: usize,
    pub name: &'a str,
    pub outcome: &'a DownloadOutcome,
}

/// Outcomes of a whole acquisition batch, in manifest order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcquisitionReport {
    pub outcomes: Vec<DownloadOutcome>,
}

impl AcquisitionReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_skipped()).count()
    }

    pub fn downloaded_count(&self) -> usize {
        self.success_count() - self.skipped_count()
    }

    pub fn failed_count(&self) -> usize {
        self.total() - self.success_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts_skips_as_success() {
        let report = AcquisitionReport {
            outcomes: vec![
                DownloadOutcome::downloaded("A", PathBuf::from("songs/A.mp3")),
                DownloadOutcome::skipped("B", PathBuf::from("songs/B.mp3")),
                DownloadOutcome::failed(
                    "C",
                    AcquireFailure::Fetch {
                        detail: "HTTP Error 403".into(),
                    },
                ),
            ],
        };

        assert_eq!(report.total(), 3);
        assert_eq!(report.success_count(), 2);
        assert_eq!(report.downloaded_count(), 1);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.failed_count(), 1);
    }

    #[test]
    fn only_successful_outcomes_have_paths() {
        let ok = DownloadOutcome::skipped("A", PathBuf::from("songs/A.mp3"));
        assert_eq!(ok.path(), Some(Path::new("songs/A.mp3")));
        assert!(ok.failure().is_none());

        let bad = DownloadOutcome::failed("B", AcquireFailure::UnusableName);
        assert!(bad.path().is_none());
        assert!(bad.failure().unwrap().is_permanent());
    }

    #[test]
    fn default_settings_are_mp3_at_192() {
        let settings = TranscodeSettings::default();
        assert_eq!(settings.extension(), "mp3");
        assert_eq!(settings.bitrate_kbps, 192);
    }
}
