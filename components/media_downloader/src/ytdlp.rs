// components/media_downloader/src/ytdlp.rs
use crate::types::{DownloadError, TranscodeSettings};
use crate::utils::append_extension;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

const YT_DLP: &str = "yt-dlp";
const FFMPEG: &str = "ffmpeg";

/// yt-dlp fetches; ffmpeg does the audio extraction and transcode
const REQUIRED_TOOLS: [&str; 2] = [YT_DLP, FFMPEG];

fn require_tools(tools: &[&'static str]) -> Result<(), DownloadError> {
    for &tool in tools {
        which::which(tool).map_err(|_| DownloadError::DependencyNotFound(tool))?;
    }
    Ok(())
}

#[async_trait]
pub trait Downloader {
    /// Check if the downloader is available and has all required dependencies
    async fn check_available(&self) -> Result<(), DownloadError>;

    /// Fetch the best audio stream at `url` and transcode it
    ///
    /// `url` is passed through as written in the manifest. Writes
    /// `<output_stem>.<codec>` and returns that path.
    async fn download_audio(
        &self,
        url: &str,
        output_stem: &Path,
        settings: &TranscodeSettings,
    ) -> Result<PathBuf, DownloadError>;
}

pub struct YtDlp;

#[async_trait]
impl Downloader for YtDlp {
    async fn check_available(&self) -> Result<(), DownloadError> {
        require_tools(&REQUIRED_TOOLS)
    }

    async fn download_audio(
        &self,
        url: &str,
        output_stem: &Path,
        settings: &TranscodeSettings,
    ) -> Result<PathBuf, DownloadError> {
        let mut template = output_stem.as_os_str().to_owned();
        template.push(".%(ext)s");
        let expected = append_extension(output_stem, settings.extension());
        debug!("Downloading {} to {}", url, expected.display());

        let output = Command::new(YT_DLP)
            .arg("--extract-audio")
            .arg("--audio-format")
            .arg(&settings.codec)
            .arg("--audio-quality")
            .arg(format!("{}K", settings.bitrate_kbps))
            .arg("--format")
            .arg("bestaudio/best")
            .arg("--no-playlist")
            .arg("--quiet")
            .arg("--no-warnings")
            .arg("--output")
            .arg(&template)
            .arg("--")
            .arg(url)
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DownloadError::DownloadFailed(stderr.trim().to_string()));
        }

        if !tokio::fs::try_exists(&expected).await? {
            return Err(DownloadError::DownloadFailed(format!(
                "yt-dlp finished without producing {}",
                expected.display()
            )));
        }

        Ok(expected)
    }
}

#[cfg(test)]
pub mod stub {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Writes a few placeholder bytes instead of fetching anything
    #[derive(Clone, Default)]
    pub struct DownloaderStub {
        fetched: Arc<Mutex<Vec<String>>>,
    }

    impl DownloaderStub {
        pub fn calls(&self) -> usize {
            self.fetched.lock().len()
        }

        /// Sources in the order they were requested
        pub fn fetched(&self) -> Vec<String> {
            self.fetched.lock().clone()
        }
    }

    #[async_trait]
    impl Downloader for DownloaderStub {
        async fn check_available(&self) -> Result<(), DownloadError> {
            Ok(())
        }

        async fn download_audio(
            &self,
            url: &str,
            output_stem: &Path,
            settings: &TranscodeSettings,
        ) -> Result<PathBuf, DownloadError> {
            self.fetched.lock().push(url.to_string());
            let path = append_extension(output_stem, settings.extension());
            tokio::fs::write(&path, b"ID3").await?;
            Ok(path)
        }
    }

    /// Always fails with the given message
    pub struct FailingDownloader(pub String);

    #[async_trait]
    impl Downloader for FailingDownloader {
        async fn check_available(&self) -> Result<(), DownloadError> {
            Err(DownloadError::DependencyNotFound(YT_DLP))
        }

        async fn download_audio(
            &self,
            _url: &str,
            _output_stem: &Path,
            _settings: &TranscodeSettings,
        ) -> Result<PathBuf, DownloadError> {
            Err(DownloadError::DownloadFailed(self.0.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn transcoder_is_required_alongside_fetcher() {
        assert_eq!(REQUIRED_TOOLS, ["yt-dlp", "ffmpeg"]);
    }

    #[test]
    fn missing_tool_is_named_in_the_error() {
        let result = require_tools(&["mdma-no-such-tool-ffmpeg"]);
        assert_matches!(
            result,
            Err(DownloadError::DependencyNotFound("mdma-no-such-tool-ffmpeg"))
        );
    }

    #[test]
    fn empty_tool_list_is_satisfied() {
        assert!(require_tools(&[]).is_ok());
    }
}
