use crate::provider::{ProviderError, SearchProvider, SearchResponse};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

const YT_DLP: &str = "yt-dlp";

/// Searches YouTube through the `yt-dlp` executable
///
/// The first result is fully extracted rather than listed flat. Slower, but
/// a URL is only returned for a video that actually resolves.
#[derive(Debug, Clone, Copy, Default)]
pub struct YtDlpSearch;

impl YtDlpSearch {
    pub fn check_available() -> Result<(), ProviderError> {
        which::which(YT_DLP)
            .map(|_| ())
            .map_err(|_| ProviderError::DependencyNotFound(YT_DLP))
    }
}

#[async_trait]
impl SearchProvider for YtDlpSearch {
    async fn search(&self, query: &str) -> Result<SearchResponse, ProviderError> {
        debug!("Searching for {:?}", query);

        let output = Command::new(YT_DLP)
            .arg("--dump-single-json")
            .arg("--no-playlist")
            .arg("--quiet")
            .arg("--no-warnings")
            .arg("--format")
            .arg("bestaudio/best")
            .arg("--default-search")
            .arg("ytsearch1")
            .arg("--")
            .arg(query)
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProviderError::Failed(stderr.trim().to_string()));
        }

        serde_json::from_slice(&output.stdout).map_err(|e| ProviderError::Parse(e.to_string()))
    }
}
