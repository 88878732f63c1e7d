use std::path::PathBuf;

pub const DEFAULT_PLAYLIST: &str = "my_playlist_songs.txt";
pub const DEFAULT_FOUND: &str = "found_songs.txt";
pub const DEFAULT_NOT_FOUND: &str = "not_found.txt";
pub const DEFAULT_DESTINATION: &str = "songs";

/// Files and directories one pipeline run reads and writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelinePaths {
    pub playlist: PathBuf,
    /// `"<name> | <url>"` per line, overwritten by every resolution run
    pub found: PathBuf,
    pub not_found: PathBuf,
    /// Also the index of what has already been downloaded
    pub destination: PathBuf,
}

impl Default for PipelinePaths {
    fn default() -> Self {
        Self {
            playlist: PathBuf::from(DEFAULT_PLAYLIST),
            found: PathBuf::from(DEFAULT_FOUND),
            not_found: PathBuf::from(DEFAULT_NOT_FOUND),
            destination: PathBuf::from(DEFAULT_DESTINATION),
        }
    }
}
