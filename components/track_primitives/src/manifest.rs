//! Flat text manifests
//!
//! The playlist, found and not-found files are the only persisted state
//! besides the audio files themselves. They stay hand-editable: one record
//! per line, UTF-8, blank lines ignored on read.

use crate::error::ManifestError;
use crate::types::TrackRequest;
use std::fmt::Display;
use std::path::Path;
use tracing::debug;

/// Read a playlist file into track requests
pub async fn read_playlist(path: impl AsRef<Path>) -> Result<Vec<TrackRequest>, ManifestError> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ManifestError::read(path, e))?;

    let requests = TrackRequest::from_playlist(&text);
    debug!("Loaded {} tracks from {}", requests.len(), path.display());
    Ok(requests)
}

/// Read the non-blank, trimmed lines of a manifest
///
/// Lines are returned raw; parsing is left to the consumer so that one bad
/// line never prevents reading the rest.
pub async fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>, ManifestError> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ManifestError::read(path, e))?;

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Overwrite a manifest with one record per line
pub async fn write_lines<T: Display>(
    path: impl AsRef<Path>,
    records: &[T],
) -> Result<(), ManifestError> {
    let path = path.as_ref();
    let body = records
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| ManifestError::write(parent, e))?;
    }

    tokio::fs::write(path, body)
        .await
        .map_err(|e| ManifestError::write(path, e))?;

    debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ResolvedEntry, UnresolvedEntry};
    use assert_matches::assert_matches;
    use tempfile::TempDir;

    #[tokio::test]
    async fn playlist_file_becomes_requests() {
        let dir = TempDir::new().unwrap();
        let playlist = dir.path().join("my_playlist_songs.txt");
        tokio::fs::write(&playlist, "Song A - Artist X\n\nSong B - Artist Y")
            .await
            .unwrap();

        let requests = read_playlist(&playlist).await.unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].name(), "Song B - Artist Y");
    }

    #[tokio::test]
    async fn missing_playlist_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let result = read_playlist(dir.path().join("nope.txt")).await;
        assert_matches!(result, Err(ManifestError::Read { .. }));
    }

    #[tokio::test]
    async fn found_manifest_survives_write_and_read() {
        let dir = TempDir::new().unwrap();
        let found = dir.path().join("found_songs.txt");
        let entries = vec![
            ResolvedEntry::new("Song A - Artist X", "https://x/a"),
            ResolvedEntry::new("Song C - Artist Z", "https://x/c"),
        ];

        write_lines(&found, &entries).await.unwrap();

        let lines = read_lines(&found).await.unwrap();
        let parsed: Vec<_> = lines
            .iter()
            .map(|line| ResolvedEntry::parse(line).unwrap())
            .collect();
        assert_eq!(parsed, entries);
    }

    #[tokio::test]
    async fn write_overwrites_previous_content() {
        let dir = TempDir::new().unwrap();
        let not_found = dir.path().join("not_found.txt");

        write_lines(&not_found, &[UnresolvedEntry::new("Old"), UnresolvedEntry::new("Older")])
            .await
            .unwrap();
        write_lines(&not_found, &[UnresolvedEntry::new("New")])
            .await
            .unwrap();

        let text = tokio::fs::read_to_string(&not_found).await.unwrap();
        assert_eq!(text, "New");
    }

    #[tokio::test]
    async fn empty_record_set_writes_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("found_songs.txt");

        write_lines::<ResolvedEntry>(&path, &[]).await.unwrap();

        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "");
        assert!(read_lines(&path).await.unwrap().is_empty());
    }
}
