use lofty::{Accessor, LoftyError, Probe, Tag, TagExt, TaggedFileExt};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Separator between title and artist in a playlist line
const TITLE_ARTIST_SEPARATOR: &str = " - ";

#[derive(Error, Debug)]
pub enum TagError {
    #[error("Lofty error: {0}")]
    Lofty(#[from] LoftyError),

    #[error("file format does not support tags: {0}")]
    Unsupported(PathBuf),
}

/// Tag values derived from a `"Title - Artist"` playlist line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackTags {
    pub title: String,
    pub artist: Option<String>,
}

impl TrackTags {
    /// Split on the last `" - "` so titles may contain the separator
    ///
    /// A line without separator becomes a title with no artist.
    pub fn from_search(search: &str) -> Self {
        let search = search.trim();
        match search.rsplit_once(TITLE_ARTIST_SEPARATOR) {
            Some((title, artist)) if !title.trim().is_empty() && !artist.trim().is_empty() => {
                Self {
                    title: title.trim().to_string(),
                    artist: Some(artist.trim().to_string()),
                }
            }
            _ => Self {
                title: search.to_string(),
                artist: None,
            },
        }
    }
}

/// Writes title and artist into an audio file's primary tag
#[derive(Debug, Clone, Copy, Default)]
pub struct TagWriter;

impl TagWriter {
    /// Blocking: reads and rewrites the file in place
    pub fn write(&self, path: impl AsRef<Path>, tags: &TrackTags) -> Result<(), TagError> {
        let path = path.as_ref();
        let mut tagged_file = Probe::open(path)?.read()?;

        if tagged_file.primary_tag().is_none() {
            let tag_type = tagged_file.primary_tag_type();
            tagged_file.insert_tag(Tag::new(tag_type));
        }

        let tag = tagged_file
            .primary_tag_mut()
            .ok_or_else(|| TagError::Unsupported(path.to_path_buf()))?;

        tag.set_title(tags.title.clone());
        if let Some(artist) = &tags.artist {
            tag.set_artist(artist.clone());
        }

        tag.save_to_path(path)?;
        debug!("Tagged {} as {:?}", path.display(), tags);
        Ok(())
    }
}
