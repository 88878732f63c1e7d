use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("manifest line has no '|' separator: {0:?}")]
    MissingSeparator(String),

    #[error("manifest line has an empty track name: {0:?}")]
    EmptyName(String),

    #[error("manifest line has an empty URL: {0:?}")]
    EmptyUrl(String),
}

impl ManifestError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::Write {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by the content of a single line
    pub fn is_malformed_line(&self) -> bool {
        matches!(
            self,
            ManifestError::MissingSeparator(_)
                | ManifestError::EmptyName(_)
                | ManifestError::EmptyUrl(_)
        )
    }
}
