//! Shared value types for the playlist pipeline
//!
//! Everything that crosses a component boundary lives here:
//! - `TrackRequest`: one playlist line, tagged with its input position
//! - `ResolutionResult` / `ResolutionFailure`: what the resolver produced
//! - `ResolvedEntry` / `UnresolvedEntry`: the manifest line formats
//! - `manifest`: reading and writing the flat text files
//!
//! # Examples
//!
//! ```
//! use track_primitives::ResolvedEntry;
//!
//! let entry = ResolvedEntry::parse("Song A - Artist X | https://x/a").unwrap();
//! assert_eq!(entry.name(), "Song A - Artist X");
//! assert_eq!(entry.to_string(), "Song A - Artist X | https://x/a");
//! ```

mod error;
pub mod manifest;
mod types;

pub use error::ManifestError;
pub use types::{
    ResolutionFailure, ResolutionResult, ResolvedEntry, TrackRequest, UnresolvedEntry,
    MANIFEST_SEPARATOR,
};
