use crate::error::ManifestError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between track name and URL in a found-manifest line
pub const MANIFEST_SEPARATOR: char = '|';

// ============================================================================
// Requests
// ============================================================================

/// One playlist line to resolve
///
/// `index` is the zero-based position among the non-blank lines of the
/// playlist. Resolution completes out of order, so callers that need input
/// order sort on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackRequest {
    index: usize,
    name: String,
}

impl TrackRequest {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }

    /// Split playlist text into requests, one per non-blank line
    ///
    /// Lines are trimmed. Duplicates are kept; each becomes its own request.
    pub fn from_playlist(text: &str) -> Vec<TrackRequest> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(index, name)| TrackRequest::new(index, name))
            .collect()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Resolution results
// ============================================================================

/// Why a track could not be mapped to a source URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ResolutionFailure {
    /// The provider answered but had nothing usable
    NoResults,
    /// Age-gated or login-required content; never retried
    AccessRestricted,
    /// Every attempt failed; carries the last provider error
    Exhausted { last_error: String },
    /// The batch was cancelled before this track finished
    Cancelled,
}

impl ResolutionFailure {
    /// Permanent failures would fail the same way on a re-run
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            ResolutionFailure::NoResults | ResolutionFailure::AccessRestricted
        )
    }
}

impl fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionFailure::NoResults => write!(f, "No results found"),
            ResolutionFailure::AccessRestricted => write!(f, "Age restricted/Login required"),
            ResolutionFailure::Exhausted { last_error } => write!(f, "{}", last_error),
            ResolutionFailure::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Terminal outcome of resolving one `TrackRequest`
///
/// `url` is present if and only if resolution succeeded, in which case
/// `failure` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub index: usize,
    pub name: String,
    pub url: Option<String>,
    pub title: Option<String>,
    pub failure: Option<ResolutionFailure>,
}

impl ResolutionResult {
    pub fn found(request: &TrackRequest, url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            index: request.index(),
            name: request.name().to_string(),
            url: Some(url.into()),
            title: Some(title.into()),
            failure: None,
        }
    }

    pub fn failed(request: &TrackRequest, failure: ResolutionFailure) -> Self {
        Self {
            index: request.index(),
            name: request.name().to_string(),
            url: None,
            title: None,
            failure: Some(failure),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.url.is_some()
    }

    /// Split into the manifest record this result belongs to
    pub fn into_entry(self) -> Result<ResolvedEntry, UnresolvedEntry> {
        match self.url {
            Some(url) => Ok(ResolvedEntry {
                name: self.name,
                url,
            }),
            None => Err(UnresolvedEntry { name: self.name }),
        }
    }
}

// ============================================================================
// Manifest records
// ============================================================================

/// A successfully resolved track, serialized as `"<name> | <url>"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedEntry {
    name: String,
    url: String,
}

impl ResolvedEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Parse a found-manifest line
    ///
    /// Splits on the first `|` only, so URLs may themselves contain `|`.
    /// Both halves are trimmed. Lines without a separator, with an empty
    /// name or with an empty URL are rejected. The URL text is otherwise
    /// left to the fetch tool, which also accepts bare video IDs.
    pub fn parse(line: &str) -> Result<Self, ManifestError> {
        let (name, url) = line
            .split_once(MANIFEST_SEPARATOR)
            .ok_or_else(|| ManifestError::MissingSeparator(line.to_string()))?;

        let name = name.trim();
        let url = url.trim();

        if name.is_empty() {
            return Err(ManifestError::EmptyName(line.to_string()));
        }

        if url.is_empty() {
            return Err(ManifestError::EmptyUrl(line.to_string()));
        }

        Ok(Self::new(name, url))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for ResolvedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, MANIFEST_SEPARATOR, self.url)
    }
}

/// A track that could not be resolved, serialized as the bare name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnresolvedEntry {
    name: String,
}

impl UnresolvedEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for UnresolvedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rstest::rstest;

    #[test]
    fn playlist_skips_blank_lines_and_trims() {
        let requests =
            TrackRequest::from_playlist("Song A - Artist X\n\n   \n  Song B - Artist Y  \n");

        assert_eq!(
            requests,
            vec![
                TrackRequest::new(0, "Song A - Artist X"),
                TrackRequest::new(1, "Song B - Artist Y"),
            ]
        );
    }

    #[test]
    fn playlist_keeps_duplicates() {
        let requests = TrackRequest::from_playlist("Same - Song\nSame - Song\n");
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].name(), requests[1].name());
        assert_ne!(requests[0].index(), requests[1].index());
    }

    #[test]
    fn playlist_handles_crlf() {
        let requests = TrackRequest::from_playlist("A - B\r\nC - D\r\n");
        assert_eq!(requests[0].name(), "A - B");
        assert_eq!(requests[1].name(), "C - D");
    }

    #[test]
    fn resolved_entry_formats_with_separator() {
        let entry = ResolvedEntry::new("Song A - Artist X", "https://x/a");
        assert_eq!(entry.to_string(), "Song A - Artist X | https://x/a");
    }

    #[test]
    fn resolved_entry_splits_on_first_separator_only() {
        let entry = ResolvedEntry::parse("Name | https://x/a?q=1|2").unwrap();
        assert_eq!(entry.name(), "Name");
        assert_eq!(entry.url(), "https://x/a?q=1|2");
    }

    #[test]
    fn resolved_entry_parse_matches_display() {
        let line = "Song A - Artist X | https://x/a";
        assert_eq!(ResolvedEntry::parse(line).unwrap().to_string(), line);
    }

    #[rstest]
    #[case("no separator here")]
    #[case("")]
    fn missing_separator_is_rejected(#[case] line: &str) {
        assert_matches!(
            ResolvedEntry::parse(line),
            Err(ManifestError::MissingSeparator(_))
        );
    }

    #[rstest]
    #[case(" | https://x/a")]
    #[case("|https://x/a")]
    fn empty_name_is_rejected(#[case] line: &str) {
        assert_matches!(ResolvedEntry::parse(line), Err(ManifestError::EmptyName(_)));
    }

    #[rstest]
    #[case("Song |")]
    #[case("Song |   ")]
    fn empty_url_is_rejected(#[case] line: &str) {
        let err = ResolvedEntry::parse(line).unwrap_err();
        assert_matches!(err, ManifestError::EmptyUrl(_));
        assert!(err.is_malformed_line());
    }

    #[rstest]
    #[case("Song | www.youtube.com/watch?v=dQw4w9WgXcQ", "www.youtube.com/watch?v=dQw4w9WgXcQ")]
    #[case("Song | dQw4w9WgXcQ", "dQw4w9WgXcQ")]
    fn scheme_less_sources_are_kept_verbatim(#[case] line: &str, #[case] url: &str) {
        let entry = ResolvedEntry::parse(line).unwrap();
        assert_eq!(entry.url(), url);
    }

    #[test]
    fn result_splits_into_matching_entry() {
        let request = TrackRequest::new(3, "Song A - Artist X");

        let found = ResolutionResult::found(&request, "https://x/a", "Song A");
        assert!(found.is_resolved());
        assert_eq!(
            found.into_entry(),
            Ok(ResolvedEntry::new("Song A - Artist X", "https://x/a"))
        );

        let failed = ResolutionResult::failed(&request, ResolutionFailure::NoResults);
        assert!(!failed.is_resolved());
        assert_eq!(failed.index, 3);
        assert_eq!(
            failed.into_entry(),
            Err(UnresolvedEntry::new("Song A - Artist X"))
        );
    }

    #[test]
    fn failure_permanence() {
        assert!(ResolutionFailure::NoResults.is_permanent());
        assert!(ResolutionFailure::AccessRestricted.is_permanent());
        assert!(!ResolutionFailure::Cancelled.is_permanent());
        assert!(!ResolutionFailure::Exhausted {
            last_error: "boom".into()
        }
        .is_permanent());
    }

    #[test]
    fn failure_serializes_with_kind_tag() {
        let json = serde_json::to_string(&ResolutionFailure::Exhausted {
            last_error: "HTTP Error 503".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"kind":"exhausted","detail":{"last_error":"HTTP Error 503"}}"#);
    }
}
