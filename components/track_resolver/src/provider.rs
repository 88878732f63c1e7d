use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Marker the provider puts in its error text when it throttles us
pub const RATE_LIMIT_MARKER: &str = "429";

/// Marker for age-gated or login-walled results
pub const ACCESS_RESTRICTED_MARKER: &str = "Sign in";

const UNKNOWN_TITLE: &str = "Unknown Title";

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Required dependency not found: {0}")]
    DependencyNotFound(&'static str),

    /// Raw error text reported by the provider
    #[error("{0}")]
    Failed(String),

    #[error("failed to parse search response: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// How the resolver should react to a provider error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    RateLimited,
    AccessRestricted,
    Transient,
}

impl ProviderError {
    pub fn class(&self) -> ErrorClass {
        let text = self.to_string();
        if text.contains(RATE_LIMIT_MARKER) {
            ErrorClass::RateLimited
        } else if text.contains(ACCESS_RESTRICTED_MARKER) {
            ErrorClass::AccessRestricted
        } else {
            ErrorClass::Transient
        }
    }
}

/// One search result as reported by the provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub webpage_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl SearchHit {
    pub fn new(webpage_url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            webpage_url: Some(webpage_url.into()),
            url: None,
            title: Some(title.into()),
        }
    }

    /// Canonical page URL, falling back to the direct media URL
    pub fn canonical_url(&self) -> Option<&str> {
        self.webpage_url
            .as_deref()
            .or(self.url.as_deref())
            .filter(|url| !url.is_empty())
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNKNOWN_TITLE)
    }
}

/// A search answer: either a result list or a single bare result
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub entries: Option<Vec<SearchHit>>,
    #[serde(flatten)]
    pub bare: SearchHit,
}

impl SearchResponse {
    pub fn list(entries: Vec<SearchHit>) -> Self {
        Self {
            entries: Some(entries),
            bare: SearchHit::default(),
        }
    }

    pub fn bare(hit: SearchHit) -> Self {
        Self {
            entries: None,
            bare: hit,
        }
    }

    /// First entry of a result list, or the bare result
    pub fn candidate(&self) -> Option<&SearchHit> {
        match &self.entries {
            Some(entries) => entries.first(),
            None => Some(&self.bare),
        }
    }
}

#[async_trait]
pub trait SearchProvider {
    /// Run a single-result search with `query` used verbatim
    async fn search(&self, query: &str) -> Result<SearchResponse, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ERROR: [youtube] abc: HTTP Error 429: Too Many Requests", ErrorClass::RateLimited)]
    #[case("ERROR: [youtube] abc: Sign in to confirm your age", ErrorClass::AccessRestricted)]
    #[case("ERROR: Unable to download webpage: timed out", ErrorClass::Transient)]
    fn errors_are_classified_by_marker(#[case] text: &str, #[case] expected: ErrorClass) {
        assert_eq!(ProviderError::Failed(text.to_string()).class(), expected);
    }

    #[test]
    fn playlist_response_uses_first_entry() {
        let json = r#"{
            "_type": "playlist",
            "title": "Song A - Artist X",
            "entries": [
                {"title": "Song A (Official)", "webpage_url": "https://x/a", "url": "https://cdn/a"},
                {"title": "Other", "webpage_url": "https://x/other"}
            ]
        }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();

        let hit = response.candidate().unwrap();
        assert_eq!(hit.canonical_url(), Some("https://x/a"));
        assert_eq!(hit.display_title(), "Song A (Official)");
    }

    #[test]
    fn bare_response_is_its_own_candidate() {
        let json = r#"{"title": "Song B", "url": "https://cdn/b"}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();

        let hit = response.candidate().unwrap();
        assert_eq!(hit.canonical_url(), Some("https://cdn/b"));
    }

    #[test]
    fn empty_entries_have_no_candidate() {
        let response: SearchResponse = serde_json::from_str(r#"{"entries": []}"#).unwrap();
        assert!(response.candidate().is_none());
    }

    #[test]
    fn missing_title_gets_placeholder() {
        let hit = SearchHit {
            webpage_url: Some("https://x/a".into()),
            ..SearchHit::default()
        };
        assert_eq!(hit.display_title(), "Unknown Title");
    }
}
