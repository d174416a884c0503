//! Internal domain models for metadata resolution.
//!
//! These types are OUR types - they don't change when external APIs change.
//! All provider responses get converted into these via the per-provider
//! adapters. Absence is always `None`; adapters never hand back an empty
//! string where a field is simply missing.

use crate::enrichment::artwork::CoverImage;

/// The key a track is resolved by.
///
/// At least one of artist/title must be present for any provider lookup to
/// be attempted; callers skip resolution entirely otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackIdentity {
    pub artist: Option<String>,
    pub title: Option<String>,
}

impl TrackIdentity {
    /// Build an identity from known artist and title.
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            artist: Some(artist.into()),
            title: Some(title.into()),
        }
    }

    /// Whether there is enough here to query a provider with.
    pub fn is_resolvable(&self) -> bool {
        self.artist.as_deref().is_some_and(|s| !s.trim().is_empty())
            || self.title.as_deref().is_some_and(|s| !s.trim().is_empty())
    }

    /// Free-text query string, `"artist title"`, for search endpoints.
    pub fn query(&self) -> String {
        let mut parts = Vec::new();
        if let Some(artist) = self.artist.as_deref()
            && !artist.trim().is_empty()
        {
            parts.push(artist.trim());
        }
        if let Some(title) = self.title.as_deref()
            && !title.trim().is_empty()
        {
            parts.push(title.trim());
        }
        parts.join(" ")
    }
}

/// Text facets a single provider returned for a lookup.
///
/// Every field is optional: a provider only ever fills the facets it is
/// responsible for, everything else stays absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextFacets {
    pub artist: Option<String>,
    pub title: Option<String>,
    pub album: Option<String>,
    pub year: Option<u32>,
    pub genre: Option<String>,
}

impl TextFacets {
    /// Whether the provider returned anything at all.
    pub fn is_empty(&self) -> bool {
        self.artist.is_none()
            && self.title.is_none()
            && self.album.is_none()
            && self.year.is_none()
            && self.genre.is_none()
    }
}

/// Consolidated record built up across the provider chains.
///
/// Facets are first-success-wins: once set by a higher-priority provider
/// they are never replaced by a lower-priority one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataRecord {
    pub artist: Option<String>,
    pub title: Option<String>,
    pub album: Option<String>,
    pub year: Option<u32>,
    pub genre: Option<String>,
    pub cover: Option<CoverImage>,
    pub lyrics: Option<String>,
}

impl MetadataRecord {
    /// Adopt text facets that are not set yet. Already-resolved facets and
    /// empty-string values are ignored.
    pub fn adopt_text(&mut self, facets: TextFacets) {
        if self.artist.is_none() {
            self.artist = facets.artist.filter(|s| !s.trim().is_empty());
        }
        if self.title.is_none() {
            self.title = facets.title.filter(|s| !s.trim().is_empty());
        }
        if self.album.is_none() {
            self.album = facets.album.filter(|s| !s.trim().is_empty());
        }
        if self.year.is_none() {
            self.year = facets.year;
        }
        if self.genre.is_none() {
            self.genre = facets.genre.filter(|s| !s.trim().is_empty());
        }
    }

    /// All five text facets resolved - no point consulting further text
    /// providers.
    pub fn text_complete(&self) -> bool {
        self.artist.is_some()
            && self.title.is_some()
            && self.album.is_some()
            && self.year.is_some()
            && self.genre.is_some()
    }

    /// Nothing was resolved at all.
    pub fn is_empty(&self) -> bool {
        self.artist.is_none()
            && self.title.is_none()
            && self.album.is_none()
            && self.year.is_none()
            && self.genre.is_none()
            && self.cover.is_none()
            && self.lyrics.is_none()
    }
}

/// Derive the year facet from a provider release-date string.
///
/// The year is the first four characters when the string is long enough;
/// a prefix that is not a number yields no year (the tag slot is numeric).
pub fn year_from_release_date(date: &str) -> Option<u32> {
    if date.chars().count() < 4 {
        return None;
    }
    date.chars().take(4).collect::<String>().parse().ok()
}

/// Errors a provider lookup can produce.
///
/// None of these ever aborts the pipeline: the resolver falls through to
/// the next provider in the chain on any of them.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LookupError {
    #[error("no match found")]
    NotFound,

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("provider returned HTTP {0}")]
    Http(u16),
}

impl LookupError {
    /// Transient failures (timeouts, bad responses) are logged louder than
    /// a plain miss, but both fall through the chain the same way.
    pub fn is_transient(&self) -> bool {
        !matches!(self, LookupError::NotFound)
    }
}
