//! Trait definitions for external metadata providers.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the real client implementations, while tests
//! can substitute mock implementations.
//!
//! Each trait covers one facet group: a provider implements every trait it
//! can answer for (iTunes serves both text and cover lookups), and the
//! resolver only ever talks to these traits.

use async_trait::async_trait;

use crate::enrichment::artwork::CoverImage;
use crate::enrichment::domain::{LookupError, TextFacets, TrackIdentity};

/// Text-metadata lookup: artist, title, album, year, genre.
#[async_trait]
pub trait TextMetadataApi: Send + Sync {
    /// Provider name for logs and reports.
    fn source(&self) -> &'static str;

    /// Look up the text facets this provider is responsible for.
    async fn lookup(&self, identity: &TrackIdentity) -> Result<TextFacets, LookupError>;
}

/// Cover-art lookup. Implementations validate the downloaded bytes against
/// the JPEG/PNG whitelist before returning success.
#[async_trait]
pub trait CoverArtApi: Send + Sync {
    /// Provider name for logs and reports.
    fn source(&self) -> &'static str;

    /// Fetch the front cover for the identified track.
    async fn front_cover(&self, identity: &TrackIdentity) -> Result<CoverImage, LookupError>;
}

/// Lyrics lookup.
#[async_trait]
pub trait LyricsApi: Send + Sync {
    /// Provider name for logs and reports.
    fn source(&self) -> &'static str;

    /// Fetch the unsynchronized lyrics text for the identified track.
    async fn lyrics(&self, identity: &TrackIdentity) -> Result<String, LookupError>;
}

// Implement traits for real clients

#[async_trait]
impl TextMetadataApi for super::genius::GeniusClient {
    fn source(&self) -> &'static str {
        "genius"
    }

    async fn lookup(&self, identity: &TrackIdentity) -> Result<TextFacets, LookupError> {
        self.text_facets(identity).await
    }
}

#[async_trait]
impl CoverArtApi for super::genius::GeniusClient {
    fn source(&self) -> &'static str {
        "genius"
    }

    async fn front_cover(&self, identity: &TrackIdentity) -> Result<CoverImage, LookupError> {
        self.front_cover(identity).await
    }
}

#[async_trait]
impl LyricsApi for super::genius::GeniusClient {
    fn source(&self) -> &'static str {
        "genius"
    }

    async fn lyrics(&self, identity: &TrackIdentity) -> Result<String, LookupError> {
        self.fetch_lyrics(identity).await
    }
}

#[async_trait]
impl TextMetadataApi for super::itunes::ItunesClient {
    fn source(&self) -> &'static str {
        "itunes"
    }

    async fn lookup(&self, identity: &TrackIdentity) -> Result<TextFacets, LookupError> {
        self.text_facets(identity).await
    }
}

#[async_trait]
impl CoverArtApi for super::itunes::ItunesClient {
    fn source(&self) -> &'static str {
        "itunes"
    }

    async fn front_cover(&self, identity: &TrackIdentity) -> Result<CoverImage, LookupError> {
        self.front_cover(identity).await
    }
}

#[async_trait]
impl TextMetadataApi for super::deezer::DeezerClient {
    fn source(&self) -> &'static str {
        "deezer"
    }

    async fn lookup(&self, identity: &TrackIdentity) -> Result<TextFacets, LookupError> {
        self.text_facets(identity).await
    }
}

#[async_trait]
impl CoverArtApi for super::deezer::DeezerClient {
    fn source(&self) -> &'static str {
        "deezer"
    }

    async fn front_cover(&self, identity: &TrackIdentity) -> Result<CoverImage, LookupError> {
        self.front_cover(identity).await
    }
}

#[async_trait]
impl LyricsApi for super::lyricsovh::LyricsOvhClient {
    fn source(&self) -> &'static str {
        "lyrics.ovh"
    }

    async fn lyrics(&self, identity: &TrackIdentity) -> Result<String, LookupError> {
        self.fetch_lyrics(identity).await
    }
}
