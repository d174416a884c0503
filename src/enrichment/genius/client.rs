//! Genius HTTP client
//!
//! Handles communication with the Genius API and song pages.
//! See: https://docs.genius.com
//!
//! Genius requires an OAuth bearer token for the API. The song page fetch
//! for lyrics is a plain HTML request.

use std::time::Duration;

use super::{adapter, dto};
use crate::enrichment::artwork::{self, CoverImage};
use crate::enrichment::domain::{LookupError, TextFacets, TrackIdentity};

/// Genius API client
pub struct GeniusClient {
    http_client: reqwest::Client,
    base_url: String,
    token: String,
}

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

impl GeniusClient {
    /// Create a new client with the given API token and request timeout.
    pub fn new(token: impl Into<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            base_url: "https://api.genius.com".to_string(),
            token: token.into(),
        }
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Search for a song and return the first (highest-relevance) hit.
    pub async fn search_song(
        &self,
        identity: &TrackIdentity,
    ) -> Result<dto::SongResult, LookupError> {
        let url = format!(
            "{}/search?q={}",
            self.base_url,
            urlencoding::encode(&identity.query())
        );

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound);
        }
        if !status.is_success() {
            return Err(LookupError::Http(status.as_u16()));
        }

        let body: dto::SearchResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Parse(e.to_string()))?;

        body.response
            .hits
            .into_iter()
            .next()
            .map(|hit| hit.result)
            .ok_or(LookupError::NotFound)
    }

    /// Resolve the text facets Genius covers (artist, title, year).
    pub async fn text_facets(
        &self,
        identity: &TrackIdentity,
    ) -> Result<TextFacets, LookupError> {
        let song = self.search_song(identity).await?;
        let facets = adapter::to_text_facets(&song);
        if facets.is_empty() {
            return Err(LookupError::NotFound);
        }
        Ok(facets)
    }

    /// Fetch lyrics by scraping the song page of the best search hit.
    pub async fn fetch_lyrics(&self, identity: &TrackIdentity) -> Result<String, LookupError> {
        let song = self.search_song(identity).await?;
        let page_url = song.url.ok_or(LookupError::NotFound)?;

        let response = self
            .http_client
            .get(&page_url)
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Http(status.as_u16()));
        }

        let html = response
            .text()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        adapter::extract_lyrics(&html).ok_or(LookupError::NotFound)
    }

    /// Fetch the song art image. Lowest-priority cover source: only used
    /// when the dedicated artwork providers come up empty.
    pub async fn front_cover(&self, identity: &TrackIdentity) -> Result<CoverImage, LookupError> {
        let song = self.search_song(identity).await?;
        let art_url = song.song_art_image_url.ok_or(LookupError::NotFound)?;
        artwork::download_image(&self.http_client, &art_url).await
    }
}
