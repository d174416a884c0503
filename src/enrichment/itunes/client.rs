//! iTunes Search HTTP client
//!
//! No API key required. The search endpoint is a plain GET with the query
//! in the `term` parameter.
//!
//! API docs: https://performance-partners.apple.com/search-api

use std::time::Duration;

use super::{adapter, dto};
use crate::enrichment::artwork::{self, CoverImage};
use crate::enrichment::domain::{LookupError, TextFacets, TrackIdentity};

/// iTunes Search API client
pub struct ItunesClient {
    http_client: reqwest::Client,
    base_url: String,
}

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

impl ItunesClient {
    /// Create a new client with the given request timeout.
    pub fn new(timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            base_url: "https://itunes.apple.com".to_string(),
        }
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Search for a song and return the first (highest-relevance) result.
    pub async fn search_song(
        &self,
        identity: &TrackIdentity,
    ) -> Result<dto::SearchResult, LookupError> {
        let url = format!(
            "{}/search?term={}&entity=song&limit=1",
            self.base_url,
            urlencoding::encode(&identity.query())
        );

        let response = self
            .http_client
            .get(&url)
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

        body.results.into_iter().next().ok_or(LookupError::NotFound)
    }

    /// Resolve the text facets iTunes covers (album, year, genre, plus
    /// artist/title when an earlier source left them unset).
    pub async fn text_facets(&self, identity: &TrackIdentity) -> Result<TextFacets, LookupError> {
        let result = self.search_song(identity).await?;
        let facets = adapter::to_text_facets(&result);
        if facets.is_empty() {
            return Err(LookupError::NotFound);
        }
        Ok(facets)
    }

    /// Fetch the album artwork for the best match.
    pub async fn front_cover(&self, identity: &TrackIdentity) -> Result<CoverImage, LookupError> {
        let result = self.search_song(identity).await?;
        let art_url = adapter::artwork_url(&result).ok_or(LookupError::NotFound)?;
        artwork::download_image(&self.http_client, &art_url).await
    }
}
