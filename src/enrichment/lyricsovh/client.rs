//! Lyrics.ovh HTTP client
//!
//! Fallback lyrics source. The lookup is keyed by artist AND title in the
//! URL path, so it is only consulted when both are known.
//!
//! API docs: https://lyricsovh.docs.apiary.io

use std::time::Duration;

use super::dto;
use crate::enrichment::domain::{LookupError, TrackIdentity};

/// Lyrics.ovh API client
pub struct LyricsOvhClient {
    http_client: reqwest::Client,
    base_url: String,
}

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

impl LyricsOvhClient {
    /// Create a new client with the given request timeout.
    pub fn new(timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            base_url: "https://api.lyrics.ovh".to_string(),
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

    /// Fetch lyrics for an artist/title pair.
    pub async fn fetch_lyrics(&self, identity: &TrackIdentity) -> Result<String, LookupError> {
        // The endpoint needs both path segments; a partial identity can
        // never match.
        let (Some(artist), Some(title)) = (identity.artist.as_deref(), identity.title.as_deref())
        else {
            return Err(LookupError::NotFound);
        };

        let url = format!(
            "{}/v1/{}/{}",
            self.base_url,
            urlencoding::encode(artist),
            urlencoding::encode(title)
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

        let body: dto::LyricsResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Parse(e.to_string()))?;

        let lyrics = body.lyrics.trim().to_string();
        if lyrics.is_empty() {
            return Err(LookupError::NotFound);
        }
        Ok(lyrics)
    }
}
