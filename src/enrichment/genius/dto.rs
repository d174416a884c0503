//! Genius API Data Transfer Objects
//!
//! These types match EXACTLY what the Genius search API returns.
//! DO NOT add fields that aren't in the API response.
//! DO NOT use these types outside the genius module - convert to domain types.
//!
//! API Reference: https://docs.genius.com (GET /search)

use serde::{Deserialize, Serialize};

/// Top-level search response: `{"response": {"hits": [...]}}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    pub response: SearchBody,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchBody {
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// One search hit wrapping the actual song result.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Hit {
    pub result: SongResult,
}

/// The song fields we consume. Genius returns far more; serde ignores the
/// rest.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SongResult {
    /// Song title
    pub title: Option<String>,
    /// Canonical song page URL (where the lyrics live)
    pub url: Option<String>,
    /// Release date (YYYY-MM-DD, sometimes partial)
    pub release_date: Option<String>,
    /// Primary credited artist
    pub primary_artist: Option<PrimaryArtist>,
    /// Song art image URL (used as a last-resort cover source)
    pub song_art_image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PrimaryArtist {
    pub name: String,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================
