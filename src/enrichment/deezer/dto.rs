//! Deezer API Data Transfer Objects
//!
//! These types match EXACTLY what the Deezer search API returns.
//! DO NOT add fields that aren't in the API response.
//! DO NOT use these types outside the deezer module - convert to domain types.
//!
//! API Reference: https://developers.deezer.com/api/search

use serde::{Deserialize, Serialize};

/// Search response: `{"data": [...], "total": N}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<TrackResult>,
}

/// One track result.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackResult {
    /// Track title
    pub title: Option<String>,
    /// Credited artist
    pub artist: Option<ArtistInfo>,
    /// Album the track appears on
    pub album: Option<AlbumInfo>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistInfo {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlbumInfo {
    /// Album title
    pub title: Option<String>,
    /// 500x500 cover URL
    pub cover_big: Option<String>,
    /// 1000x1000 cover URL
    pub cover_xl: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================
