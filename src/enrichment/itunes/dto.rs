//! iTunes Search API Data Transfer Objects
//!
//! These types match EXACTLY what the iTunes Search API returns.
//! DO NOT add fields that aren't in the API response.
//! DO NOT use these types outside the itunes module - convert to domain types.
//!
//! API Reference: https://performance-partners.apple.com/search-api

use serde::{Deserialize, Serialize};

/// Search response: `{"resultCount": N, "results": [...]}`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub result_count: u32,
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// One song result. iTunes returns dozens of fields; we keep the ones the
/// adapters consume.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Track title
    pub track_name: Option<String>,
    /// Artist name
    pub artist_name: Option<String>,
    /// Album title
    pub collection_name: Option<String>,
    /// 100x100 artwork thumbnail URL (upscaled by the adapter)
    pub artwork_url_100: Option<String>,
    /// ISO-8601 release timestamp
    pub release_date: Option<String>,
    /// Primary genre label
    pub primary_genre_name: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================
