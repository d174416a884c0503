//! Adapter layer: Convert iTunes DTOs to domain models

use super::dto;
use crate::enrichment::domain::{TextFacets, year_from_release_date};

/// Convert an iTunes search result into text facets. iTunes is the only
/// source in the default chains that knows the genre.
pub fn to_text_facets(result: &dto::SearchResult) -> TextFacets {
    TextFacets {
        artist: result.artist_name.clone(),
        title: result.track_name.clone(),
        album: result.collection_name.clone(),
        year: result
            .release_date
            .as_deref()
            .and_then(year_from_release_date),
        genre: result.primary_genre_name.clone(),
    }
}

/// The artwork URL at a usable size. iTunes only hands out a 100x100
/// thumbnail; the CDN serves a 600x600 rendition under the same path.
pub fn artwork_url(result: &dto::SearchResult) -> Option<String> {
    result
        .artwork_url_100
        .as_ref()
        .map(|url| url.replace("100x100bb", "600x600bb"))
}
