//! Adapter layer: Convert Deezer DTOs to domain models

use super::dto;
use crate::enrichment::domain::TextFacets;

/// Convert a Deezer track result into text facets. Deezer knows artist,
/// title and album; year and genre always stay absent.
pub fn to_text_facets(track: &dto::TrackResult) -> TextFacets {
    TextFacets {
        artist: track.artist.as_ref().map(|a| a.name.clone()),
        title: track.title.clone(),
        album: track.album.as_ref().and_then(|a| a.title.clone()),
        ..Default::default()
    }
}

/// The best cover URL available, preferring the XL rendition.
pub fn cover_url(track: &dto::TrackResult) -> Option<String> {
    let album = track.album.as_ref()?;
    album.cover_xl.clone().or_else(|| album.cover_big.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_track(xl: Option<&str>, big: Option<&str>) -> dto::TrackResult {
        dto::TrackResult {
            title: Some("One More Time".to_string()),
            artist: Some(dto::ArtistInfo {
                name: "Daft Punk".to_string(),
            }),
            album: Some(dto::AlbumInfo {
                title: Some("Discovery".to_string()),
                cover_big: big.map(String::from),
                cover_xl: xl.map(String::from),
            }),
        }
    }

    #[test]
    fn test_text_facets() {
        let facets = to_text_facets(&make_track(None, None));
        assert_eq!(facets.artist.as_deref(), Some("Daft Punk"));
        assert_eq!(facets.title.as_deref(), Some("One More Time"));
        assert_eq!(facets.album.as_deref(), Some("Discovery"));
        assert!(facets.year.is_none());
        assert!(facets.genre.is_none());
    }

    #[test]
    fn test_cover_url_prefers_xl() {
        let track = make_track(Some("https://cdn/xl.jpg"), Some("https://cdn/big.jpg"));
        assert_eq!(cover_url(&track).as_deref(), Some("https://cdn/xl.jpg"));
    }

    #[test]
    fn test_cover_url_falls_back_to_big() {
        let track = make_track(None, Some("https://cdn/big.jpg"));
        assert_eq!(cover_url(&track).as_deref(), Some("https://cdn/big.jpg"));
    }

    #[test]
    fn test_cover_url_absent() {
        assert!(cover_url(&make_track(None, None)).is_none());
        let no_album = dto::TrackResult {
            title: None,
            artist: None,
            album: None,
        };
        assert!(cover_url(&no_album).is_none());
    }
}
