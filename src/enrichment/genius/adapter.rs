//! Adapter layer: Convert Genius DTOs to domain models
//!
//! This is the ONLY place where Genius types are converted to domain types,
//! plus the lyrics page scraper: Genius has no lyrics API endpoint, so the
//! text is pulled out of the song page HTML.

use once_cell::sync::Lazy;
use regex::Regex;

use super::dto;
use crate::enrichment::domain::{TextFacets, year_from_release_date};

/// Convert a Genius song result into the text facets Genius is responsible
/// for: artist, title and year. Album and genre always stay absent.
pub fn to_text_facets(song: &dto::SongResult) -> TextFacets {
    TextFacets {
        artist: song.primary_artist.as_ref().map(|a| a.name.clone()),
        title: song.title.clone(),
        year: song
            .release_date
            .as_deref()
            .and_then(year_from_release_date),
        ..Default::default()
    }
}

/// Current Genius markup: lyric text lives in `data-lyrics-container` divs.
static LYRICS_CONTAINER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<div class="Lyrics__Container[^"]*"[^>]*>(.*?)</div>"#)
        .expect("static lyrics pattern")
});

/// Fallback for the other markup variant Genius serves.
static LYRICS_CONTAINER_DATA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<div[^>]*data-lyrics-container="true"[^>]*>(.*?)</div>"#)
        .expect("static lyrics pattern")
});

static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("static br pattern"));

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("static tag pattern"));

/// Extract plain lyrics text from a Genius song page.
///
/// Returns `None` when no lyric container is present (removed songs,
/// instrumentals, layout changes).
pub fn extract_lyrics(html: &str) -> Option<String> {
    let mut parts: Vec<String> = LYRICS_CONTAINER
        .captures_iter(html)
        .filter_map(|c| c.get(1))
        .map(|m| strip_markup(m.as_str()))
        .filter(|s| !s.is_empty())
        .collect();

    if parts.is_empty() {
        parts = LYRICS_CONTAINER_DATA
            .captures_iter(html)
            .filter_map(|c| c.get(1))
            .map(|m| strip_markup(m.as_str()))
            .filter(|s| !s.is_empty())
            .collect();
    }

    if parts.is_empty() {
        return None;
    }

    let lyrics = parts.join("\n").trim().to_string();
    if lyrics.is_empty() { None } else { Some(lyrics) }
}

/// Reduce a lyric container to plain text: line breaks kept, tags dropped,
/// common entities decoded.
fn strip_markup(fragment: &str) -> String {
    let with_breaks = LINE_BREAK.replace_all(fragment, "\n");
    let no_tags = HTML_TAG.replace_all(&with_breaks, "");
    no_tags
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .trim()
        .to_string()
}
