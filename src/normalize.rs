//! Filename normalization for noisy track names.
//!
//! Downloaded tracks tend to arrive with decoration that has nothing to do
//! with the song: "(Official Video)" suffixes, "[2020]" markers, stray
//! punctuation from whatever site produced the file. This module strips that
//! noise from the file *stem* (never the extension) and, when the cleaned
//! name follows the common "Artist - Title" convention, recovers a
//! [`TrackIdentity`] from it.
//!
//! Cleaning is a fixpoint: the rule list is applied repeatedly until the
//! name stops changing, so layered noise like `"A - B (Live) [1999]"` fully
//! unwraps in a single `normalize` call and a second call is a no-op.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::enrichment::domain::TrackIdentity;

/// Noise patterns stripped from the stem, in priority order.
///
/// Each pattern only ever matches at the end of the name; mid-name text is
/// left alone apart from the punctuation sweep below.
static NOISE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\s*\([^()]*\)\s*$",   // trailing parenthesized annotation
        r"(?i)\s*\[[^\[\]]*\]\s*$", // trailing bracketed annotation
        r"(?i)\s*-\s*Official.*$",
        r"(?i)\s*-\s*Radio Edit.*$",
        r"(?i)\s*-\s*Extended.*$",
        r"(?i)\s*-\s*Remix.*$",
        r"\s*\d{4}\s*$", // trailing release year
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static noise pattern"))
    .collect()
});

/// Characters that never belong in a clean track filename.
static PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\[\]{}_•“”"*?<>|=]+"#).expect("static punctuation pattern"));

/// Runs of whitespace collapsed to a single space.
static MULTI_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s{2,}").expect("static whitespace pattern"));

/// Result of normalizing one filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// Cleaned filename, extension preserved. Equal to the input when there
    /// was nothing to strip.
    pub file_name: String,
    /// Artist/title split recovered from the cleaned stem, when the stem
    /// contains exactly one `" - "` separator. Both absent otherwise.
    pub identity: TrackIdentity,
}

/// Normalize a raw filename.
///
/// The returned name is never empty: a rule that would erase the entire stem
/// is skipped and the pre-rule name kept.
pub fn normalize(file_name: &str) -> Normalized {
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    let clean = clean_stem(stem);
    let identity = split_identity(&clean);

    let file_name = if ext.is_empty() {
        clean
    } else {
        format!("{clean}.{ext}")
    };

    Normalized {
        file_name,
        identity,
    }
}

/// Strip noise from a file stem, keeping at least something of the name.
fn clean_stem(stem: &str) -> String {
    let mut name = stem.trim().to_string();
    if name.is_empty() {
        return stem.to_string();
    }

    loop {
        let before = name.clone();

        for pattern in NOISE_PATTERNS.iter() {
            let stripped = pattern.replace(&name, "").trim().to_string();
            if !stripped.is_empty() {
                name = stripped;
            }
        }

        let swept = PUNCTUATION.replace_all(&name, "");
        let swept = MULTI_SPACE.replace_all(&swept, " ");
        let swept = swept.trim_matches([' ', '"', '\'', '.']).to_string();
        if !swept.is_empty() {
            name = swept;
        }

        if name == before {
            break;
        }
    }

    name
}

/// Split a cleaned stem into artist/title on a single `" - "` separator.
///
/// Zero or multiple separators are ambiguous and yield an absent identity;
/// the caller falls back to the file's embedded tags.
fn split_identity(stem: &str) -> TrackIdentity {
    let pieces: Vec<&str> = stem.split(" - ").collect();
    if pieces.len() != 2 {
        return TrackIdentity::default();
    }

    TrackIdentity {
        artist: non_empty(pieces[0]),
        title: non_empty(pieces[1]),
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_layered_noise() {
        let result = normalize("Artist - Title (Official Video) [2020].mp3");
        assert_eq!(result.file_name, "Artist - Title.mp3");
        assert_eq!(result.identity.artist.as_deref(), Some("Artist"));
        assert_eq!(result.identity.title.as_deref(), Some("Title"));
    }

    #[test]
    fn test_strips_release_markers() {
        assert_eq!(
            normalize("Band - Song - Radio Edit.mp3").file_name,
            "Band - Song.mp3"
        );
        assert_eq!(
            normalize("Band - Song - OFFICIAL AUDIO.mp3").file_name,
            "Band - Song.mp3"
        );
    }

    #[test]
    fn test_strips_trailing_year() {
        assert_eq!(normalize("Band - Song 1999.mp3").file_name, "Band - Song.mp3");
    }

    #[test]
    fn test_keeps_clean_names_unchanged() {
        let result = normalize("Queen - Bohemian Rhapsody.mp3");
        assert_eq!(result.file_name, "Queen - Bohemian Rhapsody.mp3");
        assert_eq!(result.identity.artist.as_deref(), Some("Queen"));
    }

    #[test]
    fn test_never_erases_whole_name() {
        // A bare year is the whole stem; the year rule must be skipped.
        assert_eq!(normalize("2020.mp3").file_name, "2020.mp3");
        // Same for a stem that is one big annotation.
        assert_eq!(normalize("(Live).mp3").file_name, "(Live).mp3");
    }

    #[test]
    fn test_punctuation_sweep() {
        assert_eq!(
            normalize("Artist - \"Title\"?.mp3").file_name,
            "Artist - Title.mp3"
        );
    }

    #[test]
    fn test_no_separator_means_no_identity() {
        let result = normalize("JustATitle.mp3");
        assert!(result.identity.artist.is_none());
        assert!(result.identity.title.is_none());
    }

    #[test]
    fn test_multiple_separators_are_ambiguous() {
        let result = normalize("A - B - C.mp3");
        assert!(result.identity.artist.is_none());
        assert!(result.identity.title.is_none());
    }

    #[test]
    fn test_empty_artist_part_is_absent() {
        let result = normalize(" - Title.mp3");
        assert!(result.identity.artist.is_none());
        assert_eq!(result.identity.title.as_deref(), Some("Title"));
    }

    #[test]
    fn test_extension_is_untouched() {
        assert_eq!(normalize("Song [HQ].FLAC").file_name, "Song.FLAC");
    }

    #[test]
    fn test_idempotent_on_example() {
        let first = normalize("Artist - Title (Official Video) [2020].mp3");
        let second = normalize(&first.file_name);
        assert_eq!(first, second);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn raw_name() -> impl Strategy<Value = String> {
        prop::string::string_regex("[a-zA-Z0-9 ()\\[\\]\"'._-]{1,60}")
            .unwrap()
            .prop_filter("non-empty stem", |s| !s.trim().is_empty())
    }

    proptest! {
        /// The cleaned stem is never empty.
        #[test]
        fn normalize_never_returns_empty(name in raw_name()) {
            let result = normalize(&format!("{name}.mp3"));
            let stem = Path::new(&result.file_name)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("");
            prop_assert!(!stem.trim().is_empty(), "empty stem from {:?}", name);
        }

        /// A second pass over an already-clean name changes nothing.
        #[test]
        fn normalize_is_idempotent(name in raw_name()) {
            let first = normalize(&format!("{name}.mp3"));
            let second = normalize(&first.file_name);
            prop_assert_eq!(first, second);
        }
    }
}
