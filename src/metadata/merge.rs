//! Tag merging: applies a consolidated metadata record onto a file's
//! existing tag set.
//!
//! The merge is a pure function over [`TagSet`] - persistence stays with
//! the caller. The default policy fills missing frames and never overwrites
//! a populated one, so good existing tags survive a bad provider match.
//! Cover and lyrics are singleton slots: an occupied slot means skip and
//! report, never a second entry.

use crate::config::MergeConfig;
use crate::enrichment::domain::MetadataRecord;
use crate::metadata::TagSet;

/// What to do with one field when the record has a candidate value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldPolicy {
    /// Write only when the existing frame is absent (or empty, depending on
    /// [`MergePolicy::treat_empty_as_missing`]).
    #[default]
    FillMissing,
    /// Always write the candidate value.
    Overwrite,
    /// Never touch this field.
    Preserve,
}

/// Per-field merge policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergePolicy {
    pub title: FieldPolicy,
    pub artist: FieldPolicy,
    pub album: FieldPolicy,
    pub year: FieldPolicy,
    pub genre: FieldPolicy,
    pub cover: FieldPolicy,
    pub lyrics: FieldPolicy,
    /// Whether an empty-string frame counts as missing and gets filled.
    /// Legacy rips carry `""` where a tagger meant "unknown"; with this
    /// off they are left alone under never-overwrite-present.
    pub treat_empty_as_missing: bool,
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self {
            title: FieldPolicy::FillMissing,
            artist: FieldPolicy::FillMissing,
            album: FieldPolicy::FillMissing,
            year: FieldPolicy::FillMissing,
            genre: FieldPolicy::FillMissing,
            cover: FieldPolicy::FillMissing,
            lyrics: FieldPolicy::FillMissing,
            treat_empty_as_missing: true,
        }
    }
}

impl MergePolicy {
    pub fn from_config(config: &MergeConfig) -> Self {
        Self {
            treat_empty_as_missing: config.fill_empty_frames,
            ..Default::default()
        }
    }

    /// Every field overwritten - the `--overwrite` escape hatch.
    pub fn overwrite_all() -> Self {
        Self {
            title: FieldPolicy::Overwrite,
            artist: FieldPolicy::Overwrite,
            album: FieldPolicy::Overwrite,
            year: FieldPolicy::Overwrite,
            genre: FieldPolicy::Overwrite,
            cover: FieldPolicy::Overwrite,
            lyrics: FieldPolicy::Overwrite,
            treat_empty_as_missing: true,
        }
    }
}

/// What a merge did, for report accounting.
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    /// Any frame added or modified.
    pub changed: bool,
    /// Text/year frames that were written.
    pub fields_updated: Vec<&'static str>,
    /// Text/year frames that had a candidate but were kept as-is.
    pub fields_skipped: Vec<&'static str>,
    /// A cover was embedded.
    pub cover_added: bool,
    /// Lyrics were embedded.
    pub lyrics_added: bool,
    /// The record carried a cover but the singleton slot was occupied.
    pub cover_already_present: bool,
    /// The record carried lyrics but the singleton slot was occupied.
    pub lyrics_already_present: bool,
}

/// Merge a resolved record into an existing tag set under the given policy.
///
/// Returns the updated tag set and what happened. Idempotent: applying the
/// same record to the result changes nothing.
pub fn merge(
    record: &MetadataRecord,
    existing: &TagSet,
    policy: &MergePolicy,
) -> (TagSet, MergeOutcome) {
    let mut tags = existing.clone();
    let mut outcome = MergeOutcome::default();

    merge_text(
        "title",
        record.title.as_deref(),
        &mut tags.title,
        policy.title,
        policy.treat_empty_as_missing,
        &mut outcome,
    );
    merge_text(
        "artist",
        record.artist.as_deref(),
        &mut tags.artist,
        policy.artist,
        policy.treat_empty_as_missing,
        &mut outcome,
    );
    merge_text(
        "album",
        record.album.as_deref(),
        &mut tags.album,
        policy.album,
        policy.treat_empty_as_missing,
        &mut outcome,
    );
    merge_year(record.year, &mut tags.year, policy.year, &mut outcome);
    merge_text(
        "genre",
        record.genre.as_deref(),
        &mut tags.genre,
        policy.genre,
        policy.treat_empty_as_missing,
        &mut outcome,
    );

    merge_cover(record, &mut tags, policy, &mut outcome);
    merge_lyrics(record, &mut tags, policy, &mut outcome);

    outcome.changed =
        !outcome.fields_updated.is_empty() || outcome.cover_added || outcome.lyrics_added;

    (tags, outcome)
}

fn merge_text(
    field: &'static str,
    candidate: Option<&str>,
    slot: &mut Option<String>,
    policy: FieldPolicy,
    treat_empty_as_missing: bool,
    outcome: &mut MergeOutcome,
) {
    let Some(candidate) = candidate else { return };
    // Present-but-empty candidates never overwrite anything.
    if candidate.trim().is_empty() {
        return;
    }

    let occupied = slot
        .as_deref()
        .is_some_and(|s| !treat_empty_as_missing || !s.trim().is_empty());

    match policy {
        FieldPolicy::Preserve => outcome.fields_skipped.push(field),
        FieldPolicy::FillMissing if occupied => outcome.fields_skipped.push(field),
        _ => {
            if slot.as_deref() != Some(candidate) {
                *slot = Some(candidate.to_string());
                outcome.fields_updated.push(field);
            }
        }
    }
}

fn merge_year(
    candidate: Option<u32>,
    slot: &mut Option<u32>,
    policy: FieldPolicy,
    outcome: &mut MergeOutcome,
) {
    let Some(candidate) = candidate else { return };

    match policy {
        FieldPolicy::Preserve => outcome.fields_skipped.push("year"),
        FieldPolicy::FillMissing if slot.is_some() => outcome.fields_skipped.push("year"),
        _ => {
            if *slot != Some(candidate) {
                *slot = Some(candidate);
                outcome.fields_updated.push("year");
            }
        }
    }
}

fn merge_cover(
    record: &MetadataRecord,
    tags: &mut TagSet,
    policy: &MergePolicy,
    outcome: &mut MergeOutcome,
) {
    let Some(ref candidate) = record.cover else {
        return;
    };

    match policy.cover {
        FieldPolicy::Preserve => {}
        FieldPolicy::FillMissing if tags.cover.is_some() => {
            outcome.cover_already_present = true;
        }
        _ => {
            if tags.cover.as_ref() != Some(candidate) {
                tags.cover = Some(candidate.clone());
                outcome.cover_added = true;
            }
        }
    }
}

fn merge_lyrics(
    record: &MetadataRecord,
    tags: &mut TagSet,
    policy: &MergePolicy,
    outcome: &mut MergeOutcome,
) {
    let Some(ref candidate) = record.lyrics else {
        return;
    };
    if candidate.trim().is_empty() {
        return;
    }

    let occupied = tags
        .lyrics
        .as_deref()
        .is_some_and(|s| !policy.treat_empty_as_missing || !s.trim().is_empty());

    match policy.lyrics {
        FieldPolicy::Preserve => {}
        FieldPolicy::FillMissing if occupied => {
            outcome.lyrics_already_present = true;
        }
        _ => {
            if tags.lyrics.as_deref() != Some(candidate.as_str()) {
                tags.lyrics = Some(candidate.clone());
                outcome.lyrics_added = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::artwork::{CoverImage, ImageFormat};

    fn sample_cover() -> CoverImage {
        CoverImage::new(vec![0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0], ImageFormat::Jpeg)
    }

    fn full_record() -> MetadataRecord {
        MetadataRecord {
            title: Some("Bohemian Rhapsody".to_string()),
            artist: Some("Queen".to_string()),
            album: Some("A Night at the Opera".to_string()),
            year: Some(1975),
            genre: Some("Rock".to_string()),
            cover: Some(sample_cover()),
            lyrics: Some("Is this the real life?".to_string()),
        }
    }

    #[test]
    fn test_fills_missing_fields() {
        let (tags, outcome) = merge(&full_record(), &TagSet::default(), &MergePolicy::default());

        assert!(outcome.changed);
        assert_eq!(tags.title.as_deref(), Some("Bohemian Rhapsody"));
        assert_eq!(tags.year, Some(1975));
        assert!(tags.cover.is_some());
        assert!(outcome.cover_added);
        assert!(outcome.lyrics_added);
        assert_eq!(
            outcome.fields_updated,
            vec!["title", "artist", "album", "year", "genre"]
        );
    }

    #[test]
    fn test_never_overwrites_populated_frames() {
        let existing = TagSet {
            title: Some("My Title".to_string()),
            artist: Some("My Artist".to_string()),
            ..Default::default()
        };

        let (tags, outcome) = merge(&full_record(), &existing, &MergePolicy::default());

        assert_eq!(tags.title.as_deref(), Some("My Title"));
        assert_eq!(tags.artist.as_deref(), Some("My Artist"));
        // The rest still got filled.
        assert_eq!(tags.album.as_deref(), Some("A Night at the Opera"));
        assert!(outcome.fields_skipped.contains(&"title"));
        assert!(outcome.fields_skipped.contains(&"artist"));
    }

    #[test]
    fn test_cover_added_alongside_existing_tags() {
        // Existing non-empty artist/title, no cover; record has only a cover.
        let existing = TagSet {
            title: Some("My Title".to_string()),
            artist: Some("My Artist".to_string()),
            ..Default::default()
        };
        let record = MetadataRecord {
            cover: Some(sample_cover()),
            ..Default::default()
        };

        let (tags, outcome) = merge(&record, &existing, &MergePolicy::default());

        assert!(outcome.changed);
        assert!(outcome.cover_added);
        assert!(outcome.fields_updated.is_empty());
        assert_eq!(tags.title.as_deref(), Some("My Title"));
    }

    #[test]
    fn test_singleton_slots_never_duplicate() {
        let existing = TagSet {
            cover: Some(CoverImage::new(vec![0x89, 0x50, 0x4E, 0x47], ImageFormat::Png)),
            lyrics: Some("old lyrics".to_string()),
            ..Default::default()
        };

        let (tags, outcome) = merge(&full_record(), &existing, &MergePolicy::default());

        // The existing entries survive untouched.
        assert_eq!(tags.cover, existing.cover);
        assert_eq!(tags.lyrics.as_deref(), Some("old lyrics"));
        assert!(!outcome.cover_added);
        assert!(!outcome.lyrics_added);
        assert!(outcome.cover_already_present);
        assert!(outcome.lyrics_already_present);
    }

    #[test]
    fn test_empty_frames_filled_by_default() {
        let existing = TagSet {
            title: Some(String::new()),
            ..Default::default()
        };

        let (tags, outcome) = merge(&full_record(), &existing, &MergePolicy::default());

        assert_eq!(tags.title.as_deref(), Some("Bohemian Rhapsody"));
        assert!(outcome.fields_updated.contains(&"title"));
    }

    #[test]
    fn test_empty_frames_preserved_when_configured() {
        let existing = TagSet {
            title: Some(String::new()),
            ..Default::default()
        };
        let policy = MergePolicy {
            treat_empty_as_missing: false,
            ..Default::default()
        };

        let (tags, outcome) = merge(&full_record(), &existing, &policy);

        assert_eq!(tags.title.as_deref(), Some(""));
        assert!(outcome.fields_skipped.contains(&"title"));
    }

    #[test]
    fn test_overwrite_policy_replaces_fields() {
        let existing = TagSet {
            title: Some("Wrong Title".to_string()),
            ..Default::default()
        };

        let (tags, outcome) = merge(&full_record(), &existing, &MergePolicy::overwrite_all());

        assert_eq!(tags.title.as_deref(), Some("Bohemian Rhapsody"));
        assert!(outcome.changed);
    }

    #[test]
    fn test_preserve_policy_touches_nothing() {
        let policy = MergePolicy {
            title: FieldPolicy::Preserve,
            cover: FieldPolicy::Preserve,
            ..Default::default()
        };

        let (tags, outcome) = merge(&full_record(), &TagSet::default(), &policy);

        assert!(tags.title.is_none());
        assert!(tags.cover.is_none());
        assert!(outcome.fields_skipped.contains(&"title"));
    }

    #[test]
    fn test_empty_record_changes_nothing() {
        let existing = TagSet {
            title: Some("Title".to_string()),
            ..Default::default()
        };

        let (tags, outcome) = merge(&MetadataRecord::default(), &existing, &MergePolicy::default());

        assert!(!outcome.changed);
        assert_eq!(tags, existing);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let (once, first) = merge(&full_record(), &TagSet::default(), &MergePolicy::default());
        assert!(first.changed);

        let (twice, second) = merge(&full_record(), &once, &MergePolicy::default());
        assert!(!second.changed);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_overwrite_is_idempotent_too() {
        let policy = MergePolicy::overwrite_all();
        let (once, _) = merge(&full_record(), &TagSet::default(), &policy);
        let (twice, second) = merge(&full_record(), &once, &policy);

        assert!(!second.changed);
        assert_eq!(once, twice);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::enrichment::artwork::{CoverImage, ImageFormat};
    use proptest::prelude::*;

    fn opt_string() -> impl Strategy<Value = Option<String>> {
        prop::option::of(prop::string::string_regex("[ a-zA-Z0-9]{0,12}").unwrap())
    }

    fn opt_cover() -> impl Strategy<Value = Option<CoverImage>> {
        prop::option::of(
            prop::collection::vec(any::<u8>(), 4..32)
                .prop_map(|data| CoverImage::new(data, ImageFormat::Jpeg)),
        )
    }

    fn record() -> impl Strategy<Value = MetadataRecord> {
        (
            opt_string(),
            opt_string(),
            opt_string(),
            prop::option::of(1900u32..2100),
            opt_string(),
            opt_cover(),
            opt_string(),
        )
            .prop_map(|(title, artist, album, year, genre, cover, lyrics)| MetadataRecord {
                title,
                artist,
                album,
                year,
                genre,
                cover,
                lyrics,
            })
    }

    fn tag_set() -> impl Strategy<Value = TagSet> {
        (
            opt_string(),
            opt_string(),
            opt_string(),
            prop::option::of(1900u32..2100),
            opt_string(),
            opt_cover(),
            opt_string(),
        )
            .prop_map(|(title, artist, album, year, genre, cover, lyrics)| TagSet {
                title,
                artist,
                album,
                year,
                genre,
                cover,
                lyrics,
            })
    }

    fn policy() -> impl Strategy<Value = MergePolicy> {
        (any::<bool>(), any::<bool>()).prop_map(|(overwrite, treat_empty)| {
            let mut policy = if overwrite {
                MergePolicy::overwrite_all()
            } else {
                MergePolicy::default()
            };
            policy.treat_empty_as_missing = treat_empty;
            policy
        })
    }

    proptest! {
        /// Applying the same record twice never changes anything the second
        /// time, whatever the policy.
        #[test]
        fn merge_is_idempotent(record in record(), existing in tag_set(), policy in policy()) {
            let (once, _) = merge(&record, &existing, &policy);
            let (twice, second) = merge(&record, &once, &policy);

            prop_assert!(!second.changed);
            prop_assert_eq!(once, twice);
        }

        /// Under the default policy, populated frames survive any record.
        #[test]
        fn populated_frames_survive(record in record(), existing in tag_set()) {
            let (merged, _) = merge(&record, &existing, &MergePolicy::default());

            if let Some(ref title) = existing.title
                && !title.trim().is_empty() {
                prop_assert_eq!(merged.title.as_deref(), Some(title.as_str()));
            }
            if existing.cover.is_some() {
                prop_assert_eq!(&merged.cover, &existing.cover);
            }
        }
    }
}
