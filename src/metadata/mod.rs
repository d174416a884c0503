//! Audio file tag access behind a narrow store interface.
//!
//! Uses the lofty crate for format-independent metadata access (MP3/ID3v2,
//! FLAC, OGG, M4A, WAV). The rest of the crate never touches the tag
//! container format: everything goes through [`TagStore`], which tests
//! replace with an in-memory implementation.

pub mod merge;

use lofty::config::WriteOptions;
use lofty::file::TaggedFileExt;
use lofty::picture::{MimeType, Picture, PictureType};
use lofty::probe::Probe;
use lofty::tag::{Accessor, ItemKey, Tag, TagExt};
use std::path::{Path, PathBuf};

use crate::enrichment::artwork::{CoverImage, ImageFormat};

/// A file's embedded metadata frames, lifted out of the container format.
///
/// Absent is `None`, present-but-empty is `Some("")` - the two are never
/// conflated here; the merge policy decides how empty frames are treated.
/// Cover and lyrics are singleton slots by construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagSet {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<u32>,
    pub genre: Option<String>,
    pub cover: Option<CoverImage>,
    pub lyrics: Option<String>,
}

impl TagSet {
    /// Whether any frame at all is populated.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.artist.is_none()
            && self.album.is_none()
            && self.year.is_none()
            && self.genre.is_none()
            && self.cover.is_none()
            && self.lyrics.is_none()
    }
}

/// Tag persistence errors. A read failure usually means the file is not
/// valid audio; a write failure loses that file's changes but never the
/// batch.
#[derive(Debug, thiserror::Error)]
pub enum TagStoreError {
    #[error("failed to read tags from {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("failed to write tags to {path}: {message}")]
    Write { path: PathBuf, message: String },
}

/// Narrow interface to the tag container.
pub trait TagStore: Send + Sync {
    /// Read the file's existing tag frames.
    fn read_tags(&self, path: &Path) -> Result<TagSet, TagStoreError>;

    /// Persist a tag set to the file. Present fields are written; absent
    /// fields leave the container untouched.
    fn write_tags(&self, path: &Path, tags: &TagSet) -> Result<(), TagStoreError>;
}

/// The real, lofty-backed tag store.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyTagStore;

impl TagStore for LoftyTagStore {
    fn read_tags(&self, path: &Path) -> Result<TagSet, TagStoreError> {
        let tagged_file = Probe::open(path)
            .map_err(|e| read_error(path, e))?
            .read()
            .map_err(|e| read_error(path, e))?;

        // Primary tag for the format, falling back to whatever is present.
        let tag = tagged_file.primary_tag().or_else(|| tagged_file.first_tag());

        let Some(tag) = tag else {
            return Ok(TagSet::default());
        };

        let cover = tag
            .pictures()
            .iter()
            .find(|p| p.pic_type() == PictureType::CoverFront)
            .or_else(|| tag.pictures().first())
            .map(picture_to_cover);

        Ok(TagSet {
            title: tag.title().map(|s| s.to_string()),
            artist: tag.artist().map(|s| s.to_string()),
            album: tag.album().map(|s| s.to_string()),
            year: tag.year(),
            genre: tag.genre().map(|s| s.to_string()),
            cover,
            lyrics: tag.get_string(&ItemKey::Lyrics).map(|s| s.to_string()),
        })
    }

    fn write_tags(&self, path: &Path, tags: &TagSet) -> Result<(), TagStoreError> {
        let mut tagged_file = Probe::open(path)
            .map_err(|e| write_error(path, e))?
            .read()
            .map_err(|e| write_error(path, e))?;

        let tag_type = tagged_file.primary_tag_type();
        let tag = if let Some(tag) = tagged_file.tag_mut(tag_type) {
            tag
        } else {
            tagged_file.insert_tag(Tag::new(tag_type));
            tagged_file.tag_mut(tag_type).expect("Just inserted tag")
        };

        if let Some(ref title) = tags.title {
            tag.set_title(title.clone());
        }
        if let Some(ref artist) = tags.artist {
            tag.set_artist(artist.clone());
        }
        if let Some(ref album) = tags.album {
            tag.set_album(album.clone());
        }
        if let Some(year) = tags.year {
            tag.set_year(year);
        }
        if let Some(ref genre) = tags.genre {
            tag.set_genre(genre.clone());
        }
        if let Some(ref lyrics) = tags.lyrics {
            tag.insert_text(ItemKey::Lyrics, lyrics.clone());
        }
        if let Some(ref cover) = tags.cover {
            // One front cover per file: drop any existing one before
            // pushing ours.
            tag.remove_picture_type(PictureType::CoverFront);
            tag.push_picture(cover_to_picture(cover));
        }

        tag.save_to_path(path, WriteOptions::default())
            .map_err(|e| write_error(path, e))
    }
}

fn read_error(path: &Path, e: impl std::fmt::Display) -> TagStoreError {
    TagStoreError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

fn write_error(path: &Path, e: impl std::fmt::Display) -> TagStoreError {
    TagStoreError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

fn picture_to_cover(picture: &Picture) -> CoverImage {
    let format = match picture.mime_type() {
        Some(MimeType::Png) => ImageFormat::Png,
        Some(MimeType::Jpeg) => ImageFormat::Jpeg,
        // Unknown container formats keep their bytes; jpeg is the safe label.
        _ => ImageFormat::sniff(picture.data()).unwrap_or(ImageFormat::Jpeg),
    };
    CoverImage::new(picture.data().to_vec(), format)
}

fn cover_to_picture(cover: &CoverImage) -> Picture {
    let mime = match cover.format {
        ImageFormat::Jpeg => MimeType::Jpeg,
        ImageFormat::Png => MimeType::Png,
    };
    Picture::new_unchecked(
        PictureType::CoverFront,
        Some(mime),
        None,
        cover.data.clone(),
    )
}
