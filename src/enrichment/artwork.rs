//! Cover image download and validation shared by the cover providers.
//!
//! Whatever URL a provider hands back, the bytes only count as cover art if
//! they are really JPEG or PNG: HTML error pages, WebP and truncated bodies
//! all come back as a plain miss rather than ending up embedded in a file.

use std::fmt;

use crate::enrichment::domain::LookupError;

/// Image formats accepted for embedded cover art.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }

    /// Sniff the format from magic bytes. Anything outside the whitelist is
    /// rejected.
    pub fn sniff(bytes: &[u8]) -> Option<ImageFormat> {
        if bytes.len() >= 2 && bytes[0] == 0xFF && bytes[1] == 0xD8 {
            return Some(ImageFormat::Jpeg);
        }
        if bytes.len() >= 8 && bytes[..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] {
            return Some(ImageFormat::Png);
        }
        None
    }
}

/// A downloaded (or already embedded) cover image.
#[derive(Clone, PartialEq, Eq)]
pub struct CoverImage {
    pub data: Vec<u8>,
    pub format: ImageFormat,
}

impl CoverImage {
    pub fn new(data: Vec<u8>, format: ImageFormat) -> Self {
        Self { data, format }
    }
}

impl fmt::Debug for CoverImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoverImage")
            .field("format", &self.format)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Minimum plausible size for a real cover image.
const MIN_IMAGE_BYTES: usize = 100;

/// Download an image and validate it against the JPEG/PNG whitelist.
pub async fn download_image(
    http_client: &reqwest::Client,
    url: &str,
) -> Result<CoverImage, LookupError> {
    let response = http_client
        .get(url)
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

    // A declared non-image media type is a miss, not an error.
    if let Some(content_type) = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        && !content_type.to_lowercase().starts_with("image/")
    {
        return Err(LookupError::NotFound);
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| LookupError::Network(e.to_string()))?;

    if bytes.len() < MIN_IMAGE_BYTES {
        return Err(LookupError::NotFound);
    }

    match ImageFormat::sniff(&bytes) {
        Some(format) => Ok(CoverImage::new(bytes.to_vec(), format)),
        None => Err(LookupError::NotFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jpeg_bytes() -> Vec<u8> {
        let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0];
        data.extend(std::iter::repeat_n(0u8, 200));
        data
    }

    #[test]
    fn test_sniff_jpeg() {
        assert_eq!(ImageFormat::sniff(&jpeg_bytes()), Some(ImageFormat::Jpeg));
    }

    #[test]
    fn test_sniff_png() {
        let data = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00];
        assert_eq!(ImageFormat::sniff(&data), Some(ImageFormat::Png));
    }

    #[test]
    fn test_sniff_rejects_unknown() {
        // WebP: RIFF container, not on the whitelist.
        assert_eq!(ImageFormat::sniff(b"RIFF....WEBP"), None);
        assert_eq!(ImageFormat::sniff(b"<html></html>"), None);
        assert_eq!(ImageFormat::sniff(&[]), None);
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(ImageFormat::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(ImageFormat::Png.mime_type(), "image/png");
    }

    #[test]
    fn test_cover_image_debug_hides_bytes() {
        let cover = CoverImage::new(jpeg_bytes(), ImageFormat::Jpeg);
        let debug = format!("{:?}", cover);
        assert!(debug.contains("Jpeg"));
        assert!(!debug.contains("255, 216"));
    }
}
