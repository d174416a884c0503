//! Lyrics.ovh API Data Transfer Objects
//!
//! The whole API is one endpoint returning `{"lyrics": "..."}` on a hit
//! and `{"error": "..."}` with a 404 on a miss.
//!
//! API Reference: https://lyricsovh.docs.apiary.io

use serde::{Deserialize, Serialize};

/// Lyrics lookup response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LyricsResponse {
    pub lyrics: String,
}

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_lyrics() {
        let json = r#"{"lyrics": "Is this the real life?\r\nIs this just fantasy?"}"#;
        let response: LyricsResponse = serde_json::from_str(json).expect("Should parse");
        assert!(response.lyrics.starts_with("Is this the real life?"));
    }

    #[test]
    fn test_error_body_does_not_parse_as_lyrics() {
        let json = r#"{"error": "No lyrics found"}"#;
        assert!(serde_json::from_str::<LyricsResponse>(json).is_err());
    }
}
