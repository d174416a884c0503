//! Lyrics.ovh integration
//!
//! Fallback lyrics source, consulted when Genius has nothing. One GET per
//! lookup, no API key required.
//!
//! API docs: https://lyricsovh.docs.apiary.io

pub mod dto;
mod client;

pub use client::LyricsOvhClient;
