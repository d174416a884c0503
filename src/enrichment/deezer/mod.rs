//! Deezer API integration
//!
//! Fallback source for both facet groups it covers: text metadata
//! (artist, title, album) and cover art. No API key required.
//!
//! API docs: https://developers.deezer.com/api/search

pub mod dto;
mod adapter;
mod client;

pub use adapter::{cover_url, to_text_facets};
pub use client::DeezerClient;
