//! iTunes Search API integration
//!
//! Primary cover-art source (600x600 renditions of the catalog artwork)
//! and the secondary text source, notably the only one carrying album,
//! release date and genre in one response. No API key required.
//!
//! API docs: https://performance-partners.apple.com/search-api

pub mod dto;
mod adapter;
mod client;

pub use adapter::{artwork_url, to_text_facets};
pub use client::ItunesClient;
