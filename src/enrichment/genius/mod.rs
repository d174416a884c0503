//! Genius API integration
//!
//! Genius is the primary text-metadata source (artist, title, release
//! year), the primary lyrics source (scraped from the song page, since
//! there is no lyrics endpoint), and a last-resort cover source via the
//! song art image.
//!
//! API docs: https://docs.genius.com

pub mod dto;
mod adapter;
mod client;

pub use adapter::{extract_lyrics, to_text_facets};
pub use client::GeniusClient;
