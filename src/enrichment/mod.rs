//! Metadata enrichment - resolves artist/title pairs against external
//! providers and consolidates the partial answers into one record.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - Internal types that represent our business logic
//! - **API DTOs** (`genius/dto.rs`, `itunes/dto.rs`, ...) - Exact API response shapes
//! - **Adapters** - Convert DTOs to domain models
//! - **Clients** - HTTP clients for external APIs
//! - **Traits** (`traits.rs`) - Per-facet-group provider contracts, mockable in tests
//! - **Resolver** (`resolver.rs`) - Uniform fallback iteration over the provider chains
//!
//! This decoupling means:
//! 1. API changes don't ripple through our codebase
//! 2. We can test API contracts independently
//! 3. We can swap providers without changing the fallback logic
//!
//! # Usage
//!
//! ```ignore
//! use tagfill::enrichment::{Resolver, TrackIdentity};
//!
//! let resolver = Resolver::from_config(&config);
//! let record = resolver.resolve(&TrackIdentity::new("Queen", "Bohemian Rhapsody")).await;
//! println!("Album: {:?}, year: {:?}", record.album, record.year);
//! ```

pub mod artwork;
pub mod deezer;
pub mod domain;
pub mod genius;
pub mod itunes;
pub mod lyricsovh;
pub mod resolver;
pub mod traits;

pub use artwork::{CoverImage, ImageFormat};
pub use domain::{LookupError, MetadataRecord, TextFacets, TrackIdentity};
pub use resolver::{ProviderChains, Resolver};
