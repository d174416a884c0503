//! Fallback resolution across provider chains.
//!
//! This is the heart of the pipeline: one uniform loop per facet group over
//! a declarative, priority-ordered provider list. Three chains run
//! independently - text metadata, cover art, lyrics - so a text miss never
//! costs us a cover and vice versa.
//!
//! Per facet, first success wins: a facet set by a higher-priority provider
//! is never replaced. The text chain keeps consulting lower-priority
//! providers while any of its five facets is still absent (Genius never
//! knows the album, iTunes does). The single-facet chains stop at the first
//! hit. Provider failures - misses and transient errors alike - fall
//! through to the next provider and are never surfaced to the caller: an
//! exhausted chain simply leaves its facets absent.

use std::sync::Arc;

use crate::config::Config;
use crate::enrichment::deezer::DeezerClient;
use crate::enrichment::domain::{LookupError, MetadataRecord, TrackIdentity};
use crate::enrichment::genius::GeniusClient;
use crate::enrichment::itunes::ItunesClient;
use crate::enrichment::lyricsovh::LyricsOvhClient;
use crate::enrichment::traits::{CoverArtApi, LyricsApi, TextMetadataApi};

/// Priority-ordered provider lists, one per facet group.
#[derive(Default)]
pub struct ProviderChains {
    pub text: Vec<Arc<dyn TextMetadataApi>>,
    pub cover: Vec<Arc<dyn CoverArtApi>>,
    pub lyrics: Vec<Arc<dyn LyricsApi>>,
}

impl ProviderChains {
    /// The default chains: Genius → iTunes → Deezer for text metadata,
    /// iTunes → Deezer → Genius for covers, Genius → Lyrics.ovh for lyrics.
    ///
    /// Genius requires an API token; without one it is left out of every
    /// chain and the keyless providers carry the load.
    pub fn from_config(config: &Config) -> Self {
        let timeout = config.providers.request_timeout();

        let itunes = Arc::new(ItunesClient::new(timeout));
        let deezer = Arc::new(DeezerClient::new(timeout));
        let lyricsovh = Arc::new(LyricsOvhClient::new(timeout));

        let mut chains = ProviderChains {
            text: vec![itunes.clone(), deezer.clone()],
            cover: vec![itunes, deezer],
            lyrics: vec![lyricsovh],
        };

        match config.credentials.genius_api_token.as_deref() {
            Some(token) if !token.trim().is_empty() => {
                let genius = Arc::new(GeniusClient::new(token, timeout));
                chains.text.insert(0, genius.clone());
                chains.cover.push(genius.clone());
                chains.lyrics.insert(0, genius);
            }
            _ => {
                tracing::info!("No Genius API token configured, skipping Genius lookups");
            }
        }

        chains
    }
}

/// Resolves a track identity into a consolidated metadata record.
pub struct Resolver {
    chains: ProviderChains,
}

impl Resolver {
    pub fn new(chains: ProviderChains) -> Self {
        Self { chains }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(ProviderChains::from_config(config))
    }

    /// Run every chain for the given identity and merge the partial results
    /// into one record.
    ///
    /// Never fails: facets no provider could answer stay absent. An
    /// unresolvable identity short-circuits to an empty record.
    pub async fn resolve(&self, identity: &TrackIdentity) -> MetadataRecord {
        let mut record = MetadataRecord::default();
        if !identity.is_resolvable() {
            return record;
        }

        for provider in &self.chains.text {
            if record.text_complete() {
                break;
            }
            match provider.lookup(identity).await {
                Ok(facets) => {
                    tracing::debug!(source = provider.source(), "adopted text facets");
                    record.adopt_text(facets);
                }
                Err(e) => log_miss("text", provider.source(), &e),
            }
        }

        for provider in &self.chains.cover {
            match provider.front_cover(identity).await {
                Ok(cover) => {
                    tracing::debug!(
                        source = provider.source(),
                        bytes = cover.data.len(),
                        "found cover art"
                    );
                    record.cover = Some(cover);
                    break;
                }
                Err(e) => log_miss("cover", provider.source(), &e),
            }
        }

        for provider in &self.chains.lyrics {
            match provider.lyrics(identity).await {
                Ok(lyrics) => {
                    tracing::debug!(source = provider.source(), "found lyrics");
                    record.lyrics = Some(lyrics);
                    break;
                }
                Err(e) => log_miss("lyrics", provider.source(), &e),
            }
        }

        record
    }
}

/// A miss moves on to the next provider in the chain; transient failures
/// are logged louder than a plain no-match.
fn log_miss(facet: &str, source: &str, err: &LookupError) {
    if err.is_transient() {
        tracing::warn!(facet, source, error = %err, "provider lookup failed, trying next");
    } else {
        tracing::debug!(facet, source, "no match, trying next");
    }
}
