//! Resolve one artist/title pair and print the consolidated record.

use tokio::runtime::Runtime;

use crate::config;
use crate::enrichment::domain::TrackIdentity;
use crate::enrichment::Resolver;

/// Run the provider chains for a single identity, no file I/O.
pub fn cmd_lookup(
    rt: &Runtime,
    artist: Option<&str>,
    title: Option<&str>,
    genius_token: Option<&str>,
) -> anyhow::Result<()> {
    let identity = TrackIdentity {
        artist: artist.map(String::from),
        title: title.map(String::from),
    };
    anyhow::ensure!(
        identity.is_resolvable(),
        "provide at least one of --artist and --title"
    );

    let mut config = config::load();
    if let Some(token) = genius_token {
        config.credentials.genius_api_token = Some(token.to_string());
    }
    let resolver = Resolver::from_config(&config);

    println!("Looking up: {}\n", identity.query());
    let record = rt.block_on(resolver.resolve(&identity));

    if record.is_empty() {
        println!("No provider returned anything for this track.");
        return Ok(());
    }

    if let Some(ref artist) = record.artist {
        println!("  Artist: {artist}");
    }
    if let Some(ref title) = record.title {
        println!("  Title:  {title}");
    }
    if let Some(ref album) = record.album {
        println!("  Album:  {album}");
    }
    if let Some(year) = record.year {
        println!("  Year:   {year}");
    }
    if let Some(ref genre) = record.genre {
        println!("  Genre:  {genre}");
    }
    if let Some(ref cover) = record.cover {
        println!(
            "  Cover:  {} ({} bytes)",
            cover.format.mime_type(),
            cover.data.len()
        );
    }
    if let Some(ref lyrics) = record.lyrics {
        println!("  Lyrics: {} line(s)", lyrics.lines().count());
    }

    Ok(())
}
