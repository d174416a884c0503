//! Show or update the stored configuration.

use anyhow::Context;

use crate::config;

/// With `--token`, store a Genius API token; otherwise print where the
/// config lives and what is set.
pub fn cmd_config(token: Option<&str>) -> anyhow::Result<()> {
    let mut config = config::load();

    if let Some(token) = token {
        config.credentials.genius_api_token = Some(token.to_string());
        config::save(&config).context("Failed to save config")?;
        println!("Genius API token saved.");
        return Ok(());
    }

    match config::config_path() {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: (no config directory available)"),
    }
    println!(
        "Genius API token: {}",
        if config.credentials.genius_api_token.is_some() {
            "set"
        } else {
            "not set"
        }
    );
    println!(
        "Provider timeout: {}s",
        config.providers.request_timeout_secs
    );
    println!("Batch parallelism: {}", config.batch.parallelism);
    println!(
        "Fill empty frames: {}",
        config.merge.fill_empty_frames
    );
    Ok(())
}
