//! Update command
//!
//! Force-refreshes the cached context library, regardless of whether a
//! cache already exists.

use anyhow::{Context, Result};
use console::style;

use crate::fetch;
use crate::library::Library;

/// Execute the update command
pub fn execute_update() -> Result<()> {
    let cache = Library::cache_dir();
    println!(
        "{} Refreshing context library cache at {}",
        style("→").blue(),
        style(cache.display()).cyan()
    );

    fetch::refresh_cache(&cache).context("failed to refresh the context library")?;

    if !Library::is_valid_root(&cache) {
        anyhow::bail!(
            "downloaded archive did not contain a usable context library (no globals/ directory)"
        );
    }

    println!("{} Context library updated", style("✓").green());
    Ok(())
}
