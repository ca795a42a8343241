//! Config loading for the command line.

use anyhow::Context;
use catamm_core::Config;
use std::path::Path;
use tracing::debug;

/// Load a config file, or the defaults when no path is given
pub fn load(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        debug!("No config file, using defaults");
        return Ok(Config::default());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config =
        Config::from_json(&text).with_context(|| format!("loading config {}", path.display()))?;

    debug!(path = %path.display(), rings = config.board.rings, "Loaded config");
    Ok(config)
}
