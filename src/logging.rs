// src/logging.rs
// =============================================================================
// Diagnostic logging with `tracing`.
//
// Progress lines ("📥 Downloading ...") are printed to stdout by the download
// code itself. This module only sets up the stderr log stream for the
// tracing macros, whose level is picked with -v flags.
// =============================================================================

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Maps the number of -v flags to a level for this crate's own events
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber; call once, before any download starts
pub fn init(verbosity: u8) -> Result<()> {
    // Dependencies stay at warn; only our own events follow -v
    let filter = EnvFilter::new(format!("warn,anon_fetch={}", level_for(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to set up logging: {}", e))
}
