// src/download/mod.rs
// =============================================================================
// This module writes repository files to disk.
//
// Submodules:
// - atomic: Write a byte stream to <path>.temp, then rename it into place
// - fetch: Download one URL into one local file using `atomic`
// - repository: Walk a repository listing and download every file in order
//
// Downloads are strictly sequential: one file at a time, and the first
// failure stops the run.
// =============================================================================

mod atomic;
mod fetch;
mod repository;

pub use repository::{download_repo, DownloadOptions, DownloadSummary};
